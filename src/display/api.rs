//! Display API - tokens and wrap operations

use anyhow::Result;

use crate::core::render::OutputFormat;
use crate::display::tokenizer::tokenize;
use crate::display::wrap::{wrap, WrapConfig};

/// Run the tokens command: print the render tokens of a content string
pub fn run_tokens(content: &str, format: OutputFormat, pretty: bool) -> Result<()> {
    let tokens = tokenize(content);

    let output = match (format, pretty) {
        (OutputFormat::Json, true) => serde_json::to_string_pretty(&tokens)?,
        (OutputFormat::Json, false) => serde_json::to_string(&tokens)?,
        _ => tokens
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?
            .join("\n"),
    };
    println!("{}", output);

    Ok(())
}

/// Run the wrap command: print content wrapped to the available width
pub fn run_wrap(content: &str, config: WrapConfig) -> Result<()> {
    log::debug!("wrapping into {} columns", config.available_width());
    for line in wrap(content, &config) {
        println!("{}", line);
    }

    Ok(())
}
