//! Query API - find and query operations

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use crate::core::model::RecordSet;
use crate::core::records::load_records;
use crate::core::render::{RenderConfig, Renderer};
use crate::query::compiler::{compile_query, FilterSpec};

/// Read records from a file, or from stdin when the path is absent or `-`
pub fn read_records(path: Option<&Path>) -> Result<RecordSet> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("failed to open records file {}", path.display()))?;
            load_records(BufReader::new(file))
                .with_context(|| format!("failed to load records from {}", path.display()))
        }
        _ => load_records(io::stdin().lock()).context("failed to load records from stdin"),
    }
}

/// Compile a query and keep the matching records
pub fn find_records(records: RecordSet, query: &str) -> (FilterSpec, RecordSet) {
    let spec = compile_query(query);
    let matched = spec.apply(records);
    (spec, matched)
}

/// Run the find command
pub fn run_find(records: Option<&Path>, query: &[String], config: RenderConfig) -> Result<()> {
    let records = read_records(records)?;
    let total = records.len();
    let (spec, matched) = find_records(records, &query.join(" "));

    if spec.is_empty() {
        log::debug!("empty query, keeping every waymark");
    } else {
        log::debug!("compiled filter: {:?}", spec);
    }
    if matched.is_empty() {
        log::info!("no waymarks matched out of {}", total);
    } else {
        log::info!("{} of {} waymarks matched", matched.len(), total);
    }

    let renderer = Renderer::with_config(config);
    renderer.render_to(&matched, io::stdout().lock())?;

    Ok(())
}

/// Run the query command: print the compiled filter as JSON
pub fn run_query(query: &[String], pretty: bool) -> Result<()> {
    let spec = compile_query(&query.join(" "));
    let output = if pretty {
        serde_json::to_string_pretty(&spec)?
    } else {
        serde_json::to_string(&spec)?
    };
    println!("{}", output);

    Ok(())
}
