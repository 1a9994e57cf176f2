//! Renderer module
//!
//! Renders a RecordSet to different output formats: text, jsonl, json, md

use crate::core::model::RecordSet;
use crate::display::align::{render, render_lines, RenderOptions};
use crate::display::style::{AnsiStyle, PlainStyle, StyleCategory, StylePolicy};
use std::io::Write;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and display options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    pub color: bool,
    pub display: RenderOptions,
}

impl RenderConfig {
    /// Create a new render config with default options
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_display(mut self, display: RenderOptions) -> Self {
        self.display = display;
        self
    }
}

/// Renderer for record sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a record set to a string
    pub fn render(&self, records: &RecordSet) -> String {
        match self.config.format {
            OutputFormat::Text => self.render_text(records),
            OutputFormat::Jsonl => self.render_jsonl(records),
            OutputFormat::Json => self.render_json(records),
            OutputFormat::Markdown => self.render_markdown(records),
        }
    }

    /// Render to a writer
    pub fn render_to<W: Write>(&self, records: &RecordSet, mut writer: W) -> std::io::Result<()> {
        let output = self.render(records);
        if output.is_empty() {
            return Ok(());
        }
        writeln!(writer, "{}", output)
    }

    fn policy(&self) -> Box<dyn StylePolicy> {
        if self.config.color {
            Box::new(AnsiStyle)
        } else {
            Box::new(PlainStyle)
        }
    }

    /// Render as aligned text, one block per file
    fn render_text(&self, records: &RecordSet) -> String {
        let policy = self.policy();
        let display = &self.config.display;

        if display.compact {
            return render_lines(&records.records, display)
                .iter()
                .map(|line| line.paint(policy.as_ref()))
                .collect::<Vec<_>>()
                .join("\n");
        }

        records
            .group_by_file()
            .iter()
            .map(|group| {
                let mut block = vec![policy.paint(StyleCategory::FilePath, &group.file)];
                block.extend(
                    render_lines(&group.records, display)
                        .iter()
                        .map(|line| line.paint(policy.as_ref())),
                );
                block.join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, records: &RecordSet) -> String {
        records
            .records
            .iter()
            .filter_map(|record| {
                if self.config.pretty {
                    serde_json::to_string_pretty(record).ok()
                } else {
                    serde_json::to_string(record).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, records: &RecordSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&records.records).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&records.records).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown, one section per file
    fn render_markdown(&self, records: &RecordSet) -> String {
        let mut output = String::new();

        for group in records.group_by_file() {
            output.push_str(&format!("## `{}`\n\n", group.file));
            output.push_str("```text\n");
            for line in render(&group.records, &self.config.display) {
                output.push_str(&line);
                output.push('\n');
            }
            output.push_str("```\n\n");
        }

        output.trim_end().to_string()
    }
}
