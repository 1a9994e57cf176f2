//! Style policies
//!
//! Rendering only labels text with semantic categories. A [`StylePolicy`]
//! decides how each category is emphasized on screen.

use colored::Colorize;

use crate::display::tokenizer::{tokenize, RenderTokenKind};
use crate::query::markers::{self, MarkerCategory, EMPHASIZED_MARKERS};

/// Semantic category of a piece of output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleCategory<'a> {
    Tag,
    Mention,
    /// A namespaced tag such as `#auth/core` or `#perf:hotpath`
    ScopedReference,
    Property,
    SeparatorSigil,
    LineNumber,
    FilePath,
    Marker {
        name: &'a str,
        category: Option<MarkerCategory>,
    },
}

impl<'a> StyleCategory<'a> {
    /// Category for a marker written with optional signal characters
    pub fn marker(text: &'a str) -> Self {
        let name = text.trim_start_matches(['~', '*']);
        StyleCategory::Marker {
            name,
            category: markers::category_of(name),
        }
    }
}

/// Maps semantic categories to display emphasis
pub trait StylePolicy {
    fn paint(&self, category: StyleCategory<'_>, text: &str) -> String;

    /// Paint free content token by token
    fn paint_content(&self, content: &str) -> String {
        tokenize(content)
            .iter()
            .map(|token| match content_category(token.kind, &token.value) {
                Some(category) => self.paint(category, &token.value),
                None => token.value.clone(),
            })
            .collect()
    }
}

fn content_category(kind: RenderTokenKind, value: &str) -> Option<StyleCategory<'static>> {
    match kind {
        RenderTokenKind::Tag if value[1..].contains(['/', ':']) => {
            Some(StyleCategory::ScopedReference)
        }
        RenderTokenKind::Tag => Some(StyleCategory::Tag),
        RenderTokenKind::Mention => Some(StyleCategory::Mention),
        RenderTokenKind::Property => Some(StyleCategory::Property),
        RenderTokenKind::Text | RenderTokenKind::Space | RenderTokenKind::Comma => None,
    }
}

/// Leaves every category unstyled
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyle;

impl StylePolicy for PlainStyle {
    fn paint(&self, _category: StyleCategory<'_>, text: &str) -> String {
        text.to_string()
    }
}

/// ANSI colors via `colored`
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiStyle;

impl StylePolicy for AnsiStyle {
    fn paint(&self, category: StyleCategory<'_>, text: &str) -> String {
        match category {
            StyleCategory::Tag => text.cyan().to_string(),
            StyleCategory::ScopedReference => text.cyan().underline().to_string(),
            StyleCategory::Mention => text.yellow().to_string(),
            StyleCategory::Property => text.magenta().to_string(),
            StyleCategory::SeparatorSigil => text.dimmed().to_string(),
            StyleCategory::LineNumber => text.dimmed().to_string(),
            StyleCategory::FilePath => text.bold().underline().to_string(),
            StyleCategory::Marker { name, category } => paint_marker(name, category, text),
        }
    }
}

fn paint_marker(name: &str, category: Option<MarkerCategory>, text: &str) -> String {
    if EMPHASIZED_MARKERS.contains(&name) {
        return match name {
            "todo" => text.bright_yellow().bold().to_string(),
            "fix" => text.bright_red().bold().to_string(),
            "tldr" => text.bright_green().bold().to_string(),
            _ => text.bright_magenta().bold().to_string(),
        };
    }

    match category {
        Some(MarkerCategory::Work) => text.yellow().to_string(),
        Some(MarkerCategory::Info) => text.blue().to_string(),
        Some(MarkerCategory::Caution) => text.red().to_string(),
        Some(MarkerCategory::Workflow) => text.magenta().to_string(),
        Some(MarkerCategory::Inquiry) => text.green().to_string(),
        None => text.bold().to_string(),
    }
}
