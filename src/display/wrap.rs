//! Line wrapping
//!
//! Greedily packs content tokens into lines that fit the available width.
//! Tokens are never split unless a single token is wider than a whole line.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::display::tokenizer::{tokenize, RenderToken, RenderTokenKind};

/// Width used when nothing else is known
pub const DEFAULT_WIDTH: usize = 80;

/// Wrapping options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WrapConfig {
    /// Explicit terminal width; detected when absent
    pub width: Option<usize>,
    pub no_wrap: bool,
    /// Columns already used on the left of the content
    pub indent: usize,
}

impl WrapConfig {
    pub fn new(width: Option<usize>, indent: usize) -> Self {
        Self {
            width,
            no_wrap: false,
            indent,
        }
    }

    /// Columns left for content; never less than one
    pub fn available_width(&self) -> usize {
        let total = self.width.unwrap_or_else(detect_terminal_width);
        total.saturating_sub(self.indent).max(1)
    }
}

/// Detect the terminal width: `COLUMNS`, then the live terminal, then 80
pub fn detect_terminal_width() -> usize {
    let columns = std::env::var("COLUMNS").ok();
    let live = console::Term::stdout()
        .size_checked()
        .map(|(_rows, cols)| cols as usize);
    resolve_width(None, columns.as_deref(), live)
}

/// Width precedence: explicit > `COLUMNS` > live terminal > default
pub fn resolve_width(explicit: Option<usize>, columns: Option<&str>, live: Option<usize>) -> usize {
    if let Some(width) = explicit.filter(|w| *w > 0) {
        return width;
    }
    if let Some(width) = columns
        .and_then(|c| c.trim().parse::<usize>().ok())
        .filter(|w| *w > 0)
    {
        return width;
    }
    live.filter(|w| *w > 0).unwrap_or(DEFAULT_WIDTH)
}

/// Display width of a string in terminal columns
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Wrap content into lines no wider than the available width
pub fn wrap(content: &str, config: &WrapConfig) -> Vec<String> {
    if config.no_wrap {
        return vec![content.to_string()];
    }
    if content.trim().is_empty() {
        return vec![String::new()];
    }

    let available = config.available_width();
    if display_width(content) <= available {
        return vec![content.to_string()];
    }

    let tokens = tokenize(content);
    log::trace!(
        "wrapping {} tokens into {} columns",
        tokens.len(),
        available
    );
    wrap_tokens(&tokens, available)
}

fn wrap_tokens(tokens: &[RenderToken], available: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut previous: Option<RenderTokenKind> = None;

    for (index, token) in tokens.iter().enumerate() {
        let token_width = display_width(&token.value);

        if token.kind == RenderTokenKind::Space {
            previous = Some(RenderTokenKind::Space);
            // Spaces never start a line
            if current.is_empty() {
                continue;
            }
            let next_width = tokens
                .get(index + 1)
                .map(|next| display_width(&next.value))
                .unwrap_or(0);
            if display_width(&current) + token_width + next_width > available {
                flush(&mut current, &mut lines);
            } else {
                current.push_str(&token.value);
            }
            continue;
        }

        let can_break = token.can_break_before
            || (token.kind == RenderTokenKind::Text && previous == Some(RenderTokenKind::Space));
        previous = Some(token.kind);

        if display_width(&current) + token_width <= available {
            current.push_str(&token.value);
            continue;
        }

        if !current.is_empty() {
            if !can_break {
                // Unbreakable runs overflow rather than being cut apart
                current.push_str(&token.value);
                continue;
            }
            flush(&mut current, &mut lines);
        }

        if token_width > available {
            let mut fragments = split_to_width(&token.value, available);
            current = fragments.pop().unwrap_or_default();
            lines.extend(fragments);
        } else {
            current.push_str(&token.value);
        }
    }

    flush(&mut current, &mut lines);

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn flush(current: &mut String, lines: &mut Vec<String>) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        lines.push(trimmed.to_string());
    }
    current.clear();
}

/// Slice a string into consecutive fragments of at most `width` columns
fn split_to_width(value: &str, width: usize) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut fragment = String::new();
    let mut used = 0;

    for c in value.chars() {
        let char_width = c.width().unwrap_or(0);
        if used + char_width > width && !fragment.is_empty() {
            fragments.push(std::mem::take(&mut fragment));
            used = 0;
        }
        fragment.push(c);
        used += char_width;
    }
    if !fragment.is_empty() {
        fragments.push(fragment);
    }
    fragments
}
