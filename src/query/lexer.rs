//! Query lexer
//!
//! Splits a free-form query such as `todo @agent #perf:hotpath !fix` into
//! classified tokens. Quoted phrases are kept together as a single text token.

use serde::Serialize;

use crate::query::markers;

/// Classification of a query token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryTokenKind {
    Type,
    Mention,
    Tag,
    Property,
    Text,
    Exclusion,
}

/// A classified query token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryToken {
    pub kind: QueryTokenKind,
    /// Token value; mentions and tags keep their sigil, exclusions drop the `!`
    pub value: String,
    /// Token exactly as written (quoted text keeps its quotes)
    pub raw: String,
}

impl QueryToken {
    fn new(kind: QueryTokenKind, value: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            raw: raw.into(),
        }
    }
}

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Normal,
    InQuotes,
}

/// Lex a query string into classified tokens
pub fn lex(query: &str) -> Vec<QueryToken> {
    let mut tokens = Vec::new();
    let mut state = LexState::Normal;
    let mut pending = String::new();

    for c in query.chars() {
        match (state, c) {
            (LexState::Normal, '"') => {
                flush(&mut pending, &mut tokens);
                state = LexState::InQuotes;
            }
            (LexState::InQuotes, '"') => {
                emit_quoted(&mut pending, &mut tokens, true);
                state = LexState::Normal;
            }
            (LexState::Normal, c) if c.is_whitespace() => flush(&mut pending, &mut tokens),
            (_, c) => pending.push(c),
        }
    }

    match state {
        LexState::Normal => flush(&mut pending, &mut tokens),
        // Unterminated quote keeps what was collected
        LexState::InQuotes => emit_quoted(&mut pending, &mut tokens, false),
    }

    log::trace!("lexed {:?} into {} tokens", query, tokens.len());
    tokens
}

fn flush(pending: &mut String, tokens: &mut Vec<QueryToken>) {
    if pending.is_empty() {
        return;
    }
    tokens.push(classify(pending));
    pending.clear();
}

fn emit_quoted(pending: &mut String, tokens: &mut Vec<QueryToken>, closed: bool) {
    if pending.is_empty() {
        return;
    }
    let raw = if closed {
        format!("\"{}\"", pending)
    } else {
        format!("\"{}", pending)
    };
    tokens.push(QueryToken::new(QueryTokenKind::Text, pending.as_str(), raw));
    pending.clear();
}

/// Classify one unquoted raw token
pub fn classify(raw: &str) -> QueryToken {
    if let Some(rest) = raw.strip_prefix('!') {
        return QueryToken::new(QueryTokenKind::Exclusion, rest, raw);
    }

    if raw.contains(':') && !raw.starts_with('#') && !raw.starts_with('@') {
        return QueryToken::new(QueryTokenKind::Property, raw, raw);
    }

    if raw.starts_with('@') {
        return QueryToken::new(QueryTokenKind::Mention, raw, raw);
    }

    if raw.starts_with('#') {
        return QueryToken::new(QueryTokenKind::Tag, raw, raw);
    }

    match markers::resolve(raw) {
        Some(canonical) => QueryToken::new(QueryTokenKind::Type, canonical, raw),
        None => QueryToken::new(QueryTokenKind::Text, raw, raw),
    }
}
