//! Query compiler
//!
//! Folds lexed query tokens into a [`FilterSpec`] consumed by the matching stage.

use serde::ser::Serializer;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::query::lexer::{lex, QueryToken, QueryTokenKind};
use crate::query::markers;

/// Property predicate: an exact value or mere presence of the key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyPredicate {
    Equals(String),
    Present,
}

impl Serialize for PropertyPredicate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropertyPredicate::Equals(value) => serializer.serialize_str(value),
            PropertyPredicate::Present => serializer.serialize_bool(true),
        }
    }
}

/// Values that reject a record when matched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Exclusions {
    pub types: Vec<String>,
    pub mentions: Vec<String>,
    pub tags: Vec<String>,
}

impl Exclusions {
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.mentions.is_empty() && self.tags.is_empty()
    }
}

/// Structured filter compiled from a query string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    pub types: Vec<String>,
    pub mentions: Vec<String>,
    pub tags: Vec<String>,
    pub properties: BTreeMap<String, PropertyPredicate>,
    pub exclusions: Exclusions,
    pub text_terms: Vec<String>,
}

impl FilterSpec {
    /// True when the filter would accept every record
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.mentions.is_empty()
            && self.tags.is_empty()
            && self.properties.is_empty()
            && self.exclusions.is_empty()
            && self.text_terms.is_empty()
    }
}

/// Compile lexed tokens into a filter
pub fn compile(tokens: &[QueryToken]) -> FilterSpec {
    let mut spec = FilterSpec::default();

    for token in tokens {
        match token.kind {
            QueryTokenKind::Type => spec.types.push(token.value.clone()),
            QueryTokenKind::Mention => spec.mentions.push(token.value.clone()),
            QueryTokenKind::Tag => spec.tags.push(token.value.clone()),
            QueryTokenKind::Text => spec.text_terms.push(token.value.clone()),
            QueryTokenKind::Property => add_property(&mut spec, &token.value),
            QueryTokenKind::Exclusion => add_exclusion(&mut spec.exclusions, &token.value),
        }
    }

    spec
}

/// Lex and compile in one step
pub fn compile_query(query: &str) -> FilterSpec {
    compile(&lex(query))
}

fn add_property(spec: &mut FilterSpec, value: &str) {
    let Some((key, val)) = value.split_once(':') else {
        return;
    };
    if key.is_empty() {
        return;
    }

    let predicate = if val.is_empty() {
        PropertyPredicate::Present
    } else {
        PropertyPredicate::Equals(val.to_string())
    };
    spec.properties.insert(key.to_string(), predicate);
}

// Unresolvable exclusions are dropped rather than turned into text terms.
fn add_exclusion(exclusions: &mut Exclusions, value: &str) {
    if value.starts_with('@') {
        exclusions.mentions.push(value.to_string());
    } else if value.starts_with('#') {
        exclusions.tags.push(value.to_string());
    } else if let Some(canonical) = markers::resolve(value) {
        exclusions.types.push(canonical.to_string());
    } else {
        log::debug!("dropping unresolvable exclusion {:?}", value);
    }
}
