//! Record matching
//!
//! Tests waymark records against a compiled [`FilterSpec`]. Tags, mentions
//! and properties are read from the record content with the content tokenizer.

use crate::core::model::{RecordSet, WaymarkRecord};
use crate::display::tokenizer::{tokenize, RenderTokenKind};
use crate::query::compiler::{FilterSpec, PropertyPredicate};
use crate::query::markers;

/// Tags, mentions and properties found in a record's content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFacets {
    pub tags: Vec<String>,
    pub mentions: Vec<String>,
    pub properties: Vec<(String, String)>,
}

impl ContentFacets {
    pub fn from_content(content: &str) -> Self {
        let mut facets = ContentFacets::default();
        for token in tokenize(content) {
            match token.kind {
                RenderTokenKind::Tag => facets.tags.push(token.value),
                RenderTokenKind::Mention => facets.mentions.push(token.value),
                RenderTokenKind::Property => {
                    if let Some((key, value)) = token.value.split_once(':') {
                        let value = unquote(value);
                        facets.collect_references(value);
                        facets.properties.push((key.to_string(), value.to_string()));
                    }
                }
                _ => {}
            }
        }
        facets
    }

    /// Tags and mentions inside a property value, e.g. `owner:@alice`
    fn collect_references(&mut self, value: &str) {
        for token in tokenize(value) {
            match token.kind {
                RenderTokenKind::Tag => self.tags.push(token.value),
                RenderTokenKind::Mention => self.mentions.push(token.value),
                _ => {}
            }
        }
    }

    fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    fn has_mention(&self, mention: &str) -> bool {
        self.mentions.iter().any(|m| m.eq_ignore_ascii_case(mention))
    }

    fn satisfies(&self, key: &str, predicate: &PropertyPredicate) -> bool {
        self.properties
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(key))
            .any(|(_, value)| match predicate {
                PropertyPredicate::Present => true,
                PropertyPredicate::Equals(expected) => value == expected,
            })
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .map(|v| v.strip_suffix('"').unwrap_or(v))
        .unwrap_or(value)
}

impl FilterSpec {
    /// Whether a record passes every inclusion and no exclusion
    pub fn matches(&self, record: &WaymarkRecord) -> bool {
        let marker = markers::resolve(&record.marker)
            .map(str::to_string)
            .unwrap_or_else(|| record.marker.to_lowercase());

        if !self.types.is_empty() && !self.types.iter().any(|t| *t == marker) {
            return false;
        }
        if self.exclusions.types.iter().any(|t| *t == marker) {
            return false;
        }

        let facets = ContentFacets::from_content(&record.content);

        if !self.mentions.iter().all(|m| facets.has_mention(m)) {
            return false;
        }
        if !self.tags.iter().all(|t| facets.has_tag(t)) {
            return false;
        }
        if !self
            .properties
            .iter()
            .all(|(key, predicate)| facets.satisfies(key, predicate))
        {
            return false;
        }
        if self.exclusions.mentions.iter().any(|m| facets.has_mention(m))
            || self.exclusions.tags.iter().any(|t| facets.has_tag(t))
        {
            return false;
        }

        let content = record.content.to_lowercase();
        self.text_terms
            .iter()
            .all(|term| content.contains(&term.to_lowercase()))
    }

    /// Keep the matching records, in input order
    pub fn apply(&self, records: RecordSet) -> RecordSet {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
