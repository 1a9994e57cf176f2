//! Canonical marker table
//!
//! Maps free-form words onto canonical waymark types. Lookup order:
//! 1. canonical names and their aliases
//! 2. a small table of common spelling variations (plurals, hyphenation)
//!
//! Words that match neither are not markers and callers treat them as text.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Category a marker belongs to, used for display emphasis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerCategory {
    Work,
    Info,
    Caution,
    Workflow,
    Inquiry,
}

impl fmt::Display for MarkerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MarkerCategory::Work => "work",
            MarkerCategory::Info => "info",
            MarkerCategory::Caution => "caution",
            MarkerCategory::Workflow => "workflow",
            MarkerCategory::Inquiry => "inquiry",
        };
        write!(f, "{}", name)
    }
}

/// A canonical marker and the spellings accepted for it
#[derive(Debug)]
pub struct MarkerDefinition {
    pub name: &'static str,
    pub category: MarkerCategory,
    pub aliases: &'static [&'static str],
}

impl MarkerDefinition {
    const fn new(
        name: &'static str,
        category: MarkerCategory,
        aliases: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            category,
            aliases,
        }
    }
}

/// All canonical markers
pub static MARKERS: &[MarkerDefinition] = &[
    // work
    MarkerDefinition::new("todo", MarkerCategory::Work, &[]),
    MarkerDefinition::new("fix", MarkerCategory::Work, &["fixme"]),
    MarkerDefinition::new("wip", MarkerCategory::Work, &[]),
    MarkerDefinition::new("done", MarkerCategory::Work, &[]),
    MarkerDefinition::new("review", MarkerCategory::Work, &[]),
    MarkerDefinition::new("test", MarkerCategory::Work, &[]),
    MarkerDefinition::new("check", MarkerCategory::Work, &[]),
    // info
    MarkerDefinition::new("note", MarkerCategory::Info, &[]),
    MarkerDefinition::new("context", MarkerCategory::Info, &["why"]),
    MarkerDefinition::new("tldr", MarkerCategory::Info, &[]),
    MarkerDefinition::new("about", MarkerCategory::Info, &[]),
    MarkerDefinition::new("example", MarkerCategory::Info, &[]),
    MarkerDefinition::new("idea", MarkerCategory::Info, &[]),
    MarkerDefinition::new("comment", MarkerCategory::Info, &[]),
    // caution
    MarkerDefinition::new("warn", MarkerCategory::Caution, &["warning"]),
    MarkerDefinition::new("alert", MarkerCategory::Caution, &[]),
    MarkerDefinition::new("deprecated", MarkerCategory::Caution, &[]),
    MarkerDefinition::new("temp", MarkerCategory::Caution, &["tmp"]),
    MarkerDefinition::new("hack", MarkerCategory::Caution, &["stub"]),
    // workflow
    MarkerDefinition::new("blocked", MarkerCategory::Workflow, &[]),
    MarkerDefinition::new("needs", MarkerCategory::Workflow, &[]),
    // inquiry
    MarkerDefinition::new("question", MarkerCategory::Inquiry, &["ask"]),
];

/// Markers that get their own emphasis instead of the plain category style
pub const EMPHASIZED_MARKERS: &[&str] = &["todo", "fix", "tldr", "wip"];

/// Spelling variations accepted on top of canonical names and aliases
static VARIATIONS: &[(&str, &[&str])] = &[
    ("todo", &["todos", "to-do", "to-dos", "to do"]),
    ("fix", &["fixes", "fix-me", "fix me", "fixmes"]),
    ("tldr", &["tldrs", "tl-dr", "tl;dr"]),
    ("note", &["notes"]),
    ("warn", &["warns", "warnings"]),
    ("question", &["questions", "asks"]),
    ("idea", &["ideas"]),
    ("hack", &["hacks"]),
];

static LOOKUP: Lazy<HashMap<&'static str, &'static MarkerDefinition>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for def in MARKERS {
        map.insert(def.name, def);
        for alias in def.aliases {
            map.insert(*alias, def);
        }
    }
    map
});

static VARIATION_LOOKUP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    VARIATIONS
        .iter()
        .flat_map(|(canonical, spellings)| spellings.iter().map(move |s| (*s, *canonical)))
        .collect()
});

/// Resolve a free-form word to its canonical marker name
pub fn resolve(word: &str) -> Option<&'static str> {
    let normalized = word.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    if let Some(def) = LOOKUP.get(normalized.as_str()) {
        return Some(def.name);
    }

    VARIATION_LOOKUP.get(normalized.as_str()).copied()
}

/// Look up the definition for a marker name, alias or variation
pub fn definition(word: &str) -> Option<&'static MarkerDefinition> {
    resolve(word).and_then(|name| LOOKUP.get(name).copied())
}

/// Category of a marker, if it is a known one
pub fn category_of(word: &str) -> Option<MarkerCategory> {
    definition(word).map(|def| def.category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_canonical() {
        assert_eq!(resolve("todo"), Some("todo"));
        assert_eq!(resolve("tldr"), Some("tldr"));
        assert_eq!(resolve("question"), Some("question"));
    }

    #[test]
    fn test_resolve_is_case_and_space_insensitive() {
        assert_eq!(resolve("  TODO "), Some("todo"));
        assert_eq!(resolve("Fix"), Some("fix"));
    }

    #[test]
    fn test_resolve_aliases() {
        assert_eq!(resolve("fixme"), Some("fix"));
        assert_eq!(resolve("why"), Some("context"));
        assert_eq!(resolve("tmp"), Some("temp"));
        assert_eq!(resolve("ask"), Some("question"));
    }

    #[test]
    fn test_resolve_variations() {
        assert_eq!(resolve("todos"), Some("todo"));
        assert_eq!(resolve("to-do"), Some("todo"));
        assert_eq!(resolve("tldrs"), Some("tldr"));
        assert_eq!(resolve("notes"), Some("note"));
        assert_eq!(resolve("fix me"), Some("fix"));
    }

    #[test]
    fn test_resolve_unknown() {
        assert_eq!(resolve("banana"), None);
        assert_eq!(resolve(""), None);
        assert_eq!(resolve("   "), None);
        assert_eq!(resolve("@agent"), None);
    }

    #[test]
    fn test_category_of() {
        assert_eq!(category_of("todo"), Some(MarkerCategory::Work));
        assert_eq!(category_of("fixme"), Some(MarkerCategory::Work));
        assert_eq!(category_of("tldr"), Some(MarkerCategory::Info));
        assert_eq!(category_of("warning"), Some(MarkerCategory::Caution));
        assert_eq!(category_of("blocked"), Some(MarkerCategory::Workflow));
        assert_eq!(category_of("question"), Some(MarkerCategory::Inquiry));
        assert_eq!(category_of("nope"), None);
    }

    #[test]
    fn test_every_alias_resolves_to_its_marker() {
        for def in MARKERS {
            assert_eq!(resolve(def.name), Some(def.name));
            for alias in def.aliases {
                assert_eq!(resolve(alias), Some(def.name), "alias {}", alias);
            }
        }
    }

    #[test]
    fn test_category_display() {
        assert_eq!(MarkerCategory::Caution.to_string(), "caution");
    }
}
