//! Waymark record model
//!
//! Records are produced by the external waymark parser and handed to this
//! crate as JSON. Every command works on these records before rendering output.

use serde::{Deserialize, Serialize};

/// Signal characters rendered in front of the marker
pub const RAISED_SIGNAL: char = '~';
pub const IMPORTANT_SIGNAL: char = '*';

/// Signals attached to a waymark
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signals {
    #[serde(default)]
    pub raised: bool,

    #[serde(default)]
    pub important: bool,
}

impl Signals {
    /// Prefix rendered before the marker, e.g. `~*`
    pub fn prefix(&self) -> String {
        let mut prefix = String::new();
        if self.raised {
            prefix.push(RAISED_SIGNAL);
        }
        if self.important {
            prefix.push(IMPORTANT_SIGNAL);
        }
        prefix
    }
}

/// A single parsed waymark
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaymarkRecord {
    /// Path relative to the workspace root, using '/' as separator
    pub file: String,

    /// First physical line (1-indexed)
    pub start_line: u32,

    /// Last physical line (1-indexed, inclusive)
    pub end_line: u32,

    /// Marker word as written, e.g. `todo`
    #[serde(rename = "type")]
    pub marker: String,

    #[serde(default)]
    pub signals: Signals,

    /// Content after the sigil; continuation lines are newline separated
    pub content: String,

    /// Original source lines of the waymark, when the parser kept them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl WaymarkRecord {
    /// Create a single-line record
    #[cfg(test)]
    pub fn new(
        file: impl Into<String>,
        line: u32,
        marker: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            start_line: line,
            end_line: line,
            marker: marker.into(),
            signals: Signals::default(),
            content: content.into(),
            raw: None,
        }
    }

    /// Set signals
    #[cfg(test)]
    pub fn with_signals(mut self, signals: Signals) -> Self {
        self.signals = signals;
        self
    }

    /// Attach the original source lines; the end line follows their count
    #[cfg(test)]
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let count = raw.lines().count().max(1) as u32;
        self.end_line = self.start_line + count - 1;
        self.raw = Some(raw);
        self
    }

    /// Marker with its signal prefix, e.g. `*todo`
    pub fn marker_with_signals(&self) -> String {
        format!("{}{}", self.signals.prefix(), self.marker)
    }

    /// Width of the signal prefix plus marker
    pub fn marker_width(&self) -> usize {
        self.signals.prefix().chars().count() + self.marker.chars().count()
    }
}

/// Records belonging to one file, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    pub file: String,
    pub records: Vec<WaymarkRecord>,
}

/// An ordered collection of records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    pub records: Vec<WaymarkRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: WaymarkRecord) {
        self.records.push(record);
    }

    /// Group records by file, keeping files in first-appearance order
    pub fn group_by_file(&self) -> Vec<FileGroup> {
        let mut groups: Vec<FileGroup> = Vec::new();
        for record in &self.records {
            match groups.iter_mut().find(|g| g.file == record.file) {
                Some(group) => group.records.push(record.clone()),
                None => groups.push(FileGroup {
                    file: record.file.clone(),
                    records: vec![record.clone()],
                }),
            }
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl IntoIterator for RecordSet {
    type Item = WaymarkRecord;
    type IntoIter = std::vec::IntoIter<WaymarkRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl FromIterator<WaymarkRecord> for RecordSet {
    fn from_iter<T: IntoIterator<Item = WaymarkRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
