//! Record loading
//!
//! Reads waymark records emitted by the parser, either as JSON Lines
//! (one record per line) or as a single JSON array.

use std::io::Read;
use thiserror::Error;

use crate::core::model::{RecordSet, WaymarkRecord};

/// Errors raised while loading records
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to read records: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid record array: {0}")]
    Array(#[source] serde_json::Error),
}

/// Load records from a reader
pub fn load_records<R: Read>(mut reader: R) -> Result<RecordSet, RecordError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_records(&input)
}

/// Parse records from JSONL or JSON array text
pub fn parse_records(input: &str) -> Result<RecordSet, RecordError> {
    if input.trim_start().starts_with('[') {
        let records: Vec<WaymarkRecord> =
            serde_json::from_str(input).map_err(RecordError::Array)?;
        return Ok(records.into_iter().collect());
    }

    let mut set = RecordSet::new();
    for (index, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str::<WaymarkRecord>(line).map_err(|source| {
            RecordError::Parse {
                line: index + 1,
                source,
            }
        })?;
        set.push(record);
    }

    log::debug!("loaded {} waymark records", set.len());
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE_A: &str =
        r#"{"file":"a.rs","start_line":1,"end_line":1,"type":"todo","content":"one"}"#;
    const LINE_B: &str =
        r#"{"file":"b.rs","start_line":7,"end_line":7,"type":"fix","content":"two"}"#;

    #[test]
    fn test_parse_jsonl() {
        let input = format!("{}\n\n{}\n", LINE_A, LINE_B);
        let set = parse_records(&input).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.records[1].marker, "fix");
    }

    #[test]
    fn test_parse_json_array() {
        let input = format!("  [{}, {}]", LINE_A, LINE_B);
        let set = parse_records(&input).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_records("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_error_reports_line() {
        let input = format!("{}\nnot json\n", LINE_A);
        let err = parse_records(&input).unwrap_err();
        assert!(matches!(err, RecordError::Parse { line: 2, .. }));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_load_records_from_reader() {
        let set = load_records(LINE_A.as_bytes()).unwrap();
        assert_eq!(set.records[0].file, "a.rs");
    }
}
