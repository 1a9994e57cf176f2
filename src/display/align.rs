//! Aligned waymark rendering
//!
//! Renders the waymarks of one file so that every `:::` sigil in the group
//! lands in the same column:
//!
//! ```text
//!  9:  todo ::: tighten retry loop #perf
//! 10:        ::: continuation text
//! 12:   fix ::: handle empty input @alice
//! 13:   ref ::: #auth/core
//! ```
//!
//! Compact mode drops the shared columns and prints `path:line  type ::: content`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::model::WaymarkRecord;
use crate::core::util::{collapse_lines, digit_count};
use crate::display::style::{StyleCategory, StylePolicy};
use crate::display::wrap::{display_width, wrap, WrapConfig};

/// Separator between a waymark's type and its content
pub const SIGIL: &str = ":::";

/// Minimum spaces between the line number and the type column
const TYPE_GAP: usize = 2;

const MIN_LINE_NUMBER_WIDTH: usize = 2;

/// Continuation line: optional comment leader, optional bare key, then the sigil
static CONTINUATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\p{L}\p{N}]*?(?:(?P<key>[\p{L}\p{N}][\p{L}\p{N}_-]*)\s*)?:::\s?(?P<text>.*)$")
        .expect("Invalid CONTINUATION_RE regex")
});

/// Display options for a file group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub compact: bool,
    pub no_wrap: bool,
    pub width: Option<usize>,
}

/// Column widths shared by every line of a file group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentContext {
    pub line_number_width: usize,
    pub type_column_width: usize,
}

impl AlignmentContext {
    pub fn for_records(records: &[WaymarkRecord]) -> Self {
        let max_line = records.iter().map(|r| r.end_line).max().unwrap_or(0);
        let line_number_width = digit_count(max_line).max(MIN_LINE_NUMBER_WIDTH);

        let type_column_width = records
            .iter()
            .flat_map(|record| {
                let keys = continuation_lines(record)
                    .into_iter()
                    .filter_map(|line| line.key.map(|k| display_width(&k)));
                std::iter::once(record.marker_width()).chain(keys)
            })
            .max()
            .unwrap_or(0);

        Self {
            line_number_width,
            type_column_width,
        }
    }
}

/// A physical line after the first line of a waymark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationLine {
    pub line: u32,
    /// Set for property-as-marker lines such as `// ref ::: #auth/core`
    pub key: Option<String>,
    pub text: String,
}

/// Classify the physical lines following a waymark's first line
pub fn continuation_lines(record: &WaymarkRecord) -> Vec<ContinuationLine> {
    let raw_lines: Vec<&str> = record
        .raw
        .as_deref()
        .map(|raw| raw.lines().collect())
        .unwrap_or_default();

    if raw_lines.len() > 1 {
        return raw_lines
            .iter()
            .enumerate()
            .skip(1)
            .map(|(offset, raw)| classify_continuation(record.start_line + offset as u32, raw))
            .collect();
    }

    record
        .content
        .lines()
        .enumerate()
        .skip(1)
        .map(|(offset, text)| ContinuationLine {
            line: record.start_line + offset as u32,
            key: None,
            text: text.trim().to_string(),
        })
        .collect()
}

fn classify_continuation(line: u32, raw: &str) -> ContinuationLine {
    match CONTINUATION_RE.captures(raw) {
        Some(caps) => ContinuationLine {
            line,
            key: caps.name("key").map(|m| m.as_str().to_string()),
            text: caps
                .name("text")
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default(),
        },
        None => ContinuationLine {
            line,
            key: None,
            text: raw.trim().to_string(),
        },
    }
}

/// Role of a piece of a rendered line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRole {
    FilePath,
    LineNumber,
    /// Spacing and punctuation
    Gutter,
    Marker,
    PropertyKey,
    Sigil,
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub role: SegmentRole,
    pub text: String,
}

impl Segment {
    fn new(role: SegmentRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// One output line, kept as labelled segments until it is painted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedLine {
    pub segments: Vec<Segment>,
}

impl RenderedLine {
    fn push(&mut self, role: SegmentRole, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.segments.push(Segment::new(role, text));
        }
    }

    /// Text without any styling
    pub fn plain(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Text painted with a style policy
    pub fn paint(&self, policy: &dyn StylePolicy) -> String {
        self.segments
            .iter()
            .map(|segment| match segment.role {
                SegmentRole::FilePath => policy.paint(StyleCategory::FilePath, &segment.text),
                SegmentRole::LineNumber => policy.paint(StyleCategory::LineNumber, &segment.text),
                SegmentRole::Marker => {
                    policy.paint(StyleCategory::marker(&segment.text), &segment.text)
                }
                SegmentRole::PropertyKey => policy.paint(StyleCategory::Property, &segment.text),
                SegmentRole::Sigil => policy.paint(StyleCategory::SeparatorSigil, &segment.text),
                SegmentRole::Content => policy.paint_content(&segment.text),
                SegmentRole::Gutter => segment.text.clone(),
            })
            .collect()
    }
}

/// Render a file group as plain lines
pub fn render(records: &[WaymarkRecord], options: &RenderOptions) -> Vec<String> {
    render_lines(records, options)
        .iter()
        .map(RenderedLine::plain)
        .collect()
}

/// Render a file group as labelled lines
pub fn render_lines(records: &[WaymarkRecord], options: &RenderOptions) -> Vec<RenderedLine> {
    if options.compact {
        return records
            .iter()
            .flat_map(|record| render_compact(record, options))
            .collect();
    }

    let context = AlignmentContext::for_records(records);
    let mut lines = Vec::new();

    for record in records {
        let first = record.content.lines().next().unwrap_or("");
        let label = Segment::new(SegmentRole::Marker, record.marker_with_signals());
        push_aligned(&mut lines, &context, record.start_line, Some(label), first, options);

        for continuation in continuation_lines(record) {
            let label = continuation
                .key
                .map(|key| Segment::new(SegmentRole::PropertyKey, key));
            push_aligned(
                &mut lines,
                &context,
                continuation.line,
                label,
                &continuation.text,
                options,
            );
        }
    }

    lines
}

fn push_aligned(
    lines: &mut Vec<RenderedLine>,
    context: &AlignmentContext,
    line_number: u32,
    label: Option<Segment>,
    content: &str,
    options: &RenderOptions,
) {
    let label_width = label.as_ref().map(|l| display_width(&l.text)).unwrap_or(0);
    let padding = TYPE_GAP + context.type_column_width.saturating_sub(label_width);
    // number, ':', padding, label, ' ::: '
    let indent = context.line_number_width + 1 + padding + label_width + SIGIL.len() + 2;

    let wrapped = wrap(
        content,
        &WrapConfig {
            width: options.width,
            no_wrap: options.no_wrap,
            indent,
        },
    );

    let mut first = RenderedLine::default();
    first.push(
        SegmentRole::LineNumber,
        format!("{:>width$}", line_number, width = context.line_number_width),
    );
    first.push(SegmentRole::Gutter, ":");
    first.push(SegmentRole::Gutter, " ".repeat(padding));
    if let Some(label) = label {
        first.segments.push(label);
    }
    first.push(SegmentRole::Gutter, " ");
    first.push(SegmentRole::Sigil, SIGIL);
    push_content(&mut first, wrapped.first().map(String::as_str).unwrap_or(""));
    lines.push(first);

    for rest in wrapped.iter().skip(1) {
        let mut line = RenderedLine::default();
        line.push(SegmentRole::Gutter, " ".repeat(indent));
        line.push(SegmentRole::Content, rest.as_str());
        lines.push(line);
    }
}

fn push_content(line: &mut RenderedLine, content: &str) {
    if !content.is_empty() {
        line.push(SegmentRole::Gutter, " ");
        line.push(SegmentRole::Content, content);
    }
}

fn render_compact(record: &WaymarkRecord, options: &RenderOptions) -> Vec<RenderedLine> {
    let mut first = RenderedLine::default();
    first.push(SegmentRole::FilePath, record.file.as_str());
    first.push(SegmentRole::Gutter, ":");
    first.push(SegmentRole::LineNumber, record.start_line.to_string());
    first.push(SegmentRole::Gutter, "  ");
    first.push(SegmentRole::Marker, record.marker_with_signals());
    first.push(SegmentRole::Gutter, " ");
    first.push(SegmentRole::Sigil, SIGIL);

    // prefix plus the space before the content
    let indent = display_width(&first.plain()) + 1;
    let content = collapse_lines(&record.content);
    let wrapped = wrap(
        &content,
        &WrapConfig {
            width: options.width,
            no_wrap: options.no_wrap,
            indent,
        },
    );

    push_content(&mut first, wrapped.first().map(String::as_str).unwrap_or(""));
    let mut lines = vec![first];
    for rest in wrapped.iter().skip(1) {
        let mut line = RenderedLine::default();
        line.push(SegmentRole::Gutter, " ".repeat(indent));
        line.push(SegmentRole::Content, rest.as_str());
        lines.push(line);
    }
    lines
}
