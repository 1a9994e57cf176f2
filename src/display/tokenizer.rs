//! Content tokenizer
//!
//! Splits waymark content into atomic render tokens: tags, mentions,
//! `key:value` properties, commas, whitespace runs and plain text.
//! Concatenating the token values always reproduces the input exactly.

use serde::Serialize;

/// Kind of a render token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderTokenKind {
    Text,
    Tag,
    Mention,
    Property,
    Space,
    Comma,
}

/// An atomic piece of content that is never split while wrapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderToken {
    pub kind: RenderTokenKind,
    pub value: String,
    pub can_break_before: bool,
}

impl RenderToken {
    fn new(kind: RenderTokenKind, value: String) -> Self {
        let can_break_before = matches!(
            kind,
            RenderTokenKind::Tag | RenderTokenKind::Mention | RenderTokenKind::Property
        );
        Self {
            kind,
            value,
            can_break_before,
        }
    }
}

fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '.' | '_' | '/' | ':' | '%' | '-')
}

fn is_mention_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '.' | '_' | '-')
}

fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-')
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Tokenize content into render tokens
pub fn tokenize(content: &str) -> Vec<RenderToken> {
    let chars: Vec<char> = content.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let (kind, end) = scan_sigil_run(&chars, pos, '#', is_tag_char, RenderTokenKind::Tag)
            .or_else(|| {
                scan_sigil_run(&chars, pos, '@', is_mention_char, RenderTokenKind::Mention)
            })
            .or_else(|| scan_property(&chars, pos).map(|end| (RenderTokenKind::Property, end)))
            .or_else(|| scan_blank(&chars, pos).map(|end| (RenderTokenKind::Space, end)))
            .unwrap_or_else(|| {
                if chars[pos] == ',' {
                    (RenderTokenKind::Comma, pos + 1)
                } else {
                    (RenderTokenKind::Text, scan_text(&chars, pos))
                }
            });

        tokens.push(RenderToken::new(kind, chars[pos..end].iter().collect()));
        pos = end;
    }

    tokens
}

/// `#` or `@` followed by an alphanumeric, then a run of allowed characters
fn scan_sigil_run(
    chars: &[char],
    start: usize,
    sigil: char,
    allowed: fn(char) -> bool,
    kind: RenderTokenKind,
) -> Option<(RenderTokenKind, usize)> {
    if chars[start] != sigil {
        return None;
    }
    match chars.get(start + 1) {
        Some(c) if c.is_alphanumeric() => {}
        _ => return None,
    }

    let mut end = start + 2;
    while end < chars.len() && allowed(chars[end]) {
        end += 1;
    }
    Some((kind, end))
}

fn key_run_end(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while end < chars.len() && is_key_char(chars[end]) {
        end += 1;
    }
    end
}

/// End of a `key:` prefix starting at `start` (index just past the colon)
fn key_prefix_end(chars: &[char], start: usize) -> Option<usize> {
    let end = key_run_end(chars, start);
    if end > start && chars.get(end) == Some(&':') {
        Some(end + 1)
    } else {
        None
    }
}

fn scan_property(chars: &[char], start: usize) -> Option<usize> {
    let value_start = key_prefix_end(chars, start)?;

    if chars.get(value_start) == Some(&'"') {
        let mut end = value_start + 1;
        while end < chars.len() {
            match chars[end] {
                '\\' => end += 2,
                '"' => return Some(end + 1),
                _ => end += 1,
            }
        }
        // Unterminated quote runs to the end of the content
        return Some(chars.len());
    }

    let mut end = value_start;
    while end < chars.len() && !chars[end].is_whitespace() && chars[end] != ',' {
        end += 1;
    }
    Some(end)
}

fn scan_blank(chars: &[char], start: usize) -> Option<usize> {
    let mut end = start;
    while end < chars.len() && is_blank(chars[end]) {
        end += 1;
    }
    (end > start).then_some(end)
}

// Stops before whitespace, `#`, `@`, `,` or a `key:` prefix, even mid-word.
// Each run of key characters is scanned once.
fn scan_text(chars: &[char], start: usize) -> usize {
    // A key run under `start` was already rejected as a property
    let mut end = if is_key_char(chars[start]) {
        key_run_end(chars, start)
    } else {
        start + 1
    };

    while end < chars.len() {
        let c = chars[end];
        if c.is_whitespace() || matches!(c, '#' | '@' | ',') {
            break;
        }
        if is_key_char(c) {
            let run_end = key_run_end(chars, end);
            if chars.get(run_end) == Some(&':') {
                break;
            }
            end = run_end;
        } else {
            end += 1;
        }
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(content: &str) -> Vec<(RenderTokenKind, String)> {
        tokenize(content)
            .into_iter()
            .map(|t| (t.kind, t.value))
            .collect()
    }

    fn joined(content: &str) -> String {
        tokenize(content).into_iter().map(|t| t.value).collect()
    }

    #[test]
    fn test_empty_content() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_mixed_content() {
        use RenderTokenKind::*;
        assert_eq!(
            summary("fix bug #perf @agent owner:@alice"),
            vec![
                (Text, "fix".to_string()),
                (Space, " ".to_string()),
                (Text, "bug".to_string()),
                (Space, " ".to_string()),
                (Tag, "#perf".to_string()),
                (Space, " ".to_string()),
                (Mention, "@agent".to_string()),
                (Space, " ".to_string()),
                (Property, "owner:@alice".to_string()),
            ]
        );
    }

    #[test]
    fn test_tag_characters() {
        let tokens = tokenize("#perf:hotpath/v1.2_x%-y!");
        assert_eq!(tokens[0].kind, RenderTokenKind::Tag);
        assert_eq!(tokens[0].value, "#perf:hotpath/v1.2_x%-y");
        assert_eq!(tokens[1].value, "!");
    }

    #[test]
    fn test_sigil_without_alphanumeric_is_text() {
        use RenderTokenKind::*;
        assert_eq!(
            summary("# @ #-x"),
            vec![
                (Text, "#".to_string()),
                (Space, " ".to_string()),
                (Text, "@".to_string()),
                (Space, " ".to_string()),
                (Text, "#-x".to_string()),
            ]
        );
    }

    #[test]
    fn test_mention_stops_at_colon() {
        let tokens = tokenize("@alice.b:rest");
        assert_eq!(tokens[0].kind, RenderTokenKind::Mention);
        assert_eq!(tokens[0].value, "@alice.b");
        assert_eq!(tokens[1].value, ":rest");
    }

    #[test]
    fn test_quoted_property_value() {
        let tokens = tokenize(r#"title:"a \"quoted\" value", next"#);
        assert_eq!(tokens[0].kind, RenderTokenKind::Property);
        assert_eq!(tokens[0].value, r#"title:"a \"quoted\" value""#);
        assert_eq!(tokens[1].kind, RenderTokenKind::Comma);
    }

    #[test]
    fn test_unterminated_quoted_property_consumes_rest() {
        let tokens = tokenize(r#"note:"never closed, really"#);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, RenderTokenKind::Property);
    }

    #[test]
    fn test_property_with_empty_value() {
        use RenderTokenKind::*;
        assert_eq!(
            summary("from: x"),
            vec![
                (Property, "from:".to_string()),
                (Space, " ".to_string()),
                (Text, "x".to_string()),
            ]
        );
    }

    #[test]
    fn test_property_value_stops_at_comma() {
        use RenderTokenKind::*;
        assert_eq!(
            summary("a:1,b:2"),
            vec![
                (Property, "a:1".to_string()),
                (Comma, ",".to_string()),
                (Property, "b:2".to_string()),
            ]
        );
    }

    #[test]
    fn test_property_value_may_hold_reference() {
        let tokens = tokenize("see:#auth/core");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, RenderTokenKind::Property);
    }

    #[test]
    fn test_text_stops_before_property_key_without_space() {
        use RenderTokenKind::*;
        assert_eq!(
            summary("wrapper.see:#auth/core"),
            vec![
                (Text, "wrapper.".to_string()),
                (Property, "see:#auth/core".to_string()),
            ]
        );
    }

    #[test]
    fn test_text_stops_before_key_after_punctuation_runs() {
        use RenderTokenKind::*;
        assert_eq!(
            summary("a-b.c_d.e:f"),
            vec![
                (Text, "a-b.c_d.".to_string()),
                (Property, "e:f".to_string()),
            ]
        );
    }

    #[test]
    fn test_long_word_scans_in_linear_time() {
        let word = "b".repeat(400_000);
        let started = std::time::Instant::now();
        let tokens = tokenize(&word);
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, RenderTokenKind::Text);
        assert_eq!(tokens[0].value.len(), word.len());

        let dotted = "ab.".repeat(100_000) + "key:value";
        let tokens = tokenize(&dotted);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].value, "key:value");
    }

    #[test]
    fn test_whitespace_run_collapsed_into_one_token() {
        let tokens = tokenize("a \t  b");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind, RenderTokenKind::Space);
        assert_eq!(tokens[1].value, " \t  ");
    }

    #[test]
    fn test_can_break_before() {
        let tokens = tokenize("x #t @m k:v , y");
        let breakable: Vec<_> = tokens
            .iter()
            .filter(|t| t.can_break_before)
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(breakable, vec!["#t", "@m", "k:v"]);
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            "fix bug #perf [[id]] @agent",
            "owner:@alice, priority:high,,  trailing  ",
            "weird ## @@ #. @. :: a: b:\"c d\\\" e",
            "line one\nline two\r\n\ttabbed",
            "unicode ünïcødé #tåg @mëntion kéy:välue 日本語",
            "http://example.com/path?x=1#frag",
            "\"",
            ":",
            "k:\"unterminated \\",
        ];
        for sample in samples {
            assert_eq!(joined(sample), sample, "round trip of {:?}", sample);
        }
    }
}
