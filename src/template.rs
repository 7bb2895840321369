//! Placeholder micro-syntax scanner.
//!
//! Markup templates embed placeholders of the form `{key}` or `{key:N}`,
//! where `key` names a value-key and `N` is a positive integer truncation
//! length. The scanner is a small explicit lexer — match `{`, key chars,
//! optional `:` + digits, `}` — so key extraction and length parsing stay
//! independently testable.
//!
//! Anything that does not lex as a placeholder (unbalanced braces, a `{`
//! inside the key, a non-numeric or zero length modifier) is passed through
//! verbatim. Malformed syntax is a silent pass-through, not an error.

/// A single placeholder occurrence inside a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// The exact matched text, braces included (e.g. `{value:60}`).
    pub raw: &'a str,
    /// The value-key between the braces. May be empty (`{}` is a valid
    /// placeholder for the empty key, which resolves to an empty value).
    pub key: &'a str,
    /// Truncation length from the `:N` modifier, if present.
    pub max_len: Option<usize>,
}

/// A template split into literal text runs and placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Placeholder(Placeholder<'a>),
}

/// Scan a template into segments.
///
/// Literal text between placeholders is preserved byte-for-byte, so
/// substituting each placeholder and concatenating reproduces the template
/// with only the placeholders replaced.
pub fn scan(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let bytes = template.as_bytes();
    let mut text_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'{' {
            pos += 1;
            continue;
        }
        match lex_placeholder(template, pos) {
            Some(placeholder) => {
                if text_start < pos {
                    segments.push(Segment::Text(&template[text_start..pos]));
                }
                pos += placeholder.raw.len();
                text_start = pos;
                segments.push(Segment::Placeholder(placeholder));
            }
            // Not a placeholder; the `{` stays literal text
            None => pos += 1,
        }
    }

    if text_start < bytes.len() {
        segments.push(Segment::Text(&template[text_start..]));
    }
    segments
}

/// Try to lex a placeholder starting at `open` (which must index a `{`).
fn lex_placeholder(template: &str, open: usize) -> Option<Placeholder<'_>> {
    let rest = &template[open + 1..];

    let key_len = rest
        .find(|c| c == '{' || c == '}' || c == ':')
        .unwrap_or(rest.len());
    let key = &rest[..key_len];
    let mut cursor = key_len;

    let max_len = match rest.as_bytes().get(cursor) {
        Some(b':') => {
            let digits = &rest[cursor + 1..];
            let digit_len = digits
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(digits.len());
            let parsed: usize = digits[..digit_len].parse().ok()?;
            // N is a positive integer; {key:0} is not a placeholder
            if parsed == 0 {
                return None;
            }
            cursor += 1 + digit_len;
            Some(parsed)
        }
        _ => None,
    };

    if rest.as_bytes().get(cursor) != Some(&b'}') {
        return None;
    }

    Some(Placeholder {
        raw: &template[open..open + 1 + cursor + 1],
        key,
        max_len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholders(template: &str) -> Vec<Placeholder<'_>> {
        scan(template)
            .into_iter()
            .filter_map(|s| match s {
                Segment::Placeholder(p) => Some(p),
                Segment::Text(_) => None,
            })
            .collect()
    }

    fn rebuild(template: &str) -> String {
        scan(template)
            .iter()
            .map(|s| match s {
                Segment::Text(t) => *t,
                Segment::Placeholder(p) => p.raw,
            })
            .collect()
    }

    // =========================================================================
    // Well-formed placeholders
    // =========================================================================

    #[test]
    fn plain_key() {
        let found = placeholders("<meta content=\"{value}\">");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key, "value");
        assert_eq!(found[0].max_len, None);
        assert_eq!(found[0].raw, "{value}");
    }

    #[test]
    fn key_with_truncation_modifier() {
        let found = placeholders("<title>{value:60}</title>");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key, "value");
        assert_eq!(found[0].max_len, Some(60));
        assert_eq!(found[0].raw, "{value:60}");
    }

    #[test]
    fn multiple_placeholders_in_order() {
        let found = placeholders("{a} and {b:5} and {a}");
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].key, "a");
        assert_eq!(found[1].key, "b");
        assert_eq!(found[1].max_len, Some(5));
        assert_eq!(found[2].key, "a");
    }

    #[test]
    fn empty_key_is_a_placeholder() {
        let found = placeholders("x{}y");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key, "");
    }

    #[test]
    fn surrounding_text_is_preserved() {
        let segments = scan("<title>{value}</title>");
        assert_eq!(
            segments,
            vec![
                Segment::Text("<title>"),
                Segment::Placeholder(Placeholder {
                    raw: "{value}",
                    key: "value",
                    max_len: None,
                }),
                Segment::Text("</title>"),
            ]
        );
    }

    // =========================================================================
    // Malformed syntax passes through verbatim
    // =========================================================================

    #[test]
    fn unclosed_brace_is_text() {
        assert_eq!(rebuild("<title>{value</title>"), "<title>{value</title>");
        assert!(placeholders("<title>{value</title>").is_empty());
    }

    #[test]
    fn stray_close_brace_is_text() {
        assert!(placeholders("a}b").is_empty());
        assert_eq!(rebuild("a}b"), "a}b");
    }

    #[test]
    fn nested_open_brace_recovers_inner_placeholder() {
        // The outer `{a` is literal; `{b}` still lexes
        let found = placeholders("{a{b}");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key, "b");
        assert_eq!(rebuild("{a{b}"), "{a{b}");
    }

    #[test]
    fn non_numeric_length_is_text() {
        assert!(placeholders("{value:abc}").is_empty());
    }

    #[test]
    fn trailing_garbage_after_digits_is_text() {
        assert!(placeholders("{value:60x}").is_empty());
    }

    #[test]
    fn zero_length_is_text() {
        assert!(placeholders("{value:0}").is_empty());
    }

    #[test]
    fn no_placeholders_is_single_text_segment() {
        let segments = scan("<meta charset=\"utf-8\">");
        assert_eq!(segments, vec![Segment::Text("<meta charset=\"utf-8\">")]);
    }

    #[test]
    fn empty_template_yields_no_segments() {
        assert!(scan("").is_empty());
    }
}
