//! Word-safe truncation for `{key:N}` placeholders.
//!
//! Policy:
//!
//! - Internal line breaks are collapsed into a single `"; "` separator
//!   before any length counting (blank lines dropped).
//! - "Visible" length counts only characters outside `<...>` spans, so
//!   embedded markup does not eat into the allowed length.
//! - The cut lands on a whitespace boundary, never inside a word, and
//!   maximizes: of all boundaries whose prefix fits, the longest wins.
//! - No ellipsis or "more" indicator is appended.
//! - A single word longer than the limit is hard-cut at the limit, the
//!   same fallback the slug truncation in static-site generators uses
//!   when no boundary exists.
//!
//! Input already within the limit is returned unchanged (after line
//! collapsing, which always applies).

/// Truncate `value` to at most `max` visible characters without cutting
/// inside a word.
pub fn truncate(value: &str, max: usize) -> String {
    let collapsed = collapse_lines(value);
    if visible_len(&collapsed) <= max {
        return collapsed;
    }

    let mut visible = 0usize;
    // Byte offset of the best whitespace-boundary cut found so far
    let mut boundary_cut = None;
    // Byte offset of the hard cut at exactly `max` visible chars
    let mut hard_cut = collapsed.len();
    let mut in_tag = false;

    for (idx, ch) in collapsed.char_indices() {
        if ch == '<' {
            in_tag = true;
        }
        let counted = !in_tag;
        if ch == '>' {
            in_tag = false;
        }
        if !counted {
            continue;
        }

        if ch.is_whitespace() && visible <= max {
            // The prefix ending here closes a word that still fits
            boundary_cut = Some(idx);
        }
        visible += 1;
        if visible > max {
            break;
        }
        hard_cut = idx + ch.len_utf8();
    }

    let cut = boundary_cut.unwrap_or(hard_cut);
    collapsed[..cut].trim_end().to_string()
}

/// Collapse internal line breaks into a single `"; "` separator.
///
/// Consecutive breaks and blank lines count as one break; leading and
/// trailing breaks disappear entirely.
fn collapse_lines(value: &str) -> String {
    if !value.contains(['\n', '\r']) {
        return value.to_string();
    }
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Count of visible characters: everything outside `<...>` spans.
fn visible_len(value: &str) -> usize {
    let mut count = 0usize;
    let mut in_tag = false;
    for ch in value.chars() {
        if ch == '<' {
            in_tag = true;
        }
        if !in_tag {
            count += 1;
        }
        if ch == '>' {
            in_tag = false;
        }
    }
    count
}
