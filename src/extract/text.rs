//! Span helpers for the immutable working-text pipeline. Every resolver
//! takes the text its predecessor left behind and returns a new value with
//! its own match removed, instead of mutating a shared buffer.

use std::ops::Range;

/// Finds `needle` as a whole word (or whole phrase) inside `haystack`:
/// neither end may touch an alphanumeric character.
pub(crate) fn word_span(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }

    let mut from = 0;
    while let Some(offset) = haystack[from..].find(needle) {
        let start = from + offset;
        let end = start + needle.len();

        let clear_before = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let clear_after = haystack[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());

        if clear_before && clear_after {
            return Some(start..end);
        }
        from = end;
    }

    None
}

/// Removes `span` from `text`, collapsing the cut edges into a single space.
pub(crate) fn strip_span(text: &str, span: Range<usize>) -> String {
    let before = text[..span.start].trim_end();
    let after = text[span.end..].trim_start();

    let mut out = String::with_capacity(before.len() + after.len() + 1);
    out.push_str(before);
    if !before.is_empty() && !after.is_empty() {
        out.push(' ');
    }
    out.push_str(after);
    out
}

/// Removes the first plain occurrence of `needle` (no boundary check).
/// Used to mirror a match found on the original text onto the working text.
pub(crate) fn strip_first_occurrence(text: &str, needle: &str) -> String {
    match text.find(needle) {
        Some(start) => strip_span(text, start..start + needle.len()),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_span_requires_clear_boundaries() {
        assert_eq!(word_span("beli susu besok", "besok"), Some(10..15));
        assert_eq!(word_span("pembesokan", "besok"), None);
    }

    #[test]
    fn word_span_matches_multi_word_phrases() {
        let text = "bayar listrik minggu depan pagi";
        assert_eq!(word_span(text, "minggu depan"), Some(14..26));
    }

    #[test]
    fn strip_span_collapses_surrounding_whitespace() {
        let text = "beli susu besok pagi";
        let span = word_span(text, "besok").unwrap();
        assert_eq!(strip_span(text, span), "beli susu pagi");
    }

    #[test]
    fn strip_first_occurrence_without_match_is_identity() {
        assert_eq!(strip_first_occurrence("beli susu", "besok"), "beli susu");
    }
}
