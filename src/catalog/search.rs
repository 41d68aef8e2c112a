//! Text matching for catalog search and result highlighting.
//!
//! Matching is a case-insensitive substring test; there is no ranking.
//! Highlighting returns plain segments so callers decide how to render a
//! match (`<mark>` in HTML, bold in the terminal).

use super::types::NodeRecord;

/// Shortest term (in chars) that counts as an active search.
pub const MIN_SEARCH_LEN: usize = 2;

/// Whether `term` is long enough to run a search.
///
/// Blank terms never are, regardless of length.
pub fn is_active_term(term: &str) -> bool {
    !term.trim().is_empty() && term.chars().count() >= MIN_SEARCH_LEN
}

/// Check a node's name, short description and keywords against a
/// lowercased term.
pub(super) fn node_matches(node: &NodeRecord, term_lower: &str) -> bool {
    contains_lower(&node.name, term_lower)
        || contains_lower(&node.short_description, term_lower)
        || node
            .search_keywords
            .iter()
            .any(|keyword| contains_lower(keyword, term_lower))
}

#[inline]
fn contains_lower(haystack: &str, term_lower: &str) -> bool {
    haystack.to_lowercase().contains(term_lower)
}

// ============================================================================
// Highlighting
// ============================================================================

/// A run of text, marked when it matched the search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self { text: text.to_owned(), highlighted: false }
    }

    fn marked(text: &str) -> Self {
        Self { text: text.to_owned(), highlighted: true }
    }
}

/// Split `text` into segments, marking every case-insensitive occurrence
/// of `term`.
///
/// Matches are found left to right and never overlap. Inactive terms
/// (see [`is_active_term`]) yield the whole text as one plain segment.
/// Concatenating the segment texts always gives back `text`.
pub fn highlight(text: &str, term: &str) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }
    if !is_active_term(term) {
        return vec![Segment::plain(text)];
    }

    let needle: Vec<char> = term.chars().collect();
    let chars: Vec<(usize, char)> = text.char_indices().collect();

    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while i + needle.len() <= chars.len() {
        let is_match = needle
            .iter()
            .zip(&chars[i..])
            .all(|(a, (_, b))| chars_eq_ignore_case(*a, *b));

        if !is_match {
            i += 1;
            continue;
        }

        let start = chars[i].0;
        let end = chars.get(i + needle.len()).map_or(text.len(), |(idx, _)| *idx);
        if plain_start < start {
            segments.push(Segment::plain(&text[plain_start..start]));
        }
        segments.push(Segment::marked(&text[start..end]));
        plain_start = end;
        i += needle.len();
    }

    if plain_start < text.len() {
        segments.push(Segment::plain(&text[plain_start..]));
    }
    segments
}

#[inline]
fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    fn marked(segments: &[Segment]) -> Vec<&str> {
        segments
            .iter()
            .filter(|s| s.highlighted)
            .map(|s| s.text.as_str())
            .collect()
    }

    #[test]
    fn test_is_active_term() {
        assert!(!is_active_term(""));
        assert!(!is_active_term("a"));
        assert!(!is_active_term("  "));
        assert!(!is_active_term("\t\n"));
        assert!(is_active_term("ab"));
        assert!(is_active_term(" a"));
        // Two chars, even when they are multi-byte
        assert!(is_active_term("€€"));
    }

    #[test]
    fn test_highlight_single_match() {
        let segments = highlight("Is Nearly Equal (Float)", "float");
        assert_eq!(marked(&segments), vec!["Float"]);
        assert_eq!(joined(&segments), "Is Nearly Equal (Float)");
        assert_eq!(segments.len(), 3);
    }

    #[test]
    fn test_highlight_multiple_matches() {
        let segments = highlight("Array Union of array", "ARRAY");
        assert_eq!(marked(&segments), vec!["Array", "array"]);
        assert!(segments[0].highlighted);
        assert_eq!(joined(&segments), "Array Union of array");
    }

    #[test]
    fn test_highlight_short_term_is_plain() {
        let segments = highlight("Timer Loop", "t");
        assert_eq!(segments, vec![Segment::plain("Timer Loop")]);
    }

    #[test]
    fn test_highlight_no_match() {
        let segments = highlight("Variance", "xyz");
        assert_eq!(segments, vec![Segment::plain("Variance")]);
    }

    #[test]
    fn test_highlight_empty_text() {
        assert!(highlight("", "abc").is_empty());
    }

    #[test]
    fn test_highlight_special_characters_are_literal() {
        // Regex metacharacters in the term match literally
        let segments = highlight("Vector (2D) * scale", "(2d)");
        assert_eq!(marked(&segments), vec!["(2D)"]);
    }

    #[test]
    fn test_highlight_unicode_boundaries() {
        let segments = highlight("Angle in °C and °c", "°c");
        assert_eq!(marked(&segments), vec!["°C", "°c"]);
        assert_eq!(joined(&segments), "Angle in °C and °c");
    }

    #[test]
    fn test_highlight_non_overlapping() {
        let segments = highlight("aaaa", "aa");
        assert_eq!(marked(&segments), vec!["aa", "aa"]);
        let segments = highlight("aaa", "aa");
        assert_eq!(marked(&segments), vec!["aa"]);
        assert_eq!(joined(&segments), "aaa");
    }
}
