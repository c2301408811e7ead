#![forbid(unsafe_code)]

//! Emphasis of matched substrings inside suggestion labels.
//!
//! Matching here is case-insensitive over the *raw* query, not the
//! diacritic-stripped one the suggestion filter uses. The asymmetry is
//! inherited behavior kept on purpose: typing "alicia" surfaces
//! "Alícia" (normalized match) with no visible emphasis (raw match
//! fails on the accent). See DESIGN.md before "fixing" this.

use aula_tui::style::Style;
use aula_tui::text::{Line, Span};

/// Wrap every case-insensitive occurrence of `raw_query` in `label`
/// with `emphasis`, leaving the rest styled with `base`.
///
/// Scans left to right with non-overlapping matches; each search
/// resumes immediately after the previous match ends. An empty query
/// returns the label unchanged under `base`.
#[must_use]
pub fn highlight(label: &str, raw_query: &str, base: Style, emphasis: Style) -> Line {
    if raw_query.is_empty() || label.is_empty() {
        return Line::styled(label, base);
    }

    let (lowered, offsets) = casefold_with_offsets(label);
    let needle = raw_query.to_lowercase();

    let mut spans = Vec::new();
    let mut from = 0;
    let mut plain_start = 0;
    while let Some(pos) = lowered[from..].find(&needle) {
        let start = from + pos;
        let end = start + needle.len();
        let orig_start = offsets[start];
        let orig_end = original_end(label, &offsets, orig_start, end);

        if orig_start > plain_start {
            spans.push(Span::styled(&label[plain_start..orig_start], base));
        }
        spans.push(Span::styled(&label[orig_start..orig_end], emphasis));
        plain_start = orig_end;
        from = end;
    }
    if plain_start < label.len() {
        spans.push(Span::styled(&label[plain_start..], base));
    }
    if spans.is_empty() {
        return Line::styled(label, base);
    }
    Line::from_spans(spans)
}

/// Lowercase `label` and record, for every byte of the lowered string,
/// the byte offset of the original character it came from. A final
/// sentinel entry maps one-past-the-end.
fn casefold_with_offsets(label: &str) -> (String, Vec<usize>) {
    let mut lowered = String::with_capacity(label.len());
    let mut offsets = Vec::with_capacity(label.len() + 1);
    for (orig_offset, ch) in label.char_indices() {
        for lc in ch.to_lowercase() {
            let before = lowered.len();
            lowered.push(lc);
            offsets.extend(std::iter::repeat_n(orig_offset, lowered.len() - before));
        }
    }
    offsets.push(label.len());
    (lowered, offsets)
}

/// Original byte offset where a match ending at lowered byte `end`
/// stops. Guards against a match ending mid-way through a character
/// whose lowercase form expands to several codepoints.
fn original_end(label: &str, offsets: &[usize], orig_start: usize, end: usize) -> usize {
    let mapped = offsets[end];
    if mapped > orig_start {
        return mapped;
    }
    label[orig_start..]
        .chars()
        .next()
        .map_or(label.len(), |c| orig_start + c.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aula_tui::style::Attrs;

    fn bold() -> Style {
        Style::new().bold()
    }

    fn emphasized(line: &Line) -> Vec<&str> {
        line.spans
            .iter()
            .filter(|s| s.style.attrs.contains(Attrs::BOLD))
            .map(|s| s.content.as_str())
            .collect()
    }

    #[test]
    fn empty_query_returns_label_unchanged() {
        let line = highlight("Alice Johnson", "", Style::new(), bold());
        assert_eq!(line.to_plain(), "Alice Johnson");
        assert!(emphasized(&line).is_empty());
    }

    #[test]
    fn single_match_is_emphasized() {
        let line = highlight("Alice Johnson", "john", Style::new(), bold());
        assert_eq!(line.to_plain(), "Alice Johnson");
        assert_eq!(emphasized(&line), vec!["John"]);
    }

    #[test]
    fn matching_is_case_insensitive_but_raw() {
        // Raw match: the accented label character does not equal the
        // plain query character, so nothing lights up even though the
        // suggestion filter would surface this label.
        let line = highlight("Alícia Márquez", "alicia", Style::new(), bold());
        assert_eq!(line.to_plain(), "Alícia Márquez");
        assert!(emphasized(&line).is_empty());
    }

    #[test]
    fn accented_query_matches_accented_label() {
        let line = highlight("Alícia Márquez", "alí", Style::new(), bold());
        assert_eq!(emphasized(&line), vec!["Alí"]);
    }

    #[test]
    fn all_occurrences_are_wrapped_non_overlapping() {
        let line = highlight("ababab", "aba", Style::new(), bold());
        // Search resumes after the first match: only one hit, the
        // overlapping one at offset 2 is skipped.
        assert_eq!(emphasized(&line), vec!["aba"]);
        assert_eq!(line.to_plain(), "ababab");

        let line = highlight("ana banana", "an", Style::new(), bold());
        assert_eq!(emphasized(&line), vec!["an", "an", "an"]);
    }

    #[test]
    fn whole_label_match_produces_single_emphasis_span() {
        let line = highlight("Maria", "maria", Style::new(), bold());
        assert_eq!(line.spans.len(), 1);
        assert_eq!(emphasized(&line), vec!["Maria"]);
    }

    #[test]
    fn plain_segments_keep_base_style() {
        let base = Style::new().dim();
        let line = highlight("Alice Johnson", "ice", base, bold());
        let dim_text: Vec<&str> = line
            .spans
            .iter()
            .filter(|s| s.style.attrs.contains(Attrs::DIM))
            .map(|s| s.content.as_str())
            .collect();
        assert_eq!(dim_text, vec!["Al", " Johnson"]);
    }
}
