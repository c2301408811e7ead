#![forbid(unsafe_code)]

//! Styled text spans and lines.
//!
//! A [`Span`] is a run of text under one style; a [`Line`] is a sequence
//! of spans painted left to right. Widths are display-cell widths
//! (wide CJK glyphs count as two), not byte or char counts.

use unicode_width::UnicodeWidthStr;

use crate::style::Style;

/// A styled run of text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    /// The text content.
    pub content: String,
    /// The style applied to every cell of the run.
    pub style: Style,
}

impl Span {
    /// Create a styled span.
    #[must_use]
    pub fn styled(content: impl Into<String>, style: Style) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    /// Create an unstyled span.
    #[must_use]
    pub fn raw(content: impl Into<String>) -> Self {
        Self::styled(content, Style::new())
    }

    /// Display width in terminal cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.content.width()
    }
}

impl From<&str> for Span {
    fn from(s: &str) -> Self {
        Span::raw(s)
    }
}

impl From<String> for Span {
    fn from(s: String) -> Self {
        Span::raw(s)
    }
}

/// A sequence of spans forming one row of text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    /// The spans, in paint order.
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line from spans.
    #[must_use]
    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Create a line holding a single unstyled span.
    #[must_use]
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            spans: vec![Span::raw(content)],
        }
    }

    /// Create a line holding a single styled span.
    #[must_use]
    pub fn styled(content: impl Into<String>, style: Style) -> Self {
        Self {
            spans: vec![Span::styled(content, style)],
        }
    }

    /// Append a span.
    pub fn push(&mut self, span: Span) {
        self.spans.push(span);
    }

    /// Total display width in terminal cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    /// Concatenated text content without styling.
    #[must_use]
    pub fn to_plain(&self) -> String {
        self.spans.iter().map(|s| s.content.as_str()).collect()
    }
}

impl From<Span> for Line {
    fn from(span: Span) -> Self {
        Line { spans: vec![span] }
    }
}

/// Truncate `text` to at most `max_width` display cells, appending `…`
/// when anything was cut.
///
/// A wide glyph that would straddle the boundary is dropped entirely.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1; // reserve one cell for the ellipsis
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Attrs, Style};

    #[test]
    fn span_width_counts_cells_not_bytes() {
        assert_eq!(Span::raw("abc").width(), 3);
        assert_eq!(Span::raw("Alícia").width(), 6);
        assert_eq!(Span::raw("漢字").width(), 4);
    }

    #[test]
    fn line_width_sums_spans() {
        let line = Line::from_spans(vec![Span::raw("ab"), Span::raw("漢")]);
        assert_eq!(line.width(), 4);
        assert_eq!(line.to_plain(), "ab漢");
    }

    #[test]
    fn styled_span_keeps_style() {
        let span = Span::styled("x", Style::new().bold());
        assert!(span.style.attrs.contains(Attrs::BOLD));
    }

    #[test]
    fn truncate_passes_short_text_through() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello", 5), "hello");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
    }

    #[test]
    fn truncate_zero_width_is_empty() {
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn truncate_drops_straddling_wide_glyph() {
        // "漢字" is 4 cells; width 4 fits, width 3 must cut before the
        // second glyph and spend one cell on the ellipsis.
        assert_eq!(truncate_to_width("漢字", 4), "漢字");
        assert_eq!(truncate_to_width("漢字", 3), "漢…");
    }
}
