#![forbid(unsafe_code)]

//! Single-line edit buffer.
//!
//! Grapheme-cluster aware so multi-codepoint characters (an `í` typed
//! as base letter plus combining accent, emoji) edit as single units.
//! The cursor is a grapheme index; rendering converts it to display
//! cells.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A single-line text value with a grapheme cursor.
#[derive(Debug, Clone, Default)]
pub struct EditBuffer {
    value: String,
    /// Cursor position as a grapheme index in `[0, grapheme_count]`.
    cursor: usize,
}

impl EditBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The value with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    /// Whether the buffer holds no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// The cursor as a grapheme index.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display width in cells of the text before the cursor.
    #[must_use]
    pub fn width_before_cursor(&self) -> usize {
        self.value[..self.byte_offset(self.cursor)].width()
    }

    /// Clear the value and reset the cursor.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor. Returns `true` (the value
    /// always changes).
    pub fn insert_char(&mut self, c: char) -> bool {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
        true
    }

    /// Insert a string at the cursor (paste). Returns `true` if any
    /// text was inserted.
    pub fn insert_str(&mut self, s: &str) -> bool {
        if s.is_empty() {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.value.insert_str(at, s);
        self.cursor += s.graphemes(true).count();
        true
    }

    /// Remove the grapheme before the cursor. Returns `true` if one was
    /// removed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = self.byte_offset(self.cursor - 1);
        let end = self.byte_offset(self.cursor);
        self.value.replace_range(start..end, "");
        self.cursor -= 1;
        true
    }

    /// Remove the grapheme at the cursor. Returns `true` if one was
    /// removed.
    pub fn delete(&mut self) -> bool {
        let start = self.byte_offset(self.cursor);
        if start >= self.value.len() {
            return false;
        }
        let end = self.byte_offset(self.cursor + 1);
        self.value.replace_range(start..end, "");
        true
    }

    /// Move the cursor one grapheme left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor one grapheme right.
    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.grapheme_count());
    }

    /// Move the cursor to the start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor past the last grapheme.
    pub fn move_end(&mut self) {
        self.cursor = self.grapheme_count();
    }

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    /// Byte offset of the grapheme at `index`, or the end of the value
    /// when `index` is past the last grapheme.
    fn byte_offset(&self, index: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(index)
            .map_or(self.value.len(), |(offset, _)| offset)
    }
}
