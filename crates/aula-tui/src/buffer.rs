#![forbid(unsafe_code)]

//! Cell buffer and frame.
//!
//! Widgets paint into a [`Frame`], which wraps the current [`Buffer`]:
//! a dense grid of styled cells. The backend presents a buffer by
//! diffing it against the previously presented one and rewriting only
//! the rows that changed.
//!
//! Wide glyphs (display width 2) occupy their cell plus a follower
//! cell; the follower is blanked and skipped when presenting.

use unicode_width::UnicodeWidthChar;

use crate::geometry::Rect;
use crate::style::Style;
use crate::text::{Line, Span};

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The character shown in the cell. `' '` for blanks and for the
    /// follower cell of a wide glyph.
    pub ch: char,
    /// The cell's resolved style.
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::new(),
        }
    }
}

/// A dense grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    area: Rect,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a blank buffer of the given size.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            area: Rect::from_size(width, height),
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    /// The buffer's full area (origin 0,0).
    #[must_use]
    pub const fn area(&self) -> Rect {
        self.area
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Resize to new dimensions, clearing all content.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.area = Rect::from_size(width, height);
        self.cells.clear();
        self.cells
            .resize(width as usize * height as usize, Cell::default());
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if !self.area.contains(x, y) {
            return None;
        }
        Some(y as usize * self.area.width as usize + x as usize)
    }

    /// Read the cell at (x, y), if in bounds.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Write a cell at (x, y); out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// One row of cells, if in bounds.
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y >= self.area.height {
            return None;
        }
        let w = self.area.width as usize;
        let start = y as usize * w;
        Some(&self.cells[start..start + w])
    }

    /// Rows that differ from `prev`.
    ///
    /// A size change reports every row dirty.
    #[must_use]
    pub fn dirty_rows(&self, prev: &Buffer) -> Vec<u16> {
        if self.area != prev.area {
            return (0..self.area.height).collect();
        }
        (0..self.area.height)
            .filter(|&y| self.row(y) != prev.row(y))
            .collect()
    }
}

/// Mutable painting surface handed to widget render code.
#[derive(Debug)]
pub struct Frame<'a> {
    buffer: &'a mut Buffer,
    cursor: Option<(u16, u16)>,
}

impl<'a> Frame<'a> {
    /// Wrap a buffer for one render pass.
    #[must_use]
    pub fn new(buffer: &'a mut Buffer) -> Self {
        Self {
            buffer,
            cursor: None,
        }
    }

    /// The full drawable area.
    #[must_use]
    pub fn area(&self) -> Rect {
        self.buffer.area()
    }

    /// Request the terminal cursor at a position (used by text inputs).
    pub fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor = Some((x, y));
    }

    /// The requested cursor position, if any widget asked for one.
    #[must_use]
    pub const fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    /// Paint a single character.
    ///
    /// A wide character blanks its follower cell. Writes outside the
    /// buffer are ignored; a wide character whose follower would fall
    /// outside is dropped.
    pub fn set_char(&mut self, x: u16, y: u16, ch: char, style: Style) {
        let w = ch.width().unwrap_or(0);
        if w == 0 {
            return;
        }
        if w == 2 {
            if x.saturating_add(1) >= self.buffer.area().right() {
                return;
            }
            self.buffer.set(x, y, Cell { ch, style });
            self.buffer.set(x + 1, y, Cell { ch: ' ', style });
        } else {
            self.buffer.set(x, y, Cell { ch, style });
        }
    }

    /// Paint a string starting at (x, y), clipped to `max_right`
    /// (exclusive). Returns the x position after the last painted cell.
    pub fn print(&mut self, x: u16, y: u16, text: &str, style: Style, max_right: u16) -> u16 {
        let mut cx = x;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if cx.saturating_add(w) > max_right {
                break;
            }
            self.set_char(cx, y, ch, style);
            cx += w;
        }
        cx
    }

    /// Paint a span, clipped to `max_right`. Returns the next x.
    pub fn print_span(&mut self, x: u16, y: u16, span: &Span, max_right: u16) -> u16 {
        self.print(x, y, &span.content, span.style, max_right)
    }

    /// Paint a line of spans into one row of `area`, left-aligned.
    pub fn print_line(&mut self, area: Rect, line: &Line) {
        if area.is_empty() {
            return;
        }
        let mut x = area.x;
        for span in &line.spans {
            if x >= area.right() {
                break;
            }
            x = self.print_span(x, area.y, span, area.right());
        }
    }

    /// Fill a region with one character.
    pub fn fill(&mut self, area: Rect, ch: char, style: Style) {
        let clipped = self.buffer.area().intersection(&area);
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.buffer.set(x, y, Cell { ch, style });
            }
        }
    }

    /// Patch the style of every cell in a region, keeping characters.
    pub fn set_style(&mut self, area: Rect, style: Style) {
        let clipped = self.buffer.area().intersection(&area);
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                if let Some(cell) = self.buffer.get(x, y) {
                    let patched = Cell {
                        ch: cell.ch,
                        style: cell.style.patch(style),
                    };
                    self.buffer.set(x, y, patched);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Attrs, Color};

    fn frame_on(buffer: &mut Buffer) -> Frame<'_> {
        Frame::new(buffer)
    }

    #[test]
    fn blank_buffer_has_default_cells() {
        let buf = Buffer::new(4, 2);
        assert_eq!(buf.get(0, 0), Some(&Cell::default()));
        assert_eq!(buf.get(3, 1), Some(&Cell::default()));
        assert_eq!(buf.get(4, 0), None);
    }

    #[test]
    fn print_writes_characters_in_order() {
        let mut buf = Buffer::new(10, 1);
        let mut frame = frame_on(&mut buf);
        let next = frame.print(0, 0, "abc", Style::new(), 10);
        assert_eq!(next, 3);
        assert_eq!(buf.get(0, 0).map(|c| c.ch), Some('a'));
        assert_eq!(buf.get(2, 0).map(|c| c.ch), Some('c'));
    }

    #[test]
    fn print_clips_at_max_right() {
        let mut buf = Buffer::new(10, 1);
        let mut frame = frame_on(&mut buf);
        frame.print(0, 0, "abcdef", Style::new(), 3);
        assert_eq!(buf.get(2, 0).map(|c| c.ch), Some('c'));
        assert_eq!(buf.get(3, 0).map(|c| c.ch), Some(' '));
    }

    #[test]
    fn wide_char_blanks_follower() {
        let mut buf = Buffer::new(4, 1);
        let mut frame = frame_on(&mut buf);
        frame.print(0, 0, "漢x", Style::new(), 4);
        assert_eq!(buf.get(0, 0).map(|c| c.ch), Some('漢'));
        assert_eq!(buf.get(1, 0).map(|c| c.ch), Some(' '));
        assert_eq!(buf.get(2, 0).map(|c| c.ch), Some('x'));
    }

    #[test]
    fn wide_char_without_room_is_dropped() {
        let mut buf = Buffer::new(3, 1);
        let mut frame = frame_on(&mut buf);
        frame.print(0, 0, "ab漢", Style::new(), 3);
        assert_eq!(buf.get(2, 0).map(|c| c.ch), Some(' '));
    }

    #[test]
    fn set_style_patches_region_keeping_chars() {
        let mut buf = Buffer::new(5, 1);
        {
            let mut frame = frame_on(&mut buf);
            frame.print(0, 0, "hello", Style::new().fg(Color::rgb(9, 9, 9)), 5);
            frame.set_style(Rect::new(1, 0, 2, 1), Style::new().bold());
        }
        let cell = buf.get(1, 0).copied().unwrap();
        assert_eq!(cell.ch, 'e');
        assert!(cell.style.attrs.contains(Attrs::BOLD));
        assert_eq!(cell.style.fg, Some(Color::rgb(9, 9, 9)));
        assert!(!buf.get(0, 0).copied().unwrap().style.attrs.contains(Attrs::BOLD));
    }

    #[test]
    fn dirty_rows_reports_only_changed() {
        let mut prev = Buffer::new(4, 3);
        let mut next = prev.clone();
        {
            let mut frame = frame_on(&mut next);
            frame.print(0, 1, "hey", Style::new(), 4);
        }
        assert_eq!(next.dirty_rows(&prev), vec![1]);
        {
            let mut frame = frame_on(&mut prev);
            frame.print(0, 1, "hey", Style::new(), 4);
        }
        assert!(next.dirty_rows(&prev).is_empty());
    }

    #[test]
    fn dirty_rows_after_resize_is_everything() {
        let prev = Buffer::new(4, 2);
        let mut next = prev.clone();
        next.resize(5, 2);
        assert_eq!(next.dirty_rows(&prev), vec![0, 1]);
    }

    #[test]
    fn fill_clips_to_buffer() {
        let mut buf = Buffer::new(3, 2);
        {
            let mut frame = frame_on(&mut buf);
            frame.fill(Rect::new(2, 1, 10, 10), '#', Style::new());
        }
        assert_eq!(buf.get(2, 1).map(|c| c.ch), Some('#'));
        assert_eq!(buf.get(1, 1).map(|c| c.ch), Some(' '));
    }

    #[test]
    fn cursor_request_round_trips() {
        let mut buf = Buffer::new(3, 1);
        let mut frame = frame_on(&mut buf);
        assert_eq!(frame.cursor(), None);
        frame.set_cursor(2, 0);
        assert_eq!(frame.cursor(), Some((2, 0)));
    }
}
