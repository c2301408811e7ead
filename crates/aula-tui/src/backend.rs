#![forbid(unsafe_code)]

//! Crossterm-backed terminal: setup/teardown, event polling, and
//! dirty-row presentation.
//!
//! The terminal owns two buffers. Each draw paints the model into the
//! back buffer, diffs it against what is currently on screen, and
//! rewrites only the rows that changed. Raw mode, the alternate screen,
//! mouse capture, and bracketed paste are enabled on construction and
//! restored on drop, including drops caused by `?` propagation.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::style::{Attribute, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, event as cte, queue, terminal};
use unicode_width::UnicodeWidthChar;

use crate::buffer::{Buffer, Cell, Frame};
use crate::event::Event;
use crate::style::{Attrs, Color, Style};

/// A raw-mode terminal with double-buffered presentation.
pub struct Terminal {
    out: io::Stdout,
    prev: Buffer,
    next: Buffer,
}

impl Terminal {
    /// Enter raw mode, the alternate screen, mouse capture, and
    /// bracketed paste.
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(err) = crossterm::execute!(
            out,
            terminal::EnterAlternateScreen,
            cte::EnableMouseCapture,
            cte::EnableBracketedPaste,
            cursor::Hide,
        ) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        #[cfg(feature = "tracing")]
        tracing::info!("terminal session started");
        Ok(Self {
            out,
            prev: Buffer::new(0, 0),
            next: Buffer::new(0, 0),
        })
    }

    /// Paint one frame and present the changed rows.
    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        let resized = self.next.area() != crate::Rect::from_size(width, height);
        if resized {
            self.prev.resize(width, height);
            self.next.resize(width, height);
            queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
        } else {
            self.next.clear();
        }

        let cursor_pos = {
            let mut frame = Frame::new(&mut self.next);
            render(&mut frame);
            frame.cursor()
        };

        let dirty = if resized {
            (0..height).collect()
        } else {
            self.next.dirty_rows(&self.prev)
        };
        for y in dirty {
            let Some(row) = self.next.row(y) else { continue };
            queue!(self.out, cursor::MoveTo(0, y))?;
            for (style, text) in row_runs(row) {
                queue_style(&mut self.out, style)?;
                queue!(self.out, crossterm::style::Print(text))?;
            }
        }

        match cursor_pos {
            Some((x, y)) => queue!(self.out, cursor::MoveTo(x, y), cursor::Show)?,
            None => queue!(self.out, cursor::Hide)?,
        }
        self.out.flush()?;

        std::mem::swap(&mut self.prev, &mut self.next);
        Ok(())
    }

    /// Wait up to `timeout` for an input event.
    ///
    /// Returns `Ok(None)` on timeout or when the terminal delivered an
    /// event this application ignores.
    pub fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if cte::poll(timeout)? {
            let raw = cte::read()?;
            return Ok(Event::from_crossterm(raw));
        }
        Ok(None)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = crossterm::execute!(
            self.out,
            cte::DisableBracketedPaste,
            cte::DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
        );
        let _ = terminal::disable_raw_mode();
        #[cfg(feature = "tracing")]
        tracing::info!("terminal session restored");
    }
}

/// Group one row of cells into maximal same-style runs, skipping the
/// follower cell of each wide glyph.
fn row_runs(cells: &[Cell]) -> Vec<(Style, String)> {
    let mut runs: Vec<(Style, String)> = Vec::new();
    let mut skip = false;
    for cell in cells {
        if skip {
            skip = false;
            continue;
        }
        if cell.ch.width() == Some(2) {
            skip = true;
        }
        match runs.last_mut() {
            Some((style, text)) if *style == cell.style => text.push(cell.ch),
            _ => runs.push((cell.style, cell.ch.to_string())),
        }
    }
    runs
}

fn queue_style(out: &mut impl Write, style: Style) -> io::Result<()> {
    queue!(out, SetAttribute(Attribute::Reset))?;
    queue!(out, SetForegroundColor(map_color(style.fg)))?;
    queue!(out, SetBackgroundColor(map_color(style.bg)))?;
    if style.attrs.contains(Attrs::BOLD) {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.attrs.contains(Attrs::DIM) {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if style.attrs.contains(Attrs::ITALIC) {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if style.attrs.contains(Attrs::UNDERLINE) {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if style.attrs.contains(Attrs::REVERSE) {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    if style.attrs.contains(Attrs::STRIKE) {
        queue!(out, SetAttribute(Attribute::CrossedOut))?;
    }
    Ok(())
}

fn map_color(color: Option<Color>) -> crossterm::style::Color {
    match color {
        None | Some(Color::Reset) => crossterm::style::Color::Reset,
        Some(Color::Rgb { r, g, b }) => crossterm::style::Color::Rgb { r, g, b },
        Some(Color::Ansi256(n)) => crossterm::style::Color::AnsiValue(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(ch: char, style: Style) -> Cell {
        Cell { ch, style }
    }

    #[test]
    fn row_runs_groups_same_style() {
        let bold = Style::new().bold();
        let cells = vec![
            cell('a', Style::new()),
            cell('b', Style::new()),
            cell('c', bold),
        ];
        let runs = row_runs(&cells);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].1, "ab");
        assert_eq!(runs[1].1, "c");
        assert_eq!(runs[1].0, bold);
    }

    #[test]
    fn row_runs_skips_wide_follower() {
        let cells = vec![
            cell('漢', Style::new()),
            cell(' ', Style::new()), // follower
            cell('x', Style::new()),
        ];
        let runs = row_runs(&cells);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].1, "漢x");
    }

    #[test]
    fn map_color_translates_variants() {
        assert_eq!(map_color(None), crossterm::style::Color::Reset);
        assert_eq!(
            map_color(Some(Color::rgb(1, 2, 3))),
            crossterm::style::Color::Rgb { r: 1, g: 2, b: 3 }
        );
        assert_eq!(
            map_color(Some(Color::Ansi256(42))),
            crossterm::style::Color::AnsiValue(42)
        );
    }
}
