#![forbid(unsafe_code)]

//! The committed tag row.
//!
//! Renders each tag as a chip with its own remove glyph. The row never
//! mutates the tag list: clicking a remove glyph emits
//! [`SearchAction::RemoveTag`] and the event stops there, so an owner
//! handler behind the chip never sees the click.

use aula_model::SearchTag;
use aula_tui::event::MouseEvent;
use aula_tui::geometry::Rect;
use aula_tui::style::{Color, Style};
use aula_tui::{Frame, Widget};
use unicode_width::UnicodeWidthStr;

use crate::search_box::{EventOutcome, SearchAction};

/// Visual styling for tag chips.
#[derive(Debug, Clone)]
pub struct TagRowStyle {
    /// A valid chip.
    pub chip: Style,
    /// An invalid chip (owner-computed flag), visibly distinct.
    pub chip_invalid: Style,
    /// The remove glyph, patched over the chip style.
    pub remove: Style,
}

impl Default for TagRowStyle {
    fn default() -> Self {
        Self {
            chip: Style::new().bg(Color::Ansi256(238)),
            chip_invalid: Style::new()
                .bg(Color::Ansi256(52))
                .fg(Color::Ansi256(210))
                .strike(),
            remove: Style::new().dim(),
        }
    }
}

/// Where one chip landed in the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChipLayout {
    index: usize,
    rect: Rect,
    remove_x: u16,
}

/// The removable-chip row for committed tags.
///
/// Stateless apart from styling; the owner passes the tag slice to
/// both [`render`](TagRow::render) and
/// [`handle_mouse`](TagRow::handle_mouse).
#[derive(Debug, Clone, Default)]
pub struct TagRow {
    style: TagRowStyle,
}

/// Remove glyph shown at the end of each chip.
const REMOVE_GLYPH: char = '✕';

impl TagRow {
    /// Create a tag row with default styling.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the styling (builder).
    #[must_use]
    pub fn with_style(mut self, style: TagRowStyle) -> Self {
        self.style = style;
        self
    }

    /// Paint the chips into one row of `area`. Chips that do not fit
    /// are dropped from the end.
    pub fn render(&self, tags: &[SearchTag], area: Rect, frame: &mut Frame) {
        for chip in Self::layouts(tags, area) {
            let tag = &tags[chip.index];
            let style = self.chip_style(tag);
            frame.fill(chip.rect, ' ', style);
            frame.print(
                chip.rect.x + 1,
                chip.rect.y,
                &tag.display_value,
                style,
                chip.remove_x,
            );
            frame.set_char(
                chip.remove_x,
                chip.rect.y,
                REMOVE_GLYPH,
                style.patch(self.style.remove),
            );
        }
    }

    /// Handle a mouse event against the rendered row.
    ///
    /// A left click on a chip's remove glyph requests removal of that
    /// tag; any other click inside a chip is consumed without effect,
    /// which is what keeps it from reaching handlers behind the row.
    pub fn handle_mouse(
        &self,
        mouse: &MouseEvent,
        tags: &[SearchTag],
        area: Rect,
    ) -> EventOutcome {
        if !mouse.is_left_down() {
            return EventOutcome::Ignored;
        }
        for chip in Self::layouts(tags, area) {
            if !chip.rect.contains(mouse.x, mouse.y) {
                continue;
            }
            if mouse.x == chip.remove_x {
                return EventOutcome::Action(SearchAction::RemoveTag(
                    tags[chip.index].value.clone(),
                ));
            }
            return EventOutcome::Consumed;
        }
        EventOutcome::Ignored
    }

    fn chip_style(&self, tag: &SearchTag) -> Style {
        if tag.is_valid {
            self.style.chip
        } else {
            self.style.chip_invalid
        }
    }

    /// Chip positions: ` label ✕ ` per chip with a one-cell gap.
    fn layouts(tags: &[SearchTag], area: Rect) -> Vec<ChipLayout> {
        let mut chips = Vec::new();
        if area.is_empty() {
            return chips;
        }
        let mut x = area.x;
        for (index, tag) in tags.iter().enumerate() {
            let label_width = tag.display_value.width() as u16;
            // space, label, space, glyph, space
            let width = label_width + 4;
            if x + width > area.right() {
                break;
            }
            chips.push(ChipLayout {
                index,
                rect: Rect::new(x, area.y, width, 1),
                remove_x: x + label_width + 2,
            });
            x += width + 1;
        }
        chips
    }
}
