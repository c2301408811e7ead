#![forbid(unsafe_code)]

//! The roster search box.
//!
//! Composes the edit buffer, the debouncer, the suggestion filter, and
//! the highlighted dropdown into one widget. The widget never touches
//! its owner's state: event handlers return an [`EventOutcome`], and
//! the owner applies any [`SearchAction`] to its own tag list before
//! re-rendering.
//!
//! # Navigation state
//!
//! The highlighted suggestion is `active: Option<usize>`; `None` means
//! free text (no highlight). Transitions, meaningful only while
//! suggestions exist (Escape always applies):
//!
//! - Down: `None → 0`, `i → i+1`; past the end wraps to `0` with
//!   `loop_navigation`, else stays at the last row.
//! - Up: `i → i-1`; below zero (including from `None`) wraps to the
//!   last row with `loop_navigation`, else back to `None`.
//! - Enter/Tab with non-empty trimmed input: commit the highlighted
//!   suggestion if any, else the raw trimmed text; either way the
//!   whole search resets.
//! - Escape: unconditional full reset.
//!
//! Every suggestion recomputation resets `active` to `None`.

use std::time::{Duration, Instant};

use aula_model::UserRecord;
use aula_tui::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent};
use aula_tui::geometry::Rect;
use aula_tui::style::{Color, Style};
use aula_tui::text::truncate_to_width;
use aula_tui::{Frame, Widget};

use crate::debounce::{DEBOUNCE_DELAY, Debouncer};
use crate::grade::GradePattern;
use crate::highlight::highlight;
use crate::input::EditBuffer;
use crate::suggest::{DisplayNameFn, SuggestConfig, suggest};

/// A typed command emitted by the search widgets for the owner to
/// apply. The owner classifies, validates, deduplicates (or not), and
/// stores tags; the widgets only ever request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    /// Commit a non-empty trimmed value as a new tag.
    AddTag(String),
    /// Remove the tag with this raw value.
    RemoveTag(String),
}

/// What an event handler did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Not handled; the owner may interpret the event.
    Ignored,
    /// Handled, nothing for the owner to apply.
    Consumed,
    /// Handled and produced a command for the owner.
    Action(SearchAction),
}

/// Tunables for the search box.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Minimum trimmed query length before suggestions appear.
    pub min_chars: usize,
    /// Maximum suggestions shown.
    pub limit: usize,
    /// Whether arrow navigation wraps around the ends of the list.
    pub loop_navigation: bool,
    /// Quiescence window between typing and recomputation.
    pub debounce: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_chars: 2,
            limit: 5,
            loop_navigation: false,
            debounce: DEBOUNCE_DELAY,
        }
    }
}

/// Visual styling for the search box.
#[derive(Debug, Clone)]
pub struct SearchBoxStyle {
    /// The input line.
    pub input: Style,
    /// Placeholder text when the input is empty.
    pub placeholder: Style,
    /// A dropdown row.
    pub row: Style,
    /// The highlighted dropdown row.
    pub row_active: Style,
    /// Emphasis for matched substrings.
    pub emphasis: Style,
}

impl Default for SearchBoxStyle {
    fn default() -> Self {
        Self {
            input: Style::new(),
            placeholder: Style::new().dim(),
            row: Style::new().bg(Color::Ansi256(236)),
            row_active: Style::new().bg(Color::Ansi256(240)).bold(),
            emphasis: Style::new().bold(),
        }
    }
}

/// The incremental suggestion/tag search box.
#[derive(Debug)]
pub struct SearchBox {
    config: SearchConfig,
    pattern: GradePattern,
    display_name: DisplayNameFn,
    placeholder: String,
    style: SearchBoxStyle,
    input: EditBuffer,
    debouncer: Debouncer,
    /// Display names of the current suggestions, roster order.
    suggestions: Vec<String>,
    /// Highlighted suggestion; `None` is the free-text state.
    active: Option<usize>,
}

impl SearchBox {
    /// Create a search box with default configuration.
    #[must_use]
    pub fn new() -> Self {
        let config = SearchConfig::default();
        Self {
            debouncer: Debouncer::new(config.debounce),
            config,
            pattern: GradePattern::default(),
            display_name: UserRecord::display_name,
            placeholder: String::new(),
            style: SearchBoxStyle::default(),
            input: EditBuffer::new(),
            suggestions: Vec::new(),
            active: None,
        }
    }

    /// Replace the configuration (builder).
    #[must_use]
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.debouncer = Debouncer::new(config.debounce);
        self.config = config;
        self
    }

    /// Replace the grade-code recognizer (builder).
    #[must_use]
    pub fn with_pattern(mut self, pattern: GradePattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Replace the display-name extractor (builder).
    #[must_use]
    pub fn with_display_name(mut self, display_name: DisplayNameFn) -> Self {
        self.display_name = display_name;
        self
    }

    /// Set the placeholder text (builder).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Replace the styling (builder).
    #[must_use]
    pub fn with_style(mut self, style: SearchBoxStyle) -> Self {
        self.style = style;
        self
    }

    /// The in-progress query text.
    #[must_use]
    pub fn query(&self) -> &str {
        self.input.value()
    }

    /// The current suggestion labels.
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// The highlighted suggestion index, `None` for free text.
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// The grade-code recognizer, shared with the owner so tag
    /// classification uses the same format.
    #[must_use]
    pub fn pattern(&self) -> &GradePattern {
        &self.pattern
    }

    /// Rows this widget wants: the input line plus the dropdown.
    #[must_use]
    pub fn height(&self) -> u16 {
        1 + self.suggestions.len() as u16
    }

    /// When the owner should next deliver a tick.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Full search reset: input, suggestions, highlight, and any
    /// pending debounce.
    pub fn reset(&mut self) {
        self.input.clear();
        self.suggestions.clear();
        self.active = None;
        self.debouncer.cancel();
    }

    /// Handle a key, paste, or tick event.
    ///
    /// `roster` is only read when a debounce window elapses and the
    /// suggestion list is recomputed.
    pub fn handle_event(
        &mut self,
        event: &Event,
        now: Instant,
        roster: &[UserRecord],
    ) -> EventOutcome {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key, now),
            Event::Paste(paste) => {
                if self.input.insert_str(&paste.text) {
                    self.debouncer.note_change(self.input.value(), now);
                }
                EventOutcome::Consumed
            }
            Event::Tick => {
                if let Some(query) = self.debouncer.poll(now) {
                    self.recompute(&query, roster);
                    EventOutcome::Consumed
                } else {
                    EventOutcome::Ignored
                }
            }
            _ => EventOutcome::Ignored,
        }
    }

    /// Handle a mouse event against the area the widget was rendered
    /// into. A click on a dropdown row commits that suggestion.
    pub fn handle_mouse(&mut self, mouse: &MouseEvent, area: Rect) -> EventOutcome {
        if !mouse.is_left_down() || !area.contains(mouse.x, mouse.y) {
            return EventOutcome::Ignored;
        }
        let row = mouse.y - area.y;
        if row == 0 {
            // Click on the input line focuses it; nothing to apply.
            return EventOutcome::Consumed;
        }
        let index = (row - 1) as usize;
        match self.suggestions.get(index) {
            Some(label) => {
                let value = label.clone();
                self.reset();
                EventOutcome::Action(SearchAction::AddTag(value))
            }
            None => EventOutcome::Ignored,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> EventOutcome {
        match key.code {
            KeyCode::Down => self.nav_down(),
            KeyCode::Up => self.nav_up(),
            KeyCode::Enter | KeyCode::Tab => self.commit(),
            KeyCode::Escape => {
                self.reset();
                EventOutcome::Consumed
            }
            KeyCode::Char(c) if !key.ctrl() && !key.alt() => {
                self.input.insert_char(c);
                self.debouncer.note_change(self.input.value(), now);
                EventOutcome::Consumed
            }
            KeyCode::Backspace => self.edit(now, EditBuffer::backspace),
            KeyCode::Delete => self.edit(now, EditBuffer::delete),
            KeyCode::Left => {
                self.input.move_left();
                EventOutcome::Consumed
            }
            KeyCode::Right => {
                self.input.move_right();
                EventOutcome::Consumed
            }
            KeyCode::Home => {
                self.input.move_home();
                EventOutcome::Consumed
            }
            KeyCode::End => {
                self.input.move_end();
                EventOutcome::Consumed
            }
            _ => EventOutcome::Ignored,
        }
    }

    fn edit(&mut self, now: Instant, op: fn(&mut EditBuffer) -> bool) -> EventOutcome {
        if op(&mut self.input) {
            self.debouncer.note_change(self.input.value(), now);
        }
        EventOutcome::Consumed
    }

    fn nav_down(&mut self) -> EventOutcome {
        let count = self.suggestions.len();
        if count == 0 {
            return EventOutcome::Ignored;
        }
        self.active = match self.active {
            None => Some(0),
            Some(i) if i + 1 >= count => {
                if self.config.loop_navigation {
                    Some(0)
                } else {
                    Some(count - 1)
                }
            }
            Some(i) => Some(i + 1),
        };
        EventOutcome::Consumed
    }

    fn nav_up(&mut self) -> EventOutcome {
        let count = self.suggestions.len();
        if count == 0 {
            return EventOutcome::Ignored;
        }
        self.active = match self.active {
            Some(i) if i > 0 => Some(i - 1),
            // From the first row or from free text.
            _ => {
                if self.config.loop_navigation {
                    Some(count - 1)
                } else {
                    None
                }
            }
        };
        EventOutcome::Consumed
    }

    /// Commit the highlighted suggestion, or the raw trimmed input.
    ///
    /// Blank input is silently ignored and the event is left for the
    /// owner, so Tab still moves focus when there is nothing to commit.
    fn commit(&mut self) -> EventOutcome {
        let trimmed = self.input.trimmed();
        if trimmed.is_empty() {
            return EventOutcome::Ignored;
        }
        let value = match self.active.and_then(|i| self.suggestions.get(i)) {
            Some(label) => label.clone(),
            None => trimmed.to_string(),
        };
        self.reset();
        EventOutcome::Action(SearchAction::AddTag(value))
    }

    fn recompute(&mut self, query: &str, roster: &[UserRecord]) {
        let config = SuggestConfig {
            min_chars: self.config.min_chars,
            limit: self.config.limit,
        };
        self.suggestions = suggest(query, roster, &self.pattern, config, self.display_name)
            .into_iter()
            .map(str::to_string)
            .collect();
        self.active = None;
    }
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for SearchBox {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }

        // Input line with a prompt glyph.
        let input_row = area.row(0);
        frame.fill(input_row, ' ', self.style.input);
        let text_x = frame.print(input_row.x, input_row.y, "⌕ ", self.style.input, input_row.right());
        if self.input.is_empty() {
            frame.print(
                text_x,
                input_row.y,
                &self.placeholder,
                self.style.placeholder,
                input_row.right(),
            );
        } else {
            frame.print(
                text_x,
                input_row.y,
                self.input.value(),
                self.style.input,
                input_row.right(),
            );
        }
        let cursor_x = text_x.saturating_add(self.input.width_before_cursor() as u16);
        frame.set_cursor(cursor_x.min(input_row.right().saturating_sub(1)), input_row.y);

        // Dropdown rows, highlighted against the raw query.
        let raw_query = self.input.trimmed();
        for (index, label) in self.suggestions.iter().enumerate() {
            let row = area.row(1 + index as u16);
            if row.is_empty() {
                break;
            }
            let row_style = if self.active == Some(index) {
                self.style.row_active
            } else {
                self.style.row
            };
            frame.fill(row, ' ', row_style);
            let marker = if self.active == Some(index) { "▸ " } else { "  " };
            let after = frame.print(row.x, row.y, marker, row_style, row.right());
            let fitted = truncate_to_width(label, row.right().saturating_sub(after) as usize);
            let line = highlight(
                &fitted,
                raw_query,
                row_style,
                self.style.emphasis.patch(row_style),
            );
            frame.print_line(Rect::new(after, row.y, row.right().saturating_sub(after), 1), &line);
        }
    }
}
