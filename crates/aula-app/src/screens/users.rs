#![forbid(unsafe_code)]

//! The user directory screen.
//!
//! Owns the committed tag list and the roster table; embeds the search
//! box and tag row from `aula-search` and applies the actions they
//! emit. Tag classification and validity live here, on the owner side:
//! the widgets only ever request adds and removals.

use std::time::Instant;

use aula_model::{SearchTag, TagKind, UserRecord};
use aula_search::normalize;
use aula_search::{EventOutcome, SearchAction, SearchBox, TagRow};
use aula_tui::event::{Event, KeyCode, MouseEvent, MouseEventKind};
use aula_tui::geometry::Rect;
use aula_tui::style::Style;
use aula_tui::text::truncate_to_width;
use aula_tui::{Frame, Widget};

use super::{Screen, ScreenId, ScreenMeta, ScreenOutcome, SCREEN_REGISTRY};
use crate::palette::Palette;

/// Rows of chrome inside the screen: search input, tag row, table
/// header, and the status line.
const FIXED_ROWS: u16 = 4;

/// The roster directory with incremental search and tag filters.
pub struct UsersScreen {
    roster: Vec<UserRecord>,
    tags: Vec<SearchTag>,
    search: SearchBox,
    tag_row: TagRow,
    scroll: usize,
}

impl UsersScreen {
    /// Create the screen over a fixed roster.
    #[must_use]
    pub fn new(roster: Vec<UserRecord>) -> Self {
        Self {
            roster,
            tags: Vec::new(),
            search: SearchBox::new().with_placeholder("Buscar por nombre o grado (ej. 5A)"),
            tag_row: TagRow::new(),
            scroll: 0,
        }
    }

    /// The committed tags, for the chrome and for tests.
    #[must_use]
    pub fn tags(&self) -> &[SearchTag] {
        &self.tags
    }

    /// Roster entries passing every valid tag.
    ///
    /// Invalid tags stay visible as chips but do not filter; a grade
    /// tag nobody belongs to would otherwise empty the table for a
    /// typo.
    #[must_use]
    pub fn filtered(&self) -> Vec<&UserRecord> {
        self.roster
            .iter()
            .filter(|user| {
                self.tags
                    .iter()
                    .filter(|tag| tag.is_valid)
                    .all(|tag| Self::matches_tag(user, tag))
            })
            .collect()
    }

    fn matches_tag(user: &UserRecord, tag: &SearchTag) -> bool {
        match tag.kind {
            TagKind::Grade => match user {
                UserRecord::Student(student) => {
                    student.grade_code().eq_ignore_ascii_case(&tag.display_value)
                }
                UserRecord::Staff(_) => false,
            },
            TagKind::Keyword => {
                normalize(user.display_name()).contains(normalize(&tag.value).as_ref())
            }
        }
    }

    fn apply(&mut self, action: SearchAction) {
        match action {
            SearchAction::AddTag(value) => self.add_tag(value),
            SearchAction::RemoveTag(value) => self.remove_tag(&value),
        }
    }

    /// Classify and append a committed value. Duplicates are kept:
    /// deduplication is not this screen's concern either, matching the
    /// directory's historical behavior.
    fn add_tag(&mut self, value: String) {
        let trimmed = value.trim();
        let tag = if self.search.pattern().is_match(trimmed) {
            let canonical = self.search.pattern().canonical(trimmed);
            let is_valid = self.roster.iter().any(|user| match user {
                UserRecord::Student(student) => {
                    student.grade_code().eq_ignore_ascii_case(&canonical)
                }
                UserRecord::Staff(_) => false,
            });
            SearchTag::grade(value.clone(), canonical, is_valid)
        } else {
            SearchTag::keyword(value.clone())
        };
        tracing::debug!(value = %value, kind = ?tag.kind, valid = tag.is_valid, "tag added");
        self.tags.push(tag);
        self.scroll = 0;
    }

    fn remove_tag(&mut self, value: &str) {
        if let Some(pos) = self.tags.iter().position(|tag| tag.value == value) {
            self.tags.remove(pos);
            self.scroll = 0;
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, area: Rect) -> ScreenOutcome {
        // The dropdown overlays whatever is under it, so the search box
        // gets first claim on clicks.
        let search_area = Rect::new(
            area.x,
            area.y,
            area.width,
            self.search.height().min(area.height),
        );
        match self.search.handle_mouse(mouse, search_area) {
            EventOutcome::Action(action) => {
                self.apply(action);
                return ScreenOutcome::Consumed;
            }
            EventOutcome::Consumed => return ScreenOutcome::Consumed,
            EventOutcome::Ignored => {}
        }

        match self.tag_row.handle_mouse(mouse, &self.tags, area.row(1)) {
            EventOutcome::Action(action) => {
                self.apply(action);
                return ScreenOutcome::Consumed;
            }
            EventOutcome::Consumed => return ScreenOutcome::Consumed,
            EventOutcome::Ignored => {}
        }

        match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.scroll_by(1, area);
                ScreenOutcome::Consumed
            }
            MouseEventKind::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
                ScreenOutcome::Consumed
            }
            _ => ScreenOutcome::Ignored,
        }
    }

    fn scroll_by(&mut self, delta: usize, area: Rect) {
        let visible = area.height.saturating_sub(FIXED_ROWS) as usize;
        let max = self.filtered().len().saturating_sub(visible);
        self.scroll = (self.scroll + delta).min(max);
    }
}

impl Screen for UsersScreen {
    fn meta(&self) -> &'static ScreenMeta {
        &SCREEN_REGISTRY[0]
    }

    fn handle_event(&mut self, event: &Event, now: Instant, area: Rect) -> ScreenOutcome {
        debug_assert_eq!(self.meta().id, ScreenId::Users);

        if let Event::Mouse(mouse) = event {
            return self.handle_mouse(mouse, area);
        }

        match self.search.handle_event(event, now, &self.roster) {
            EventOutcome::Action(action) => {
                self.apply(action);
                return ScreenOutcome::Consumed;
            }
            EventOutcome::Consumed => return ScreenOutcome::Consumed,
            EventOutcome::Ignored => {}
        }

        match event {
            Event::Key(key) if key.ctrl() && key.is_char('l') => {
                // Clear-all for the committed filters.
                self.tags.clear();
                self.scroll = 0;
                ScreenOutcome::Consumed
            }
            // Arrows reach the table only while no suggestions are up.
            Event::Key(key) if key.code == KeyCode::Down => {
                self.scroll_by(1, area);
                ScreenOutcome::Consumed
            }
            Event::Key(key) if key.code == KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                ScreenOutcome::Consumed
            }
            Event::Key(key) if key.code == KeyCode::PageDown => {
                let page = area.height.saturating_sub(FIXED_ROWS) as usize;
                self.scroll_by(page.max(1), area);
                ScreenOutcome::Consumed
            }
            Event::Key(key) if key.code == KeyCode::PageUp => {
                let page = area.height.saturating_sub(FIXED_ROWS) as usize;
                self.scroll = self.scroll.saturating_sub(page.max(1));
                ScreenOutcome::Consumed
            }
            _ => ScreenOutcome::Ignored,
        }
    }

    fn render(&self, area: Rect, frame: &mut Frame, palette: &Palette) {
        if area.height < FIXED_ROWS {
            return;
        }
        let filtered = self.filtered();

        // Table header.
        let header = area.row(2);
        frame.fill(header, ' ', palette.muted());
        render_columns(
            frame,
            header,
            &["Nombre", "Tipo", "Grado/Área", "Asist.", "Tard."],
            palette.muted(),
        );

        // Table body.
        let body_rows = area.height - FIXED_ROWS;
        let scroll = self.scroll.min(filtered.len().saturating_sub(body_rows as usize));
        for (offset, user) in filtered.iter().skip(scroll).take(body_rows as usize).enumerate() {
            let row = area.row(3 + offset as u16);
            frame.fill(row, ' ', palette.text());
            render_user_row(frame, row, user, palette);
        }

        // Status line.
        let status = area.row(area.height - 1);
        frame.fill(status, ' ', palette.muted());
        let summary = format!(
            "{} de {} usuarios · {} filtros · Ctrl+L limpia filtros",
            filtered.len(),
            self.roster.len(),
            self.tags.len(),
        );
        frame.print(status.x + 1, status.y, &summary, palette.muted(), status.right());

        // Tag chips, then the search box last so its dropdown overlays
        // everything beneath the input line.
        self.tag_row.render(&self.tags, area.row(1), frame);
        let search_area = Rect::new(
            area.x,
            area.y,
            area.width,
            self.search.height().min(area.height),
        );
        self.search.render(search_area, frame);
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.search.next_deadline()
    }
}

/// Fixed column widths after the flexible name column.
const COL_WIDTHS: [u16; 4] = [10, 14, 7, 6];

fn column_starts(row: Rect) -> [u16; 5] {
    let fixed: u16 = COL_WIDTHS.iter().sum();
    let name_width = row.width.saturating_sub(fixed + 1).max(10);
    let mut x = row.x + 1;
    let mut starts = [0u16; 5];
    starts[0] = x;
    x += name_width;
    for (i, w) in COL_WIDTHS.iter().enumerate() {
        starts[i + 1] = x;
        x += w;
    }
    starts
}

fn render_columns(frame: &mut Frame, row: Rect, cells: &[&str; 5], style: Style) {
    let starts = column_starts(row);
    for (i, text) in cells.iter().enumerate() {
        let right = if i + 1 < starts.len() {
            starts[i + 1].min(row.right())
        } else {
            row.right()
        };
        let max = right.saturating_sub(starts[i]);
        let fitted = truncate_to_width(text, max.saturating_sub(1) as usize);
        frame.print(starts[i], row.y, &fitted, style, right);
    }
}

fn render_user_row(frame: &mut Frame, row: Rect, user: &UserRecord, palette: &Palette) {
    let (kind, detail, attendance, tardiness) = match user {
        UserRecord::Student(student) => (
            "Estudiante",
            student.grade_code(),
            student.attendance_percentage,
            student.tardiness_count.to_string(),
        ),
        UserRecord::Staff(staff) => (
            "Personal",
            staff
                .area
                .clone()
                .or_else(|| staff.role.clone())
                .unwrap_or_else(|| "—".to_string()),
            staff.attendance_percentage,
            "—".to_string(),
        ),
    };
    let attendance_style = match attendance {
        Some(pct) if pct < 85 => palette.text().fg(palette.negative),
        Some(_) => palette.text(),
        None => palette.muted(),
    };
    let attendance_text = attendance.map_or_else(|| "—".to_string(), |pct| format!("{pct}%"));

    let starts = column_starts(row);
    let cells: [(&str, Style); 5] = [
        (user.display_name(), palette.text()),
        (kind, palette.muted()),
        (detail.as_str(), palette.text()),
        (attendance_text.as_str(), attendance_style),
        (tardiness.as_str(), palette.muted()),
    ];
    for (i, (text, style)) in cells.iter().enumerate() {
        let right = if i + 1 < starts.len() {
            starts[i + 1].min(row.right())
        } else {
            row.right()
        };
        let max = right.saturating_sub(starts[i]);
        let fitted = truncate_to_width(text, max.saturating_sub(1) as usize);
        frame.print(starts[i], row.y, &fitted, *style, right);
    }
}
