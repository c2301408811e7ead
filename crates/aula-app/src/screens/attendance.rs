#![forbid(unsafe_code)]

//! The attendance panel screen.
//!
//! Summary cards for the selected population and period, plus the
//! distribution bars for the groups with the lowest attendance. All
//! figures come from `aula_model::attendance`; this screen only holds
//! the two selectors and paints.

use std::time::Instant;

use aula_model::attendance::{
    self, Accent, GroupAttendance, Period, Population, SummaryMetrics,
};
use aula_model::UserRecord;
use aula_tui::event::{Event, KeyCode, MouseEvent, MouseEventKind};
use aula_tui::geometry::Rect;
use aula_tui::style::Style;
use aula_tui::text::truncate_to_width;
use aula_tui::Frame;

use super::{Screen, ScreenMeta, ScreenOutcome, SCREEN_REGISTRY};
use crate::palette::Palette;

/// Rows from the top of the content area to the first summary card.
const CARDS_TOP: u16 = 2;
/// Rows from the top of the content area to the distribution header.
const DISTRIBUTION_TOP: u16 = 6;

/// The attendance summary and distribution screen.
pub struct AttendanceScreen {
    roster: Vec<UserRecord>,
    population: Population,
    period: Period,
}

impl AttendanceScreen {
    /// Create the screen over a fixed roster, opening on today's
    /// student figures.
    #[must_use]
    pub fn new(roster: Vec<UserRecord>) -> Self {
        Self {
            roster,
            population: Population::Students,
            period: Period::Today,
        }
    }

    /// The selected population.
    #[must_use]
    pub const fn population(&self) -> Population {
        self.population
    }

    /// The selected period.
    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    fn cycle_period(&mut self, forward: bool) {
        let all = Period::ALL;
        let index = all
            .iter()
            .position(|p| *p == self.period)
            .expect("selected period is always in Period::ALL");
        self.period = if forward {
            all[(index + 1) % all.len()]
        } else {
            all[(index + all.len() - 1) % all.len()]
        };
    }

    fn toggle_population(&mut self) {
        self.population = match self.population {
            Population::Students => Population::Teachers,
            Population::Teachers => Population::Students,
        };
    }

    /// Distribution bars for the selected population.
    fn distribution(&self) -> Vec<GroupAttendance> {
        match self.population {
            Population::Students => {
                let students: Vec<_> = self
                    .roster
                    .iter()
                    .filter_map(|user| match user {
                        UserRecord::Student(s) => Some(s.clone()),
                        UserRecord::Staff(_) => None,
                    })
                    .collect();
                attendance::student_distribution(&students)
            }
            Population::Teachers => {
                let staff: Vec<_> = self
                    .roster
                    .iter()
                    .filter_map(|user| match user {
                        UserRecord::Staff(s) => Some(s.clone()),
                        UserRecord::Student(_) => None,
                    })
                    .collect();
                attendance::staff_distribution(&staff)
            }
        }
    }

    /// Period tab hit boxes on the selector row, matching the render
    /// layout.
    fn period_tabs(area: Rect) -> [(Rect, Period); 4] {
        let row = area.row(0);
        let mut x = row.x + 1;
        Period::ALL.map(|period| {
            let width = period.label().chars().count() as u16 + 2;
            let rect = Rect::new(x.min(row.right()), row.y, width, 1);
            x = x.saturating_add(width + 1);
            (rect, period)
        })
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, area: Rect) -> ScreenOutcome {
        if !matches!(mouse.kind, MouseEventKind::Down(_)) {
            return ScreenOutcome::Ignored;
        }
        for (rect, period) in Self::period_tabs(area) {
            if rect.contains(mouse.x, mouse.y) {
                self.period = period;
                return ScreenOutcome::Consumed;
            }
        }
        ScreenOutcome::Ignored
    }
}

impl Screen for AttendanceScreen {
    fn meta(&self) -> &'static ScreenMeta {
        &SCREEN_REGISTRY[1]
    }

    fn handle_event(&mut self, event: &Event, _now: Instant, area: Rect) -> ScreenOutcome {
        match event {
            Event::Mouse(mouse) => self.handle_mouse(mouse, area),
            Event::Key(key) => match key.code {
                KeyCode::Right => {
                    self.cycle_period(true);
                    ScreenOutcome::Consumed
                }
                KeyCode::Left => {
                    self.cycle_period(false);
                    ScreenOutcome::Consumed
                }
                KeyCode::Char(' ') | KeyCode::Char('p') => {
                    self.toggle_population();
                    ScreenOutcome::Consumed
                }
                _ => ScreenOutcome::Ignored,
            },
            _ => ScreenOutcome::Ignored,
        }
    }

    fn render(&self, area: Rect, frame: &mut Frame, palette: &Palette) {
        if area.height < 2 {
            return;
        }

        // Selector row: period tabs on the left, population on the
        // right.
        let selector = area.row(0);
        frame.fill(selector, ' ', palette.muted());
        for (rect, period) in Self::period_tabs(area) {
            let style = if period == self.period {
                palette.text().fg(palette.accent).bold()
            } else {
                palette.muted()
            };
            let label = format!(" {} ", period.label());
            frame.print(rect.x, rect.y, &label, style, selector.right());
        }
        let population = format!("{} · Espacio cambia", self.population.label());
        let pop_x = selector
            .right()
            .saturating_sub(population.chars().count() as u16 + 1);
        frame.print(pop_x, selector.y, &population, palette.muted(), selector.right());

        // Summary cards.
        let metrics = attendance::summary_for(self.population, self.period);
        if area.height > CARDS_TOP {
            render_cards(frame, area, &metrics, palette);
        }

        // Distribution bars.
        if area.height > DISTRIBUTION_TOP + 1 {
            render_distribution(frame, area, &self.distribution(), palette);
        }
    }
}

fn accent_style(accent: Accent, palette: &Palette) -> Style {
    match accent {
        Accent::Positive => palette.text().fg(palette.positive),
        Accent::Negative => palette.text().fg(palette.negative),
        Accent::Neutral => palette.text(),
    }
}

fn render_cards(frame: &mut Frame, area: Rect, metrics: &SummaryMetrics, palette: &Palette) {
    let delta_line = attendance::format_delta(metrics.delta);
    let cards: [(&str, String, Style, &str); 4] = [
        (
            "Asistencia",
            format!("{}%", metrics.attendance),
            accent_style(metrics.attendance_accent(), palette),
            delta_line.as_str(),
        ),
        (
            "Inasistencias",
            metrics.absences.to_string(),
            accent_style(metrics.absences_accent(), palette),
            "",
        ),
        (
            "Tardanzas",
            metrics.tardiness.to_string(),
            accent_style(metrics.tardiness_accent(), palette),
            "",
        ),
        (
            "Cobertura de registro",
            format!("{}%", metrics.coverage),
            accent_style(metrics.coverage_accent(), palette),
            metrics.coverage_helper(),
        ),
    ];

    let card_width = (area.width / 4).max(12);
    for (i, (title, value, value_style, helper)) in cards.iter().enumerate() {
        let x = area.x + card_width * i as u16;
        if x >= area.right() {
            break;
        }
        let right = (x + card_width).min(area.right());
        let max = (right - x).saturating_sub(1) as usize;
        let title_row = area.row(CARDS_TOP);
        frame.print(x + 1, title_row.y, &truncate_to_width(title, max), palette.muted(), right);
        if area.height > CARDS_TOP + 1 {
            frame.print(
                x + 1,
                area.row(CARDS_TOP + 1).y,
                &truncate_to_width(value, max),
                value_style.bold(),
                right,
            );
        }
        if !helper.is_empty() && area.height > CARDS_TOP + 2 {
            frame.print(
                x + 1,
                area.row(CARDS_TOP + 2).y,
                &truncate_to_width(helper, max),
                palette.muted(),
                right,
            );
        }
    }
}

/// Bar column layout: name, bar, percentage.
const NAME_WIDTH: u16 = 14;
const PCT_WIDTH: u16 = 5;

fn render_distribution(
    frame: &mut Frame,
    area: Rect,
    groups: &[GroupAttendance],
    palette: &Palette,
) {
    let header = area.row(DISTRIBUTION_TOP);
    frame.print(
        header.x + 1,
        header.y,
        "Distribución por grupo (menor asistencia primero)",
        palette.muted(),
        header.right(),
    );

    let bar_left = area.x + 1 + NAME_WIDTH + 1;
    let bar_right = area.right().saturating_sub(PCT_WIDTH + 1);
    let bar_span = bar_right.saturating_sub(bar_left);

    for (i, group) in groups.iter().enumerate() {
        let y_offset = DISTRIBUTION_TOP + 1 + i as u16;
        if y_offset >= area.height {
            break;
        }
        let row = area.row(y_offset);
        let name = truncate_to_width(&group.name, NAME_WIDTH as usize);
        frame.print(row.x + 1, row.y, &name, palette.text(), row.right());

        let filled = (u32::from(bar_span) * u32::from(group.attendance) / 100) as u16;
        let bar_style = if group.attendance < 85 {
            palette.text().fg(palette.negative)
        } else {
            palette.text().fg(palette.accent)
        };
        for x in bar_left..bar_left.saturating_add(filled).min(bar_right) {
            frame.set_char(x, row.y, '▇', bar_style);
        }
        let pct = format!("{:>3}%", group.attendance);
        frame.print(bar_right + 1, row.y, &pct, palette.muted(), row.right());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::demo_roster;
    use crate::palette::palette;
    use aula_model::Theme;
    use aula_tui::event::{KeyEvent, MouseButton};
    use aula_tui::Buffer;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    fn area() -> Rect {
        Rect::new(0, 0, 80, 20)
    }

    fn screen() -> AttendanceScreen {
        AttendanceScreen::new(demo_roster())
    }

    fn render_to_text(screen: &AttendanceScreen) -> Vec<String> {
        let mut buffer = Buffer::new(80, 20);
        {
            let mut frame = Frame::new(&mut buffer);
            screen.render(area(), &mut frame, palette(Theme::Dark));
        }
        (0..20)
            .map(|y| (0..80).filter_map(|x| buffer.get(x, y).map(|c| c.ch)).collect())
            .collect()
    }

    #[test]
    fn right_cycles_periods_and_wraps() {
        let mut screen = screen();
        assert_eq!(screen.period(), Period::Today);
        for expected in [Period::Week, Period::Month, Period::Term, Period::Today] {
            screen.handle_event(&key(KeyCode::Right), Instant::now(), area());
            assert_eq!(screen.period(), expected);
        }
    }

    #[test]
    fn left_cycles_backwards_with_wrap() {
        let mut screen = screen();
        screen.handle_event(&key(KeyCode::Left), Instant::now(), area());
        assert_eq!(screen.period(), Period::Term);
    }

    #[test]
    fn space_toggles_population() {
        let mut screen = screen();
        assert_eq!(screen.population(), Population::Students);
        screen.handle_event(&key(KeyCode::Char(' ')), Instant::now(), area());
        assert_eq!(screen.population(), Population::Teachers);
        screen.handle_event(&key(KeyCode::Char('p')), Instant::now(), area());
        assert_eq!(screen.population(), Population::Students);
    }

    #[test]
    fn clicking_a_period_tab_selects_it() {
        let mut screen = screen();
        // Tabs: " Hoy " at x=1, gap, " Semana " starting at x=7.
        let click = Event::Mouse(MouseEvent::new(
            MouseEventKind::Down(MouseButton::Left),
            8,
            0,
        ));
        let outcome = screen.handle_event(&click, Instant::now(), area());
        assert_eq!(outcome, ScreenOutcome::Consumed);
        assert_eq!(screen.period(), Period::Week);
    }

    #[test]
    fn render_shows_cards_and_delta() {
        let screen = screen();
        let rows = render_to_text(&screen);
        let all: String = rows.join("\n");
        assert!(all.contains("Asistencia"));
        assert!(all.contains("Tardanzas"));
        assert!(all.contains("92%"));
        assert!(all.contains("-2% vs periodo anterior"));
        assert!(all.contains("Meta institucional: 95%."));
    }

    #[test]
    fn render_shows_distribution_for_the_population() {
        let mut screen = screen();
        let rows = render_to_text(&screen);
        let all: String = rows.join("\n");
        assert!(all.contains("Distribución por grupo"));
        assert!(all.contains("5 · A"));

        screen.handle_event(&key(KeyCode::Char(' ')), Instant::now(), area());
        let all: String = render_to_text(&screen).join("\n");
        assert!(all.contains("Matemática"));
        assert!(all.contains("General"));
    }

    #[test]
    fn distribution_never_exceeds_six_groups() {
        let screen = screen();
        assert!(screen.distribution().len() <= 6);
    }

    #[test]
    fn unrelated_keys_are_left_for_global_bindings() {
        let mut screen = screen();
        assert_eq!(
            screen.handle_event(&key(KeyCode::Tab), Instant::now(), area()),
            ScreenOutcome::Ignored
        );
    }
}
