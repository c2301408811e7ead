#![forbid(unsafe_code)]

//! The application model.
//!
//! Owns the session, the screens, and the preference cache, and wires
//! them into the program loop: events go to the active screen first,
//! global key bindings apply only to what the screen left unhandled.

use std::time::{Duration, Instant};

use aula_model::{CacheStore, Role, Session, Theme, UserRecord};
use aula_model::breadcrumbs;
use aula_tui::event::{Event, KeyCode, KeyEvent};
use aula_tui::geometry::Rect;
use aula_tui::program::{Cmd, Model};
use aula_tui::Frame;
use serde_json::{json, Value};

use crate::palette::{palette, Palette};
use crate::screens::attendance::AttendanceScreen;
use crate::screens::users::UsersScreen;
use crate::screens::{Screen, ScreenOutcome, NAV_LABELS};

/// Cache key for persisted UI preferences.
const PREFS_KEY: &str = "ui.prefs";

/// Preferences older than this are discarded on load.
const PREFS_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Rows of chrome above the content area.
const CHROME_TOP: u16 = 2;
/// Rows of chrome below the content area.
const CHROME_BOTTOM: u16 = 1;

/// Messages fed through [`AppModel::update`].
#[derive(Debug)]
pub enum AppMsg {
    /// A terminal event (or a synthesized tick).
    Term(Event),
}

impl From<Event> for AppMsg {
    fn from(event: Event) -> Self {
        AppMsg::Term(event)
    }
}

/// The dashboard application.
pub struct AppModel {
    session: Session,
    cache: Box<dyn CacheStore>,
    screens: Vec<Box<dyn Screen>>,
    active: usize,
    width: u16,
    height: u16,
}

impl AppModel {
    /// Build the application over a roster and a preference cache.
    ///
    /// Persisted preferences (theme, last screen) are restored here;
    /// a missing or unreadable cache just means defaults.
    #[must_use]
    pub fn new(roster: Vec<UserRecord>, cache: Box<dyn CacheStore>, width: u16, height: u16) -> Self {
        let screens: Vec<Box<dyn Screen>> = vec![
            Box::new(UsersScreen::new(roster.clone())),
            Box::new(AttendanceScreen::new(roster)),
        ];

        let mut session = Session::new();
        session.login(Role::Director);

        let mut model = Self {
            session,
            cache,
            screens,
            active: 0,
            width,
            height,
        };
        model.restore_prefs();
        model
    }

    /// The session, for the chrome and for tests.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Path of the active screen.
    #[must_use]
    pub fn active_path(&self) -> &'static str {
        self.screens[self.active].meta().path
    }

    fn content_area(&self) -> Rect {
        Rect::new(
            0,
            CHROME_TOP,
            self.width,
            self.height.saturating_sub(CHROME_TOP + CHROME_BOTTOM),
        )
    }

    fn restore_prefs(&mut self) {
        let prefs = match self.cache.get(PREFS_KEY) {
            Ok(Some(value)) => value,
            Ok(None) => return,
            Err(error) => {
                tracing::warn!(cache = self.cache.name(), %error, "preference load failed");
                return;
            }
        };
        if let Some(theme) = prefs.get("theme").and_then(Value::as_str) {
            self.session.set_theme(parse_theme(theme));
        }
        if let Some(path) = prefs.get("screen").and_then(Value::as_str)
            && let Some(index) = self.screens.iter().position(|s| s.meta().path == path)
        {
            self.active = index;
        }
    }

    fn persist_prefs(&self) {
        let prefs = json!({
            "theme": theme_slug(self.session.theme()),
            "screen": self.active_path(),
        });
        if let Err(error) = self.cache.set(PREFS_KEY, prefs, Some(PREFS_TTL)) {
            tracing::warn!(cache = self.cache.name(), %error, "preference save failed");
        }
    }

    fn switch_screen(&mut self, forward: bool) {
        let count = self.screens.len();
        self.active = if forward {
            (self.active + 1) % count
        } else {
            (self.active + count - 1) % count
        };
        self.persist_prefs();
    }

    fn toggle_theme(&mut self) {
        self.session.toggle_theme();
        let label = self.session.theme().label();
        self.session.push_notice(format!("Tema: {label}"));
        self.persist_prefs();
    }

    /// F3 walks sign-in states: director, teacher, signed out.
    fn cycle_session(&mut self) {
        match self.session.role() {
            None => {
                self.session.login(Role::Director);
                self.session.push_notice("Sesión iniciada: Director");
            }
            Some(Role::Director) => {
                self.session.login(Role::Teacher);
                self.session.push_notice("Sesión iniciada: Docente");
            }
            Some(Role::Teacher) => {
                self.session.logout();
                self.session.push_notice("Sesión cerrada");
            }
        }
    }

    fn dismiss_first_notice(&mut self) {
        if let Some(id) = self.session.notices().first().map(|n| n.id) {
            self.session.dismiss_notice(id);
        }
    }

    fn global_key(&mut self, key: &KeyEvent) -> Cmd<AppMsg> {
        match key.code {
            KeyCode::Char('q') if key.ctrl() => return Cmd::Quit,
            KeyCode::Tab => self.switch_screen(true),
            KeyCode::BackTab => self.switch_screen(false),
            // Direct screen jump; digits only arrive here when the
            // active screen's input did not claim them.
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                if index < self.screens.len() && index != self.active {
                    self.active = index;
                    self.persist_prefs();
                }
            }
            KeyCode::F(2) => self.toggle_theme(),
            KeyCode::F(3) => self.cycle_session(),
            KeyCode::F(4) => self.dismiss_first_notice(),
            _ => {}
        }
        Cmd::None
    }

    fn render_chrome(&self, frame: &mut Frame, palette: &Palette) {
        let full = frame.area();
        if full.height == 0 {
            return;
        }

        // Title bar.
        let title_bar = full.row(0);
        frame.fill(title_bar, ' ', palette.chrome());
        let title = format!("Panel Aula · {}", self.screens[self.active].meta().title);
        frame.print(title_bar.x + 1, title_bar.y, &title, palette.chrome().bold(), title_bar.right());
        let account = match self.session.user() {
            Some(user) => format!("{} · {}", user.display_name, user.role.label()),
            None => "Sin sesión".to_string(),
        };
        let account_x = title_bar
            .right()
            .saturating_sub(account.chars().count() as u16 + 1);
        frame.print(account_x, title_bar.y, &account, palette.chrome(), title_bar.right());

        // Breadcrumb trail.
        if full.height > 1 {
            let crumb_bar = full.row(1);
            frame.fill(crumb_bar, ' ', palette.muted());
            let trail = breadcrumbs::resolve(self.active_path(), NAV_LABELS);
            let mut x = crumb_bar.x + 1;
            for (i, crumb) in trail.iter().enumerate() {
                if i > 0 {
                    x = frame.print(x, crumb_bar.y, " › ", palette.muted(), crumb_bar.right());
                }
                let style = if i + 1 == trail.len() {
                    palette.text().fg(palette.accent)
                } else {
                    palette.muted()
                };
                x = frame.print(x, crumb_bar.y, &crumb.label, style, crumb_bar.right());
            }
        }

        // Status bar: hints on the left, the oldest notice on the right.
        if full.height > CHROME_TOP {
            let status = full.row(full.height - 1);
            frame.fill(status, ' ', palette.chrome());
            let hints = format!(
                "Tab cambia pantalla · F2 tema ({}) · F3 sesión · Ctrl+Q salir",
                self.session.theme().label()
            );
            frame.print(status.x + 1, status.y, &hints, palette.chrome(), status.right());
            if let Some(notice) = self.session.notices().first() {
                let text = format!("{} (F4 cierra)", notice.text);
                let x = status
                    .right()
                    .saturating_sub(text.chars().count() as u16 + 1);
                frame.print(x, status.y, &text, palette.chrome().bold(), status.right());
            }
        }
    }
}

impl Model for AppModel {
    type Message = AppMsg;

    fn update(&mut self, message: AppMsg) -> Cmd<AppMsg> {
        let AppMsg::Term(event) = message;

        if let Event::Resize { width, height } = event {
            self.width = width;
            self.height = height;
            return Cmd::None;
        }

        let area = self.content_area();
        let outcome = self.screens[self.active].handle_event(&event, Instant::now(), area);
        if outcome == ScreenOutcome::Consumed {
            return Cmd::None;
        }

        match event {
            Event::Key(key) => self.global_key(&key),
            _ => Cmd::None,
        }
    }

    fn view(&self, frame: &mut Frame) {
        let palette = palette(self.session.theme());
        frame.fill(frame.area(), ' ', palette.text());
        self.render_chrome(frame, palette);
        let area = self.content_area();
        if !area.is_empty() {
            self.screens[self.active].render(area, frame, palette);
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.screens[self.active].next_deadline()
    }
}

fn theme_slug(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "dark",
        Theme::Light => "light",
    }
}

fn parse_theme(slug: &str) -> Theme {
    match slug {
        "light" => Theme::Light,
        _ => Theme::Dark,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::demo_roster;
    use aula_model::MemoryCache;
    use aula_tui::event::Modifiers;
    use aula_tui::program::drain;
    use aula_tui::Buffer;

    fn model() -> AppModel {
        AppModel::new(demo_roster(), Box::new(MemoryCache::new()), 80, 24)
    }

    fn key(code: KeyCode) -> AppMsg {
        AppMsg::Term(Event::Key(KeyEvent::new(code)))
    }

    fn render_text(model: &AppModel) -> String {
        let mut buffer = Buffer::new(80, 24);
        {
            let mut frame = Frame::new(&mut buffer);
            model.view(&mut frame);
        }
        (0..24)
            .map(|y| {
                (0..80)
                    .filter_map(|x| buffer.get(x, y).map(|c| c.ch))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn starts_on_users_signed_in_as_director() {
        let model = model();
        assert_eq!(model.active_path(), "/usuarios");
        assert_eq!(model.session().role(), Some(Role::Director));
    }

    #[test]
    fn ctrl_q_quits() {
        let mut model = model();
        let quit = drain(
            &mut model,
            Cmd::Msg(AppMsg::Term(Event::Key(
                KeyEvent::new(KeyCode::Char('q')).with_modifiers(Modifiers::CTRL),
            ))),
        );
        assert!(quit);
    }

    #[test]
    fn tab_cycles_screens_and_wraps() {
        let mut model = model();
        model.update(key(KeyCode::Tab));
        assert_eq!(model.active_path(), "/asistencia");
        model.update(key(KeyCode::Tab));
        assert_eq!(model.active_path(), "/usuarios");
        model.update(key(KeyCode::BackTab));
        assert_eq!(model.active_path(), "/asistencia");
    }

    #[test]
    fn f2_toggles_theme_and_persists() {
        let cache = Box::new(MemoryCache::new());
        let mut model = AppModel::new(demo_roster(), cache, 80, 24);
        model.update(key(KeyCode::F(2)));
        assert_eq!(model.session().theme(), Theme::Light);

        let prefs = model.cache.get(PREFS_KEY).unwrap().unwrap();
        assert_eq!(prefs.get("theme").and_then(Value::as_str), Some("light"));
    }

    #[test]
    fn prefs_restore_theme_and_screen() {
        let cache = MemoryCache::new();
        cache
            .set(
                PREFS_KEY,
                json!({"theme": "light", "screen": "/asistencia"}),
                None,
            )
            .unwrap();
        let model = AppModel::new(demo_roster(), Box::new(cache), 80, 24);
        assert_eq!(model.session().theme(), Theme::Light);
        assert_eq!(model.active_path(), "/asistencia");
    }

    #[test]
    fn unknown_pref_values_fall_back_to_defaults() {
        let cache = MemoryCache::new();
        cache
            .set(PREFS_KEY, json!({"theme": "sepia", "screen": "/nope"}), None)
            .unwrap();
        let model = AppModel::new(demo_roster(), Box::new(cache), 80, 24);
        assert_eq!(model.session().theme(), Theme::Dark);
        assert_eq!(model.active_path(), "/usuarios");
    }

    #[test]
    fn f3_cycles_director_teacher_signed_out() {
        let mut model = model();
        model.update(key(KeyCode::F(3)));
        assert_eq!(model.session().role(), Some(Role::Teacher));
        model.update(key(KeyCode::F(3)));
        assert_eq!(model.session().role(), None);
        model.update(key(KeyCode::F(3)));
        assert_eq!(model.session().role(), Some(Role::Director));
    }

    #[test]
    fn f4_dismisses_the_oldest_notice() {
        let mut model = model();
        model.update(key(KeyCode::F(2)));
        model.update(key(KeyCode::F(3)));
        assert_eq!(model.session().notices().len(), 2);
        model.update(key(KeyCode::F(4)));
        assert_eq!(model.session().notices().len(), 1);
        assert!(model.session().notices()[0].text.starts_with("Sesión"));
    }

    #[test]
    fn resize_updates_the_layout() {
        let mut model = model();
        model.update(AppMsg::Term(Event::Resize {
            width: 100,
            height: 30,
        }));
        assert_eq!(model.content_area(), Rect::new(0, 2, 100, 27));
    }

    #[test]
    fn view_paints_title_breadcrumbs_and_hints() {
        let model = model();
        let text = render_text(&model);
        assert!(text.contains("Panel Aula · Usuarios"));
        assert!(text.contains("Inicio › Usuarios"));
        assert!(text.contains("F2 tema (Oscuro)"));
        assert!(text.contains("Ctrl+Q salir"));
        assert!(text.contains("Director"));
    }

    #[test]
    fn digit_jumps_screens_unless_the_search_input_claims_it() {
        let mut model = model();
        // On the users screen the digit is typed into the search box.
        model.update(key(KeyCode::Char('2')));
        assert_eq!(model.active_path(), "/usuarios");

        model.update(key(KeyCode::Tab));
        model.update(key(KeyCode::Char('1')));
        assert_eq!(model.active_path(), "/usuarios");
    }

    #[test]
    fn notice_appears_in_status_bar_until_dismissed() {
        let mut model = model();
        model.update(key(KeyCode::F(2)));
        assert!(render_text(&model).contains("Tema: Claro (F4 cierra)"));
        model.update(key(KeyCode::F(4)));
        assert!(!render_text(&model).contains("F4 cierra"));
    }

    #[test]
    fn typing_in_search_arms_the_deadline() {
        let mut model = model();
        assert!(model.next_deadline().is_none());
        model.update(key(KeyCode::Char('m')));
        assert!(model.next_deadline().is_some());
    }

    #[test]
    fn screen_consumed_keys_do_not_reach_global_bindings() {
        let mut model = model();
        // Tab on the attendance screen still switches; but Left is
        // consumed by the period selector and must not leak.
        model.update(key(KeyCode::Tab));
        let before = model.active_path();
        model.update(key(KeyCode::Left));
        assert_eq!(model.active_path(), before);
    }
}
