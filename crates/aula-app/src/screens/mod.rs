#![forbid(unsafe_code)]

//! Dashboard screens.
//!
//! Each screen implements [`Screen`] and owns its own state; the
//! application model routes events to the active one and paints it
//! into the content area. Navigation is by screen id plus a synthetic
//! path used only for the breadcrumb trail.

pub mod attendance;
pub mod users;

use std::time::Instant;

use aula_tui::Frame;
use aula_tui::event::Event;
use aula_tui::geometry::Rect;

use crate::palette::Palette;

/// Screen identifiers, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Users,
    Attendance,
}

/// Registry metadata for a screen.
#[derive(Debug, Clone, Copy)]
pub struct ScreenMeta {
    pub id: ScreenId,
    /// Title shown in the top bar.
    pub title: &'static str,
    /// Synthetic path feeding the breadcrumb trail.
    pub path: &'static str,
}

/// Single source of truth for screen order and metadata.
pub const SCREEN_REGISTRY: &[ScreenMeta] = &[
    ScreenMeta {
        id: ScreenId::Users,
        title: "Usuarios",
        path: "/usuarios",
    },
    ScreenMeta {
        id: ScreenId::Attendance,
        title: "Asistencia",
        path: "/asistencia",
    },
];

/// Breadcrumb label table for every path the registry can produce.
pub const NAV_LABELS: &[(&str, &str)] = &[
    ("/", "Inicio"),
    ("/usuarios", "Usuarios"),
    ("/asistencia", "Asistencia"),
];

/// What a screen did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenOutcome {
    /// Not handled; the application may apply a global binding.
    Ignored,
    /// Handled inside the screen.
    Consumed,
}

/// One dashboard screen.
pub trait Screen {
    /// Registry entry for this screen.
    fn meta(&self) -> &'static ScreenMeta;

    /// Handle an event delivered while this screen is active.
    ///
    /// `area` is the content region the screen was last laid out in,
    /// used for mouse hit-testing.
    fn handle_event(&mut self, event: &Event, now: Instant, area: Rect) -> ScreenOutcome;

    /// Paint the screen into `area`.
    fn render(&self, area: Rect, frame: &mut Frame, palette: &Palette);

    /// Earliest pending timer deadline, if the screen has one.
    fn next_deadline(&self) -> Option<Instant> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aula_model::breadcrumbs;

    #[test]
    fn registry_paths_resolve_to_full_trails() {
        for meta in SCREEN_REGISTRY {
            let trail = breadcrumbs::resolve(meta.path, NAV_LABELS);
            assert_eq!(trail.len(), 2, "{}", meta.path);
            assert_eq!(trail[0].label, "Inicio");
            assert_eq!(trail[1].label, meta.title);
        }
    }
}
