#![forbid(unsafe_code)]

//! Session context: who is signed in, which theme is active, and any
//! pending notices. All mutation goes through methods so the
//! application model stays the single writer.

/// Dashboard role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Director,
    Teacher,
}

impl Role {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Role::Director => "Director",
            Role::Teacher => "Docente",
        }
    }

    /// Mocked display name for this role. There is no real
    /// authentication; sign-in just picks a seeded account.
    #[must_use]
    pub const fn mock_display_name(self) -> &'static str {
        match self {
            Role::Director => "Ángel G. Morales",
            Role::Teacher => "Ángel G. Morales",
        }
    }
}

/// Color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Oscuro",
            Theme::Light => "Claro",
        }
    }
}

/// Signed-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub display_name: String,
    pub role: Role,
}

/// A transient notice shown in the chrome until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub text: String,
}

/// Application session state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<SessionUser>,
    theme: Theme,
    notices: Vec<Notice>,
    next_notice_id: u64,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign in with the seeded account for `role`, replacing any
    /// current user.
    pub fn login(&mut self, role: Role) {
        self.user = Some(SessionUser {
            display_name: role.mock_display_name().to_string(),
            role,
        });
    }

    pub fn logout(&mut self) {
        self.user = None;
    }

    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Queue a notice; returns its id for later dismissal.
    pub fn push_notice(&mut self, text: impl Into<String>) -> u64 {
        let id = self.next_notice_id;
        self.next_notice_id += 1;
        self.notices.push(Notice {
            id,
            text: text.into(),
        });
        id
    }

    pub fn dismiss_notice(&mut self, id: u64) {
        self.notices.retain(|notice| notice.id != id);
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}
