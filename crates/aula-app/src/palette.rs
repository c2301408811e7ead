#![forbid(unsafe_code)]

//! Theme palettes.
//!
//! Every render path takes the active palette by reference; nothing
//! reads the theme from ambient state.

use aula_model::Theme;
use aula_tui::style::{Color, Style};

/// Resolved colors for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Screen background.
    pub bg: Color,
    /// Default text.
    pub fg: Color,
    /// De-emphasized text (hints, separators, secondary columns).
    pub muted: Color,
    /// Chrome bars background.
    pub chrome_bg: Color,
    /// Chrome bars text.
    pub chrome_fg: Color,
    /// Interactive highlight (selected period, active crumb).
    pub accent: Color,
    /// Improving metrics.
    pub positive: Color,
    /// Metrics needing attention.
    pub negative: Color,
}

impl Palette {
    /// Base text style on the screen background.
    #[must_use]
    pub fn text(&self) -> Style {
        Style::new().fg(self.fg).bg(self.bg)
    }

    /// De-emphasized text style.
    #[must_use]
    pub fn muted(&self) -> Style {
        Style::new().fg(self.muted).bg(self.bg)
    }

    /// Chrome bar style.
    #[must_use]
    pub fn chrome(&self) -> Style {
        Style::new().fg(self.chrome_fg).bg(self.chrome_bg)
    }
}

const DARK: Palette = Palette {
    bg: Color::Rgb { r: 24, g: 26, b: 32 },
    fg: Color::Rgb { r: 214, g: 218, b: 228 },
    muted: Color::Rgb { r: 130, g: 136, b: 150 },
    chrome_bg: Color::Rgb { r: 38, g: 42, b: 54 },
    chrome_fg: Color::Rgb { r: 226, g: 230, b: 240 },
    accent: Color::Rgb { r: 120, g: 170, b: 255 },
    positive: Color::Rgb { r: 120, g: 200, b: 140 },
    negative: Color::Rgb { r: 235, g: 120, b: 120 },
};

const LIGHT: Palette = Palette {
    bg: Color::Rgb { r: 246, g: 247, b: 250 },
    fg: Color::Rgb { r: 32, g: 36, b: 44 },
    muted: Color::Rgb { r: 110, g: 116, b: 130 },
    chrome_bg: Color::Rgb { r: 222, g: 226, b: 236 },
    chrome_fg: Color::Rgb { r: 28, g: 32, b: 40 },
    accent: Color::Rgb { r: 30, g: 90, b: 200 },
    negative: Color::Rgb { r: 190, g: 40, b: 40 },
    positive: Color::Rgb { r: 20, g: 140, b: 70 },
};

/// The palette for a theme.
#[must_use]
pub const fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Dark => &DARK,
        Theme::Light => &LIGHT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_resolve_to_distinct_palettes() {
        let dark = palette(Theme::Dark);
        let light = palette(Theme::Light);
        assert_ne!(dark.bg, light.bg);
        assert_ne!(dark.fg, light.fg);
    }
}
