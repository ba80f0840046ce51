//! Theme and styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for a theme.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Brand Colors
    pub primary: Color,
    pub accent: Color,

    // Semantic Colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // Background Colors
    pub bg_dark: Color,
    pub bg_highlight: Color,

    // Text Colors
    pub text: Color,
    pub text_muted: Color,
    pub text_dim: Color,

    // Grading Colors
    pub rating_pass: Color,
    pub rating_fail: Color,

    /// One color per mastery level, 0 through 4.
    pub levels: [Color; 5],
}

/// Available theme names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeName {
    Slate,
    Washi,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Slate => "default",
            ThemeName::Washi => "washi",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeName::Slate => "Slate",
            ThemeName::Washi => "Washi",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "washi" | "paper" | "light" => ThemeName::Washi,
            _ => ThemeName::Slate,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ThemeName::Slate => ThemeName::Washi,
            ThemeName::Washi => ThemeName::Slate,
        }
    }
}

/// Theme struct that holds colors and provides style methods.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,
    pub colors: ThemeColors,
}

impl Theme {
    pub fn new(name: ThemeName) -> Self {
        let colors = match name {
            ThemeName::Slate => Self::slate_colors(),
            ThemeName::Washi => Self::washi_colors(),
        };
        Self { name, colors }
    }

    pub fn from_name(name: &str) -> Self {
        Self::new(ThemeName::parse(name))
    }

    fn slate_colors() -> ThemeColors {
        ThemeColors {
            primary: Color::Rgb(148, 163, 184),     // Slate 400
            accent: Color::Rgb(244, 114, 182),      // Pink 400

            success: Color::Rgb(34, 197, 94),       // Green 500
            warning: Color::Rgb(250, 204, 21),      // Yellow 400
            error: Color::Rgb(220, 38, 38),         // Red 600

            bg_dark: Color::Rgb(15, 23, 42),        // Slate 900
            bg_highlight: Color::Rgb(51, 65, 85),   // Slate 700

            text: Color::Rgb(241, 245, 249),        // Slate 100
            text_muted: Color::Rgb(148, 163, 184),  // Slate 400
            text_dim: Color::Rgb(100, 116, 139),    // Slate 500

            rating_pass: Color::Rgb(34, 197, 94),
            rating_fail: Color::Rgb(220, 38, 38),

            levels: [
                Color::Rgb(100, 116, 139),
                Color::Rgb(251, 191, 36),
                Color::Rgb(56, 189, 248),
                Color::Rgb(129, 140, 248),
                Color::Rgb(34, 197, 94),
            ],
        }
    }

    /// Light palette on off-white paper.
    fn washi_colors() -> ThemeColors {
        ThemeColors {
            primary: Color::Rgb(0x2E, 0x4A, 0x62),      // ai (indigo)
            accent: Color::Rgb(0xB9, 0x42, 0x47),       // enji (crimson)

            success: Color::Rgb(0x40, 0x7A, 0x52),      // tokiwa (evergreen)
            warning: Color::Rgb(0xC0, 0x7E, 0x1A),      // kohaku (amber)
            error: Color::Rgb(0xA2, 0x20, 0x41),        // shinku

            bg_dark: Color::Rgb(0xF4, 0xEF, 0xE1),      // kinari (raw silk)
            bg_highlight: Color::Rgb(0xE3, 0xDA, 0xC2),

            text: Color::Rgb(0x26, 0x24, 0x1F),         // sumi
            text_muted: Color::Rgb(0x5B, 0x55, 0x4A),
            text_dim: Color::Rgb(0x8E, 0x86, 0x78),

            rating_pass: Color::Rgb(0x40, 0x7A, 0x52),
            rating_fail: Color::Rgb(0xA2, 0x20, 0x41),

            levels: [
                Color::Rgb(0x8E, 0x86, 0x78),
                Color::Rgb(0xC0, 0x7E, 0x1A),
                Color::Rgb(0x3A, 0x6E, 0x8F),
                Color::Rgb(0x2E, 0x4A, 0x62),
                Color::Rgb(0x40, 0x7A, 0x52),
            ],
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Styles
    // ══════════════════════════════════════════════════════════════════════

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.colors.text)
            .add_modifier(Modifier::BOLD)
    }

    pub fn subtitle(&self) -> Style {
        Style::default()
            .fg(self.colors.text_muted)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.colors.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.colors.bg_highlight)
            .fg(self.colors.text)
    }

    pub fn card_front(&self) -> Style {
        Style::default()
            .fg(self.colors.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn card_back(&self) -> Style {
        Style::default()
            .fg(self.colors.success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn level(&self, level: u8) -> Style {
        let i = (level as usize).min(self.colors.levels.len() - 1);
        Style::default()
            .fg(self.colors.levels[i])
            .add_modifier(Modifier::BOLD)
    }

    pub fn stats_due(&self) -> Style {
        Style::default()
            .fg(self.colors.warning)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.colors.text_dim)
    }

    pub fn key_highlight(&self) -> Style {
        Style::default()
            .fg(self.colors.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.colors.accent)
        } else {
            Style::default().fg(self.colors.text_muted)
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeName::Slate)
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Icons
// ══════════════════════════════════════════════════════════════════════════

pub mod icons {
    pub const CHECK: &str = "✓";
    pub const CROSS: &str = "✗";
    pub const DOT: &str = "●";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for name in [ThemeName::Slate, ThemeName::Washi] {
            assert_eq!(ThemeName::parse(name.as_str()), name);
            assert_eq!(name.next().next(), name);
        }
        assert_eq!(ThemeName::parse("unknown"), ThemeName::Slate);
    }
}
