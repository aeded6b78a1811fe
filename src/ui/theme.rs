//! Theme definitions for datascout
//!
//! Slate (default), Gruvbox, Nord, Dracula and Transparent.
//! One theme instance – applied globally to every module.

use crate::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// Complete theme with all required colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    // Accent colors
    pub accent: Color,
    pub accent_dim: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,

    // Generated code blocks
    pub code_bg: Color,

    // Internal flag for transparent mode
    is_transparent: bool,
}

impl Theme {
    /// Create a theme from a theme name
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Slate => Self::slate(),
            ThemeName::Gruvbox => Self::gruvbox(),
            ThemeName::Nord => Self::nord(),
            ThemeName::Dracula => Self::dracula(),
            ThemeName::Transparent => Self::transparent(),
        }
    }

    /// Slate + cyan (default)
    pub fn slate() -> Self {
        Self {
            bg: Color::Rgb(15, 23, 42),
            fg: Color::Rgb(226, 232, 240),
            fg_dim: Color::Rgb(148, 163, 184),
            accent: Color::Rgb(34, 211, 238),      // cyan-400
            accent_dim: Color::Rgb(14, 165, 233),  // sky-500
            success: Color::Rgb(74, 222, 128),
            warning: Color::Rgb(251, 191, 36),
            error: Color::Rgb(248, 113, 113),
            border: Color::Rgb(51, 65, 85),
            border_focused: Color::Rgb(6, 182, 212),
            selection_bg: Color::Rgb(51, 65, 85),
            selection_fg: Color::Rgb(241, 245, 249),
            code_bg: Color::Rgb(2, 6, 23),
            is_transparent: false,
        }
    }

    /// Gruvbox dark theme
    pub fn gruvbox() -> Self {
        Self {
            bg: Color::Rgb(40, 40, 40),
            fg: Color::Rgb(235, 219, 178),
            fg_dim: Color::Rgb(146, 131, 116),
            accent: Color::Rgb(254, 128, 25),
            accent_dim: Color::Rgb(214, 93, 14),
            success: Color::Rgb(184, 187, 38),
            warning: Color::Rgb(250, 189, 47),
            error: Color::Rgb(251, 73, 52),
            border: Color::Rgb(80, 73, 69),
            border_focused: Color::Rgb(168, 153, 132),
            selection_bg: Color::Rgb(80, 73, 69),
            selection_fg: Color::Rgb(235, 219, 178),
            code_bg: Color::Rgb(29, 32, 33),
            is_transparent: false,
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            bg: Color::Rgb(46, 52, 64),
            fg: Color::Rgb(236, 239, 244),
            fg_dim: Color::Rgb(76, 86, 106),
            accent: Color::Rgb(136, 192, 208),
            accent_dim: Color::Rgb(94, 129, 172),
            success: Color::Rgb(163, 190, 140),
            warning: Color::Rgb(235, 203, 139),
            error: Color::Rgb(191, 97, 106),
            border: Color::Rgb(59, 66, 82),
            border_focused: Color::Rgb(136, 192, 208),
            selection_bg: Color::Rgb(76, 86, 106),
            selection_fg: Color::Rgb(236, 239, 244),
            code_bg: Color::Rgb(36, 41, 51),
            is_transparent: false,
        }
    }

    /// Dracula theme
    pub fn dracula() -> Self {
        Self {
            bg: Color::Rgb(40, 42, 54),
            fg: Color::Rgb(248, 248, 242),
            fg_dim: Color::Rgb(98, 114, 164),      // comment
            accent: Color::Rgb(189, 147, 249),     // purple
            accent_dim: Color::Rgb(139, 233, 253), // cyan
            success: Color::Rgb(80, 250, 123),
            warning: Color::Rgb(241, 250, 140),
            error: Color::Rgb(255, 85, 85),
            border: Color::Rgb(68, 71, 90),
            border_focused: Color::Rgb(189, 147, 249),
            selection_bg: Color::Rgb(68, 71, 90),
            selection_fg: Color::Rgb(248, 248, 242),
            code_bg: Color::Rgb(33, 34, 44),
            is_transparent: false,
        }
    }

    /// Uses the terminal's own background
    pub fn transparent() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            fg_dim: Color::Gray,
            accent: Color::Cyan,
            accent_dim: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            selection_bg: Color::Reset,
            selection_fg: Color::White,
            code_bg: Color::Reset,
            is_transparent: true,
        }
    }

    // === STYLE HELPERS ===

    /// Adds the theme background unless running transparent
    fn on_bg(&self, style: Style) -> Style {
        if self.is_transparent {
            style
        } else {
            style.bg(self.bg)
        }
    }

    pub fn block_style(&self) -> Style {
        self.on_bg(Style::default())
    }

    pub fn text(&self) -> Style {
        self.on_bg(Style::default().fg(self.fg))
    }

    pub fn text_dim(&self) -> Style {
        self.on_bg(Style::default().fg(self.fg_dim))
    }

    pub fn title(&self) -> Style {
        self.on_bg(Style::default().fg(self.accent).add_modifier(Modifier::BOLD))
    }

    pub fn accent(&self) -> Style {
        self.on_bg(Style::default().fg(self.accent))
    }

    pub fn key_hint(&self) -> Style {
        self.accent().add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        let style = Style::default()
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD);
        if self.is_transparent {
            style
        } else {
            style.bg(self.selection_bg)
        }
    }

    pub fn border(&self) -> Style {
        self.on_bg(Style::default().fg(self.border))
    }

    pub fn border_focused(&self) -> Style {
        self.on_bg(Style::default().fg(self.border_focused))
    }

    pub fn tab_inactive(&self) -> Style {
        self.text_dim()
    }

    pub fn tab_active(&self) -> Style {
        self.title()
    }

    pub fn success(&self) -> Style {
        self.on_bg(Style::default().fg(self.success))
    }

    pub fn warning(&self) -> Style {
        self.on_bg(Style::default().fg(self.warning))
    }

    pub fn error(&self) -> Style {
        self.on_bg(Style::default().fg(self.error))
    }

    /// Generated code: own background so snippets stand out
    pub fn code(&self) -> Style {
        if self.is_transparent {
            Style::default().fg(self.fg)
        } else {
            Style::default().fg(self.fg).bg(self.code_bg)
        }
    }

    /// Language tag chip
    pub fn chip(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.accent_dim)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        let slate = Theme::from_name(ThemeName::Slate);
        assert_eq!(slate.bg, Color::Rgb(15, 23, 42));
        assert!(!slate.is_transparent);

        let nord = Theme::from_name(ThemeName::Nord);
        assert_eq!(nord.bg, Color::Rgb(46, 52, 64));

        let transparent = Theme::from_name(ThemeName::Transparent);
        assert!(transparent.is_transparent);
    }

    #[test]
    fn test_transparent_styles_have_no_background() {
        let t = Theme::transparent();
        assert_eq!(t.text().bg, None);
        assert_eq!(Theme::slate().text().bg, Some(Color::Rgb(15, 23, 42)));
    }
}
