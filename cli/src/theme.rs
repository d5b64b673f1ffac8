//! Terminal color palettes.

use ratatui::style::{Color, Style};

use crate::data::IndicatorColor;

/// The semantic colors used in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    /// Main background color
    pub bg: Color,
    /// Dialog/modal background color
    pub dialog_bg: Color,
    /// Primary foreground/text color
    pub fg: Color,
    /// Primary accent color (keys, titles)
    pub accent: Color,
    /// Muted/dimmed text color
    pub muted: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub border: Color,
    pub graph_line: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(0x16, 0x16, 0x1e),
            dialog_bg: Color::Rgb(0x23, 0x23, 0x2d),
            fg: Color::Rgb(0xe6, 0xe6, 0xf0),
            accent: Color::Rgb(0x8a, 0xb4, 0xf8),
            muted: Color::Rgb(0x80, 0x80, 0x8c),
            success: Color::Rgb(0x81, 0xc7, 0x84),
            warning: Color::Rgb(0xff, 0xb7, 0x4d),
            danger: Color::Rgb(0xef, 0x53, 0x50),
            border: Color::Rgb(0x3c, 0x3c, 0x50),
            graph_line: Color::Rgb(0x8a, 0xb4, 0xf8),
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(0xfa, 0xfa, 0xfc),
            dialog_bg: Color::Rgb(0xee, 0xee, 0xf2),
            fg: Color::Rgb(0x1e, 0x1e, 0x28),
            accent: Color::Rgb(0x1a, 0x5f, 0xd0),
            muted: Color::Rgb(0x6e, 0x6e, 0x7a),
            success: Color::Rgb(0x2e, 0x7d, 0x32),
            warning: Color::Rgb(0xb2, 0x6a, 0x00),
            danger: Color::Rgb(0xc6, 0x28, 0x28),
            border: Color::Rgb(0xc8, 0xc8, 0xd4),
            graph_line: Color::Rgb(0x1a, 0x5f, 0xd0),
        }
    }

    pub fn fg_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self::dark()
    }
}

/// Convert an indicator color for rendering.
pub fn indicator_color(color: IndicatorColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}
