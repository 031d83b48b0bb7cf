//! Color themes for podtui
//!
//! Two palettes (neon dark and paper light) and the style helpers the views
//! render with. The active mode lives on `App`; renderers only ever read a
//! `Theme` derived from it.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Which palette is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            ThemeMode::Dark => Theme::DARK,
            ThemeMode::Light => Theme::LIGHT,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeMode::Dark => write!(f, "dark"),
            ThemeMode::Light => write!(f, "light"),
        }
    }
}

/// A color palette plus style helpers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub highlight: Color,
    pub text: Color,
    pub dim: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    /// Slightly offset background for panels and inputs
    pub background_light: Color,
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::DARK
    }
}

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // PALETTES
    // ═══════════════════════════════════════════════════════════════════════

    /// Neon on deep black-blue
    pub const DARK: Theme = Theme {
        background: Color::Rgb(0x0a, 0x0a, 0x0f),
        primary: Color::Rgb(0x00, 0xff, 0xf2),
        secondary: Color::Rgb(0xff, 0x00, 0xff),
        accent: Color::Rgb(0xff, 0xff, 0x00),
        highlight: Color::Rgb(0xff, 0x00, 0x80),
        text: Color::Rgb(0xe0, 0xe0, 0xe0),
        dim: Color::Rgb(0x40, 0x40, 0x50),
        success: Color::Rgb(0x00, 0xff, 0x00),
        warning: Color::Rgb(0xff, 0xaa, 0x00),
        error: Color::Rgb(0xff, 0x00, 0x40),
        background_light: Color::Rgb(0x14, 0x14, 0x1e),
        border: Color::Rgb(0x00, 0x80, 0x78),
        border_focused: Color::Rgb(0x00, 0xff, 0xf2),
    };

    /// Ink on off-white paper
    pub const LIGHT: Theme = Theme {
        background: Color::Rgb(0xf5, 0xf5, 0xf0),
        primary: Color::Rgb(0x00, 0x75, 0x6e),
        secondary: Color::Rgb(0xa0, 0x00, 0x8c),
        accent: Color::Rgb(0x8a, 0x5a, 0x00),
        highlight: Color::Rgb(0xc0, 0x00, 0x5a),
        text: Color::Rgb(0x1a, 0x1a, 0x24),
        dim: Color::Rgb(0x80, 0x80, 0x90),
        success: Color::Rgb(0x00, 0x7a, 0x1f),
        warning: Color::Rgb(0x9a, 0x55, 0x00),
        error: Color::Rgb(0xc0, 0x00, 0x20),
        background_light: Color::Rgb(0xe8, 0xe8, 0xe2),
        border: Color::Rgb(0x70, 0xa8, 0xa4),
        border_focused: Color::Rgb(0x00, 0x75, 0x6e),
    };

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    /// Highlighted text (inverted with primary color)
    pub fn highlighted(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected item style
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Dimmed/muted text
    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success).add_modifier(Modifier::BOLD)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning).add_modifier(Modifier::BOLD)
    }

    /// Title/header style
    pub fn title(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn secondary(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Normal/unfocused border
    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Focused border
    pub fn border_focused(&self) -> Style {
        Style::default()
            .fg(self.border_focused)
            .add_modifier(Modifier::BOLD)
    }

    /// Input fields
    pub fn input(&self) -> Style {
        Style::default().fg(self.text).bg(self.background_light)
    }

    /// Keybinding hint
    pub fn keybind(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.text).bg(self.background_light)
    }

    /// Loading indicator
    pub fn loading(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    /// Dates and counts
    pub fn metadata(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    /// Genre tags
    pub fn genre(&self) -> Style {
        Style::default().fg(self.background).bg(self.secondary)
    }

    /// Current page in the page control
    pub fn page_current(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Calculate relative luminance for a color (used in contrast ratio)
/// Formula: https://www.w3.org/TR/WCAG20/#relativeluminancedef
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel_luminance(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
}

/// Contrast ratio between two colors, from 1 (same) to 21 (black/white)
/// WCAG AA requires >= 4.5:1 for normal text, >= 3:1 for large text
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

/// Check if a foreground/background pair meets WCAG AA for normal text
pub fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

/// Check if a foreground/background pair meets WCAG AA for large text
pub fn meets_wcag_aa_large(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 3.0
}

/// Extract RGB tuple from ratatui Color (only works for Rgb variant)
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}
