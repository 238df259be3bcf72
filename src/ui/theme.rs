//! Color themes.
//!
//! Two themes are active at any time: one for dark mode and one for light
//! mode, picked by preset name in the config. The `diary-*` presets follow
//! the palette of the web client (indigo accent on near-black / pale blue).

use ratatui::style::Color;
use thiserror::Error;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Screen background
    pub background: Color,
    /// Primary text
    pub foreground: Color,
    /// Background of form fields and entry cards
    pub surface: Color,
    /// Background for the selected card / focused field
    pub selection_bg: Color,
    /// Text on selection_bg
    pub selection_fg: Color,
    /// Borders, titles, key hints
    pub accent: Color,
    /// Secondary text (dates)
    pub dimmed: Color,
    /// Tertiary text (placeholders, status bar)
    pub dimmed_alt: Color,
    /// Alert popup border and busy indicator
    pub alert: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::diary_light()
    }
}

impl Theme {
    /// Dark diary theme
    pub fn diary_dark() -> Self {
        Self {
            background: Color::Rgb(18, 18, 18),      // #121212
            foreground: Color::Rgb(245, 245, 245),   // #f5f5f5
            surface: Color::Rgb(47, 47, 47),         // #2f2f2f
            selection_bg: Color::Rgb(67, 56, 202),   // #4338ca
            selection_fg: Color::Rgb(255, 255, 255), // #ffffff
            accent: Color::Rgb(79, 70, 229),         // #4f46e5
            dimmed: Color::Rgb(119, 119, 119),       // #777777
            dimmed_alt: Color::Rgb(90, 90, 90),      // #5a5a5a
            alert: Color::Rgb(239, 68, 68),          // #ef4444
        }
    }

    /// Light diary theme
    pub fn diary_light() -> Self {
        Self {
            background: Color::Rgb(245, 247, 255),   // #f5f7ff
            foreground: Color::Rgb(51, 51, 51),      // #333333
            surface: Color::Rgb(255, 255, 255),      // #ffffff
            selection_bg: Color::Rgb(224, 231, 255), // #e0e7ff
            selection_fg: Color::Rgb(51, 51, 51),    // #333333
            accent: Color::Rgb(79, 70, 229),         // #4f46e5
            dimmed: Color::Rgb(119, 119, 119),       // #777777
            dimmed_alt: Color::Rgb(160, 160, 170),   // #a0a0aa
            alert: Color::Rgb(220, 38, 38),          // #dc2626
        }
    }

    /// Catppuccin Latte theme (light)
    pub fn catppuccin_latte() -> Self {
        Self {
            background: Color::Rgb(239, 241, 245),    // #eff1f5 (base)
            foreground: Color::Rgb(76, 79, 105),      // #4c4f69 (text)
            surface: Color::Rgb(230, 233, 239),       // #e6e9ef (mantle)
            selection_bg: Color::Rgb(204, 208, 218),  // #ccd0da (surface0)
            selection_fg: Color::Rgb(76, 79, 105),    // #4c4f69 (text)
            accent: Color::Rgb(30, 102, 245),         // #1e66f5 (blue)
            dimmed: Color::Rgb(108, 111, 133),        // #6c6f85 (subtext0)
            dimmed_alt: Color::Rgb(140, 143, 161),    // #8c8fa1 (overlay2)
            alert: Color::Rgb(210, 15, 57),           // #d20f39 (red)
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            background: Color::Rgb(46, 52, 64),       // #2e3440 (nord0)
            foreground: Color::Rgb(236, 239, 244),    // #eceff4 (nord6)
            surface: Color::Rgb(59, 66, 82),          // #3b4252 (nord1)
            selection_bg: Color::Rgb(67, 76, 94),     // #434c5e (nord2)
            selection_fg: Color::Rgb(236, 239, 244),  // #eceff4 (nord6)
            accent: Color::Rgb(136, 192, 208),        // #88c0d0 (nord8)
            dimmed: Color::Rgb(216, 222, 233),        // #d8dee9 (nord4)
            dimmed_alt: Color::Rgb(76, 86, 106),      // #4c566a (nord3)
            alert: Color::Rgb(191, 97, 106),          // #bf616a (nord11)
        }
    }

    /// Load theme from preset name
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "diary-dark" | "diary_dark" | "dark" => Some(Self::diary_dark()),
            "diary-light" | "diary_light" | "light" | "default" => Some(Self::diary_light()),
            "catppuccin-latte" | "catppuccin_latte" => Some(Self::catppuccin_latte()),
            "nord" => Some(Self::nord()),
            _ => None,
        }
    }
}

/// Color parsing error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("invalid color length (expected 3, 6, or 8 hex chars)")]
    InvalidLength,
    #[error("invalid hex character")]
    InvalidHex,
}

/// Parse hex color string to Color
/// Supports: #rrggbb, #rgb, #rrggbbaa (alpha ignored), with or without '#'
pub fn parse_hex_color(s: &str) -> Result<Color, ColorError> {
    let s = s.trim().trim_start_matches('#');
    if !s.is_ascii() {
        return Err(ColorError::InvalidHex);
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&s[range], 16).map_err(|_| ColorError::InvalidHex)
    };

    match s.len() {
        3 => {
            let (r, g, b) = (channel(0..1)?, channel(1..2)?, channel(2..3)?);
            Ok(Color::Rgb(r * 17, g * 17, b * 17))
        }
        6 | 8 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        _ => Err(ColorError::InvalidLength),
    }
}
