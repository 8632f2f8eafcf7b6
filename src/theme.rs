// Theme support for the TUI
//
// Three built-in palettes selected by name from config:
// "dark" and "light" use true color (RGB), "terminal" uses the terminal's
// own ANSI palette. Unknown names fall back to "dark".

use crate::model::TrainingType;
use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Complete resolved theme ready for use in the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ─── Terminal Colors ─────────────────────────────────────
    pub background: Color,
    pub foreground: Color,

    // ─── UI Element Colors ───────────────────────────────────
    pub title: Color,
    pub border: Color,
    pub highlight: Color,
    pub status_bar: Color,
    pub day_header: Color,
    pub error: Color,
    pub warning: Color,

    // ─── Selection Colors ────────────────────────────────────
    pub selection: Color,
    pub selection_fg: Color,

    // ─── Secondary/Muted Text ────────────────────────────────
    pub muted: Color,

    // ─── Training Type Colors ────────────────────────────────
    /// Indexed by `TrainingType::index()`
    pub kinds: [Color; 6],

    // ─── Border Style ────────────────────────────────────────
    pub border_type: BorderType,
}

impl Theme {
    /// Theme names accepted in config
    pub const NAMES: [&'static str; 3] = ["dark", "light", "terminal"];

    /// Load theme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "terminal" | "auto" => Self::terminal(),
            _ => Self::dark(),
        }
    }

    /// Load theme by name, optionally dropping its background
    ///
    /// With `use_background = false` the terminal's default background shows
    /// through.
    pub fn by_name_with_background(name: &str, use_background: bool) -> Self {
        let mut theme = Self::by_name(name);
        if !use_background {
            theme.background = Color::Reset;
        }
        theme
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color::Rgb(0x1e, 0x1e, 0x2e),
            foreground: Color::Rgb(0xcd, 0xd6, 0xf4),
            title: Color::Rgb(0x89, 0xb4, 0xfa),       // blue
            border: Color::Rgb(0x58, 0x5b, 0x70),      // surface
            highlight: Color::Rgb(0xf9, 0xe2, 0xaf),   // yellow
            status_bar: Color::Rgb(0xa6, 0xe3, 0xa1),  // green
            day_header: Color::Rgb(0xcb, 0xa6, 0xf7),  // mauve
            error: Color::Rgb(0xf3, 0x8b, 0xa8),       // red
            warning: Color::Rgb(0xfa, 0xb3, 0x87),     // peach
            selection: Color::Rgb(0x45, 0x47, 0x5a),
            selection_fg: Color::Rgb(0xf5, 0xe0, 0xdc),
            muted: Color::Rgb(0x7f, 0x84, 0x9c),
            kinds: [
                Color::Rgb(0xf3, 0x8b, 0xa8), // Peito
                Color::Rgb(0x89, 0xb4, 0xfa), // Costas
                Color::Rgb(0xa6, 0xe3, 0xa1), // Pernas
                Color::Rgb(0xf9, 0xe2, 0xaf), // Ombros
                Color::Rgb(0xcb, 0xa6, 0xf7), // Braços
                Color::Rgb(0x94, 0xe2, 0xd5), // Cardio
            ],
            border_type: BorderType::Rounded,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color::Rgb(0xef, 0xf1, 0xf5),
            foreground: Color::Rgb(0x4c, 0x4f, 0x69),
            title: Color::Rgb(0x1e, 0x66, 0xf5),
            border: Color::Rgb(0xac, 0xb0, 0xbe),
            highlight: Color::Rgb(0xdf, 0x8e, 0x1d),
            status_bar: Color::Rgb(0x40, 0xa0, 0x2b),
            day_header: Color::Rgb(0x88, 0x39, 0xef),
            error: Color::Rgb(0xd2, 0x0f, 0x39),
            warning: Color::Rgb(0xfe, 0x64, 0x0b),
            selection: Color::Rgb(0xcc, 0xd0, 0xda),
            selection_fg: Color::Rgb(0x4c, 0x4f, 0x69),
            muted: Color::Rgb(0x8c, 0x8f, 0xa1),
            kinds: [
                Color::Rgb(0xd2, 0x0f, 0x39),
                Color::Rgb(0x1e, 0x66, 0xf5),
                Color::Rgb(0x40, 0xa0, 0x2b),
                Color::Rgb(0xdf, 0x8e, 0x1d),
                Color::Rgb(0x88, 0x39, 0xef),
                Color::Rgb(0x17, 0x92, 0x99),
            ],
            border_type: BorderType::Plain,
        }
    }

    /// Terminal theme - uses the terminal's ANSI palette
    pub fn terminal() -> Self {
        Self {
            name: "terminal".to_string(),
            background: Color::Reset,
            foreground: Color::Reset,
            title: Color::Cyan,
            border: Color::DarkGray,
            highlight: Color::Yellow,
            status_bar: Color::Green,
            day_header: Color::Magenta,
            error: Color::Red,
            warning: Color::Yellow,
            selection: Color::DarkGray,
            selection_fg: Color::White,
            muted: Color::Gray,
            kinds: [
                Color::Red,
                Color::Blue,
                Color::Green,
                Color::Yellow,
                Color::Magenta,
                Color::Cyan,
            ],
            border_type: BorderType::Plain,
        }
    }

    /// Accent color for a training type
    pub fn kind_color(&self, kind: TrainingType) -> Color {
        self.kinds[kind.index()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_known_and_fallback() {
        for name in Theme::NAMES {
            assert_eq!(Theme::by_name(name).name, name);
        }
        assert_eq!(Theme::by_name("LIGHT").name, "light");
        assert_eq!(Theme::by_name("nope").name, "dark");
    }

    #[test]
    fn test_background_can_be_dropped() {
        let theme = Theme::by_name_with_background("dark", false);
        assert_eq!(theme.background, Color::Reset);
        assert_ne!(theme.foreground, Color::Reset);
    }
}
