//! Color theme system for pyrev.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI
//! surface pyrev renders. Two built-in themes are provided:
//!
//! - `dark` — uses ANSI 16 colors (`Color::Reset`, `Color::DarkGray`, etc.)
//!   so it works on any terminal including 256-color SSH sessions with no
//!   truecolor support.
//! - `catppuccin_mocha` — Catppuccin Mocha palette in RGB; requires truecolor.

use ratatui::style::Color;

/// All color values used across pyrev's UI surfaces.
///
/// Every field is a `ratatui::style::Color`. Callers use `theme.field`
/// directly inside `Style::default().fg(theme.border_active)`.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel border
    /// Border color for the body panel.
    pub border_active: Color,
    /// Border color for inactive chrome.
    pub border_inactive: Color,

    // Tab bar
    /// Foreground for the selected tab.
    pub tab_active: Color,
    /// Foreground for the unselected tab.
    pub tab_inactive: Color,

    // Body text
    /// Color for placeholder and guidance text.
    pub guidance: Color,
    /// Color for report body text.
    pub report_text: Color,

    // Status bar
    /// Status bar background.
    pub status_bar_bg: Color,
    /// Status bar foreground (general text).
    pub status_bar_fg: Color,
    /// Mode indicator color when in NORMAL mode.
    pub status_mode_normal: Color,
    /// Mode indicator color when in INSERT mode.
    pub status_mode_insert: Color,
    /// Color for the missing-credential warning.
    pub warning: Color,
    /// Color for the analyzing spinner.
    pub spinner: Color,

    // General
    /// Application background (used for clearing areas).
    pub background: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    ///
    /// Works on all terminals: 16-color, 256-color, and truecolor. Suitable
    /// as the default when no config is present or color capability is
    /// unknown.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            tab_active: Color::Cyan,
            tab_inactive: Color::DarkGray,

            guidance: Color::DarkGray,
            report_text: Color::Reset,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_insert: Color::Green,
            warning: Color::Yellow,
            spinner: Color::Green,

            background: Color::Reset,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Requires a truecolor terminal. Colors degrade to the nearest ANSI
    /// 256-color approximation on non-truecolor terminals, but visual
    /// fidelity is reduced. Use `dark()` on SSH or 256-color terminals.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        // Catppuccin Mocha palette (selected subset)
        let green = Color::Rgb(166, 227, 161);    // #a6e3a1
        let yellow = Color::Rgb(249, 226, 175);   // #f9e2af
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90);    // #45475a
        let base = Color::Rgb(30, 30, 46);        // #1e1e2e
        let text = Color::Rgb(205, 214, 244);     // #cdd6f4

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            tab_active: lavender,
            tab_inactive: overlay1,

            guidance: overlay1,
            report_text: text,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_normal: lavender,
            status_mode_insert: green,
            warning: yellow,
            spinner: green,

            background: base,
        }
    }

    /// Resolves a theme name string to the corresponding built-in theme.
    ///
    /// Unknown names fall back to `dark()` so a typo in config never
    /// prevents startup. The fallback is logged to stderr (not a hard error).
    ///
    /// # Arguments
    ///
    /// * `name` — theme name from config, e.g. `"dark"` or `"catppuccin-mocha"`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                eprintln!("pyrev: unknown theme '{}', falling back to 'dark'", other);
                Self::dark()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_falls_back_to_dark() {
        let theme = Theme::from_name("no-such-theme");
        assert_eq!(theme.border_active, Theme::dark().border_active);
    }

    #[test]
    fn both_spellings_of_mocha_resolve() {
        let a = Theme::from_name("catppuccin-mocha");
        let b = Theme::from_name("catppuccin_mocha");
        assert_eq!(a.border_active, b.border_active);
    }
}
