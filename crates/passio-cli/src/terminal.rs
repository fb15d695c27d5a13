//! Terminal styling and color utilities.
//!
//! This module provides ANSI escape code definitions and color detection
//! for text output. Colors are only emitted when stdout is a terminal and
//! the environment does not opt out.

use std::io::IsTerminal;

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bright bold white for entity names.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for identifiers and secondary details.
    pub const GRAY: &str = "\x1b[90m";
    /// Cyan for route references.
    pub const CYAN: &str = "\x1b[36m";
    /// Green for match scores and in-service vehicles.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow for ordinary alerts.
    pub const YELLOW: &str = "\x1b[33m";
    /// Red for important alerts and out-of-service vehicles.
    pub const RED: &str = "\x1b[31m";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub cyan: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
    pub red: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            cyan: colors::CYAN,
            green: colors::GREEN,
            yellow: colors::YELLOW,
            red: colors::RED,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            white_bold: "",
            gray: "",
            cyan: "",
            green: "",
            yellow: "",
            red: "",
        }
    }

    /// Create a palette based on terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() && std::io::stdout().is_terminal() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the environment allows ANSI color codes.
///
/// Respects the `NO_COLOR` environment variable (https://no-color.org/)
/// and the `TERM=dumb` convention.
#[must_use]
pub fn supports_color() -> bool {
    color_allowed(
        std::env::var_os("NO_COLOR").is_some(),
        std::env::var("TERM").ok().as_deref(),
    )
}

fn color_allowed(no_color: bool, term: Option<&str>) -> bool {
    if no_color {
        return false;
    }
    !matches!(term, Some(term) if term.eq_ignore_ascii_case("dumb"))
}

/// Format an optional coordinate pair as `lat, lon`.
#[must_use]
pub fn format_position(latitude: Option<f64>, longitude: Option<f64>) -> Option<String> {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => Some(format!("{:.5}, {:.5}", lat, lon)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_palette_colored() {
        let palette = ColorPalette::colored();
        assert_eq!(palette.reset, "\x1b[0m");
        assert_eq!(palette.red, "\x1b[31m");
    }

    #[test]
    fn test_color_palette_plain() {
        let palette = ColorPalette::plain();
        assert!(palette.reset.is_empty());
        assert!(palette.white_bold.is_empty());
        assert!(palette.green.is_empty());
    }

    #[test]
    fn test_no_color_disables_colors() {
        assert!(!color_allowed(true, Some("xterm-256color")));
    }

    #[test]
    fn test_dumb_terminal_disables_colors() {
        assert!(!color_allowed(false, Some("dumb")));
        assert!(!color_allowed(false, Some("DUMB")));
    }

    #[test]
    fn test_colors_allowed_by_default() {
        assert!(color_allowed(false, Some("xterm")));
        assert!(color_allowed(false, None));
    }

    #[test]
    fn test_format_position() {
        assert_eq!(
            format_position(Some(36.0686), Some(-94.1748)).as_deref(),
            Some("36.06860, -94.17480")
        );
        assert_eq!(format_position(Some(36.0), None), None);
    }
}
