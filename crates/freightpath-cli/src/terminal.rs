//! Terminal styling for the text output formats.
//!
//! Colors are plain ANSI sequences resolved once into a [`ColorPalette`];
//! a disabled palette holds empty strings so callers can format
//! unconditionally.

use std::fmt::Display;

/// ANSI escape codes used by the CLI.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    /// Node, package and status emphasis.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Footer and secondary text.
    pub const GRAY: &str = "\x1b[90m";
    /// Banner border.
    pub const CYAN: &str = "\x1b[36m";
    /// Banner text.
    pub const ORANGE: &str = "\x1b[38;5;208m";
}

/// Resolved color codes, or empty strings when color is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub cyan: &'static str,
    pub orange: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            cyan: colors::CYAN,
            orange: colors::ORANGE,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            white_bold: "",
            gray: "",
            cyan: "",
            orange: "",
        }
    }

    /// Palette for the current process environment.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Wrap `value` in the bold emphasis color.
    pub fn emphasize(&self, value: impl Display) -> String {
        format!("{}{}{}", self.white_bold, value, self.reset)
    }

    /// Wrap `value` in the secondary gray.
    pub fn dim(&self, value: impl Display) -> String {
        format!("{}{}{}", self.gray, value, self.reset)
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Whether ANSI colors should be written, honouring `NO_COLOR`
/// (https://no-color.org/) and `TERM=dumb`.
#[must_use]
pub fn supports_color() -> bool {
    color_allowed(
        std::env::var_os("NO_COLOR").is_some(),
        std::env::var("TERM").ok().as_deref(),
    )
}

fn color_allowed(no_color: bool, term: Option<&str>) -> bool {
    !no_color && !term.is_some_and(|term| term.eq_ignore_ascii_case("dumb"))
}

/// Whether `LANG` or `LC_ALL` advertise a UTF-8 locale.
#[must_use]
pub fn supports_unicode() -> bool {
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .any(|locale| is_utf8_locale(&locale))
}

fn is_utf8_locale(locale: &str) -> bool {
    locale.to_ascii_uppercase().contains("UTF")
}

/// Format a count with comma thousand separators.
///
/// ```
/// # use freightpath_cli::terminal::format_with_separators;
/// assert_eq!(format_with_separators(999), "999");
/// assert_eq!(format_with_separators(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_with_separators(n: u64) -> String {
    let digits = n.to_string();
    let head = digits.len() % 3;
    let mut groups: Vec<&str> = Vec::new();
    if head > 0 {
        groups.push(&digits[..head]);
    }
    groups.extend(
        digits.as_bytes()[head..]
            .chunks(3)
            .filter_map(|chunk| std::str::from_utf8(chunk).ok()),
    );
    groups.join(",")
}
