//! Ayu color theme and styling for report output.
//!
//! Styling is a decorator applied to raw text before it becomes a layout
//! token: a [`Styler`] turns `(text, Style)` into a display string.
//! [`AnsiStyler`] emits truecolor escape sequences; [`PlainStyler`] returns
//! the text untouched and is what tests and `--no-color` use.
//!
//! Color source: <https://github.com/ayu-theme/ayu-colors>

use owo_colors::OwoColorize;

// ---------------------------------------------------------------------------
// Ayu Dark color palette (RGB values)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - bright green
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454 - bright yellow
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178 - bright red
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff - bright blue
const PURPLE: (u8, u8, u8) = (0xd2, 0xa6, 0xff); // #d2a6ff
const CYAN: (u8, u8, u8) = (0x95, 0xe6, 0xcb); // #95e6cb
const TEXT: (u8, u8, u8) = (0xbf, 0xbd, 0xb6); // #bfbdb6 - foreground

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Text attributes: an optional foreground color and boldness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<(u8, u8, u8)>,
    pub bold: bool,
}

impl Style {
    /// Section headers and the report title.
    pub const HEADER: Self = Self::bold(CYAN);
    /// The rule under the title.
    pub const RULE: Self = Self::color(CYAN);
    /// Branch names.
    pub const BRANCH: Self = Self::bold(PASS);
    /// Abbreviated commit hashes.
    pub const HASH: Self = Self::color(WARN);
    /// Commit dates.
    pub const DATE: Self = Self::color(PURPLE);
    /// Committer names.
    pub const COMMITTER: Self = Self::color(ACCENT);
    /// Commit subjects.
    pub const SUBJECT: Self = Self::color(TEXT);
    /// The `(none)` line of an empty section.
    pub const PLACEHOLDER: Self = Self::color(WARN);
    /// Error labels on stderr.
    pub const ERROR: Self = Self::color(FAIL);

    pub const fn color(rgb: (u8, u8, u8)) -> Self {
        Self {
            fg: Some(rgb),
            bold: false,
        }
    }

    pub const fn bold(rgb: (u8, u8, u8)) -> Self {
        Self {
            fg: Some(rgb),
            bold: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Stylers
// ---------------------------------------------------------------------------

/// Applies a [`Style`] to text.
///
/// Implementations must not change the visible characters, only wrap them
/// in non-printing sequences.
pub trait Styler {
    fn paint(&self, text: &str, style: Style) -> String;
}

/// Truecolor ANSI styling via `owo-colors`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiStyler;

impl Styler for AnsiStyler {
    fn paint(&self, text: &str, style: Style) -> String {
        // An empty token must stay empty so the wrapper can skip it.
        if text.is_empty() {
            return String::new();
        }
        match (style.fg, style.bold) {
            (Some((r, g, b)), true) => text.truecolor(r, g, b).bold().to_string(),
            (Some((r, g, b)), false) => text.truecolor(r, g, b).to_string(),
            (None, true) => text.bold().to_string(),
            (None, false) => text.to_string(),
        }
    }
}

/// Leaves text unstyled.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyler;

impl Styler for PlainStyler {
    fn paint(&self, text: &str, _style: Style) -> String {
        text.to_string()
    }
}

/// Picks the styler for the given color decision.
pub fn styler_for(color: bool) -> &'static dyn Styler {
    if color { &AnsiStyler } else { &PlainStyler }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrap::visible_len;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_styler_is_identity() {
        assert_eq!(PlainStyler.paint("origin/main", Style::BRANCH), "origin/main");
    }

    #[test]
    fn ansi_styler_adds_escapes_only() {
        let painted = AnsiStyler.paint("origin/main", Style::BRANCH);
        assert!(painted.contains("origin/main"));
        assert!(painted.starts_with('\x1b'));
        assert_eq!(visible_len(&painted), "origin/main".len());
    }

    #[test]
    fn ansi_styler_keeps_empty_text_empty() {
        assert_eq!(AnsiStyler.paint("", Style::SUBJECT), "");
    }

    #[test]
    fn unstyled_passes_through() {
        assert_eq!(AnsiStyler.paint("x", Style::default()), "x");
    }

    #[test]
    fn styler_for_respects_choice() {
        assert_eq!(styler_for(false).paint("a", Style::HASH), "a");
        assert_ne!(styler_for(true).paint("a", Style::HASH), "a");
    }
}
