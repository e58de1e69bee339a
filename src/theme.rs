//! Fixed display palette
//!
//! All colors are hard-coded display constants, not configuration. The
//! first three are what the highlight rules paint; the rest is panel
//! chrome.

use crate::highlight::{Color, Style};

/// Reserved words: pink, bold
pub const KEYWORD: Style = Style::new(Color::Rgb(0xff, 0x79, 0xc6)).bold();

/// String literals: pale yellow
pub const STRING: Style = Style::new(Color::Rgb(0xf1, 0xfa, 0x8c));

/// Comments: slate blue
pub const COMMENT: Style = Style::new(Color::Rgb(0x62, 0x72, 0xa4));

/// Accent for the active tab and selections outside the focused panel
pub const ACCENT: Style = Style::new(Color::Rgb(0x3b, 0x82, 0xf6)).bold();

/// Muted chrome: inactive tabs, directory names, panel borders
pub const MUTED: Style = Style::new(Color::Rgb(0x64, 0x74, 0x8b));
