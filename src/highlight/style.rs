//! Display attribute types
//!
//! Colors, the attribute bundles rules paint with, and the ephemeral
//! spans the block highlighter emits.

/// Terminal color: the ANSI palette plus true-color values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb(u8, u8, u8),
}

/// A bundle of display attributes for a run of text
///
/// Built with const chains so palettes can live in constants:
/// `Style::new(Color::Blue).bold()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Color,
    pub bold: bool,
    pub reverse: bool,
}

impl Style {
    /// A plain style with the given foreground
    pub const fn new(fg: Color) -> Self {
        Self {
            fg,
            bold: false,
            reverse: false,
        }
    }

    /// Add bold weight
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Swap foreground and background
    pub const fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }
}

/// A contiguous byte range of a block carrying one style
///
/// Produced fresh on every highlight pass and consumed by the renderer;
/// never retained between passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// First byte of the range
    pub start: usize,
    /// One past the last byte of the range
    pub end: usize,
    /// Attributes painted over the range
    pub style: Style,
}

impl Span {
    pub fn new(start: usize, end: usize, style: Style) -> Self {
        Self { start, end, style }
    }

    /// Whether a byte offset falls inside the range
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Range length in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the range covers nothing
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_const_style_chain() {
        const ACCENT: Style = Style::new(Color::Rgb(0x3b, 0x82, 0xf6)).bold();
        assert_eq!(ACCENT.fg, Color::Rgb(0x3b, 0x82, 0xf6));
        assert!(ACCENT.bold);
        assert!(!ACCENT.reverse);
    }

    #[test]
    fn test_reversed() {
        let style = Style::new(Color::Default).reversed();
        assert!(style.reverse);
        assert_eq!(style, Style::default().reversed());
    }

    #[test]
    fn test_span_bounds() {
        let span = Span::new(5, 10, Style::default());
        assert!(!span.contains(4));
        assert!(span.contains(5));
        assert!(span.contains(9));
        assert!(!span.contains(10));
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert!(Span::new(3, 3, Style::default()).is_empty());
    }
}
