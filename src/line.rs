//! One line of a text document
//!
//! Lines store their text without the trailing newline and expose
//! byte-offset editing plus tab-aware display-column arithmetic.

use unicode_width::UnicodeWidthChar;

/// A single line of text, newline excluded
#[derive(Debug, Clone)]
pub struct Line {
    /// The text content (without trailing newline)
    text: String,
}

impl Line {
    /// An empty line
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Wrap an owned string as a line
    pub fn from_string(s: String) -> Self {
        Self { text: s }
    }

    /// The text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the line holds no text
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Insert one character at a byte offset
    pub fn insert_char(&mut self, byte_pos: usize, ch: char) {
        self.text.insert(byte_pos, ch);
    }

    /// Remove a byte range, returning what was removed
    pub fn delete_range(&mut self, start: usize, end: usize) -> String {
        let deleted: String = self.text[start..end].to_string();
        self.text.replace_range(start..end, "");
        deleted
    }

    /// Split at a byte offset; the tail becomes a new line
    pub fn split_off(&mut self, byte_pos: usize) -> Line {
        let remainder = self.text.split_off(byte_pos);
        Line::from_string(remainder)
    }

    /// Glue another line onto the end of this one
    pub fn append(&mut self, other: Line) {
        self.text.push_str(other.text());
    }

    /// Get the display column for a byte position, expanding tabs
    pub fn display_col(&self, byte_pos: usize, tab_width: usize) -> usize {
        let mut col = 0;
        for (idx, ch) in self.text.char_indices() {
            if idx >= byte_pos {
                break;
            }
            col += char_width(ch, col, tab_width);
        }
        col
    }

    /// Get the byte position at or before a display column, expanding tabs
    ///
    /// Columns past the end of the line clamp to the line length.
    pub fn byte_at_col(&self, target_col: usize, tab_width: usize) -> usize {
        let mut col = 0;
        for (idx, ch) in self.text.char_indices() {
            if col >= target_col {
                return idx;
            }
            col += char_width(ch, col, tab_width);
        }
        self.text.len()
    }
}

/// Display width of one character at a given column
fn char_width(ch: char, col: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        tab_width - (col % tab_width)
    } else {
        UnicodeWidthChar::width(ch).unwrap_or(1)
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self::from_string(s.to_string())
    }
}

impl From<String> for Line {
    fn from(s: String) -> Self {
        Self::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line_operations() {
        let mut line = Line::from("Hello");
        assert_eq!(line.text(), "Hello");
        assert_eq!(line.len(), 5);
        assert!(!line.is_empty());

        line.insert_char(5, '!');
        assert_eq!(line.text(), "Hello!");
    }

    #[test]
    fn test_delete_range() {
        let mut line = Line::from("Hello World");
        let deleted = line.delete_range(0, 6);
        assert_eq!(deleted, "Hello ");
        assert_eq!(line.text(), "World");
    }

    #[test]
    fn test_split_off() {
        let mut line = Line::from("Hello World");
        let remainder = line.split_off(6);
        assert_eq!(line.text(), "Hello ");
        assert_eq!(remainder.text(), "World");
    }

    #[test]
    fn test_append() {
        let mut line = Line::from("Hello ");
        let other = Line::from("World");
        line.append(other);
        assert_eq!(line.text(), "Hello World");
    }

    #[test]
    fn test_display_col_expands_tabs() {
        let line = Line::from("\tx");
        assert_eq!(line.display_col(0, 4), 0);
        assert_eq!(line.display_col(1, 4), 4);
        assert_eq!(line.display_col(2, 4), 5);
    }

    #[test]
    fn test_display_col_partial_tab_stop() {
        // "ab\tc": the tab advances from column 2 to column 4
        let line = Line::from("ab\tc");
        assert_eq!(line.display_col(2, 4), 2);
        assert_eq!(line.display_col(3, 4), 4);
    }

    #[test]
    fn test_display_col_wide_chars() {
        let line = Line::from("\u{4f60}\u{597d}"); // two double-width chars
        assert_eq!(line.display_col(3, 4), 2);
        assert_eq!(line.display_col(6, 4), 4);
    }

    #[test]
    fn test_byte_at_col_roundtrip() {
        let line = Line::from("ab\tcd");
        for byte_pos in [0, 1, 2, 3, 4] {
            let col = line.display_col(byte_pos, 4);
            assert_eq!(line.byte_at_col(col, 4), byte_pos);
        }
    }

    #[test]
    fn test_byte_at_col_clamps() {
        let line = Line::from("abc");
        assert_eq!(line.byte_at_col(100, 4), 3);
    }

    #[test]
    fn test_empty_line() {
        let line = Line::new();
        assert!(line.is_empty());
        assert_eq!(line.len(), 0);
        assert_eq!(line.byte_at_col(5, 4), 0);
    }
}
