//! Tabbed editor state
//!
//! An ordered strip of tabs, each pairing a text buffer with its own
//! highlight rule table and view state. The rule table is built when the
//! tab opens and never shared between tabs.

use std::path::Path;

use crate::buffer::Buffer;
use crate::error::Result;
use crate::highlight::{cpp, HighlightRule};

/// One open editor tab
pub struct Tab {
    /// The document being edited
    pub buffer: Buffer,
    /// Highlight rules for this view, built once at open
    pub rules: Vec<HighlightRule>,
    /// Cursor line (0-indexed)
    pub cursor_line: usize,
    /// Cursor column (byte offset within line)
    pub cursor_col: usize,
    /// First visible line
    pub top_line: usize,
    /// Goal display column for vertical movement
    pub goal_col: usize,
}

impl Tab {
    fn new(buffer: Buffer) -> Self {
        Self {
            buffer,
            rules: cpp::rule_table(),
            cursor_line: 0,
            cursor_col: 0,
            top_line: 0,
            goal_col: 0,
        }
    }

    /// Scroll so the cursor line is inside a window of the given height
    pub fn ensure_cursor_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor_line < self.top_line {
            self.top_line = self.cursor_line;
        } else if self.cursor_line >= self.top_line + height {
            self.top_line = self.cursor_line + 1 - height;
        }
    }
}

/// The tab strip: ordered tabs plus the active index
#[derive(Default)]
pub struct TabStrip {
    tabs: Vec<Tab>,
    active: usize,
}

impl TabStrip {
    /// Create an empty strip
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open tabs
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Check if no tabs are open
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Index of the active tab
    pub fn active_idx(&self) -> usize {
        self.active
    }

    /// Get the active tab
    pub fn active(&self) -> Option<&Tab> {
        self.tabs.get(self.active)
    }

    /// Get the active tab mutably
    pub fn active_mut(&mut self) -> Option<&mut Tab> {
        self.tabs.get_mut(self.active)
    }

    /// Iterate over all tabs in strip order
    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    /// Open a file in a new tab and activate it
    ///
    /// A path already open is activated instead of opened twice. A file
    /// that cannot be read as text opens nothing: no tab, no message.
    pub fn open(&mut self, path: &Path) {
        if let Some(idx) = self.tabs.iter().position(|t| t.buffer.path() == path) {
            self.active = idx;
            return;
        }
        if let Ok(buffer) = Buffer::from_file(path) {
            self.tabs.push(Tab::new(buffer));
            self.active = self.tabs.len() - 1;
        }
    }

    /// Close the active tab, clamping the active index
    pub fn close_active(&mut self) {
        if self.tabs.is_empty() {
            return;
        }
        self.tabs.remove(self.active);
        if self.active >= self.tabs.len() && self.active > 0 {
            self.active = self.tabs.len() - 1;
        }
    }

    /// Activate the next tab (wraps)
    pub fn next(&mut self) {
        if !self.tabs.is_empty() {
            self.active = (self.active + 1) % self.tabs.len();
        }
    }

    /// Activate the previous tab (wraps)
    pub fn prev(&mut self) {
        if !self.tabs.is_empty() {
            self.active = (self.active + self.tabs.len() - 1) % self.tabs.len();
        }
    }

    /// Save the active tab's buffer, returning its line count
    pub fn save_active(&mut self) -> Result<usize> {
        match self.tabs.get_mut(self.active) {
            Some(tab) => {
                tab.buffer.save()?;
                Ok(tab.buffer.line_count())
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::cpp::KEYWORDS;
    use std::io::Write as _;
    use std::path::PathBuf;

    fn workspace() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.cpp");
        let b = dir.path().join("b.cpp");
        write!(std::fs::File::create(&a).unwrap(), "int x;\n").unwrap();
        write!(std::fs::File::create(&b).unwrap(), "// b\n").unwrap();
        (dir, a, b)
    }

    #[test]
    fn test_open_activates_new_tab() {
        let (_dir, a, b) = workspace();
        let mut strip = TabStrip::new();
        strip.open(&a);
        strip.open(&b);
        assert_eq!(strip.len(), 2);
        assert_eq!(strip.active().unwrap().buffer.title(), "b.cpp");
    }

    #[test]
    fn test_open_builds_rule_table_per_tab() {
        let (_dir, a, _b) = workspace();
        let mut strip = TabStrip::new();
        strip.open(&a);
        assert_eq!(strip.active().unwrap().rules.len(), KEYWORDS.len() + 3);
    }

    #[test]
    fn test_open_same_path_reactivates() {
        let (_dir, a, b) = workspace();
        let mut strip = TabStrip::new();
        strip.open(&a);
        strip.open(&b);
        strip.open(&a);
        assert_eq!(strip.len(), 2);
        assert_eq!(strip.active().unwrap().buffer.title(), "a.cpp");
    }

    #[test]
    fn test_open_unreadable_is_silent() {
        let (_dir, a, _b) = workspace();
        let mut strip = TabStrip::new();
        strip.open(&a);
        strip.open(Path::new("/no/such/file.cpp"));
        // No tab created, active unchanged
        assert_eq!(strip.len(), 1);
        assert_eq!(strip.active().unwrap().buffer.title(), "a.cpp");
    }

    #[test]
    fn test_close_clamps_active() {
        let (_dir, a, b) = workspace();
        let mut strip = TabStrip::new();
        strip.open(&a);
        strip.open(&b);
        strip.close_active();
        assert_eq!(strip.len(), 1);
        assert_eq!(strip.active().unwrap().buffer.title(), "a.cpp");
        strip.close_active();
        assert!(strip.is_empty());
        assert!(strip.active().is_none());
        // Closing with nothing open is a no-op
        strip.close_active();
    }

    #[test]
    fn test_cycle_wraps() {
        let (_dir, a, b) = workspace();
        let mut strip = TabStrip::new();
        strip.open(&a);
        strip.open(&b);
        strip.next();
        assert_eq!(strip.active_idx(), 0);
        strip.prev();
        assert_eq!(strip.active_idx(), 1);
    }

    #[test]
    fn test_ensure_cursor_visible() {
        let (_dir, a, _b) = workspace();
        let mut strip = TabStrip::new();
        strip.open(&a);
        let tab = strip.active_mut().unwrap();
        tab.cursor_line = 25;
        tab.ensure_cursor_visible(10);
        assert_eq!(tab.top_line, 16);
        tab.cursor_line = 3;
        tab.ensure_cursor_visible(10);
        assert_eq!(tab.top_line, 3);
    }

    #[test]
    fn test_save_active_reports_lines() {
        let (_dir, a, _b) = workspace();
        let mut strip = TabStrip::new();
        strip.open(&a);
        strip.active_mut().unwrap().buffer.insert_char(0, 0, '/');
        let lines = strip.save_active().unwrap();
        assert_eq!(lines, 1);
        assert!(!strip.active().unwrap().buffer.is_modified());
    }
}
