//! The text document behind one editor tab

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::line::Line;

/// A loaded document: its lines, its path, and a dirty flag
#[derive(Debug)]
pub struct Buffer {
    /// Lines of text
    lines: Vec<Line>,
    /// Tab title (the file name component of the path)
    title: String,
    /// Associated file path
    path: PathBuf,
    /// Whether buffer has unsaved changes
    modified: bool,
}

impl Buffer {
    /// Load a buffer from a file
    ///
    /// One whole-file text read; no chunking and no size guard.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let title = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let lines: Vec<Line> = if content.is_empty() {
            vec![Line::new()]
        } else {
            content.lines().map(Line::from).collect()
        };

        Ok(Self {
            lines,
            title,
            path: path.to_path_buf(),
            modified: false,
        })
    }

    /// The tab title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether there are unsaved changes
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// A line by index
    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    /// Insert one character
    pub fn insert_char(&mut self, line_idx: usize, byte_pos: usize, ch: char) {
        if let Some(line) = self.lines.get_mut(line_idx) {
            line.insert_char(byte_pos, ch);
            self.modified = true;
        }
    }

    /// Break the line in two at the given offset
    pub fn insert_newline(&mut self, line_idx: usize, byte_pos: usize) {
        if let Some(line) = self.lines.get_mut(line_idx) {
            let new_line = line.split_off(byte_pos);
            self.lines.insert(line_idx + 1, new_line);
            self.modified = true;
        }
    }

    /// Delete the character at position
    pub fn delete_char(&mut self, line_idx: usize, byte_pos: usize) {
        if let Some(line) = self.lines.get_mut(line_idx) {
            let text = line.text();
            if byte_pos < text.len() {
                if let Some(ch) = text[byte_pos..].chars().next() {
                    line.delete_range(byte_pos, byte_pos + ch.len_utf8());
                    self.modified = true;
                }
            }
        }
    }

    /// Delete backward (backspace), returns the new byte position
    pub fn delete_backward(&mut self, line_idx: usize, byte_pos: usize) -> Option<usize> {
        if byte_pos == 0 {
            return None;
        }
        if let Some(line) = self.lines.get_mut(line_idx) {
            let text = line.text();
            if let Some(ch) = text[..byte_pos].chars().last() {
                let new_pos = byte_pos - ch.len_utf8();
                line.delete_range(new_pos, byte_pos);
                self.modified = true;
                return Some(new_pos);
            }
        }
        None
    }

    /// Join line with the next line (delete the newline between them)
    pub fn join_line(&mut self, line_idx: usize) -> bool {
        if line_idx + 1 < self.lines.len() {
            let next_line = self.lines.remove(line_idx + 1);
            if let Some(line) = self.lines.get_mut(line_idx) {
                line.append(next_line);
                self.modified = true;
                return true;
            }
        }
        false
    }

    /// Join with previous line, returns the join position on that line
    pub fn join_with_previous(&mut self, line_idx: usize) -> Option<usize> {
        if line_idx > 0 {
            let current_line = self.lines.remove(line_idx);
            if let Some(prev_line) = self.lines.get_mut(line_idx - 1) {
                let join_pos = prev_line.len();
                prev_line.append(current_line);
                self.modified = true;
                return Some(join_pos);
            }
        }
        None
    }

    /// Write buffer back to its file and clear the modified flag
    pub fn save(&mut self) -> Result<()> {
        let mut file = std::fs::File::create(&self.path)?;
        for (i, line) in self.lines.iter().enumerate() {
            write!(file, "{}", line.text())?;
            if i < self.lines.len() - 1 {
                writeln!(file)?;
            }
        }
        self.modified = false;
        Ok(())
    }
}
