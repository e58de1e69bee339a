//! Display rendering
//!
//! Draws the whole frame each tick: file tree on the left, tab bar,
//! editor text, assist bar, shell panel and input on the right, and one
//! status line across the bottom. Highlight spans are recomputed for
//! every visible editor line on every frame.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::Focus;
use crate::config::Config;
use crate::error::Result;
use crate::highlight::{highlight_block, Span, Style};
use crate::shell::ShellPanel;
use crate::tabs::TabStrip;
use crate::terminal::Terminal;
use crate::theme;
use crate::tree::FileTree;

/// Frame geometry derived from the terminal size and config
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub tree_width: u16,
    pub right_x: u16,
    pub right_width: u16,
    pub tab_row: u16,
    pub editor_top: u16,
    pub editor_height: u16,
    pub assist_row: u16,
    pub shell_top: u16,
    pub shell_rows: u16,
    pub shell_input_row: u16,
    pub status_row: u16,
}

/// Compute the frame geometry
///
/// Degenerate sizes collapse panels rather than underflow: the editor
/// height reaches zero before anything wraps.
pub fn layout(cols: u16, rows: u16, config: &Config) -> Layout {
    let tree_width = config.tree_width.min(cols / 3);
    let right_x = tree_width + 1;
    let right_width = cols.saturating_sub(right_x);
    let shell_rows = config.shell_rows.min(rows.saturating_sub(6));

    let status_row = rows.saturating_sub(1);
    let shell_input_row = status_row.saturating_sub(1);
    let shell_top = shell_input_row.saturating_sub(shell_rows);
    let assist_row = shell_top.saturating_sub(1);
    let editor_top = 1;
    let editor_height = assist_row.saturating_sub(editor_top);

    Layout {
        tree_width,
        right_x,
        right_width,
        tab_row: 0,
        editor_top,
        editor_height,
        assist_row,
        shell_top,
        shell_rows,
        shell_input_row,
        status_row,
    }
}

/// Display state
pub struct Display {
    /// Whether a full redraw is needed
    needs_redraw: bool,
    /// Message overriding the status line content
    message: Option<String>,
}

impl Display {
    pub fn new() -> Self {
        Self {
            needs_redraw: true,
            message: None,
        }
    }

    /// Mark that a full redraw is needed
    pub fn force_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Set a message to display on the status line
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Clear the message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Render one frame
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        terminal: &mut Terminal,
        tree: &FileTree,
        tabs: &TabStrip,
        shell: &ShellPanel,
        assist_input: &str,
        focus: Focus,
        config: &Config,
    ) -> Result<()> {
        let cols = terminal.cols();
        let rows = terminal.rows();
        let layout = layout(cols, rows, config);

        if layout.editor_height == 0 || layout.right_width < 4 {
            return Ok(());
        }

        if self.needs_redraw {
            terminal.clear_screen()?;
        }

        self.render_tree(terminal, tree, &layout, focus)?;
        self.render_tab_bar(terminal, tabs, &layout)?;
        self.render_editor(terminal, tabs, &layout, config)?;
        self.render_assist_bar(terminal, assist_input, &layout, focus)?;
        self.render_shell(terminal, shell, &layout)?;
        self.render_status(terminal, tabs, &layout, focus, config)?;
        self.position_cursor(terminal, tabs, shell, assist_input, &layout, focus, config)?;

        terminal.flush()?;
        self.needs_redraw = false;
        Ok(())
    }

    /// Render the file-tree panel and the separator column
    fn render_tree(
        &self,
        terminal: &mut Terminal,
        tree: &FileTree,
        layout: &Layout,
        focus: Focus,
    ) -> Result<()> {
        let width = layout.tree_width as usize;
        let height = layout.status_row as usize;
        let rows = tree.visible();

        for screen_row in 0..height {
            terminal.move_cursor(screen_row as u16, 0)?;

            let row_idx = tree.top() + screen_row;
            if let Some(row) = rows.get(row_idx) {
                let marker = if row.is_dir {
                    if row.expanded {
                        "\u{25be} "
                    } else {
                        "\u{25b8} "
                    }
                } else {
                    "  "
                };
                let label = format!("{}{}{}", "  ".repeat(row.depth), marker, row.name);
                let selected = row_idx == tree.cursor();

                if selected && focus == Focus::Tree {
                    terminal.set_reverse(true)?;
                } else if selected {
                    terminal.apply_style(&theme::ACCENT)?;
                } else if row.is_dir {
                    terminal.apply_style(&theme::MUTED)?;
                }
                terminal.write_str(&pad_to_width(&label, width))?;
                terminal.reset_attributes()?;
            } else {
                terminal.write_str(&" ".repeat(width))?;
            }

            terminal.apply_style(&theme::MUTED)?;
            terminal.write_str("\u{2502}")?;
            terminal.reset_attributes()?;
        }

        Ok(())
    }

    /// Render the tab bar
    fn render_tab_bar(
        &self,
        terminal: &mut Terminal,
        tabs: &TabStrip,
        layout: &Layout,
    ) -> Result<()> {
        terminal.move_cursor(layout.tab_row, layout.right_x)?;

        let mut used = 0;
        let max = layout.right_width as usize;
        for (idx, tab) in tabs.iter().enumerate() {
            let marker = if tab.buffer.is_modified() { "*" } else { "" };
            let label = format!(" {}{} ", tab.buffer.title(), marker);
            let label = truncate_to_width(&label, max.saturating_sub(used));
            if label.is_empty() {
                break;
            }
            if idx == tabs.active_idx() {
                terminal.apply_style(&theme::ACCENT)?;
            } else {
                terminal.apply_style(&theme::MUTED)?;
            }
            terminal.write_str(&label)?;
            terminal.reset_attributes()?;
            used += label.width();
        }

        terminal.clear_to_eol()?;
        Ok(())
    }

    /// Render the editor text area with highlight spans
    fn render_editor(
        &self,
        terminal: &mut Terminal,
        tabs: &TabStrip,
        layout: &Layout,
        config: &Config,
    ) -> Result<()> {
        let max_cols = layout.right_width as usize;

        let tab = match tabs.active() {
            Some(tab) => tab,
            None => {
                for offset in 0..layout.editor_height {
                    terminal.move_cursor(layout.editor_top + offset, layout.right_x)?;
                    if offset == 0 {
                        terminal.set_dim(true)?;
                        let hint = "Open a file from the tree (Ctrl-B)";
                        terminal.write_str(&truncate_to_width(hint, max_cols))?;
                        terminal.set_dim(false)?;
                    }
                    terminal.clear_to_eol()?;
                }
                return Ok(());
            }
        };

        for offset in 0..layout.editor_height {
            let screen_row = layout.editor_top + offset;
            let line_idx = tab.top_line + offset as usize;
            terminal.move_cursor(screen_row, layout.right_x)?;

            if let Some(line) = tab.buffer.line(line_idx) {
                // Spans are recomputed from scratch every frame; nothing
                // is cached between calls.
                let spans = highlight_block(line.text(), &tab.rules);
                render_code_line(terminal, line.text(), &spans, max_cols, config.tab_width)?;
            } else {
                terminal.set_dim(true)?;
                terminal.write_str("~")?;
                terminal.set_dim(false)?;
            }

            terminal.clear_to_eol()?;
        }

        Ok(())
    }

    /// Render the assist bar
    fn render_assist_bar(
        &self,
        terminal: &mut Terminal,
        assist_input: &str,
        layout: &Layout,
        focus: Focus,
    ) -> Result<()> {
        terminal.move_cursor(layout.assist_row, layout.right_x)?;

        if assist_input.is_empty() && focus != Focus::Assist {
            terminal.set_dim(true)?;
            let hint = "\u{2728} Ask the assistant to generate or refactor code... (Ctrl-J)";
            terminal.write_str(&truncate_to_width(hint, layout.right_width as usize))?;
            terminal.set_dim(false)?;
        } else {
            let text = format!("> {}", assist_input);
            terminal.write_str(&truncate_to_width(&text, layout.right_width as usize))?;
        }

        terminal.clear_to_eol()?;
        Ok(())
    }

    /// Render the shell log and input line
    fn render_shell(
        &self,
        terminal: &mut Terminal,
        shell: &ShellPanel,
        layout: &Layout,
    ) -> Result<()> {
        let log = shell.log();
        let visible = layout.shell_rows as usize;
        let start = log.len().saturating_sub(visible);

        for offset in 0..visible {
            terminal.move_cursor(layout.shell_top + offset as u16, layout.right_x)?;
            if let Some(line) = log.get(start + offset) {
                if line.starts_with('\u{279c}') {
                    terminal.apply_style(&theme::ACCENT)?;
                }
                terminal.write_str(&truncate_to_width(line, layout.right_width as usize))?;
                terminal.reset_attributes()?;
            }
            terminal.clear_to_eol()?;
        }

        terminal.move_cursor(layout.shell_input_row, layout.right_x)?;
        let input = format!("\u{279c} {}", shell.input());
        terminal.write_str(&truncate_to_width(&input, layout.right_width as usize))?;
        terminal.clear_to_eol()?;
        Ok(())
    }

    /// Render the status line
    fn render_status(
        &self,
        terminal: &mut Terminal,
        tabs: &TabStrip,
        layout: &Layout,
        focus: Focus,
        config: &Config,
    ) -> Result<()> {
        terminal.move_cursor(layout.status_row, 0)?;
        terminal.set_reverse(true)?;

        let cols = (layout.tree_width + 1 + layout.right_width) as usize;
        let content = if let Some(ref msg) = self.message {
            format!(" {}", msg)
        } else if let Some(tab) = tabs.active() {
            let modified = if tab.buffer.is_modified() { "**" } else { "--" };
            let col = tab
                .buffer
                .line(tab.cursor_line)
                .map(|l| l.display_col(tab.cursor_col, config.tab_width))
                .unwrap_or(0);
            format!(
                " {} vitric: {} ({}/{})  L{} C{}  [{}]",
                modified,
                tab.buffer.path().display(),
                tabs.active_idx() + 1,
                tabs.len(),
                tab.cursor_line + 1,
                col + 1,
                focus_name(focus),
            )
        } else {
            format!(" -- vitric  [{}]", focus_name(focus))
        };

        terminal.write_str(&pad_to_width(&content, cols))?;
        terminal.set_reverse(false)?;
        Ok(())
    }

    /// Park the hardware cursor in the focused panel
    #[allow(clippy::too_many_arguments)]
    fn position_cursor(
        &self,
        terminal: &mut Terminal,
        tabs: &TabStrip,
        shell: &ShellPanel,
        assist_input: &str,
        layout: &Layout,
        focus: Focus,
        config: &Config,
    ) -> Result<()> {
        let max_col = (layout.right_x + layout.right_width).saturating_sub(1);
        match focus {
            Focus::Tree => {
                terminal.set_cursor_visible(false)?;
            }
            Focus::Editor => match tabs.active() {
                Some(tab) => {
                    let row = layout.editor_top
                        + tab.cursor_line.saturating_sub(tab.top_line).min(
                            layout.editor_height.saturating_sub(1) as usize,
                        ) as u16;
                    let col = tab
                        .buffer
                        .line(tab.cursor_line)
                        .map(|l| l.display_col(tab.cursor_col, config.tab_width))
                        .unwrap_or(0);
                    let col = (layout.right_x + col as u16).min(max_col);
                    terminal.move_cursor(row, col)?;
                    terminal.set_cursor_visible(true)?;
                }
                None => terminal.set_cursor_visible(false)?,
            },
            Focus::Shell => {
                let col = layout.right_x + 2 + shell.input().width() as u16;
                terminal.move_cursor(layout.shell_input_row, col.min(max_col))?;
                terminal.set_cursor_visible(true)?;
            }
            Focus::Assist => {
                let col = layout.right_x + 2 + assist_input.width() as u16;
                terminal.move_cursor(layout.assist_row, col.min(max_col))?;
                terminal.set_cursor_visible(true)?;
            }
        }
        Ok(())
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

fn focus_name(focus: Focus) -> &'static str {
    match focus {
        Focus::Tree => "tree",
        Focus::Editor => "editor",
        Focus::Shell => "shell",
        Focus::Assist => "assist",
    }
}

/// Write one line of code, applying spans and expanding tabs
fn render_code_line(
    terminal: &mut Terminal,
    text: &str,
    spans: &[Span],
    max_cols: usize,
    tab_width: usize,
) -> Result<()> {
    let mut col = 0;
    let mut span_idx = 0;
    let mut current: Option<Style> = None;
    let mut buf = [0u8; 4];

    for (byte_idx, ch) in text.char_indices() {
        while span_idx < spans.len() && spans[span_idx].end <= byte_idx {
            span_idx += 1;
        }
        let style = spans
            .get(span_idx)
            .filter(|s| s.contains(byte_idx))
            .map(|s| s.style);

        if style != current {
            terminal.reset_attributes()?;
            if let Some(ref s) = style {
                terminal.apply_style(s)?;
            }
            current = style;
        }

        let width = if ch == '\t' {
            tab_width - (col % tab_width)
        } else {
            UnicodeWidthChar::width(ch).unwrap_or(1)
        };
        if col + width > max_cols {
            break;
        }

        if ch == '\t' {
            terminal.write_str(&" ".repeat(width))?;
        } else {
            terminal.write_str(ch.encode_utf8(&mut buf))?;
        }
        col += width;
    }

    terminal.reset_attributes()?;
    Ok(())
}

/// Truncate a string to fit within a display width
fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result
}

/// Truncate or pad a string to exactly a display width
fn pad_to_width(s: &str, width: usize) -> String {
    let truncated = truncate_to_width(s, width);
    let used = truncated.width();
    format!("{}{}", truncated, " ".repeat(width.saturating_sub(used)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_partitions_rows() {
        let config = Config::default();
        let l = layout(120, 40, &config);
        assert_eq!(l.tab_row, 0);
        assert_eq!(l.status_row, 39);
        assert_eq!(l.shell_input_row, 38);
        assert_eq!(l.shell_top + l.shell_rows, l.shell_input_row);
        assert_eq!(l.assist_row + 1, l.shell_top);
        assert_eq!(l.editor_top + l.editor_height, l.assist_row);
        assert_eq!(l.right_x, l.tree_width + 1);
        assert_eq!(l.right_x + l.right_width, 120);
    }

    #[test]
    fn test_layout_small_terminal() {
        let config = Config::default();
        let l = layout(40, 10, &config);
        assert!(l.tree_width <= 13);
        assert!(l.shell_rows <= 4);
        // Never wraps around
        assert!(l.editor_top <= l.assist_row);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("hello", 3), "hel");
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("\u{4f60}\u{597d}", 3), "\u{4f60}");
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("abcdef", 4), "abcd");
    }
}
