//! Application state and main loop

use std::path::Path;
use std::time::Duration;

use crate::config::Config;
use crate::display::{self, Display, Layout};
use crate::error::Result;
use crate::input::{self, special, Key};
use crate::shell::ShellPanel;
use crate::tabs::TabStrip;
use crate::terminal::Terminal;
use crate::tree::{Activation, FileTree};

/// Which panel receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tree,
    Editor,
    Shell,
    Assist,
}

/// Top-level application state
pub struct App {
    terminal: Terminal,
    display: Display,
    tree: FileTree,
    tabs: TabStrip,
    shell: ShellPanel,
    assist_input: String,
    focus: Focus,
    config: Config,
    running: bool,
}

impl App {
    /// Create the application rooted at a workspace directory
    pub fn new(terminal: Terminal, config: Config, root: &Path) -> Self {
        let tree = FileTree::new(root, config.show_hidden);
        Self {
            terminal,
            display: Display::new(),
            tree,
            tabs: TabStrip::new(),
            shell: ShellPanel::new(),
            assist_input: String::new(),
            focus: Focus::Tree,
            config,
            running: true,
        }
    }

    /// Run the main event loop
    ///
    /// Single-threaded and event-driven: each tick renders a frame,
    /// drains any shell output that arrived, then waits briefly for a
    /// key. Highlighting happens synchronously inside the render.
    pub fn run(&mut self) -> Result<()> {
        self.display.force_redraw();

        while self.running {
            self.render()?;
            self.shell.poll_output();

            if let Some(event) = self.terminal.next_key(Duration::from_millis(50))? {
                if let Some(key) = input::translate_key(event) {
                    self.handle_key(key)?;
                }
            }
        }

        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        self.display.render(
            &mut self.terminal,
            &self.tree,
            &self.tabs,
            &self.shell,
            &self.assist_input,
            self.focus,
            &self.config,
        )
    }

    fn frame(&self) -> Layout {
        display::layout(self.terminal.cols(), self.terminal.rows(), &self.config)
    }

    /// Handle a key press
    fn handle_key(&mut self, key: Key) -> Result<()> {
        self.display.clear_message();

        // Global bindings
        if key == Key::ctrl('q') {
            self.running = false;
            return Ok(());
        }
        if key == Key::ctrl('b') {
            self.focus = Focus::Tree;
            return Ok(());
        }
        if key == Key::ctrl('e') {
            self.focus = Focus::Editor;
            return Ok(());
        }
        if key == Key::ctrl('t') {
            self.focus = Focus::Shell;
            return Ok(());
        }
        if key == Key::ctrl('j') {
            self.focus = Focus::Assist;
            return Ok(());
        }

        match self.focus {
            Focus::Tree => self.handle_tree_key(key),
            Focus::Editor => self.handle_editor_key(key),
            Focus::Shell => self.handle_shell_key(key),
            Focus::Assist => self.handle_assist_key(key),
        }
        Ok(())
    }

    // ---- tree panel ----

    fn handle_tree_key(&mut self, key: Key) {
        let tree_height = self.frame().status_row as usize;

        if key == Key::special(special::UP) {
            self.tree.cursor_up();
        } else if key == Key::special(special::DOWN) {
            self.tree.cursor_down();
        } else if key == Key::special(special::LEFT) {
            self.tree.collapse();
        } else if key == Key::special(special::RIGHT) {
            self.tree.expand();
        } else if key == Key::ctrl('m') {
            match self.tree.activate() {
                Activation::OpenFile(path) => {
                    self.tabs.open(&path);
                    // A failed read opens nothing and stays in the tree
                    if self.tabs.active().map(|t| t.buffer.path()) == Some(path.as_path()) {
                        self.focus = Focus::Editor;
                    }
                }
                Activation::Toggled | Activation::None => {}
            }
        }

        self.tree.ensure_cursor_visible(tree_height);
    }

    // ---- editor panel ----

    fn handle_editor_key(&mut self, key: Key) {
        let editor_height = self.frame().editor_height as usize;

        if key == Key::ctrl('s') {
            self.save_active_tab();
        } else if key == Key::ctrl('w') {
            self.tabs.close_active();
            if self.tabs.is_empty() {
                self.focus = Focus::Tree;
            }
        } else if key == Key::ctrl('n') {
            self.tabs.next();
        } else if key == Key::ctrl('p') {
            self.tabs.prev();
        } else if key == Key::special(special::LEFT) {
            self.move_left();
        } else if key == Key::special(special::RIGHT) {
            self.move_right();
        } else if key == Key::special(special::UP) {
            self.move_vertical(-1);
        } else if key == Key::special(special::DOWN) {
            self.move_vertical(1);
        } else if key == Key::special(special::PAGE_UP) {
            self.move_vertical(-(editor_height.max(1) as isize));
        } else if key == Key::special(special::PAGE_DOWN) {
            self.move_vertical(editor_height.max(1) as isize);
        } else if key == Key::special(special::HOME) {
            self.move_line_start();
        } else if key == Key::special(special::END) {
            self.move_line_end();
        } else if key == Key::ctrl('m') {
            self.insert_newline();
        } else if key == Key::ctrl('i') {
            self.insert_char('\t');
        } else if key == Key(0x7f) {
            self.delete_backward();
        } else if key == Key::special(special::DELETE) || key == Key::ctrl('d') {
            self.delete_forward();
        } else if key.is_self_insert() {
            if let Some(ch) = key.base_char() {
                self.insert_char(ch);
            }
        }

        if let Some(tab) = self.tabs.active_mut() {
            tab.ensure_cursor_visible(editor_height);
        }
    }

    fn save_active_tab(&mut self) {
        let path = self
            .tabs
            .active()
            .map(|t| t.buffer.path().display().to_string());
        if let Some(path) = path {
            match self.tabs.save_active() {
                Ok(lines) => {
                    self.display
                        .set_message(format!("Wrote {} lines to {}", lines, path));
                }
                Err(e) => {
                    self.display.set_message(format!("Error writing file: {}", e));
                }
            }
        }
    }

    fn insert_char(&mut self, ch: char) {
        if let Some(tab) = self.tabs.active_mut() {
            tab.buffer.insert_char(tab.cursor_line, tab.cursor_col, ch);
            tab.cursor_col += ch.len_utf8();
        }
        self.refresh_goal_col();
    }

    fn insert_newline(&mut self) {
        if let Some(tab) = self.tabs.active_mut() {
            tab.buffer.insert_newline(tab.cursor_line, tab.cursor_col);
            tab.cursor_line += 1;
            tab.cursor_col = 0;
        }
        self.refresh_goal_col();
    }

    fn delete_backward(&mut self) {
        if let Some(tab) = self.tabs.active_mut() {
            if tab.cursor_col > 0 {
                if let Some(new_pos) = tab.buffer.delete_backward(tab.cursor_line, tab.cursor_col)
                {
                    tab.cursor_col = new_pos;
                }
            } else if tab.cursor_line > 0 {
                if let Some(join_pos) = tab.buffer.join_with_previous(tab.cursor_line) {
                    tab.cursor_line -= 1;
                    tab.cursor_col = join_pos;
                }
            }
        }
        self.refresh_goal_col();
    }

    fn delete_forward(&mut self) {
        if let Some(tab) = self.tabs.active_mut() {
            let line_len = tab
                .buffer
                .line(tab.cursor_line)
                .map(|l| l.len())
                .unwrap_or(0);
            if tab.cursor_col < line_len {
                tab.buffer.delete_char(tab.cursor_line, tab.cursor_col);
            } else {
                tab.buffer.join_line(tab.cursor_line);
            }
        }
    }

    fn move_left(&mut self) {
        if let Some(tab) = self.tabs.active_mut() {
            if tab.cursor_col > 0 {
                let step = tab
                    .buffer
                    .line(tab.cursor_line)
                    .and_then(|l| l.text()[..tab.cursor_col].chars().last())
                    .map(|ch| ch.len_utf8())
                    .unwrap_or(0);
                tab.cursor_col -= step;
            } else if tab.cursor_line > 0 {
                tab.cursor_line -= 1;
                tab.cursor_col = tab
                    .buffer
                    .line(tab.cursor_line)
                    .map(|l| l.len())
                    .unwrap_or(0);
            }
        }
        self.refresh_goal_col();
    }

    fn move_right(&mut self) {
        if let Some(tab) = self.tabs.active_mut() {
            let (line_len, step) = tab
                .buffer
                .line(tab.cursor_line)
                .map(|l| {
                    let step = l.text()[tab.cursor_col..]
                        .chars()
                        .next()
                        .map(|ch| ch.len_utf8())
                        .unwrap_or(0);
                    (l.len(), step)
                })
                .unwrap_or((0, 0));

            if tab.cursor_col < line_len {
                tab.cursor_col += step;
            } else if tab.cursor_line + 1 < tab.buffer.line_count() {
                tab.cursor_line += 1;
                tab.cursor_col = 0;
            }
        }
        self.refresh_goal_col();
    }

    fn move_vertical(&mut self, delta: isize) {
        let tab_width = self.config.tab_width;
        if let Some(tab) = self.tabs.active_mut() {
            let line_count = tab.buffer.line_count();
            let target = tab.cursor_line as isize + delta;
            let target = target.clamp(0, line_count.saturating_sub(1) as isize) as usize;
            tab.cursor_line = target;
            tab.cursor_col = tab
                .buffer
                .line(target)
                .map(|l| l.byte_at_col(tab.goal_col, tab_width))
                .unwrap_or(0);
        }
    }

    fn move_line_start(&mut self) {
        if let Some(tab) = self.tabs.active_mut() {
            tab.cursor_col = 0;
        }
        self.refresh_goal_col();
    }

    fn move_line_end(&mut self) {
        if let Some(tab) = self.tabs.active_mut() {
            tab.cursor_col = tab
                .buffer
                .line(tab.cursor_line)
                .map(|l| l.len())
                .unwrap_or(0);
        }
        self.refresh_goal_col();
    }

    /// Horizontal movement resets the goal column for vertical movement
    fn refresh_goal_col(&mut self) {
        let tab_width = self.config.tab_width;
        if let Some(tab) = self.tabs.active_mut() {
            tab.goal_col = tab
                .buffer
                .line(tab.cursor_line)
                .map(|l| l.display_col(tab.cursor_col, tab_width))
                .unwrap_or(0);
        }
    }

    // ---- shell panel ----

    fn handle_shell_key(&mut self, key: Key) {
        if key == Key::ctrl('m') {
            self.shell.run();
        } else if key == Key(0x7f) {
            self.shell.input_backspace();
        } else if key == Key::ctrl('[') {
            self.focus = Focus::Editor;
        } else if key.is_self_insert() {
            if let Some(ch) = key.base_char() {
                self.shell.input_char(ch);
            }
        }
    }

    // ---- assist bar ----

    fn handle_assist_key(&mut self, key: Key) {
        if key == Key::ctrl('m') {
            if !self.assist_input.is_empty() {
                self.assist_input.clear();
                self.display
                    .set_message("The assistant is offline in this build");
            }
            self.focus = Focus::Editor;
        } else if key == Key(0x7f) {
            self.assist_input.pop();
        } else if key == Key::ctrl('[') {
            self.focus = Focus::Editor;
        } else if key.is_self_insert() {
            if let Some(ch) = key.base_char() {
                self.assist_input.push(ch);
            }
        }
    }
}
