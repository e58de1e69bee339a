//! Terminal abstraction over crossterm
//!
//! Owns raw mode and the alternate screen for the life of the value and
//! restores the outer terminal on drop.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyEvent},
    execute, queue,
    style::{Attribute, Color as CtColor, Print, SetAttribute, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::error::Result;
use crate::highlight::{Color, Style};

/// Cross-platform terminal handle
pub struct Terminal {
    /// Terminal width in columns
    cols: u16,
    /// Terminal height in rows
    rows: u16,
}

impl Terminal {
    /// Enter raw mode and the alternate screen
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let (cols, rows) = terminal::size()?;

        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        Ok(Self { cols, rows })
    }

    /// Width in columns
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Height in rows
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Wipe the whole screen
    pub fn clear_screen(&mut self) -> Result<()> {
        queue!(io::stdout(), terminal::Clear(ClearType::All))?;
        Ok(())
    }

    /// Wipe from the cursor to the end of the line
    pub fn clear_to_eol(&mut self) -> Result<()> {
        queue!(io::stdout(), terminal::Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    /// Park the cursor at a 0-indexed row and column
    pub fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        queue!(io::stdout(), cursor::MoveTo(col, row))?;
        Ok(())
    }

    /// Queue a string at the cursor
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(io::stdout(), Print(s))?;
        Ok(())
    }

    /// Push everything queued so far to the terminal
    pub fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    /// Show or hide the hardware cursor
    pub fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            queue!(io::stdout(), cursor::Show)?;
        } else {
            queue!(io::stdout(), cursor::Hide)?;
        }
        Ok(())
    }

    /// Apply a style for subsequent writes
    pub fn apply_style(&mut self, style: &Style) -> Result<()> {
        queue!(io::stdout(), SetForegroundColor(to_crossterm(style.fg)))?;
        if style.bold {
            queue!(io::stdout(), SetAttribute(Attribute::Bold))?;
        }
        if style.reverse {
            queue!(io::stdout(), SetAttribute(Attribute::Reverse))?;
        }
        Ok(())
    }

    /// Toggle reverse video
    pub fn set_reverse(&mut self, enabled: bool) -> Result<()> {
        if enabled {
            queue!(io::stdout(), SetAttribute(Attribute::Reverse))?;
        } else {
            queue!(io::stdout(), SetAttribute(Attribute::NoReverse))?;
        }
        Ok(())
    }

    /// Toggle dim/faint output (chrome and placeholders)
    pub fn set_dim(&mut self, enabled: bool) -> Result<()> {
        if enabled {
            queue!(io::stdout(), SetAttribute(Attribute::Dim))?;
        } else {
            queue!(io::stdout(), SetAttribute(Attribute::NormalIntensity))?;
        }
        Ok(())
    }

    /// Drop back to unstyled output
    pub fn reset_attributes(&mut self) -> Result<()> {
        queue!(io::stdout(), SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    /// Wait up to `timeout` for the next key event
    ///
    /// Returns None on timeout or when a non-key event (such as a resize,
    /// which updates the cached size) is consumed instead.
    pub fn next_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key_event) => Ok(Some(key_event)),
            Event::Resize(cols, rows) => {
                self.cols = cols;
                self.rows = rows;
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

/// Map a palette color to the crossterm color type
fn to_crossterm(color: Color) -> CtColor {
    match color {
        Color::Default => CtColor::Reset,
        Color::Black => CtColor::Black,
        Color::Red => CtColor::DarkRed,
        Color::Green => CtColor::DarkGreen,
        Color::Yellow => CtColor::DarkYellow,
        Color::Blue => CtColor::DarkBlue,
        Color::Magenta => CtColor::DarkMagenta,
        Color::Cyan => CtColor::DarkCyan,
        Color::White => CtColor::Grey,
        Color::BrightBlack => CtColor::DarkGrey,
        Color::BrightRed => CtColor::Red,
        Color::BrightGreen => CtColor::Green,
        Color::BrightYellow => CtColor::Yellow,
        Color::BrightBlue => CtColor::Blue,
        Color::BrightMagenta => CtColor::Magenta,
        Color::BrightCyan => CtColor::Cyan,
        Color::BrightWhite => CtColor::White,
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // Hand the outer terminal back
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
