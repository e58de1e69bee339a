//! Input handling - key reading and translation

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Key modifier flags
pub mod key_flags {
    pub const CONTROL: u32 = 0x1000_0000;
    pub const ALT: u32 = 0x2000_0000;
    pub const SPEC: u32 = 0x8000_0000;
}

/// Represents a key input with modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(pub u32);

impl Key {
    /// Create a key from a character
    pub fn char(ch: char) -> Self {
        Key(ch as u32)
    }

    /// Create a control key (C-x)
    pub fn ctrl(ch: char) -> Self {
        Key(key_flags::CONTROL | ch.to_ascii_lowercase() as u32)
    }

    /// Create an alt key (M-x)
    pub fn alt(ch: char) -> Self {
        Key(key_flags::ALT | ch.to_ascii_lowercase() as u32)
    }

    /// Create a special key (arrows, paging, etc.)
    pub fn special(code: u32) -> Self {
        Key(key_flags::SPEC | code)
    }

    /// Get the base character (without modifiers)
    pub fn base_char(&self) -> Option<char> {
        let code = self.0 & 0x00FF_FFFF;
        if code <= 0x10FFFF {
            char::from_u32(code)
        } else {
            None
        }
    }

    /// Check if this is a printable self-insert character
    pub fn is_self_insert(&self) -> bool {
        if self.0 & 0xF000_0000 != 0 {
            return false;
        }
        if let Some(ch) = char::from_u32(self.0) {
            ch >= ' ' && ch != '\x7f'
        } else {
            false
        }
    }
}

/// Special key codes
pub mod special {
    pub const HOME: u32 = 0x47;
    pub const UP: u32 = 0x48;
    pub const PAGE_UP: u32 = 0x49;
    pub const LEFT: u32 = 0x4b;
    pub const RIGHT: u32 = 0x4d;
    pub const END: u32 = 0x4f;
    pub const DOWN: u32 = 0x50;
    pub const PAGE_DOWN: u32 = 0x51;
    pub const DELETE: u32 = 0x53;
}

/// Translate a crossterm KeyEvent to our Key representation
///
/// Only key presses translate; release and repeat events are dropped
/// (critical on Windows, where crossterm reports all kinds).
pub fn translate_key(event: KeyEvent) -> Option<Key> {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = event;

    if kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let alt = modifiers.contains(KeyModifiers::ALT);

    match code {
        KeyCode::Char(ch) => {
            if ctrl {
                Some(Key::ctrl(ch))
            } else if alt {
                Some(Key::alt(ch))
            } else {
                Some(Key::char(ch))
            }
        }
        KeyCode::Enter => Some(Key::ctrl('m')),
        KeyCode::Tab => Some(Key::ctrl('i')),
        KeyCode::Backspace => Some(Key(0x7f)), // DEL
        KeyCode::Esc => Some(Key::ctrl('[')),
        KeyCode::Delete => Some(Key::special(special::DELETE)),
        KeyCode::Home => Some(Key::special(special::HOME)),
        KeyCode::End => Some(Key::special(special::END)),
        KeyCode::PageUp => Some(Key::special(special::PAGE_UP)),
        KeyCode::PageDown => Some(Key::special(special::PAGE_DOWN)),
        KeyCode::Up => Some(Key::special(special::UP)),
        KeyCode::Down => Some(Key::special(special::DOWN)),
        KeyCode::Left => Some(Key::special(special::LEFT)),
        KeyCode::Right => Some(Key::special(special::RIGHT)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_char() {
        let key = translate_key(press(KeyCode::Char('a'), KeyModifiers::NONE)).unwrap();
        assert_eq!(key, Key::char('a'));
        assert!(key.is_self_insert());
        assert_eq!(key.base_char(), Some('a'));
    }

    #[test]
    fn test_ctrl_char() {
        let key = translate_key(press(KeyCode::Char('q'), KeyModifiers::CONTROL)).unwrap();
        assert_eq!(key, Key::ctrl('q'));
        assert!(!key.is_self_insert());
    }

    #[test]
    fn test_alt_char() {
        let key = translate_key(press(KeyCode::Char('x'), KeyModifiers::ALT)).unwrap();
        assert_eq!(key, Key::alt('x'));
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(
            translate_key(press(KeyCode::Up, KeyModifiers::NONE)),
            Some(Key::special(special::UP))
        );
        assert_eq!(
            translate_key(press(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Key::ctrl('m'))
        );
        assert_eq!(
            translate_key(press(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(Key(0x7f))
        );
    }

    #[test]
    fn test_release_events_dropped() {
        let mut event = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(translate_key(event), None);
    }

    #[test]
    fn test_backspace_is_not_self_insert() {
        assert!(!Key(0x7f).is_self_insert());
        assert!(!Key::special(special::UP).is_self_insert());
        assert!(Key::char(' ').is_self_insert());
    }
}
