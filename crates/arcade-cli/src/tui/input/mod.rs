//! Keyboard input
//!
//! Everything that waits for keys goes through [`InputSource`] so loops can
//! be driven by the real terminal or by a script in tests.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[cfg(test)]
mod scripted;
#[cfg(test)]
pub use scripted::ScriptedInput;

pub trait InputSource {
    /// Wait up to `timeout` for a key press
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>>;
}

/// Reads key presses from the terminal. Releases and repeats are dropped.
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl InputSource for CrosstermInput {
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}

fn is_char(key: &KeyEvent, c: char) -> bool {
    matches!(key.code, KeyCode::Char(k) if k.eq_ignore_ascii_case(&c))
        && !key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Q, or Ctrl+C as an escape hatch
pub fn is_quit(key: &KeyEvent) -> bool {
    is_char(key, 'q')
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// ↑ or W
pub fn is_up(key: &KeyEvent) -> bool {
    key.code == KeyCode::Up || is_char(key, 'w')
}

/// ↓ or S
pub fn is_down(key: &KeyEvent) -> bool {
    key.code == KeyCode::Down || is_char(key, 's')
}

/// ← or A
pub fn is_left(key: &KeyEvent) -> bool {
    key.code == KeyCode::Left || is_char(key, 'a')
}

/// → or D
pub fn is_right(key: &KeyEvent) -> bool {
    key.code == KeyCode::Right || is_char(key, 'd')
}

/// Esc or Q
pub fn is_back(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc || is_quit(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_direction_keys() {
        assert!(is_up(&key(KeyCode::Up)));
        assert!(is_up(&key(KeyCode::Char('W'))));
        assert!(is_down(&key(KeyCode::Char('s'))));
        assert!(is_left(&key(KeyCode::Char('a'))));
        assert!(is_right(&key(KeyCode::Right)));
        assert!(!is_right(&key(KeyCode::Char('x'))));
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&key(KeyCode::Char('Q'))));
        assert!(is_quit(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit(&key(KeyCode::Char('c'))));
        assert!(is_back(&key(KeyCode::Esc)));
    }
}
