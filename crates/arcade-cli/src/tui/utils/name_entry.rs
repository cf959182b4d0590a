//! Name Entry
//!
//! Line editor for the player name on the game-over screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of handling a key while entering a name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameAction {
    /// Key was consumed, keep editing
    Continue,
    /// Enter pressed
    Submit,
    /// Esc or Ctrl+C pressed, skip score submission
    Skip,
}

/// Name buffer limited to printable ASCII
#[derive(Debug)]
pub struct NameEntry {
    buffer: String,
    max_len: usize,
}

impl NameEntry {
    pub fn new(max_len: usize) -> Self {
        Self {
            buffer: String::new(),
            max_len,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// The entered name, or `None` when nothing but spaces was typed
    pub fn finish(&self) -> Option<String> {
        let trimmed = self.buffer.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> NameAction {
        match key.code {
            KeyCode::Enter => NameAction::Submit,
            KeyCode::Esc => NameAction::Skip,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NameAction::Skip
            }
            KeyCode::Backspace => {
                self.buffer.pop();
                NameAction::Continue
            }
            KeyCode::Char(c)
                if (' '..='~').contains(&c) && !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                if self.buffer.len() < self.max_len {
                    self.buffer.push(c);
                }
                NameAction::Continue
            }
            _ => NameAction::Continue,
        }
    }
}
