//! Pre-recorded key presses for driving loops in tests

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::InputSource;

/// Replays queued keys, then fails so a stuck loop ends the test instead
/// of hanging it.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    keys: VecDeque<Option<KeyEvent>>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, code: KeyCode) -> Self {
        self.keys.push_back(Some(KeyEvent::new(code, KeyModifiers::NONE)));
        self
    }

    pub fn keys(self, codes: &[KeyCode]) -> Self {
        codes.iter().fold(self, |input, &code| input.key(code))
    }

    /// Type each character of `text`
    pub fn text(self, text: &str) -> Self {
        text.chars().fold(self, |input, c| input.key(KeyCode::Char(c)))
    }

    /// `polls` polls that time out without a key
    pub fn idle(mut self, polls: usize) -> Self {
        self.keys.extend(std::iter::repeat(None).take(polls));
        self
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_key(&mut self, _timeout: Duration) -> Result<Option<KeyEvent>> {
        match self.keys.pop_front() {
            Some(key) => Ok(key),
            None => bail!("scripted input exhausted"),
        }
    }
}
