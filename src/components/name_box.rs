// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Single-line name prompt.
//!
//! A modal text input used to name a new playlist. While active it consumes
//! all key events; `Enter` submits the trimmed name, `Esc` cancels.

use crossterm::event::{Event as TermEvent, KeyCode, KeyEvent};
use tui_input::{Input, backend::crossterm::EventHandler};

/// Outcome of feeding one key into the prompt.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum NameBoxOutcome {
    /// The prompt swallowed the key.
    Consumed,
    /// The user submitted this name.
    Submitted(String),
    /// The user cancelled the prompt.
    Cancelled,
}

pub(crate) struct NameBox {
    active: bool,
    pub(crate) input: Input,
}

impl NameBox {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    pub(crate) fn open(&mut self) {
        self.active = true;
        self.input.reset();
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> NameBoxOutcome {
        match key.code {
            KeyCode::Esc => {
                self.active = false;
                NameBoxOutcome::Cancelled
            }
            KeyCode::Enter => {
                let name = self.input.value().trim().to_string();
                if name.is_empty() {
                    return NameBoxOutcome::Consumed;
                }
                self.active = false;
                NameBoxOutcome::Submitted(name)
            }
            _ => {
                // Delegate all other key events to the managed input.
                self.input.handle_event(&TermEvent::Key(key));
                NameBoxOutcome::Consumed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(prompt: &mut NameBox, text: &str) {
        for c in text.chars() {
            prompt.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn submits_the_trimmed_name() {
        let mut prompt = NameBox::new();
        prompt.open();
        type_str(&mut prompt, " Morning walk ");

        assert_eq!(
            prompt.handle_key(key(KeyCode::Enter)),
            NameBoxOutcome::Submitted("Morning walk".to_string())
        );
        assert!(!prompt.active());
    }

    #[test]
    fn empty_submit_keeps_the_prompt_open() {
        let mut prompt = NameBox::new();
        prompt.open();

        assert_eq!(
            prompt.handle_key(key(KeyCode::Enter)),
            NameBoxOutcome::Consumed
        );
        assert!(prompt.active());
    }

    #[test]
    fn escape_cancels() {
        let mut prompt = NameBox::new();
        prompt.open();
        type_str(&mut prompt, "whatever");

        assert_eq!(
            prompt.handle_key(key(KeyCode::Esc)),
            NameBoxOutcome::Cancelled
        );
        assert!(!prompt.active());
    }

    #[test]
    fn reopening_clears_the_previous_text() {
        let mut prompt = NameBox::new();
        prompt.open();
        type_str(&mut prompt, "old");
        prompt.handle_key(key(KeyCode::Esc));

        prompt.open();
        assert_eq!(prompt.input.value(), "");
    }
}
