// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Jason Ish

//! Single-line prompt editing.
//!
//! The caret is stored as a character count from the end of the input, so
//! appending at the end never has to move it. Up/Down walk the suggestions
//! that match the last typed text (the backup buffer) and temporarily
//! replace the input with the highlighted one.

use tracing::debug;

use crate::suggest::SuggestionEngine;

/// Keys the prompt understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKey {
    Char(char),
    Backspace,
    Enter,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Up,
    Down,
}

/// Result of feeding one key to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Nothing changed.
    Ignored,
    /// Visible state changed.
    Redraw,
    /// The user committed this text. The editor has already been reset.
    Submit(String),
    /// The key asks the view to scroll.
    Scroll(PageDirection),
}

/// Byte offset of character `char_idx` in `text`, or `text.len()` past the end.
fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

#[derive(Debug, Clone, Default)]
pub struct PromptEditor {
    prompt_info: String,
    read_buffer: String,
    cursor_offset: usize,
    backup: String,
    selected: Option<usize>,
    blink_on: bool,
    prompting: bool,
}

impl PromptEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt_info(&self) -> &str {
        &self.prompt_info
    }

    pub fn set_prompt_info(&mut self, info: impl Into<String>) {
        self.prompt_info = info.into();
    }

    pub fn is_prompting(&self) -> bool {
        self.prompting
    }

    pub fn set_prompting(&mut self, prompting: bool) {
        self.prompting = prompting;
    }

    pub fn read_buffer(&self) -> &str {
        &self.read_buffer
    }

    /// The text the user last typed, used as the suggestion search word.
    pub fn backup(&self) -> &str {
        &self.backup
    }

    /// Caret position counted in characters from the end of the input.
    pub fn cursor_offset(&self) -> usize {
        self.cursor_offset
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn blink_on(&self) -> bool {
        self.blink_on
    }

    fn len(&self) -> usize {
        self.read_buffer.chars().count()
    }

    /// Caret position as a character index into the input.
    pub fn caret_index(&self) -> usize {
        self.len() - self.cursor_offset
    }

    /// Flip the caret blink state. Driven by the host timer.
    pub fn tick(&mut self) {
        self.blink_on = !self.blink_on;
    }

    pub fn handle_key(&mut self, key: PromptKey, suggestions: &SuggestionEngine) -> KeyOutcome {
        if !self.prompting {
            return KeyOutcome::Ignored;
        }

        match key {
            PromptKey::Char(ch) => self.insert_char(ch),
            PromptKey::Backspace => self.backspace(),
            PromptKey::Enter => self.enter(),
            PromptKey::Down => self.select_next(suggestions),
            PromptKey::Up => self.select_prev(suggestions),
            PromptKey::Left => {
                self.cursor_offset = (self.cursor_offset + 1).min(self.len());
                KeyOutcome::Redraw
            }
            PromptKey::Right => {
                self.cursor_offset = self.cursor_offset.saturating_sub(1);
                KeyOutcome::Redraw
            }
            PromptKey::End => {
                self.cursor_offset = 0;
                KeyOutcome::Redraw
            }
            PromptKey::Home => {
                self.cursor_offset = self.len();
                KeyOutcome::Redraw
            }
            PromptKey::PageUp => KeyOutcome::Scroll(PageDirection::Up),
            PromptKey::PageDown => KeyOutcome::Scroll(PageDirection::Down),
        }
    }

    fn insert_char(&mut self, ch: char) -> KeyOutcome {
        if ch.is_control() {
            return KeyOutcome::Ignored;
        }
        if self.selected.is_some() && self.backup != self.read_buffer {
            self.selected = None;
        }

        let at = byte_offset(&self.read_buffer, self.caret_index());
        self.read_buffer.insert(at, ch);
        self.backup.clone_from(&self.read_buffer);
        KeyOutcome::Redraw
    }

    fn backspace(&mut self) -> KeyOutcome {
        let len = self.len();
        if len == 0 {
            return KeyOutcome::Ignored;
        }

        if self.cursor_offset == 0 {
            self.read_buffer.pop();
        } else if len > self.cursor_offset {
            // The caret keeps its distance from the end.
            let at = byte_offset(&self.read_buffer, len - self.cursor_offset - 1);
            self.read_buffer.remove(at);
        }

        self.backup.clone_from(&self.read_buffer);
        self.selected = None;
        KeyOutcome::Redraw
    }

    fn enter(&mut self) -> KeyOutcome {
        if self.read_buffer.is_empty() {
            return KeyOutcome::Ignored;
        }

        if self.selected.is_some() {
            // Accept the highlighted suggestion as typed text.
            self.backup.clone_from(&self.read_buffer);
            self.selected = None;
            return KeyOutcome::Redraw;
        }

        let text = std::mem::take(&mut self.read_buffer);
        self.reset();
        KeyOutcome::Submit(text)
    }

    fn select_next(&mut self, suggestions: &SuggestionEngine) -> KeyOutcome {
        if self.backup.is_empty() {
            self.backup.clone_from(&self.read_buffer);
        }

        let next = self.selected.map_or(0, |idx| idx + 1);
        match suggestions.select(&self.backup, next) {
            Some(suggestion) => {
                self.read_buffer = suggestion.to_string();
                self.selected = Some(next);
            }
            None => {
                self.read_buffer.clone_from(&self.backup);
                self.selected = None;
            }
        }
        self.cursor_offset = 0;
        KeyOutcome::Redraw
    }

    fn select_prev(&mut self, suggestions: &SuggestionEngine) -> KeyOutcome {
        self.selected = match self.selected {
            Some(0) | None => None,
            Some(idx) => Some(idx - 1),
        };

        match self
            .selected
            .and_then(|idx| suggestions.select(&self.backup, idx))
        {
            Some(suggestion) => self.read_buffer = suggestion.to_string(),
            None => {
                if self.selected.is_some() {
                    debug!(selected = ?self.selected, "suggestion selection went stale");
                }
                self.read_buffer.clone_from(&self.backup);
                self.selected = None;
            }
        }
        self.cursor_offset = 0;
        KeyOutcome::Redraw
    }

    /// Clear the input after a commit.
    fn reset(&mut self) {
        self.read_buffer.clear();
        self.backup.clear();
        self.cursor_offset = 0;
        self.selected = None;
    }
}
