// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Jason Ish

use conview::PromptKey;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Ctrl-C, which the host treats as quit.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Translate a terminal key event into a prompt key. Releases and keys
/// the prompt does not handle map to `None`.
pub fn map_key(key: &KeyEvent) -> Option<PromptKey> {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }

    let key = match key.code {
        KeyCode::Char(ch) => {
            if key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            {
                return None;
            }
            PromptKey::Char(ch)
        }
        KeyCode::Backspace => PromptKey::Backspace,
        KeyCode::Enter => PromptKey::Enter,
        KeyCode::Up => PromptKey::Up,
        KeyCode::Down => PromptKey::Down,
        KeyCode::Left => PromptKey::Left,
        KeyCode::Right => PromptKey::Right,
        KeyCode::Home => PromptKey::Home,
        KeyCode::End => PromptKey::End,
        KeyCode::PageUp => PromptKey::PageUp,
        KeyCode::PageDown => PromptKey::PageDown,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_chars_map_through() {
        assert_eq!(
            map_key(&press(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some(PromptKey::Char('a'))
        );
        assert_eq!(
            map_key(&press(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(PromptKey::Char('A'))
        );
    }

    #[test]
    fn test_modified_chars_are_dropped() {
        assert_eq!(map_key(&press(KeyCode::Char('a'), KeyModifiers::CONTROL)), None);
        assert_eq!(map_key(&press(KeyCode::Char('x'), KeyModifiers::ALT)), None);
    }

    #[test]
    fn test_navigation_keys() {
        let cases = [
            (KeyCode::Backspace, PromptKey::Backspace),
            (KeyCode::Enter, PromptKey::Enter),
            (KeyCode::Up, PromptKey::Up),
            (KeyCode::Down, PromptKey::Down),
            (KeyCode::Left, PromptKey::Left),
            (KeyCode::Right, PromptKey::Right),
            (KeyCode::Home, PromptKey::Home),
            (KeyCode::End, PromptKey::End),
            (KeyCode::PageUp, PromptKey::PageUp),
            (KeyCode::PageDown, PromptKey::PageDown),
        ];
        for (code, expected) in cases {
            assert_eq!(map_key(&press(code, KeyModifiers::NONE)), Some(expected));
        }
        assert_eq!(map_key(&press(KeyCode::Tab, KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_releases_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(&release), None);
    }

    #[test]
    fn test_interrupt() {
        assert!(is_interrupt(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_interrupt(&press(KeyCode::Char('c'), KeyModifiers::NONE)));
    }
}
