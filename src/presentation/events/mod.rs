//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
}

/// Terminal event helpers.
pub struct EventHandler;

impl EventHandler {
    /// Checks whether the key force-quits the application from anywhere.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    /// Checks whether the key is a submit event.
    #[must_use]
    pub fn is_submit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Enter,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventKind;

    use super::*;

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test]
    fn test_quit_event() {
        assert!(EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::NONE
        )));
        assert!(!EventHandler::is_quit_event(&make_key_event(
            KeyCode::Esc,
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_submit_event() {
        assert!(EventHandler::is_submit_event(&make_key_event(
            KeyCode::Enter,
            KeyModifiers::NONE
        )));
        assert!(!EventHandler::is_submit_event(&make_key_event(
            KeyCode::Char('a'),
            KeyModifiers::NONE
        )));
    }
}
