//! Text input widget.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Single-line text input field.
#[derive(Debug, Clone)]
pub struct TextInput {
    value: String,
    cursor: usize,
    focused: bool,
    masked: bool,
    placeholder: String,
    label: String,
}

impl TextInput {
    /// Creates a new input with a label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            focused: false,
            masked: false,
            placeholder: String::new(),
            label: label.into(),
        }
    }

    /// Enables password masking.
    #[must_use]
    pub fn password(mut self) -> Self {
        self.masked = true;
        self
    }

    /// Sets placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Sets focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Returns focus state.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns whether the input is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Clears the value.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Applies a key event to the input; returns whether it was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => {
                self.value.insert(self.cursor, c);
                self.cursor += 1;
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.value.remove(self.cursor);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.value.len() {
                    self.value.remove(self.cursor);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                if self.cursor < self.value.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.len(),
            _ => return false,
        }
        true
    }

    fn display_text(&self) -> String {
        if self.value.is_empty() {
            self.placeholder.clone()
        } else if self.masked {
            "•".repeat(self.value.len())
        } else {
            self.value.clone()
        }
    }
}

impl Widget for &TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        let text_style = if self.value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.label.as_str());

        let inner = block.inner(area);

        let paragraph = Paragraph::new(self.display_text()).style(text_style);

        block.render(area, buf);
        paragraph.render(inner, buf);

        if self.focused && inner.width > 0 {
            #[allow(clippy::cast_possible_truncation)]
            let cursor_x = inner.x + self.cursor as u16;
            if cursor_x < inner.x + inner.width {
                buf[(cursor_x, inner.y)]
                    .set_style(Style::default().bg(Color::White).fg(Color::Black));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = TextInput::new("Email");
        assert!(input.is_empty());

        input.handle_key(key(KeyCode::Char('a')));
        input.handle_key(key(KeyCode::Char('b')));
        assert_eq!(input.value(), "ab");

        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.value(), "a");
    }

    #[test]
    fn test_cursor_movement_and_insert() {
        let mut input = TextInput::new("Email");
        for c in "ad".chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }

        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Char('b')));

        assert_eq!(input.value(), "abd");
    }

    #[test]
    fn test_unhandled_key_not_consumed() {
        let mut input = TextInput::new("Email");
        assert!(!input.handle_key(key(KeyCode::Enter)));
        assert!(!input.handle_key(key(KeyCode::Tab)));
    }

    #[test]
    fn test_masked_display() {
        let mut input = TextInput::new("Password").password();
        for c in "secret".chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }

        assert_eq!(input.display_text(), "••••••");
        assert_eq!(input.value(), "secret");
    }
}
