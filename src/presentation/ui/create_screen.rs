//! Poll creation screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::domain::ports::NewPoll;
use crate::presentation::widgets::{StatusBar, StatusLevel, TextInput};

/// Action requested by a key press on the create screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateAction {
    None,
    Submit(NewPoll),
    Back,
}

/// Poll creation form: title, description, and a growable option list.
pub struct CreatePollScreen {
    title_input: TextInput,
    description_input: TextInput,
    option_inputs: Vec<TextInput>,
    focus: usize,
    is_submitting: bool,
}

impl CreatePollScreen {
    /// Creates an empty form with one option row.
    #[must_use]
    pub fn new() -> Self {
        let mut title_input = TextInput::new("Poll title").placeholder("Enter poll title");
        let description_input =
            TextInput::new("Poll description").placeholder("Enter poll description");
        title_input.set_focused(true);

        Self {
            title_input,
            description_input,
            option_inputs: vec![TextInput::new("Option 1").placeholder("Enter poll option")],
            focus: 0,
            is_submitting: false,
        }
    }

    /// Builds the poll as currently entered.
    #[must_use]
    pub fn to_new_poll(&self) -> NewPoll {
        NewPoll {
            title: self.title_input.value().to_string(),
            description: self.description_input.value().to_string(),
            options: self
                .option_inputs
                .iter()
                .map(|input| input.value().to_string())
                .filter(|text| !text.is_empty())
                .collect(),
        }
    }

    /// Marks a create request as in flight.
    pub fn set_submitting(&mut self, submitting: bool) {
        self.is_submitting = submitting;
    }

    fn field_count(&self) -> usize {
        2 + self.option_inputs.len()
    }

    fn sync_focus(&mut self) {
        let focus = self.focus;
        self.title_input.set_focused(focus == 0);
        self.description_input.set_focused(focus == 1);
        for (i, input) in self.option_inputs.iter_mut().enumerate() {
            input.set_focused(focus == i + 2);
        }
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            0 => &mut self.title_input,
            1 => &mut self.description_input,
            n => &mut self.option_inputs[n - 2],
        }
    }

    fn add_option(&mut self) {
        let label = format!("Option {}", self.option_inputs.len() + 1);
        self.option_inputs
            .push(TextInput::new(label).placeholder("Enter poll option"));
        self.focus = self.field_count() - 1;
        self.sync_focus();
    }

    fn remove_focused_option(&mut self) {
        if self.option_inputs.len() <= 1 || self.focus < 2 {
            return;
        }
        self.option_inputs.remove(self.focus - 2);
        self.focus = self.focus.min(self.field_count() - 1);
        self.sync_focus();
    }

    /// Handles a key event, returning the requested action.
    pub fn handle_key(&mut self, key: KeyEvent) -> CreateAction {
        if self.is_submitting {
            return CreateAction::None;
        }

        match key.code {
            KeyCode::Esc => return CreateAction::Back,
            KeyCode::Enter => {
                let poll = self.to_new_poll();
                if poll.is_submittable() {
                    return CreateAction::Submit(poll);
                }
            }
            KeyCode::Tab => {
                self.focus = (self.focus + 1) % self.field_count();
                self.sync_focus();
            }
            KeyCode::BackTab => {
                self.focus = (self.focus + self.field_count() - 1) % self.field_count();
                self.sync_focus();
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.add_option();
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.remove_focused_option();
            }
            _ => {
                self.focused_input().handle_key(key);
            }
        }

        CreateAction::None
    }
}

impl Default for CreatePollScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &CreatePollScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ]);
        let [title_area, title_input_area, description_area, options_area, status_area] =
            layout.areas(area);

        Paragraph::new(Span::styled(
            "Create a new poll",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .render(title_area, buf);

        (&self.title_input).render(title_input_area, buf);
        (&self.description_input).render(description_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray))
            .title(" Poll options ");
        let inner = block.inner(options_area);
        block.render(options_area, buf);

        let mut y = inner.y;
        for input in &self.option_inputs {
            if y + 3 > inner.y + inner.height {
                break;
            }
            input.render(Rect::new(inner.x, y, inner.width, 3), buf);
            y += 3;
        }

        let hint = if self.is_submitting {
            "Creating poll..."
        } else if self.to_new_poll().is_submittable() {
            "Enter: create | Tab: next field | Ctrl+A: add option | Esc: cancel"
        } else {
            "Fill in title, description, and the first option to create"
        };
        let status = StatusBar::new().left(hint).level(StatusLevel::Info);
        (&status).render(status_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut CreatePollScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_incomplete_form_does_not_submit() {
        let mut screen = CreatePollScreen::new();
        type_text(&mut screen, "Lunch");

        assert_eq!(screen.handle_key(key(KeyCode::Enter)), CreateAction::None);
    }

    #[test]
    fn test_complete_form_submits() {
        let mut screen = CreatePollScreen::new();
        type_text(&mut screen, "Lunch");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "Where to?");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "Pizza");

        match screen.handle_key(key(KeyCode::Enter)) {
            CreateAction::Submit(poll) => {
                assert_eq!(poll.title, "Lunch");
                assert_eq!(poll.description, "Where to?");
                assert_eq!(poll.options, vec!["Pizza".to_string()]);
            }
            other => panic!("expected Submit, got {other:?}"),
        }
    }

    #[test]
    fn test_add_and_remove_option_rows() {
        let mut screen = CreatePollScreen::new();
        screen.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        screen.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        assert_eq!(screen.option_inputs.len(), 3);

        // Focus is on the last option after adding; Ctrl+D removes it.
        screen.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert_eq!(screen.option_inputs.len(), 2);
    }

    #[test]
    fn test_last_option_row_cannot_be_removed() {
        let mut screen = CreatePollScreen::new();
        screen.handle_key(key(KeyCode::Tab));
        screen.handle_key(key(KeyCode::Tab));
        screen.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));

        assert_eq!(screen.option_inputs.len(), 1);
    }

    #[test]
    fn test_empty_option_rows_are_dropped_from_poll() {
        let mut screen = CreatePollScreen::new();
        type_text(&mut screen, "Lunch");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "Where to?");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "Pizza");
        screen.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));

        let poll = screen.to_new_poll();
        assert_eq!(poll.options.len(), 1);
    }

    #[test]
    fn test_submitting_swallows_keys() {
        let mut screen = CreatePollScreen::new();
        screen.set_submitting(true);

        assert_eq!(screen.handle_key(key(KeyCode::Esc)), CreateAction::None);
    }

    #[test]
    fn test_escape_cancels() {
        let mut screen = CreatePollScreen::new();
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), CreateAction::Back);
    }
}
