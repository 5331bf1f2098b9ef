//! Voting screen for a single open poll.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

use crate::domain::entities::{OptionId, Poll, PollId, PollOption};
use crate::presentation::widgets::{StatusBar, StatusLevel};

/// Action requested by a key press on the vote screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    None,
    Submit(OptionId),
    Back,
}

/// Vote screen state and rendering.
pub struct VoteScreen {
    poll: Poll,
    options: Vec<PollOption>,
    selected: usize,
    is_loading: bool,
    is_submitting: bool,
    error: Option<String>,
}

impl VoteScreen {
    /// Creates a vote screen in loading state; options arrive async.
    #[must_use]
    pub fn new(poll: Poll) -> Self {
        Self {
            poll,
            options: Vec::new(),
            selected: 0,
            is_loading: true,
            is_submitting: false,
            error: None,
        }
    }

    /// Returns the poll being voted on.
    #[must_use]
    pub const fn poll(&self) -> &Poll {
        &self.poll
    }

    /// Returns the id of the poll being voted on.
    #[must_use]
    pub const fn poll_id(&self) -> PollId {
        self.poll.id
    }

    /// Applies fetched options if they belong to this poll.
    pub fn set_options(&mut self, poll_id: PollId, options: Vec<PollOption>) {
        if poll_id != self.poll.id {
            return;
        }
        self.options = options;
        self.selected = 0;
        self.is_loading = false;
        self.error = None;
    }

    /// Applies a fetch failure if it belongs to this poll.
    pub fn set_error(&mut self, poll_id: PollId, message: impl Into<String>) {
        if poll_id != self.poll.id {
            return;
        }
        self.is_loading = false;
        self.error = Some(message.into());
    }

    /// Marks a vote submission as in flight.
    pub fn set_submitting(&mut self, submitting: bool) {
        self.is_submitting = submitting;
    }

    /// Handles a key event, returning the requested action.
    pub fn handle_key(&mut self, key: KeyEvent) -> VoteAction {
        if self.is_submitting {
            return VoteAction::None;
        }

        match key.code {
            KeyCode::Esc => return VoteAction::Back,
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.options.is_empty() {
                    self.selected = (self.selected + 1).min(self.options.len() - 1);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(option) = self.options.get(self.selected) {
                    return VoteAction::Submit(option.id);
                }
            }
            _ => {}
        }

        VoteAction::None
    }

    fn fallback_text(&self) -> Option<&str> {
        if self.is_loading {
            Some("Fetching poll information")
        } else if self.error.is_some() {
            Some("Something went wrong from our end")
        } else if self.options.is_empty() {
            Some("No poll options to show for the poll")
        } else {
            None
        }
    }
}

impl Widget for &VoteScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ]);
        let [header_area, options_area, status_area] = layout.areas(area);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                self.poll.title.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.poll.description.clone(),
                Style::default().fg(Color::Gray),
            )),
        ]);
        header.render(header_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray))
            .title(" Poll options ");
        let inner = block.inner(options_area);
        block.render(options_area, buf);

        if let Some(text) = self.fallback_text() {
            Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
        } else {
            let items: Vec<ListItem> = self
                .options
                .iter()
                .enumerate()
                .map(|(i, option)| {
                    let marker = if i == self.selected { "(x)" } else { "( )" };
                    let style = if i == self.selected {
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    ListItem::new(Line::from(Span::styled(
                        format!("{marker} {}", option.text),
                        style,
                    )))
                })
                .collect();
            List::new(items).render(inner, buf);
        }

        let hint = if self.is_submitting {
            "Submitting vote..."
        } else {
            "Enter: submit vote | j/k: select | Esc: back"
        };
        let status = StatusBar::new()
            .left(hint)
            .level(StatusLevel::Info);
        (&status).render(status_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn poll(id: i64) -> Poll {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        Poll {
            id: PollId(id),
            title: "Lunch".into(),
            description: "Where to?".into(),
            status: true,
            created_at: at,
            updated_at: at,
            ended_at: at,
        }
    }

    fn options() -> Vec<PollOption> {
        vec![
            PollOption {
                id: OptionId(1),
                text: "Pizza".into(),
            },
            PollOption {
                id: OptionId(2),
                text: "Sushi".into(),
            },
        ]
    }

    #[test]
    fn test_starts_loading() {
        let screen = VoteScreen::new(poll(1));
        assert_eq!(screen.fallback_text(), Some("Fetching poll information"));
    }

    #[test]
    fn test_options_for_other_poll_are_discarded() {
        let mut screen = VoteScreen::new(poll(1));
        screen.set_options(PollId(99), options());

        assert_eq!(screen.fallback_text(), Some("Fetching poll information"));

        screen.set_options(PollId(1), options());
        assert!(screen.fallback_text().is_none());
    }

    #[test]
    fn test_submit_selected_option() {
        let mut screen = VoteScreen::new(poll(1));
        screen.set_options(PollId(1), options());

        screen.handle_key(key(KeyCode::Down));
        assert_eq!(
            screen.handle_key(key(KeyCode::Enter)),
            VoteAction::Submit(OptionId(2))
        );
    }

    #[test]
    fn test_submit_with_no_options_does_nothing() {
        let mut screen = VoteScreen::new(poll(1));
        screen.set_options(PollId(1), vec![]);

        assert_eq!(screen.handle_key(key(KeyCode::Enter)), VoteAction::None);
        assert_eq!(
            screen.fallback_text(),
            Some("No poll options to show for the poll")
        );
    }

    #[test]
    fn test_submitting_swallows_keys() {
        let mut screen = VoteScreen::new(poll(1));
        screen.set_options(PollId(1), options());
        screen.set_submitting(true);

        assert_eq!(screen.handle_key(key(KeyCode::Enter)), VoteAction::None);
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), VoteAction::None);
    }

    #[test]
    fn test_escape_goes_back() {
        let mut screen = VoteScreen::new(poll(1));
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), VoteAction::Back);
    }
}
