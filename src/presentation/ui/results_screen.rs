//! Results screen: per-option tallies and percentage bars.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

use crate::domain::entities::{Poll, PollId, PollOption};
use crate::domain::tally::TallyResult;
use crate::presentation::widgets::{StatusBar, StatusLevel};

/// Action requested by a key press on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsAction {
    None,
    Back,
}

/// Results screen state and rendering.
///
/// Options and votes are fetched concurrently; the screen stays in loading
/// state until the joined, aggregated result arrives.
pub struct ResultsScreen {
    poll: Poll,
    options: Vec<PollOption>,
    result: TallyResult,
    is_loading: bool,
    error: Option<String>,
}

impl ResultsScreen {
    /// Creates a results screen in loading state.
    #[must_use]
    pub fn new(poll: Poll) -> Self {
        Self {
            poll,
            options: Vec::new(),
            result: TallyResult::default(),
            is_loading: true,
            error: None,
        }
    }

    /// Returns the id of the poll whose results are shown.
    #[must_use]
    pub const fn poll_id(&self) -> PollId {
        self.poll.id
    }

    /// Applies the aggregated result if it belongs to this poll.
    pub fn set_results(&mut self, poll_id: PollId, options: Vec<PollOption>, result: TallyResult) {
        if poll_id != self.poll.id {
            return;
        }
        self.options = options;
        self.result = result;
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

    /// Handles a key event, returning the requested action.
    pub fn handle_key(&mut self, key: KeyEvent) -> ResultsAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => ResultsAction::Back,
            _ => ResultsAction::None,
        }
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

impl Widget for &ResultsScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::vertical([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(1),
        ]);
        let [header_area, results_area, status_area] = layout.areas(area);

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
            Line::from(Span::raw(format!(
                "Total Votes: {}",
                self.result.total_votes
            ))),
        ]);
        header.render(header_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray))
            .title(" Results ");
        let inner = block.inner(results_area);
        block.render(results_area, buf);

        if let Some(text) = self.fallback_text() {
            Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            let status = StatusBar::new().left("Esc: back").level(StatusLevel::Info);
            (&status).render(status_area, buf);
            return;
        }

        // Three rows per option: label, bar, spacer.
        let mut y = inner.y;
        for option in &self.options {
            if y + 2 > inner.y + inner.height {
                break;
            }

            let votes = self.result.count_for(option.id);
            let percentage = self.result.percentage_for(option.id);

            let label_area = Rect::new(inner.x, y, inner.width, 1);
            Paragraph::new(Line::from(vec![
                Span::styled(
                    option.text.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {votes} Votes"),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
            .render(label_area, buf);

            let bar_area = Rect::new(inner.x, y + 1, inner.width, 1);
            Gauge::default()
                .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
                .ratio((percentage / 100.0).clamp(0.0, 1.0))
                .label(format!("{}%", percentage.round()))
                .render(bar_area, buf);

            y += 3;
        }

        let status = StatusBar::new().left("Esc: back").level(StatusLevel::Info);
        (&status).render(status_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::domain::entities::{OptionId, VoteRecord};
    use crate::domain::tally::aggregate;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn poll(id: i64) -> Poll {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        Poll {
            id: PollId(id),
            title: "Lunch".into(),
            description: "Where to?".into(),
            status: false,
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
        let screen = ResultsScreen::new(poll(1));
        assert_eq!(screen.fallback_text(), Some("Fetching poll information"));
    }

    #[test]
    fn test_results_for_other_poll_are_discarded() {
        let mut screen = ResultsScreen::new(poll(1));
        let result = aggregate(&[VoteRecord::new(OptionId(1))]);

        screen.set_results(PollId(99), options(), result.clone());
        assert_eq!(screen.fallback_text(), Some("Fetching poll information"));

        screen.set_results(PollId(1), options(), result);
        assert!(screen.fallback_text().is_none());
        assert_eq!(screen.result.total_votes, 1);
    }

    #[test]
    fn test_zero_vote_poll_renders_without_results() {
        let mut screen = ResultsScreen::new(poll(1));
        screen.set_results(PollId(1), options(), aggregate(&[]));

        assert!(screen.fallback_text().is_none());
        assert_eq!(screen.result.total_votes, 0);
        assert_eq!(screen.result.percentage_for(OptionId(1)), 0.0);
    }

    #[test]
    fn test_escape_goes_back() {
        let mut screen = ResultsScreen::new(poll(1));
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), ResultsAction::Back);
        assert_eq!(
            screen.handle_key(key(KeyCode::Char('q'))),
            ResultsAction::Back
        );
    }
}
