//! Poll list screen with open / past / mine tabs.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Widget},
};

use crate::domain::entities::Poll;
use crate::presentation::widgets::{StatusBar, StatusLevel};

/// Which slice of the poll universe a tab shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollsTab {
    /// Open polls anyone can vote on.
    #[default]
    Open,
    /// Closed polls whose results can be viewed.
    Past,
    /// The viewer's own open polls, ready to be ended.
    Mine,
}

impl PollsTab {
    /// Returns the tab title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Open => "Open Polls",
            Self::Past => "Past Polls",
            Self::Mine => "My Polls",
        }
    }

    const ALL: [Self; 3] = [Self::Open, Self::Past, Self::Mine];

    fn index(self) -> usize {
        match self {
            Self::Open => 0,
            Self::Past => 1,
            Self::Mine => 2,
        }
    }
}

/// Action requested by a key press on the polls screen.
#[derive(Debug, Clone, PartialEq)]
pub enum PollsAction {
    None,
    /// Open the selected poll (vote, results, or end, depending on tab).
    Select(Poll),
    SwitchTab(PollsTab),
    Refresh,
    NewPoll,
    Logout,
    Quit,
}

/// Poll list screen state and rendering.
pub struct PollsScreen {
    tab: PollsTab,
    polls: Vec<Poll>,
    selected: usize,
    is_loading: bool,
    error: Option<String>,
    viewer_name: String,
}

impl PollsScreen {
    /// Creates a new screen showing the open polls tab in loading state.
    #[must_use]
    pub fn new(viewer_name: impl Into<String>) -> Self {
        Self {
            tab: PollsTab::Open,
            polls: Vec::new(),
            selected: 0,
            is_loading: true,
            error: None,
            viewer_name: viewer_name.into(),
        }
    }

    /// Returns the active tab.
    #[must_use]
    pub const fn tab(&self) -> PollsTab {
        self.tab
    }

    /// Returns the currently selected poll, if any.
    #[must_use]
    pub fn selected_poll(&self) -> Option<&Poll> {
        self.polls.get(self.selected)
    }

    /// Marks the screen as loading a fresh list.
    pub fn set_loading(&mut self, tab: PollsTab) {
        self.tab = tab;
        self.polls.clear();
        self.selected = 0;
        self.is_loading = true;
        self.error = None;
    }

    /// Applies a loaded poll list if it belongs to the active tab.
    /// Results for a tab the user already navigated away from are dropped.
    pub fn set_polls(&mut self, tab: PollsTab, polls: Vec<Poll>) {
        if tab != self.tab {
            return;
        }
        self.polls = polls;
        self.selected = 0;
        self.is_loading = false;
        self.error = None;
    }

    /// Applies a load failure if it belongs to the active tab.
    pub fn set_error(&mut self, tab: PollsTab, message: impl Into<String>) {
        if tab != self.tab {
            return;
        }
        self.is_loading = false;
        self.error = Some(message.into());
    }

    /// Handles a key event, returning the requested action.
    pub fn handle_key(&mut self, key: KeyEvent) -> PollsAction {
        match key.code {
            KeyCode::Char('q') => return PollsAction::Quit,
            KeyCode::Char('L') => return PollsAction::Logout,
            KeyCode::Char('n') => return PollsAction::NewPoll,
            KeyCode::Char('r') => return PollsAction::Refresh,
            KeyCode::Char('1') => return PollsAction::SwitchTab(PollsTab::Open),
            KeyCode::Char('2') => return PollsAction::SwitchTab(PollsTab::Past),
            KeyCode::Char('3') => return PollsAction::SwitchTab(PollsTab::Mine),
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.polls.is_empty() {
                    self.selected = (self.selected + 1).min(self.polls.len() - 1);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(poll) = self.selected_poll() {
                    return PollsAction::Select(poll.clone());
                }
            }
            _ => {}
        }

        PollsAction::None
    }

    fn fallback_text(&self) -> Option<&str> {
        if self.is_loading {
            Some("Fetching polls information")
        } else if self.error.is_some() {
            Some("Something went wrong from our end")
        } else if self.polls.is_empty() {
            Some("No polls to show")
        } else {
            None
        }
    }

    fn action_hint(&self) -> &'static str {
        match self.tab {
            PollsTab::Open => "Enter: vote",
            PollsTab::Past => "Enter: results",
            PollsTab::Mine => "Enter: end poll",
        }
    }
}

impl Widget for &PollsScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ]);
        let [tabs_area, list_area, status_area] = layout.areas(area);

        let titles = PollsTab::ALL.iter().map(|tab| tab.title());
        Tabs::new(titles)
            .select(self.tab.index())
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .render(tabs_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray))
            .title(format!(" {} ", self.tab.title()));
        let inner = block.inner(list_area);
        block.render(list_area, buf);

        if let Some(text) = self.fallback_text() {
            Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
        } else {
            let items: Vec<ListItem> = self
                .polls
                .iter()
                .enumerate()
                .map(|(i, poll)| {
                    let style = if i == self.selected {
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(poll.title.clone(), style),
                        Span::raw("  "),
                        Span::styled(
                            poll.description.clone(),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]))
                })
                .collect();
            List::new(items).render(inner, buf);
        }

        let status = StatusBar::new()
            .left(format!("Logged in as: {}", self.viewer_name))
            .right(format!(
                "{} | 1/2/3: tabs | n: new | r: refresh | L: logout | q: quit",
                self.action_hint()
            ))
            .level(StatusLevel::Success);
        (&status).render(status_area, buf);
    }
}
