//! Status bar widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Status bar severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Informational.
    Info,
    /// Success.
    Success,
    /// Error.
    Error,
}

impl StatusLevel {
    /// Returns the color for the level.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Success => Color::Green,
            Self::Error => Color::Red,
        }
    }
}

/// One-line status bar with identity on the left and key hints on the
/// right.
#[derive(Debug, Clone)]
pub struct StatusBar {
    left: String,
    right: String,
    level: StatusLevel,
}

impl StatusBar {
    /// Creates an empty status bar.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            left: String::new(),
            right: String::new(),
            level: StatusLevel::Info,
        }
    }

    /// Sets left content.
    #[must_use]
    pub fn left(mut self, content: impl Into<String>) -> Self {
        self.left = content.into();
        self
    }

    /// Sets right content.
    #[must_use]
    pub fn right(mut self, content: impl Into<String>) -> Self {
        self.right = content.into();
        self
    }

    /// Sets the status level.
    #[must_use]
    pub const fn level(mut self, level: StatusLevel) -> Self {
        self.level = level;
        self
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.level.color())
            .add_modifier(Modifier::BOLD);
        let hint_style = Style::default().fg(Color::DarkGray);

        let width = area.width as usize;
        let padding = width
            .saturating_sub(self.left.len())
            .saturating_sub(self.right.len());

        let line = Line::from(vec![
            Span::styled(&self.left, style),
            Span::raw(" ".repeat(padding)),
            Span::styled(&self.right, hint_style),
        ]);

        Paragraph::new(line).render(area, buf);
    }
}
