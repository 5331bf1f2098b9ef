use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::domain::{Notification, NotificationLevel};

pub struct NotificationPopup<'a> {
    notification: &'a Notification,
}

impl<'a> NotificationPopup<'a> {
    #[must_use]
    pub fn new(notification: &'a Notification) -> Self {
        Self { notification }
    }

    fn color(&self) -> Color {
        match self.notification.level {
            NotificationLevel::Info => Color::Cyan,
            NotificationLevel::Success => Color::Green,
            NotificationLevel::Error => Color::Red,
        }
    }

    fn title(&self) -> &'static str {
        match self.notification.level {
            NotificationLevel::Info => " Info ",
            NotificationLevel::Success => " Success ",
            NotificationLevel::Error => " Error ",
        }
    }
}

impl Widget for NotificationPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let message = &self.notification.message;

        let max_popup_width = 60.min(area.width.saturating_sub(2));
        let width = u16::try_from(message.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(max_popup_width);

        let inner_width = width.saturating_sub(2).max(1);
        let content_width = u16::try_from(message.width()).unwrap_or(0);
        let lines = content_width.div_ceil(inner_width);
        let height = lines.saturating_add(2).clamp(3, 8);

        let x = area.width.saturating_sub(width).saturating_sub(2);
        let y = area.height.saturating_sub(height).saturating_sub(1);

        let popup_area = Rect::new(x, y, width, height);
        let intersection = area.intersection(popup_area);
        if intersection.area() == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title())
            .style(Style::default().fg(self.color()));

        let para = Paragraph::new(message.as_str())
            .block(block)
            .wrap(Wrap { trim: true })
            .style(Style::default().add_modifier(Modifier::BOLD));

        Clear.render(intersection, buf);
        para.render(intersection, buf);
    }
}
