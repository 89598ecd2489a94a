use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Text,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::domain::{Notification, NotificationLevel};
use crate::presentation::theme::Theme;

const MAX_WIDTH: u16 = 60;
const MAX_HEIGHT: u16 = 12;

pub struct NotificationPopup<'a> {
    notification: &'a Notification,
    theme: &'a Theme,
    queued: usize,
}

impl<'a> NotificationPopup<'a> {
    #[must_use]
    pub fn new(notification: &'a Notification, theme: &'a Theme) -> Self {
        Self {
            notification,
            theme,
            queued: 0,
        }
    }

    /// Number of notifications waiting behind this one.
    #[must_use]
    pub const fn queued(mut self, queued: usize) -> Self {
        self.queued = queued;
        self
    }

    fn color(&self) -> Color {
        match self.notification.level {
            NotificationLevel::Info => self.theme.accent,
            NotificationLevel::Success => Color::Green,
            NotificationLevel::Warn => Color::Yellow,
            NotificationLevel::Error => Color::Red,
        }
    }

    fn title(&self) -> String {
        if self.queued > 0 {
            format!(" {} (+{}) ", self.notification.title, self.queued)
        } else {
            format!(" {} ", self.notification.title)
        }
    }

    /// Popup rectangle in the top-right corner of `area`.
    fn popup_area(&self, area: Rect) -> Rect {
        let title = self.title();
        let message = &self.notification.message;
        let widest_line = message.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);

        let max_popup_width = MAX_WIDTH.min(area.width.saturating_sub(2));
        let width = u16::try_from(widest_line)
            .unwrap_or(u16::MAX)
            .max(u16::try_from(title.width()).unwrap_or(0))
            .saturating_add(4)
            .min(max_popup_width);

        let inner_width = usize::from(width.saturating_sub(2).max(1));
        let wrapped_lines: usize = message
            .lines()
            .map(|line| line.width().div_ceil(inner_width).max(1))
            .sum();
        let height = u16::try_from(wrapped_lines)
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .clamp(3, MAX_HEIGHT);

        let x = area.x + area.width.saturating_sub(width).saturating_sub(2);
        let y = area.y + 1;

        area.intersection(Rect::new(x, y, width, height))
    }
}

impl Widget for NotificationPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = self.popup_area(area);
        if popup_area.area() == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title())
            .style(Style::default().fg(self.color()));

        let para = Paragraph::new(Text::from(self.notification.message.as_str()))
            .block(block)
            .wrap(Wrap { trim: true })
            .style(Style::default().add_modifier(Modifier::BOLD));

        Clear.render(popup_area, buf);
        para.render(popup_area, buf);
    }
}
