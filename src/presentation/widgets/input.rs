//! Text input widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Single-line text field rendering a borrowed value.
///
/// The value itself lives in the caller's state; the widget only draws it
/// with a trailing cursor when focused.
#[derive(Debug, Clone)]
pub struct TextInput<'a> {
    value: &'a str,
    focused: bool,
    placeholder: &'a str,
    label: &'a str,
    accent: Color,
}

impl<'a> TextInput<'a> {
    /// Creates new input with label and value.
    #[must_use]
    pub const fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            value,
            focused: false,
            placeholder: "",
            label,
            accent: Color::Cyan,
        }
    }

    /// Sets placeholder text.
    #[must_use]
    pub const fn placeholder(mut self, text: &'a str) -> Self {
        self.placeholder = text;
        self
    }

    /// Sets focus state.
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Sets the border colour used when focused.
    #[must_use]
    pub const fn accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }

    fn display_text(&self) -> &str {
        if self.value.is_empty() {
            self.placeholder
        } else {
            self.value
        }
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(self.accent)
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
            .title(self.label);

        let inner = block.inner(area);
        let paragraph = Paragraph::new(self.display_text()).style(text_style);

        block.render(area, buf);
        paragraph.render(inner, buf);

        if self.focused && inner.width > 0 && inner.height > 0 {
            let offset = u16::try_from(self.value.width()).unwrap_or(u16::MAX);
            let cursor_x = inner.x.saturating_add(offset);
            if cursor_x < inner.x + inner.width {
                buf[(cursor_x, inner.y)]
                    .set_style(Style::default().bg(Color::White).fg(Color::Black));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_shown_for_empty_value() {
        let input = TextInput::new("ICAO", "").placeholder("e.g. A320");
        assert_eq!(input.display_text(), "e.g. A320");

        let input = TextInput::new("ICAO", "B738").placeholder("e.g. A320");
        assert_eq!(input.display_text(), "B738");
    }

    #[test]
    fn test_render_draws_cursor_after_value() {
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);

        TextInput::new("Range", "6000")
            .focused(true)
            .render(area, &mut buf);

        assert_eq!(buf[(1, 1)].symbol(), "6");
        assert_eq!(buf[(5, 1)].bg, Color::White);
        assert_eq!(buf[(0, 0)].fg, Color::Cyan);
    }
}
