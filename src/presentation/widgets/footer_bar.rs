use crate::domain::keybinding::Keybind;
use crate::presentation::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Panel holding keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPanel {
    #[default]
    Catalog,
    Companies,
    Form,
}

impl FocusPanel {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Catalog => "CATALOG",
            Self::Companies => "FLEETS",
            Self::Form => "NEW AIRCRAFT",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Catalog => Self::Companies,
            Self::Companies => Self::Form,
            Self::Form => Self::Catalog,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Catalog => Self::Form,
            Self::Companies => Self::Catalog,
            Self::Form => Self::Companies,
        }
    }
}

pub struct FooterBarStyle {
    pub background: Style,
    pub label_style: Style,
    pub key_style: Style,
    pub info: Style,
    pub focus_indicator: Style,
}

impl FooterBarStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            label_style: Style::default()
                .bg(theme.accent)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            focus_indicator: Style::default()
                .bg(Color::Black)
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
            ..Self::default()
        }
    }
}

impl Default for FooterBarStyle {
    fn default() -> Self {
        Self {
            background: Style::default(),
            label_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            key_style: Style::default().fg(Color::White).bg(Color::DarkGray),
            info: Style::default().fg(Color::DarkGray),
            focus_indicator: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }
}

pub struct FooterBar<'a> {
    keybindings: &'a [Keybind],
    focus: Option<FocusPanel>,
    right_info: Option<&'a str>,
    style: FooterBarStyle,
}

impl<'a> FooterBar<'a> {
    #[must_use]
    pub fn new(keybindings: &'a [Keybind]) -> Self {
        Self {
            keybindings,
            focus: None,
            right_info: None,
            style: FooterBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn focus(mut self, panel: FocusPanel) -> Self {
        self.focus = Some(panel);
        self
    }

    #[must_use]
    pub const fn right_info(mut self, info: Option<&'a str>) -> Self {
        self.right_info = info;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: FooterBarStyle) -> Self {
        self.style = style;
        self
    }

    pub(crate) fn format_key(key: &KeyEvent) -> String {
        use std::fmt::Write;
        let mut s = String::new();
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("C-");
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("A-");
        }

        match key.code {
            KeyCode::Char(' ') => s.push_str("Space"),
            KeyCode::Char(c) => s.push(c),
            KeyCode::Enter => s.push_str("Enter"),
            KeyCode::Esc => s.push_str("Esc"),
            KeyCode::Tab => s.push_str("Tab"),
            KeyCode::BackTab => s.push_str("S-Tab"),
            KeyCode::Backspace => s.push_str("Bksp"),
            KeyCode::Up => s.push('↑'),
            KeyCode::Down => s.push('↓'),
            KeyCode::Left => s.push('←'),
            KeyCode::Right => s.push('→'),
            KeyCode::F(n) => {
                let _ = write!(s, "F{n}");
            }
            _ => {
                let _ = write!(s, "{:?}", key.code);
            }
        }
        s
    }

    fn build_left_spans(&self) -> Vec<Span<'_>> {
        let mut spans = Vec::new();

        if let Some(panel) = self.focus {
            spans.push(Span::styled(
                format!(" {} ", panel.display_name()),
                self.style.focus_indicator,
            ));
            spans.push(Span::raw(" "));
        }

        for (i, binding) in self.keybindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }

            spans.push(Span::styled(
                format!(" {} ", binding.label),
                self.style.label_style,
            ));
            spans.push(Span::styled(
                format!(" {} ", Self::format_key(&binding.key)),
                self.style.key_style,
            ));
        }

        spans
    }
}

impl Widget for FooterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)]
                .set_char(' ')
                .set_style(self.style.background);
        }

        let right_width = self
            .right_info
            .map_or(0, |s| u16::try_from(s.width()).unwrap_or(u16::MAX));
        let left_width = area.width.saturating_sub(right_width.saturating_add(1));

        let left_para = Paragraph::new(Line::from(self.build_left_spans()));
        left_para.render(Rect::new(area.x, area.y, left_width, 1), buf);

        if let Some(info) = self.right_info
            && right_width < area.width
        {
            let right_x = area.right().saturating_sub(right_width);
            let right_area = Rect::new(right_x, area.y, right_width, 1);
            Paragraph::new(Span::styled(info, self.style.info)).render(right_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keybinding::Action;
    use test_case::test_case;

    #[test_case(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL), "C-u" ; "ctrl")]
    #[test_case(KeyEvent::new(KeyCode::BackTab, KeyModifiers::NONE), "S-Tab" ; "back_tab")]
    #[test_case(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE), "Space" ; "space")]
    #[test_case(KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE), "F5" ; "function")]
    fn test_format_key(key: KeyEvent, expected: &str) {
        assert_eq!(FooterBar::format_key(&key), expected);
    }

    #[test]
    fn test_focus_cycle() {
        let mut panel = FocusPanel::default();
        for _ in 0..3 {
            panel = panel.next();
        }
        assert_eq!(panel, FocusPanel::Catalog);
        assert_eq!(FocusPanel::Catalog.previous(), FocusPanel::Form);
    }

    #[test]
    fn test_render_shows_focus_and_bindings() {
        let binds = vec![Keybind::new(
            KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE),
            Action::DeleteAircraft,
            Action::DeleteAircraft.label(),
        )];
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);

        FooterBar::new(&binds)
            .focus(FocusPanel::Catalog)
            .render(area, &mut buf);

        let line: String = (0..area.width).map(|x| buf[(x, 0)].symbol()).collect();
        assert!(line.starts_with(" CATALOG "));
        assert!(line.contains("Delete"));
    }
}
