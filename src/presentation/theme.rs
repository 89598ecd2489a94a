use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub cursor_style: Style,
    pub selection_style: Style,
    pub dimmed_style: Style,
    pub error_style: Style,
    pub base_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new("Cyan")
    }
}

impl Theme {
    #[must_use]
    pub fn new(accent_color_str: &str) -> Self {
        Self::from_color(parse_color(accent_color_str))
    }

    #[must_use]
    pub fn from_color(accent: Color) -> Self {
        Self {
            accent,
            cursor_style: Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            selection_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            dimmed_style: Style::default().fg(Color::DarkGray),
            error_style: Style::default().fg(Color::Red),
            base_style: Style::default().fg(Color::Reset),
        }
    }

    /// Border style for a panel, highlighted when it has focus.
    #[must_use]
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            self.dimmed_style
        }
    }
}

fn parse_color(s: &str) -> Color {
    if let Ok(c) = Color::from_str(s) {
        return c;
    }

    if s.starts_with('#')
        && let Some((r, g, b)) = parse_hex_color(s)
    {
        return Color::Rgb(r, g, b);
    }

    match s.to_lowercase().as_str() {
        "orange" => Color::Indexed(208),
        _ => Color::Cyan,
    }
}

fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let s = s.trim_start_matches('#');
    if !s.is_ascii() {
        return None;
    }

    let channel = |hex: &str| u8::from_str_radix(hex, 16).ok();
    match s.len() {
        6 => Some((channel(&s[0..2])?, channel(&s[2..4])?, channel(&s[4..6])?)),
        3 => {
            let doubled: String = s.chars().flat_map(|c| [c, c]).collect();
            Some((
                channel(&doubled[0..2])?,
                channel(&doubled[2..4])?,
                channel(&doubled[4..6])?,
            ))
        }
        _ => None,
    }
}
