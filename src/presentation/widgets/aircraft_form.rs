//! New aircraft form.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};

use crate::domain::entities::{AircraftDraft, DraftField};
use crate::presentation::theme::Theme;

use super::TextInput;

const FIELD_HEIGHT: u16 = 3;

/// Focused field of the form.
#[derive(Debug, Default)]
pub struct AircraftFormState {
    field: DraftField,
    focused: bool,
}

impl AircraftFormState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn field(&self) -> DraftField {
        self.field
    }

    pub fn next_field(&mut self) {
        self.field = self.field.next();
    }

    pub fn previous_field(&mut self) {
        self.field = self.field.previous();
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }
}

pub struct AircraftForm<'a> {
    draft: &'a AircraftDraft,
    theme: &'a Theme,
    hint: Option<Line<'a>>,
}

impl<'a> AircraftForm<'a> {
    #[must_use]
    pub const fn new(draft: &'a AircraftDraft, theme: &'a Theme) -> Self {
        Self {
            draft,
            theme,
            hint: None,
        }
    }

    /// Line shown under the fields, usually the submit binding.
    #[must_use]
    pub fn hint(mut self, hint: impl Into<Line<'a>>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

const fn placeholder(field: DraftField) -> &'static str {
    match field {
        DraftField::Constructor => "e.g. Airbus",
        DraftField::Icao => "e.g. A320",
        DraftField::MaxCapacity | DraftField::Range => "0",
    }
}

impl StatefulWidget for AircraftForm<'_> {
    type State = AircraftFormState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(state.is_focused()))
            .title(" New aircraft ");

        let inner = block.inner(area);
        block.render(area, buf);

        let mut constraints = vec![Constraint::Length(FIELD_HEIGHT); DraftField::ALL.len()];
        constraints.push(Constraint::Length(1));
        let rows = Layout::vertical(constraints).split(inner);

        for (field, row) in DraftField::ALL.iter().zip(rows.iter()) {
            let label = format!(" {} ", field.label());
            TextInput::new(&label, self.draft.get(*field))
                .placeholder(placeholder(*field))
                .focused(state.is_focused() && state.field() == *field)
                .accent(self.theme.accent)
                .render(*row, buf);
        }

        if let Some(row) = rows.last() {
            let hint = self.hint.unwrap_or_else(|| {
                Line::from(Span::styled("Enter to post", self.theme.dimmed_style))
            });
            Paragraph::new(hint).render(*row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_focus_wraps() {
        let mut state = AircraftFormState::new();
        assert_eq!(state.field(), DraftField::Constructor);

        state.previous_field();
        assert_eq!(state.field(), DraftField::Range);

        state.next_field();
        state.next_field();
        assert_eq!(state.field(), DraftField::Icao);
    }

    #[test]
    fn test_render_shows_draft_values() {
        let mut draft = AircraftDraft::new();
        draft.set(DraftField::Icao, "B738");
        let theme = Theme::default();
        let mut state = AircraftFormState::new();
        let area = Rect::new(0, 0, 30, 15);
        let mut buf = Buffer::empty(area);

        AircraftForm::new(&draft, &theme).render(area, &mut buf, &mut state);

        let screen: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(screen.contains("B738"));
        assert!(screen.contains("e.g. Airbus"));
        assert!(screen.contains("Enter to post"));
    }
}
