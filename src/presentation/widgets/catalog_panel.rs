//! Aircraft catalog panel.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use crate::application::services::{Slice, SliceStatus, ViewStore};
use crate::domain::entities::Aircraft;
use crate::presentation::theme::Theme;

pub struct CatalogPanelStyle {
    pub border_style: Style,
    pub border_style_focused: Style,
    pub cursor_style: Style,
    pub selected_style: Style,
    pub filter_style: Style,
    pub active_filter_style: Style,
    pub banner_style: Style,
    pub dimmed_style: Style,
}

impl CatalogPanelStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            border_style: theme.border_style(false),
            border_style_focused: theme.border_style(true),
            cursor_style: theme.cursor_style,
            selected_style: theme.selection_style,
            filter_style: theme.dimmed_style,
            active_filter_style: Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            banner_style: theme.error_style.add_modifier(Modifier::BOLD),
            dimmed_style: theme.dimmed_style,
        }
    }
}

/// Cursor over the catalog rows.
#[derive(Debug, Default)]
pub struct CatalogPanelState {
    list_state: ListState,
    focused: bool,
}

impl CatalogPanelState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Returns the aircraft under the cursor.
    #[must_use]
    pub fn current<'s>(&self, store: &'s ViewStore) -> Option<&'s Aircraft> {
        self.cursor().and_then(|i| store.catalog().get(i))
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn move_up(&mut self, len: usize) {
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let index = self.cursor().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(index.min(len - 1)));
    }

    pub fn move_down(&mut self, len: usize) {
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let index = self.cursor().map_or(0, |i| (i + 1).min(len - 1));
        self.list_state.select(Some(index));
    }

    /// Keeps the cursor inside a catalog of `len` rows.
    pub fn clamp(&mut self, len: usize) {
        match (self.cursor(), len) {
            (_, 0) => self.list_state.select(None),
            (None, _) => self.list_state.select(Some(0)),
            (Some(i), _) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }
}

pub struct CatalogPanel<'a> {
    store: &'a ViewStore,
    style: CatalogPanelStyle,
}

impl<'a> CatalogPanel<'a> {
    #[must_use]
    pub fn new(store: &'a ViewStore, theme: &Theme) -> Self {
        Self {
            store,
            style: CatalogPanelStyle::from_theme(theme),
        }
    }

    fn filter_line(&self) -> Line<'_> {
        let mut spans = vec![Span::styled("[ ", self.style.dimmed_style)];
        for (i, option) in self.store.manufacturers().iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let style = if option == self.store.active_filter() {
                self.style.active_filter_style
            } else {
                self.style.filter_style
            };
            spans.push(Span::styled(option.label(), style));
        }
        spans.push(Span::styled(" ]", self.style.dimmed_style));
        Line::from(spans)
    }

    fn aircraft_item(&self, aircraft: &'a Aircraft) -> ListItem<'a> {
        let selected = self.store.is_selected(aircraft.icao());
        let marker = if selected { "● " } else { "  " };
        let name_style = if selected {
            self.style.selected_style
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        ListItem::new(Line::from(vec![
            Span::styled(marker, self.style.selected_style),
            Span::styled(format!("{:<6}", aircraft.icao()), name_style),
            Span::raw(format!("{:<14}", aircraft.constructor())),
            Span::styled(
                format!(
                    "{} km · {} seats",
                    aircraft.range(),
                    aircraft.max_capacity()
                ),
                self.style.dimmed_style,
            ),
        ]))
    }

    fn banner(&self) -> Option<Line<'_>> {
        match self.store.status(Slice::Catalog) {
            SliceStatus::Failed(message) => Some(Line::from(Span::styled(
                format!("⚠ {message} · press r to retry"),
                self.style.banner_style,
            ))),
            SliceStatus::Loading if self.store.catalog().is_empty() => Some(Line::from(
                Span::styled("Loading catalog…", self.style.dimmed_style),
            )),
            _ => None,
        }
    }
}

impl StatefulWidget for CatalogPanel<'_> {
    type State = CatalogPanelState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let border_style = if state.is_focused() {
            self.style.border_style_focused
        } else {
            self.style.border_style
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Catalog ")
            .title_bottom(Line::from(format!(" {} aircraft ", self.store.catalog().len())));

        let inner = block.inner(area);
        block.render(area, buf);

        let banner = self.banner();
        let banner_height = u16::from(banner.is_some());
        let [filter_area, banner_area, list_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(banner_height),
            Constraint::Fill(1),
        ])
        .areas(inner);

        Paragraph::new(self.filter_line()).render(filter_area, buf);
        if let Some(line) = banner {
            Paragraph::new(line).render(banner_area, buf);
        }

        let items: Vec<ListItem> = self
            .store
            .catalog()
            .iter()
            .map(|aircraft| self.aircraft_item(aircraft))
            .collect();

        let list = List::new(items).highlight_style(self.style.cursor_style);
        StatefulWidget::render(list, list_area, buf, &mut state.list_state);
    }
}
