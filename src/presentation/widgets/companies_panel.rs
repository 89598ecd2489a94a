//! Companies and fleets panel.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use crate::application::services::{Slice, SliceStatus, ViewStore};
use crate::domain::entities::{Company, FleetEntry};
use crate::presentation::theme::Theme;

/// A cursor stop inside the companies panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetSlot {
    /// One fleet entry of a company.
    Entry { company: usize, entry: usize },
    /// The tile buying the selected catalog aircraft for a company.
    BuyTile { company: usize },
}

impl FleetSlot {
    #[must_use]
    pub const fn company(self) -> usize {
        match self {
            Self::Entry { company, .. } | Self::BuyTile { company } => company,
        }
    }
}

/// Cursor stops in display order: each company's fleet entries, then its
/// BUY tile.
#[must_use]
pub fn fleet_slots(companies: &[Company]) -> Vec<FleetSlot> {
    companies
        .iter()
        .enumerate()
        .flat_map(|(company, c)| {
            (0..c.fleet().len())
                .map(move |entry| FleetSlot::Entry { company, entry })
                .chain(std::iter::once(FleetSlot::BuyTile { company }))
        })
        .collect()
}

/// Target of a fleet cursor, resolved against the current companies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetTarget<'a> {
    Entry {
        company: &'a Company,
        entry: &'a FleetEntry,
    },
    BuyTile {
        company: &'a Company,
    },
}

impl<'a> FleetTarget<'a> {
    #[must_use]
    pub const fn company(self) -> &'a Company {
        match self {
            Self::Entry { company, .. } | Self::BuyTile { company } => company,
        }
    }
}

pub struct CompaniesPanelStyle {
    pub border_style: Style,
    pub border_style_focused: Style,
    pub cursor_style: Style,
    pub company_style: Style,
    pub tile_style: Style,
    pub banner_style: Style,
    pub dimmed_style: Style,
}

impl CompaniesPanelStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            border_style: theme.border_style(false),
            border_style_focused: theme.border_style(true),
            cursor_style: theme.cursor_style,
            company_style: Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
            tile_style: theme.selection_style,
            banner_style: theme.error_style.add_modifier(Modifier::BOLD),
            dimmed_style: theme.dimmed_style,
        }
    }
}

/// Cursor over fleet slots.
#[derive(Debug, Default)]
pub struct CompaniesPanelState {
    cursor: Option<usize>,
    list_state: ListState,
    focused: bool,
}

impl CompaniesPanelState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index into [`fleet_slots`].
    #[must_use]
    pub const fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Resolves the slot under the cursor.
    #[must_use]
    pub fn current<'s>(&self, companies: &'s [Company]) -> Option<FleetTarget<'s>> {
        let slot = *fleet_slots(companies).get(self.cursor?)?;
        let company = companies.get(slot.company())?;
        match slot {
            FleetSlot::Entry { entry, .. } => Some(FleetTarget::Entry {
                company,
                entry: company.fleet().get(entry)?,
            }),
            FleetSlot::BuyTile { .. } => Some(FleetTarget::BuyTile { company }),
        }
    }

    pub fn move_up(&mut self, len: usize) {
        self.cursor = match (self.cursor, len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), _) => Some(i.saturating_sub(1).min(len - 1)),
        };
    }

    pub fn move_down(&mut self, len: usize) {
        self.cursor = match (self.cursor, len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), _) => Some((i + 1).min(len - 1)),
        };
    }

    /// Keeps the cursor inside `len` slots.
    pub fn clamp(&mut self, len: usize) {
        self.cursor = match (self.cursor, len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), _) => Some(i.min(len - 1)),
        };
    }
}

pub struct CompaniesPanel<'a> {
    store: &'a ViewStore,
    selection: Option<&'a str>,
    style: CompaniesPanelStyle,
}

impl<'a> CompaniesPanel<'a> {
    #[must_use]
    pub fn new(store: &'a ViewStore, theme: &Theme) -> Self {
        Self {
            store,
            selection: store.selection(),
            style: CompaniesPanelStyle::from_theme(theme),
        }
    }

    /// Builds the rows and the row index of every slot.
    fn rows(&self) -> (Vec<ListItem<'a>>, Vec<usize>) {
        let mut items = Vec::new();
        let mut slot_rows = Vec::new();

        for company in self.store.companies() {
            items.push(ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", company.company_icao()), self.style.company_style),
                Span::raw(company.name().to_string()),
                Span::styled(format!(" ({})", company.country()), self.style.dimmed_style),
            ])));

            for entry in company.fleet() {
                slot_rows.push(items.len());
                items.push(ListItem::new(Line::from(vec![
                    Span::raw(format!("    {:<6}", entry.aircraft_icao())),
                    Span::styled(format!("× {}", entry.quantity()), self.style.dimmed_style),
                ])));
            }

            let tile = self.selection.map_or_else(
                || "    [ BUY ] select an aircraft first".to_string(),
                |icao| format!("    [ BUY ] one {icao}"),
            );
            slot_rows.push(items.len());
            items.push(ListItem::new(Span::styled(tile, self.style.tile_style)));
        }

        (items, slot_rows)
    }

    fn banner(&self) -> Option<Line<'_>> {
        match self.store.status(Slice::Companies) {
            SliceStatus::Failed(message) => Some(Line::from(Span::styled(
                format!("⚠ {message} · press r to retry"),
                self.style.banner_style,
            ))),
            SliceStatus::Loading if self.store.companies().is_empty() => Some(Line::from(
                Span::styled("Loading companies…", self.style.dimmed_style),
            )),
            _ => None,
        }
    }
}

impl StatefulWidget for CompaniesPanel<'_> {
    type State = CompaniesPanelState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let border_style = if state.is_focused() {
            self.style.border_style_focused
        } else {
            self.style.border_style
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Companies & fleets ");

        let inner = block.inner(area);
        block.render(area, buf);

        let banner = self.banner();
        let [banner_area, list_area] = Layout::vertical([
            Constraint::Length(u16::from(banner.is_some())),
            Constraint::Fill(1),
        ])
        .areas(inner);

        if let Some(line) = banner {
            Paragraph::new(line).render(banner_area, buf);
        }

        let (items, slot_rows) = self.rows();
        state
            .list_state
            .select(state.cursor.and_then(|i| slot_rows.get(i).copied()));

        let list = List::new(items).highlight_style(self.style.cursor_style);
        StatefulWidget::render(list, list_area, buf, &mut state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn companies() -> Vec<Company> {
        vec![
            Company::new("AFR", "Air France", "France")
                .with_fleet(vec![FleetEntry::new("A320", 12), FleetEntry::new("B77W", 3)]),
            Company::new("SWR", "Swiss", "Switzerland"),
        ]
    }

    #[test]
    fn test_fleet_slots_end_each_company_with_buy_tile() {
        let slots = fleet_slots(&companies());

        assert_eq!(
            slots,
            vec![
                FleetSlot::Entry { company: 0, entry: 0 },
                FleetSlot::Entry { company: 0, entry: 1 },
                FleetSlot::BuyTile { company: 0 },
                FleetSlot::BuyTile { company: 1 },
            ]
        );
    }

    #[test]
    fn test_current_resolves_entry_and_tile() {
        let companies = companies();
        let len = fleet_slots(&companies).len();
        let mut state = CompaniesPanelState::new();
        state.clamp(len);

        match state.current(&companies) {
            Some(FleetTarget::Entry { company, entry }) => {
                assert_eq!(company.company_icao(), "AFR");
                assert_eq!(entry.aircraft_icao(), "A320");
            }
            other => panic!("unexpected target: {other:?}"),
        }

        state.move_down(len);
        state.move_down(len);
        state.move_down(len);
        assert!(matches!(
            state.current(&companies),
            Some(FleetTarget::BuyTile { company }) if company.company_icao() == "SWR"
        ));

        state.move_down(len);
        assert_eq!(state.cursor(), Some(3));
    }

    #[test]
    fn test_clamp_after_companies_shrink() {
        let mut state = CompaniesPanelState::new();
        state.clamp(4);
        for _ in 0..3 {
            state.move_down(4);
        }
        state.clamp(2);
        assert_eq!(state.cursor(), Some(1));

        state.clamp(0);
        assert_eq!(state.current(&[]), None);
    }
}
