//! Catalog, fleets and form on a single screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Span,
    widgets::{StatefulWidget, Widget},
};
use tracing::debug;

use crate::application::services::ViewStore;
use crate::domain::Notification;
use crate::domain::entities::{DraftField, ManufacturerFilter};
use crate::domain::keybinding::{Action, Keybind};
use crate::presentation::commands::{CommandRegistry, HasCommands};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{
    AircraftForm, AircraftFormState, CatalogPanel, CatalogPanelState, CompaniesPanel,
    CompaniesPanelState, FleetTarget, FocusPanel, FooterBar, FooterBarStyle, StatusBar,
    fleet_slots,
};

use super::notification_popup::NotificationPopup;

const CATALOG_ACTIONS: &[Action] = &[
    Action::Select,
    Action::DeleteAircraft,
    Action::PreviousManufacturer,
    Action::NextManufacturer,
    Action::Reload,
    Action::NavigateUp,
    Action::NavigateDown,
    Action::FocusNext,
    Action::FocusPrevious,
    Action::Quit,
];

const COMPANIES_ACTIONS: &[Action] = &[
    Action::BuyOne,
    Action::SellOne,
    Action::Select,
    Action::Reload,
    Action::NavigateUp,
    Action::NavigateDown,
    Action::FocusNext,
    Action::FocusPrevious,
    Action::Quit,
];

const FORM_ACTIONS: &[Action] = &[
    Action::SubmitForm,
    Action::ClearForm,
    Action::NavigateUp,
    Action::NavigateDown,
    Action::FocusNext,
    Action::FocusPrevious,
];

/// Form height: four bordered fields, a hint line and the panel border.
const FORM_HEIGHT: u16 = 4 * 3 + 1 + 2;

/// Request the screen asks the application to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    /// Nothing to do beyond a redraw.
    None,
    /// Leave the application.
    Quit,
    /// Reload the catalog with the active filter.
    ReloadCatalog,
    /// Reload the companies.
    ReloadCompanies,
    /// Switch the manufacturer filter.
    ChangeFilter(ManufacturerFilter),
    /// Delete a catalog aircraft.
    Delete(String),
    /// Buy one aircraft for a company.
    Buy {
        company_icao: String,
        aircraft_icao: String,
    },
    /// Sell one aircraft from a company.
    Sell {
        company_icao: String,
        aircraft_icao: String,
    },
    /// Buy one of the selected catalog aircraft for a company.
    BuySelected { company_icao: String },
    /// Post the form draft.
    SubmitDraft,
}

/// Focus and cursors of the main screen.
#[derive(Debug)]
pub struct MainScreenState {
    focus: FocusPanel,
    catalog: CatalogPanelState,
    companies: CompaniesPanelState,
    form: AircraftFormState,
}

impl Default for MainScreenState {
    fn default() -> Self {
        let mut state = Self {
            focus: FocusPanel::default(),
            catalog: CatalogPanelState::new(),
            companies: CompaniesPanelState::new(),
            form: AircraftFormState::new(),
        };
        state.set_focus(FocusPanel::default());
        state
    }
}

impl MainScreenState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn focus(&self) -> FocusPanel {
        self.focus
    }

    pub fn set_focus(&mut self, panel: FocusPanel) {
        self.focus = panel;
        self.catalog.set_focused(panel == FocusPanel::Catalog);
        self.companies.set_focused(panel == FocusPanel::Companies);
        self.form.set_focused(panel == FocusPanel::Form);
    }

    #[must_use]
    pub const fn catalog(&self) -> &CatalogPanelState {
        &self.catalog
    }

    #[must_use]
    pub const fn companies(&self) -> &CompaniesPanelState {
        &self.companies
    }

    #[must_use]
    pub const fn form(&self) -> &AircraftFormState {
        &self.form
    }

    /// Keeps cursors on existing rows after the store changed.
    pub fn sync_cursors(&mut self, store: &ViewStore) {
        self.catalog.clamp(store.catalog().len());
        self.companies.clamp(fleet_slots(store.companies()).len());
    }

    const fn allowed_actions(&self) -> &'static [Action] {
        match self.focus {
            FocusPanel::Catalog => CATALOG_ACTIONS,
            FocusPanel::Companies => COMPANIES_ACTIONS,
            FocusPanel::Form => FORM_ACTIONS,
        }
    }

    /// Handles a key press. Local state (focus, cursors, selection, draft
    /// text) changes in place; anything needing the API is returned.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        registry: &CommandRegistry,
        store: &mut ViewStore,
    ) -> ScreenAction {
        if self.focus == FocusPanel::Form && self.edit_draft(key, store) {
            return ScreenAction::None;
        }

        let Some(action) = registry.find_action(key, self.allowed_actions()) else {
            return ScreenAction::None;
        };

        match action {
            Action::Quit => ScreenAction::Quit,
            Action::FocusNext => {
                self.set_focus(self.focus.next());
                ScreenAction::None
            }
            Action::FocusPrevious => {
                self.set_focus(self.focus.previous());
                ScreenAction::None
            }
            _ => match self.focus {
                FocusPanel::Catalog => self.handle_catalog(action, store),
                FocusPanel::Companies => self.handle_companies(action, store),
                FocusPanel::Form => self.handle_form(action, store),
            },
        }
    }

    /// Types into the focused field. Returns whether the key was used.
    fn edit_draft(&self, key: KeyEvent, store: &mut ViewStore) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        let field: DraftField = self.form.field();
        match key.code {
            KeyCode::Char(c) => {
                store.draft_mut().push_char(field, c);
                true
            }
            KeyCode::Backspace => {
                store.draft_mut().pop_char(field);
                true
            }
            _ => false,
        }
    }

    fn handle_catalog(&mut self, action: Action, store: &mut ViewStore) -> ScreenAction {
        let len = store.catalog().len();
        match action {
            Action::NavigateUp => self.catalog.move_up(len),
            Action::NavigateDown => self.catalog.move_down(len),
            Action::Select => {
                if let Some(icao) = self.catalog.current(store).map(|a| a.icao().to_string()) {
                    debug!(icao = %icao, "Aircraft selected");
                    store.select(icao);
                }
            }
            Action::DeleteAircraft => {
                if let Some(aircraft) = self.catalog.current(store) {
                    return ScreenAction::Delete(aircraft.icao().to_string());
                }
            }
            Action::NextManufacturer => {
                return ScreenAction::ChangeFilter(store.adjacent_filter(true));
            }
            Action::PreviousManufacturer => {
                return ScreenAction::ChangeFilter(store.adjacent_filter(false));
            }
            Action::Reload => return ScreenAction::ReloadCatalog,
            _ => {}
        }
        ScreenAction::None
    }

    fn handle_companies(&mut self, action: Action, store: &ViewStore) -> ScreenAction {
        let len = fleet_slots(store.companies()).len();
        match action {
            Action::NavigateUp => self.companies.move_up(len),
            Action::NavigateDown => self.companies.move_down(len),
            Action::Reload => return ScreenAction::ReloadCompanies,
            Action::Select | Action::BuyOne | Action::SellOne => {
                if let Some(target) = self.companies.current(store.companies()) {
                    return fleet_action(action, target);
                }
            }
            _ => {}
        }
        ScreenAction::None
    }

    fn handle_form(&mut self, action: Action, store: &mut ViewStore) -> ScreenAction {
        match action {
            Action::NavigateUp => self.form.previous_field(),
            Action::NavigateDown => self.form.next_field(),
            Action::ClearForm => store.reset_draft(),
            Action::SubmitForm => return ScreenAction::SubmitDraft,
            _ => {}
        }
        ScreenAction::None
    }
}

fn fleet_action(action: Action, target: FleetTarget<'_>) -> ScreenAction {
    let company_icao = target.company().company_icao().to_string();
    match (action, target) {
        (Action::BuyOne, FleetTarget::Entry { entry, .. }) => ScreenAction::Buy {
            company_icao,
            aircraft_icao: entry.aircraft_icao().to_string(),
        },
        (Action::SellOne, FleetTarget::Entry { entry, .. }) => ScreenAction::Sell {
            company_icao,
            aircraft_icao: entry.aircraft_icao().to_string(),
        },
        (Action::Select | Action::BuyOne, FleetTarget::BuyTile { .. }) => {
            ScreenAction::BuySelected { company_icao }
        }
        _ => ScreenAction::None,
    }
}

impl HasCommands for MainScreenState {
    fn get_commands(&self, registry: &CommandRegistry) -> Vec<Keybind> {
        let shown: &[Action] = match self.focus {
            FocusPanel::Catalog => &[
                Action::Select,
                Action::DeleteAircraft,
                Action::PreviousManufacturer,
                Action::NextManufacturer,
                Action::Reload,
                Action::FocusNext,
                Action::Quit,
            ],
            FocusPanel::Companies => &[
                Action::BuyOne,
                Action::SellOne,
                Action::Reload,
                Action::FocusNext,
                Action::Quit,
            ],
            FocusPanel::Form => &[Action::SubmitForm, Action::ClearForm, Action::FocusNext],
        };
        registry.keybinds(shown)
    }
}

/// Main application screen.
pub struct MainScreen<'a> {
    store: &'a ViewStore,
    theme: &'a Theme,
    registry: &'a CommandRegistry,
    endpoint: &'a str,
    notification: Option<(&'a Notification, usize)>,
}

impl<'a> MainScreen<'a> {
    #[must_use]
    pub const fn new(
        store: &'a ViewStore,
        theme: &'a Theme,
        registry: &'a CommandRegistry,
        endpoint: &'a str,
    ) -> Self {
        Self {
            store,
            theme,
            registry,
            endpoint,
            notification: None,
        }
    }

    /// Overlays a notification with the number of queued ones behind it.
    #[must_use]
    pub const fn notification(mut self, notification: &'a Notification, queued: usize) -> Self {
        self.notification = Some((notification, queued));
        self
    }
}

impl StatefulWidget for MainScreen<'_> {
    type State = MainScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [content_area, status_area, footer_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let [catalog_area, side_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(content_area);
        let [companies_area, form_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(FORM_HEIGHT)])
                .areas(side_area);

        state.sync_cursors(self.store);

        CatalogPanel::new(self.store, self.theme).render(catalog_area, buf, &mut state.catalog);
        CompaniesPanel::new(self.store, self.theme).render(
            companies_area,
            buf,
            &mut state.companies,
        );

        let submit_hint = self.registry.get(Action::SubmitForm).map(|key| {
            format!(
                "{} to post · {} to clear",
                FooterBar::format_key(&key),
                self.registry
                    .get(Action::ClearForm)
                    .map_or_else(String::new, |k| FooterBar::format_key(&k)),
            )
        });
        let mut form = AircraftForm::new(self.store.draft(), self.theme);
        if let Some(hint) = submit_hint {
            form = form.hint(Span::styled(hint, self.theme.dimmed_style));
        }
        form.render(form_area, buf, &mut state.form);

        (&StatusBar::sync_summary(self.store, self.endpoint)).render(status_area, buf);

        let binds = state.get_commands(self.registry);
        FooterBar::new(&binds)
            .focus(state.focus())
            .style(FooterBarStyle::from_theme(self.theme))
            .render(footer_area, buf);

        if let Some((notification, queued)) = self.notification {
            NotificationPopup::new(notification, self.theme)
                .queued(queued)
                .render(content_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::Slice;
    use crate::domain::entities::{Aircraft, Company, FleetEntry};
    use crate::domain::ports::CatalogQuery;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded_store() -> ViewStore {
        let mut store = ViewStore::new();
        let token = store.begin_load(Slice::Catalog);
        store.apply_catalog(
            token,
            &CatalogQuery::Sorted,
            Ok(vec![
                Aircraft::new("A320", "Airbus", 6000, 180),
                Aircraft::new("B738", "Boeing", 5600, 189),
            ]),
        );
        let token = store.begin_load(Slice::Companies);
        store.apply_companies(
            token,
            Ok(vec![
                Company::new("AFR", "Air France", "France")
                    .with_fleet(vec![FleetEntry::new("A320", 12)]),
            ]),
        );
        store
    }

    fn screen(store: &ViewStore) -> MainScreenState {
        let mut state = MainScreenState::new();
        state.sync_cursors(store);
        state
    }

    #[test]
    fn test_select_only_changes_selection() {
        let registry = CommandRegistry::new();
        let mut store = loaded_store();
        let mut state = screen(&store);

        state.handle_key(press(KeyCode::Down), &registry, &mut store);
        let action = state.handle_key(press(KeyCode::Enter), &registry, &mut store);

        assert_eq!(action, ScreenAction::None);
        assert_eq!(store.selection(), Some("B738"));
        assert_eq!(store.catalog().len(), 2);
    }

    #[test]
    fn test_catalog_keys_map_to_requests() {
        let registry = CommandRegistry::new();
        let mut store = loaded_store();
        let mut state = screen(&store);

        assert_eq!(
            state.handle_key(press(KeyCode::Char('d')), &registry, &mut store),
            ScreenAction::Delete("A320".to_string())
        );
        assert_eq!(
            state.handle_key(press(KeyCode::Char(']')), &registry, &mut store),
            ScreenAction::ChangeFilter(ManufacturerFilter::Only("Airbus".to_string()))
        );
        assert_eq!(
            state.handle_key(press(KeyCode::Char('[')), &registry, &mut store),
            ScreenAction::ChangeFilter(ManufacturerFilter::Only("Boeing".to_string()))
        );
        assert_eq!(
            state.handle_key(press(KeyCode::Char('r')), &registry, &mut store),
            ScreenAction::ReloadCatalog
        );
        assert_eq!(
            state.handle_key(press(KeyCode::Char('q')), &registry, &mut store),
            ScreenAction::Quit
        );
    }

    #[test]
    fn test_fleet_slots_buy_and_sell() {
        let registry = CommandRegistry::new();
        let mut store = loaded_store();
        let mut state = screen(&store);
        state.handle_key(press(KeyCode::Tab), &registry, &mut store);
        assert_eq!(state.focus(), FocusPanel::Companies);

        assert_eq!(
            state.handle_key(press(KeyCode::Char('b')), &registry, &mut store),
            ScreenAction::Buy {
                company_icao: "AFR".to_string(),
                aircraft_icao: "A320".to_string(),
            }
        );
        assert_eq!(
            state.handle_key(press(KeyCode::Char('s')), &registry, &mut store),
            ScreenAction::Sell {
                company_icao: "AFR".to_string(),
                aircraft_icao: "A320".to_string(),
            }
        );

        state.handle_key(press(KeyCode::Down), &registry, &mut store);
        assert_eq!(
            state.handle_key(press(KeyCode::Enter), &registry, &mut store),
            ScreenAction::BuySelected {
                company_icao: "AFR".to_string()
            }
        );
        assert_eq!(
            state.handle_key(press(KeyCode::Char('s')), &registry, &mut store),
            ScreenAction::None
        );
    }

    #[test]
    fn test_form_typing_and_submit() {
        let registry = CommandRegistry::new();
        let mut store = loaded_store();
        let mut state = screen(&store);
        state.handle_key(press(KeyCode::BackTab), &registry, &mut store);
        assert_eq!(state.focus(), FocusPanel::Form);

        for c in "Airbusq".chars() {
            state.handle_key(press(KeyCode::Char(c)), &registry, &mut store);
        }
        state.handle_key(press(KeyCode::Backspace), &registry, &mut store);
        state.handle_key(press(KeyCode::Down), &registry, &mut store);
        for c in "A321".chars() {
            state.handle_key(press(KeyCode::Char(c)), &registry, &mut store);
        }

        assert_eq!(store.draft().get(DraftField::Constructor), "Airbus");
        assert_eq!(store.draft().get(DraftField::Icao), "A321");
        assert_eq!(
            state.handle_key(press(KeyCode::Enter), &registry, &mut store),
            ScreenAction::SubmitDraft
        );

        state.handle_key(
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
            &registry,
            &mut store,
        );
        assert_eq!(store.draft().get(DraftField::Icao), "");
    }

    #[test]
    fn test_render_full_screen() {
        let registry = CommandRegistry::new();
        let store = loaded_store();
        let theme = Theme::default();
        let mut state = MainScreenState::new();
        let notification = Notification::new(
            crate::domain::NotificationLevel::Info,
            "Hello",
            "World",
            std::time::Duration::from_secs(5),
        );
        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);

        MainScreen::new(&store, &theme, &registry, "https://example.test")
            .notification(&notification, 0)
            .render(area, &mut buf, &mut state);

        let screen: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(screen.contains("Catalog"));
        assert!(screen.contains("Air France"));
        assert!(screen.contains("New aircraft"));
        assert!(screen.contains("https://example.test"));
        assert!(screen.contains("World"));
        assert_eq!(state.catalog().cursor(), Some(0));
    }
}
