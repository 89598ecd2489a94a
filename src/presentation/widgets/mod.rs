mod aircraft_form;
mod catalog_panel;
mod companies_panel;
mod footer_bar;
mod input;
mod status_bar;

pub use aircraft_form::{AircraftForm, AircraftFormState};
pub use catalog_panel::{CatalogPanel, CatalogPanelState, CatalogPanelStyle};
pub use companies_panel::{
    CompaniesPanel, CompaniesPanelState, CompaniesPanelStyle, FleetSlot, FleetTarget, fleet_slots,
};
pub use footer_bar::{FocusPanel, FooterBar, FooterBarStyle};
pub use input::TextInput;
pub use status_bar::{StatusBar, StatusLevel};
