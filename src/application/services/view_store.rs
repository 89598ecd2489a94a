//! Centrally owned view state.
//!
//! Every slice has its own update method. Remote slices (catalog and
//! companies) are guarded by a per-slice request generation: only the
//! response to the most recently issued load may be applied.

use chrono::{DateTime, Local};
use tracing::debug;

use crate::domain::entities::{
    Aircraft, AircraftDraft, Company, DraftField, ManufacturerFilter, manufacturer_options,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::CatalogQuery;

/// Remotely loaded part of the view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    /// Aircraft catalog.
    Catalog,
    /// Companies and their fleets.
    Companies,
}

impl std::fmt::Display for Slice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Catalog => write!(f, "catalog"),
            Self::Companies => write!(f, "companies"),
        }
    }
}

/// Load status of a remote slice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SliceStatus {
    /// Never loaded.
    #[default]
    Idle,
    /// A load is in flight.
    Loading,
    /// Last applied load succeeded.
    Ready,
    /// Last applied load failed; previous data is kept.
    Failed(String),
}

impl SliceStatus {
    /// Returns the failure message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Ticket for one issued load. Responses carry it back to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    slice: Slice,
    generation: u64,
}

/// Result of handing a response to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Data replaced the slice.
    Applied,
    /// Load failed; the slice kept its data.
    Failed(String),
    /// A newer load was issued meanwhile; nothing changed.
    Stale,
}

#[derive(Debug)]
struct RemoteSlice<T> {
    items: Vec<T>,
    status: SliceStatus,
    generation: u64,
    loaded_at: Option<DateTime<Local>>,
}

impl<T> Default for RemoteSlice<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: SliceStatus::Idle,
            generation: 0,
            loaded_at: None,
        }
    }
}

impl<T> RemoteSlice<T> {
    fn begin(&mut self, slice: Slice) -> RequestToken {
        self.generation += 1;
        self.status = SliceStatus::Loading;
        RequestToken {
            slice,
            generation: self.generation,
        }
    }

    fn is_current(&self, token: RequestToken) -> bool {
        token.generation == self.generation
    }

    fn fail(&mut self, error: &ApiError) -> ApplyOutcome {
        let message = error.to_string();
        self.status = SliceStatus::Failed(message.clone());
        ApplyOutcome::Failed(message)
    }

    fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.status = SliceStatus::Ready;
        self.loaded_at = Some(Local::now());
    }
}

/// View state: catalog, manufacturer options, active filter, companies,
/// selected aircraft and the new-aircraft draft.
#[derive(Debug)]
pub struct ViewStore {
    catalog: RemoteSlice<Aircraft>,
    companies: RemoteSlice<Company>,
    manufacturers: Vec<ManufacturerFilter>,
    active_filter: ManufacturerFilter,
    listed_filter: ManufacturerFilter,
    selection: Option<String>,
    draft: AircraftDraft,
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: RemoteSlice::default(),
            companies: RemoteSlice::default(),
            manufacturers: manufacturer_options(&[]),
            active_filter: ManufacturerFilter::All,
            listed_filter: ManufacturerFilter::All,
            selection: None,
            draft: AircraftDraft::default(),
        }
    }

    /// Returns the catalog in server order.
    #[must_use]
    pub fn catalog(&self) -> &[Aircraft] {
        &self.catalog.items
    }

    /// Returns the companies in server order.
    #[must_use]
    pub fn companies(&self) -> &[Company] {
        &self.companies.items
    }

    /// Returns the manufacturer options, "ALL" first.
    #[must_use]
    pub fn manufacturers(&self) -> &[ManufacturerFilter] {
        &self.manufacturers
    }

    /// Returns the active manufacturer filter.
    #[must_use]
    pub const fn active_filter(&self) -> &ManufacturerFilter {
        &self.active_filter
    }

    /// Returns the selected aircraft ICAO.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Returns whether `icao` is the selected aircraft.
    #[must_use]
    pub fn is_selected(&self, icao: &str) -> bool {
        self.selection.as_deref() == Some(icao)
    }

    /// Returns the form draft.
    #[must_use]
    pub const fn draft(&self) -> &AircraftDraft {
        &self.draft
    }

    /// Returns the load status of a slice.
    #[must_use]
    pub const fn status(&self, slice: Slice) -> &SliceStatus {
        match slice {
            Slice::Catalog => &self.catalog.status,
            Slice::Companies => &self.companies.status,
        }
    }

    /// Returns when a slice was last successfully loaded.
    #[must_use]
    pub const fn loaded_at(&self, slice: Slice) -> Option<DateTime<Local>> {
        match slice {
            Slice::Catalog => self.catalog.loaded_at,
            Slice::Companies => self.companies.loaded_at,
        }
    }

    /// Registers a new load for `slice` and returns its token.
    ///
    /// Any response to an earlier load of the same slice becomes stale.
    pub fn begin_load(&mut self, slice: Slice) -> RequestToken {
        let token = match slice {
            Slice::Catalog => self.catalog.begin(slice),
            Slice::Companies => self.companies.begin(slice),
        };
        debug!(slice = %slice, generation = token.generation, "Load issued");
        token
    }

    /// Applies a catalog response.
    ///
    /// A full listing also recomputes the manufacturer options and resets
    /// the active filter to "ALL"; a filtered one only replaces the items.
    /// On failure the active filter falls back to the one the kept rows
    /// were listed with.
    pub fn apply_catalog(
        &mut self,
        token: RequestToken,
        query: &CatalogQuery,
        result: Result<Vec<Aircraft>, ApiError>,
    ) -> ApplyOutcome {
        if token.slice != Slice::Catalog || !self.catalog.is_current(token) {
            debug!(generation = token.generation, "Discarding stale catalog response");
            return ApplyOutcome::Stale;
        }

        match result {
            Ok(items) => {
                if query.is_full() {
                    self.manufacturers = manufacturer_options(&items);
                    self.active_filter = ManufacturerFilter::All;
                }
                self.listed_filter = query.filter();
                self.catalog.replace(items);
                ApplyOutcome::Applied
            }
            Err(e) => {
                if self.active_filter != self.listed_filter {
                    debug!(
                        requested = %self.active_filter,
                        restored = %self.listed_filter,
                        "Restoring filter after failed catalog load"
                    );
                    self.active_filter = self.listed_filter.clone();
                }
                self.catalog.fail(&e)
            }
        }
    }

    /// Applies a company listing response.
    pub fn apply_companies(
        &mut self,
        token: RequestToken,
        result: Result<Vec<Company>, ApiError>,
    ) -> ApplyOutcome {
        if token.slice != Slice::Companies || !self.companies.is_current(token) {
            debug!(generation = token.generation, "Discarding stale companies response");
            return ApplyOutcome::Stale;
        }

        match result {
            Ok(items) => {
                self.companies.replace(items);
                ApplyOutcome::Applied
            }
            Err(e) => self.companies.fail(&e),
        }
    }

    /// Sets the active manufacturer filter.
    pub fn set_filter(&mut self, filter: ManufacturerFilter) {
        self.active_filter = filter;
    }

    /// Returns the option next to the active filter, wrapping around.
    #[must_use]
    pub fn adjacent_filter(&self, forward: bool) -> ManufacturerFilter {
        let len = self.manufacturers.len();
        if len == 0 {
            return ManufacturerFilter::All;
        }
        let current = self
            .manufacturers
            .iter()
            .position(|option| *option == self.active_filter)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.manufacturers[next].clone()
    }

    /// Sets the selected aircraft.
    pub fn select(&mut self, icao: impl Into<String>) {
        self.selection = Some(icao.into());
    }

    /// Clears the selected aircraft.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Sets one draft field.
    pub fn set_draft_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Returns the draft for in-place editing.
    pub const fn draft_mut(&mut self) -> &mut AircraftDraft {
        &mut self.draft
    }

    /// Restores the empty draft.
    pub fn reset_draft(&mut self) {
        self.draft = AircraftDraft::default();
    }
}
