//! Domain layer with core entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Keybinding definitions.
pub mod keybinding;
/// Notification definitions.
pub mod notification;
/// Port definitions.
pub mod ports;

pub use entities::{Aircraft, AircraftDraft, Company, DraftField, FleetEntry, ManufacturerFilter};
pub use errors::{ApiError, DraftError};
pub use notification::{Notification, NotificationLevel};
pub use ports::{ApiOutcome, CatalogQuery, FleetApiPort, Mutation, MutationKind};
