//! Domain entities.

mod aircraft;
mod company;
mod draft;
mod manufacturer;

pub use aircraft::Aircraft;
pub use company::{Company, FleetEntry};
pub use draft::{AircraftDraft, DraftField};
pub use manufacturer::{ALL_MANUFACTURERS, ManufacturerFilter, manufacturer_options};
