//! Use case implementations.

mod fleet_sync;

pub use fleet_sync::{FleetSync, SyncEvent};
