//! Application layer with view state, synchronization policy and use cases.

/// Application services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use services::{NotificationManager, Slice, SliceStatus, ViewStore};
pub use use_cases::{FleetSync, SyncEvent};
