//! Hangar - a terminal client for an aircraft catalog and company fleets.
//!
//! This crate provides a terminal client with clean architecture over a
//! remote fleet REST API: browsing and filtering the catalog, buying and
//! selling aircraft for companies, and adding new aircraft types.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing view state, sync policy and use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "hangar";
