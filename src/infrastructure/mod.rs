//! Infrastructure layer with external service adapters.

/// Fleet API client.
pub mod api;
/// Application configuration.
pub mod config;

pub use api::{DEFAULT_BASE_URL, FleetApiClient};
pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StorageManager};
