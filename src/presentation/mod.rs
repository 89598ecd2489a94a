//! Presentation layer with UI components and event handling.

/// Key bindings.
pub mod commands;
/// Event handling.
pub mod events;
/// Colours and styles.
pub mod theme;
/// UI screens.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use ui::App;
