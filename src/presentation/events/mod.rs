//! Event handling.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
    /// Event was consumed.
    Consumed,
}

/// Terminal event classification.
pub struct EventHandler;

impl EventHandler {
    /// Extracts a key press, ignoring releases and repeats reported by
    /// terminals with enhanced keyboard support.
    #[must_use]
    pub fn key_press(event: &Event) -> Option<KeyEvent> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(*key),
            _ => None,
        }
    }

    /// Checks if key quits from anywhere, including while typing in a form.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    /// Checks if the event only requires a redraw.
    #[must_use]
    pub fn is_redraw_event(event: &Event) -> bool {
        matches!(event, Event::Resize(_, _) | Event::FocusGained)
    }
}
