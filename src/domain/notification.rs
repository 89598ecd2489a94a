//! Transient status messages shown over the main screen.

use std::time::{Duration, Instant};

/// Severity of a [`Notification`]; decides its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Neutral information.
    Info,
    /// An accepted create, delete, buy or sell.
    Success,
    /// Input rejected before any request was sent.
    Warn,
    /// A request failed or the server refused it.
    Error,
}

/// One queued message. Its lifetime only starts once it is on screen.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Operation the message is about, e.g. `"Buy"`.
    pub title: String,
    /// Status line, optionally followed by the response body.
    pub message: String,
    shown_since: Option<Instant>,
    lifetime: Duration,
}

impl Notification {
    /// Creates a notification that stays visible for `lifetime`.
    #[must_use]
    pub fn new(
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
        lifetime: Duration,
    ) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
            shown_since: None,
            lifetime,
        }
    }

    /// Records the moment the notification first reached the screen.
    /// Later calls keep the first moment.
    pub fn show(&mut self, now: Instant) {
        self.shown_since.get_or_insert(now);
    }

    /// Returns when the notification was first shown.
    #[must_use]
    pub const fn shown_since(&self) -> Option<Instant> {
        self.shown_since
    }

    /// Returns whether the notification has been visible for its whole
    /// lifetime at `now`. A notification never shown does not expire.
    #[must_use]
    pub fn has_expired(&self, now: Instant) -> bool {
        self.shown_since
            .is_some_and(|since| now.saturating_duration_since(since) >= self.lifetime)
    }
}
