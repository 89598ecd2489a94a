use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::domain::{Notification, NotificationLevel};

#[derive(Debug)]
pub struct NotificationManager {
    queue: VecDeque<Notification>,
    default_duration: Duration,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl NotificationManager {
    #[must_use]
    pub fn new(default_duration: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            default_duration,
        }
    }

    pub fn notify(
        &mut self,
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.queue
            .push_back(Notification::new(level, title, message, self.default_duration));
    }

    pub fn info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Info, title, message);
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Success, title, message);
    }

    pub fn warn(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Warn, title, message);
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Error, title, message);
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        if let Some(front) = self.queue.front_mut() {
            front.show(now);
            if front.has_expired(now) {
                self.queue.pop_front();
                if let Some(next) = self.queue.front_mut() {
                    next.show(now);
                }
            }
        }
    }

    /// Drops the notification currently on screen.
    pub fn dismiss(&mut self) {
        self.queue.pop_front();
    }

    #[must_use]
    pub fn current_notification(&self) -> Option<&Notification> {
        self.queue.front()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.queue.is_empty()
    }

    #[must_use]
    pub fn pending(&self) -> impl Iterator<Item = &Notification> {
        self.queue.iter()
    }
}
