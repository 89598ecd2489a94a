//! Status bar widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::application::services::{Slice, SliceStatus, ViewStore};

/// Status bar severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Informational.
    Info,
    /// Success.
    Success,
    /// Warning.
    Warning,
    /// Error.
    Error,
}

impl StatusLevel {
    /// Returns color for level.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// Status bar widget.
#[derive(Debug, Clone)]
pub struct StatusBar {
    left: String,
    center: String,
    right: String,
    level: StatusLevel,
}

impl StatusBar {
    /// Creates empty status bar.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            left: String::new(),
            center: String::new(),
            right: String::new(),
            level: StatusLevel::Info,
        }
    }

    /// Summarizes the load state of both remote slices.
    ///
    /// The level reflects the worst slice: any failure is an error, any
    /// pending load a warning.
    #[must_use]
    pub fn sync_summary(store: &ViewStore, endpoint: &str) -> Self {
        let slices = [Slice::Catalog, Slice::Companies];

        let level = if slices
            .iter()
            .any(|s| matches!(store.status(*s), SliceStatus::Failed(_)))
        {
            StatusLevel::Error
        } else if slices
            .iter()
            .any(|s| matches!(store.status(*s), SliceStatus::Loading))
        {
            StatusLevel::Warning
        } else if slices
            .iter()
            .all(|s| matches!(store.status(*s), SliceStatus::Ready))
        {
            StatusLevel::Success
        } else {
            StatusLevel::Info
        };

        let right = slices
            .iter()
            .map(|slice| {
                let state = match store.status(*slice) {
                    SliceStatus::Idle => "idle".to_string(),
                    SliceStatus::Loading => "loading…".to_string(),
                    SliceStatus::Failed(_) => "failed".to_string(),
                    SliceStatus::Ready => store
                        .loaded_at(*slice)
                        .map_or_else(|| "ready".to_string(), |t| t.format("%H:%M:%S").to_string()),
                };
                format!("{slice} {state}")
            })
            .collect::<Vec<_>>()
            .join(" · ");

        let center = store
            .selection()
            .map(|icao| format!("Selected: {icao}"))
            .unwrap_or_default();

        Self::new()
            .left(format!(" {endpoint}"))
            .center(center)
            .right(format!("{right} "))
            .level(level)
    }

    /// Sets left content.
    #[must_use]
    pub fn left(mut self, content: impl Into<String>) -> Self {
        self.left = content.into();
        self
    }

    /// Sets center content.
    #[must_use]
    pub fn center(mut self, content: impl Into<String>) -> Self {
        self.center = content.into();
        self
    }

    /// Sets right content.
    #[must_use]
    pub fn right(mut self, content: impl Into<String>) -> Self {
        self.right = content.into();
        self
    }

    /// Sets status level.
    #[must_use]
    pub const fn level(mut self, level: StatusLevel) -> Self {
        self.level = level;
        self
    }

    /// Returns the current level.
    #[must_use]
    pub const fn current_level(&self) -> StatusLevel {
        self.level
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.level.color())
            .add_modifier(Modifier::BOLD);
        let muted = Style::default().fg(Color::DarkGray);

        let width = area.width as usize;

        let left_len = self.left.width();
        let center_len = self.center.width();
        let right_len = self.right.width();

        let center_start = width.saturating_sub(center_len) / 2;
        let right_start = width.saturating_sub(right_len);

        let mut spans = vec![Span::styled(&self.left, muted)];

        let left_padding = center_start.saturating_sub(left_len);
        if left_padding > 0 {
            spans.push(Span::raw(" ".repeat(left_padding)));
        }

        if !self.center.is_empty() {
            spans.push(Span::styled(&self.center, muted));
        }

        let current_len = left_len + left_padding + center_len;
        let right_padding = right_start.saturating_sub(current_len);
        if right_padding > 0 {
            spans.push(Span::raw(" ".repeat(right_padding)));
        }

        if !self.right.is_empty() {
            spans.push(Span::styled(&self.right, style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
