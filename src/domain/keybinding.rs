use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Quit,

    // Focus
    FocusNext,
    FocusPrevious,

    // Navigation
    NavigateUp,
    NavigateDown,
    Select,

    // Catalog
    DeleteAircraft,
    NextManufacturer,
    PreviousManufacturer,
    Reload,

    // Fleet
    BuyOne,
    SellOne,

    // Form
    SubmitForm,
    ClearForm,
}

impl Action {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Quit => "Quit",
            Self::FocusNext => "Next panel",
            Self::FocusPrevious => "Prev panel",
            Self::NavigateUp => "Up",
            Self::NavigateDown => "Down",
            Self::Select => "Select",
            Self::DeleteAircraft => "Delete",
            Self::NextManufacturer => "Next maker",
            Self::PreviousManufacturer => "Prev maker",
            Self::Reload => "Reload",
            Self::BuyOne => "Buy +1",
            Self::SellOne => "Sell -1",
            Self::SubmitForm => "Post",
            Self::ClearForm => "Clear",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub key: KeyEvent,
    pub action: Action,
    pub label: Cow<'static, str>,
}

impl Keybind {
    pub fn new(key: KeyEvent, action: Action, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key,
            action,
            label: label.into(),
        }
    }
}
