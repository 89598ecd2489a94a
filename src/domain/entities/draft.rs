//! Staging record for the new-aircraft form.

use serde_json::Number;

use super::Aircraft;
use crate::domain::errors::DraftError;

/// Editable field of an [`AircraftDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DraftField {
    /// Manufacturer name.
    #[default]
    Constructor,
    /// ICAO type designator.
    Icao,
    /// Passenger capacity.
    MaxCapacity,
    /// Range in kilometres.
    Range,
}

impl DraftField {
    /// Fields in form order.
    pub const ALL: [Self; 4] = [Self::Constructor, Self::Icao, Self::MaxCapacity, Self::Range];

    /// Returns the JSON field name the value is submitted under.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Constructor => "constructor",
            Self::Icao => "ICAO",
            Self::MaxCapacity => "maxCapacity",
            Self::Range => "range",
        }
    }

    /// Resolves a field from its JSON name.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Returns the form label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Constructor => "Constructor",
            Self::Icao => "ICAO",
            Self::MaxCapacity => "Max Capacity",
            Self::Range => "Range",
        }
    }

    /// Returns whether the field holds a number.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::MaxCapacity | Self::Range)
    }

    /// Returns the next field, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Constructor => Self::Icao,
            Self::Icao => Self::MaxCapacity,
            Self::MaxCapacity => Self::Range,
            Self::Range => Self::Constructor,
        }
    }

    /// Returns the previous field, wrapping around.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Constructor => Self::Range,
            Self::Icao => Self::Constructor,
            Self::MaxCapacity => Self::Icao,
            Self::Range => Self::MaxCapacity,
        }
    }
}

/// Raw, field-by-field form input. Values stay strings until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AircraftDraft {
    constructor: String,
    icao: String,
    max_capacity: String,
    range: String,
}

impl Default for AircraftDraft {
    fn default() -> Self {
        Self {
            constructor: String::new(),
            icao: String::new(),
            max_capacity: "0".to_string(),
            range: "0".to_string(),
        }
    }
}

impl AircraftDraft {
    /// Creates an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value of a field.
    #[must_use]
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Constructor => &self.constructor,
            DraftField::Icao => &self.icao,
            DraftField::MaxCapacity => &self.max_capacity,
            DraftField::Range => &self.range,
        }
    }

    fn slot(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Constructor => &mut self.constructor,
            DraftField::Icao => &mut self.icao,
            DraftField::MaxCapacity => &mut self.max_capacity,
            DraftField::Range => &mut self.range,
        }
    }

    /// Replaces the raw value of a field.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        *self.slot(field) = value.into();
    }

    /// Sets a field by its JSON name. Unknown names are ignored.
    pub fn set_by_key(&mut self, key: &str, value: impl Into<String>) -> bool {
        match DraftField::from_key(key) {
            Some(field) => {
                self.set(field, value);
                true
            }
            None => false,
        }
    }

    /// Appends a character to a field.
    pub fn push_char(&mut self, field: DraftField, c: char) {
        self.slot(field).push(c);
    }

    /// Removes the last character of a field.
    pub fn pop_char(&mut self, field: DraftField) {
        self.slot(field).pop();
    }

    /// Coerces the draft into an aircraft ready to be posted.
    ///
    /// Numeric fields are trimmed and an empty value counts as zero.
    /// Whole numbers are posted as integers, anything else as a float.
    ///
    /// # Errors
    /// Returns [`DraftError::InvalidNumber`] if a numeric field is not a
    /// finite, non-negative number.
    pub fn to_aircraft(&self) -> Result<Aircraft, DraftError> {
        let max_capacity = parse_number(DraftField::MaxCapacity, &self.max_capacity)?;
        let range = parse_number(DraftField::Range, &self.range)?;

        Ok(Aircraft::new(
            self.icao.trim(),
            self.constructor.trim(),
            range,
            max_capacity,
        ))
    }
}

fn parse_number(field: DraftField, raw: &str) -> Result<Number, DraftError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Number::from(0u64));
    }
    if let Ok(whole) = trimmed.parse::<u64>() {
        return Ok(Number::from(whole));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| *value >= 0.0)
        .and_then(Number::from_f64)
        .ok_or_else(|| DraftError::invalid_number(field.key(), raw))
}
