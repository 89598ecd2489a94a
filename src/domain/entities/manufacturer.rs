//! Manufacturer filter for the catalog.

use super::Aircraft;

/// Label of the catch-all filter option.
pub const ALL_MANUFACTURERS: &str = "ALL";

/// Active manufacturer filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ManufacturerFilter {
    /// No filter, the full catalog.
    #[default]
    All,
    /// Only aircraft built by the named manufacturer.
    Only(String),
}

impl ManufacturerFilter {
    /// Builds a filter from its display label.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label == ALL_MANUFACTURERS {
            Self::All
        } else {
            Self::Only(label.to_string())
        }
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_MANUFACTURERS,
            Self::Only(name) => name,
        }
    }

    /// Returns the manufacturer name when a specific one is selected.
    #[must_use]
    pub fn manufacturer(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(name) => Some(name),
        }
    }
}

impl std::fmt::Display for ManufacturerFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Derives the filter options from a catalog listing.
///
/// The result always starts with [`ManufacturerFilter::All`], followed by
/// each distinct constructor in first-seen order.
#[must_use]
pub fn manufacturer_options(catalog: &[Aircraft]) -> Vec<ManufacturerFilter> {
    let mut options = vec![ManufacturerFilter::All];
    for aircraft in catalog {
        let option = ManufacturerFilter::from_label(aircraft.constructor());
        if !options.contains(&option) {
            options.push(option);
        }
    }
    options
}
