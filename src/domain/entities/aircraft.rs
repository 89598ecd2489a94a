//! Aircraft catalog entity.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Aircraft type as listed in the catalog.
///
/// Field names on the wire are fixed by the remote API (`ICAO`,
/// `constructor`, `range`, `maxCapacity`). Numbers keep the representation
/// the server sent, so `5765` and `5765.5` both decode and post back as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aircraft {
    #[serde(rename = "ICAO")]
    icao: String,
    constructor: String,
    range: Number,
    #[serde(rename = "maxCapacity")]
    max_capacity: Number,
}

impl Aircraft {
    /// Creates a new aircraft type.
    #[must_use]
    pub fn new(
        icao: impl Into<String>,
        constructor: impl Into<String>,
        range: impl Into<Number>,
        max_capacity: impl Into<Number>,
    ) -> Self {
        Self {
            icao: icao.into(),
            constructor: constructor.into(),
            range: range.into(),
            max_capacity: max_capacity.into(),
        }
    }

    /// Returns the ICAO type designator.
    #[must_use]
    pub fn icao(&self) -> &str {
        &self.icao
    }

    /// Returns the manufacturer name.
    #[must_use]
    pub fn constructor(&self) -> &str {
        &self.constructor
    }

    /// Returns the range in kilometres.
    #[must_use]
    pub const fn range(&self) -> &Number {
        &self.range
    }

    /// Returns the passenger capacity.
    #[must_use]
    pub const fn max_capacity(&self) -> &Number {
        &self.max_capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_api_field_names() {
        let aircraft = Aircraft::new("A320", "Airbus", 6000, 180);
        let value = serde_json::to_value(&aircraft).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "ICAO": "A320",
                "constructor": "Airbus",
                "maxCapacity": 180,
                "range": 6000
            })
        );
    }

    #[test]
    fn test_deserializes_catalog_payload() {
        let payload = r#"[
            {"ICAO": "B738", "constructor": "Boeing", "range": 5765, "maxCapacity": 189},
            {"ICAO": "A20N", "constructor": "Airbus", "range": 6300, "maxCapacity": 194}
        ]"#;

        let catalog: Vec<Aircraft> = serde_json::from_str(payload).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].icao(), "B738");
        assert_eq!(catalog[1].constructor(), "Airbus");
        assert_eq!(catalog[1].max_capacity().as_u64(), Some(194));
    }

    #[test]
    fn test_fractional_range_does_not_drop_listing() {
        let payload = r#"[
            {"ICAO": "B738", "constructor": "Boeing", "range": 5765.5, "maxCapacity": 189},
            {"ICAO": "A20N", "constructor": "Airbus", "range": 6300, "maxCapacity": 194}
        ]"#;

        let catalog: Vec<Aircraft> = serde_json::from_str(payload).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].range().as_f64(), Some(5765.5));
        assert_eq!(catalog[0].range().to_string(), "5765.5");
        assert_eq!(catalog[1].range().to_string(), "6300");
        assert_eq!(
            serde_json::to_value(&catalog[0]).unwrap()["range"],
            serde_json::json!(5765.5)
        );
    }
}
