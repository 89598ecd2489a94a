//! Company and fleet entities.

use serde::{Deserialize, Serialize};

/// Number of units of one aircraft type owned by a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetEntry {
    #[serde(rename = "aircraftICAO")]
    aircraft_icao: String,
    quantity: i64,
}

impl FleetEntry {
    /// Creates a fleet entry.
    #[must_use]
    pub fn new(aircraft_icao: impl Into<String>, quantity: i64) -> Self {
        Self {
            aircraft_icao: aircraft_icao.into(),
            quantity,
        }
    }

    /// Returns the referenced aircraft ICAO.
    #[must_use]
    pub fn aircraft_icao(&self) -> &str {
        &self.aircraft_icao
    }

    /// Returns the owned quantity as reported by the server.
    #[must_use]
    pub const fn quantity(&self) -> i64 {
        self.quantity
    }
}

/// Airline company with its fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "companyICAO")]
    company_icao: String,
    name: String,
    country: String,
    #[serde(default)]
    fleet: Vec<FleetEntry>,
}

impl Company {
    /// Creates a company with an empty fleet.
    #[must_use]
    pub fn new(
        company_icao: impl Into<String>,
        name: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            company_icao: company_icao.into(),
            name: name.into(),
            country: country.into(),
            fleet: Vec::new(),
        }
    }

    /// Sets the fleet.
    #[must_use]
    pub fn with_fleet(mut self, fleet: Vec<FleetEntry>) -> Self {
        self.fleet = fleet;
        self
    }

    /// Returns the company ICAO.
    #[must_use]
    pub fn company_icao(&self) -> &str {
        &self.company_icao
    }

    /// Returns the company name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the country of registration.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Returns the fleet entries in server order.
    #[must_use]
    pub fn fleet(&self) -> &[FleetEntry] {
        &self.fleet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_company_payload() {
        let payload = r#"{
            "companyICAO": "SWR",
            "name": "Swiss",
            "country": "Switzerland",
            "fleet": [
                {"aircraftICAO": "A320", "quantity": 12},
                {"aircraftICAO": "BCS3", "quantity": 0}
            ]
        }"#;

        let company: Company = serde_json::from_str(payload).unwrap();

        assert_eq!(company.company_icao(), "SWR");
        assert_eq!(company.country(), "Switzerland");
        assert_eq!(company.fleet().len(), 2);
        assert_eq!(company.fleet()[0], FleetEntry::new("A320", 12));
    }

    #[test]
    fn test_negative_quantity_is_kept() {
        let entry: FleetEntry =
            serde_json::from_str(r#"{"aircraftICAO": "A320", "quantity": -1}"#).unwrap();

        assert_eq!(entry.quantity(), -1);
    }

    #[test]
    fn test_missing_fleet_defaults_to_empty() {
        let company: Company =
            serde_json::from_str(r#"{"companyICAO": "EZY", "name": "easyJet", "country": "UK"}"#)
                .unwrap();

        assert!(company.fleet().is_empty());
    }
}
