//! Fleet API port: catalog, company and fleet operations.

use async_trait::async_trait;

use crate::domain::entities::{Aircraft, Company, ManufacturerFilter};
use crate::domain::errors::ApiError;

/// Catalog listing request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogQuery {
    /// Complete catalog sorted by ICAO then constructor.
    Sorted,
    /// Catalog restricted to one manufacturer.
    Manufacturer(String),
}

impl CatalogQuery {
    /// Maps the active filter to the listing that serves it.
    #[must_use]
    pub fn for_filter(filter: &ManufacturerFilter) -> Self {
        match filter {
            ManufacturerFilter::All => Self::Sorted,
            ManufacturerFilter::Only(name) => Self::Manufacturer(name.clone()),
        }
    }

    /// Returns the filter whose rows the listing yields.
    #[must_use]
    pub fn filter(&self) -> ManufacturerFilter {
        match self {
            Self::Sorted => ManufacturerFilter::All,
            Self::Manufacturer(name) => ManufacturerFilter::Only(name.clone()),
        }
    }

    /// Returns whether the listing covers the whole catalog.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        matches!(self, Self::Sorted)
    }
}

/// Status codes an operation treats as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptedStatus {
    /// Any 2xx status.
    AnySuccess,
    /// Only the given status.
    Exactly(u16),
}

impl AcceptedStatus {
    /// Returns whether `status` counts as success.
    #[must_use]
    pub const fn accepts(self, status: u16) -> bool {
        match self {
            Self::AnySuccess => status >= 200 && status < 300,
            Self::Exactly(expected) => status == expected,
        }
    }
}

/// Kind of state-changing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// New catalog aircraft.
    Create,
    /// Catalog aircraft removal.
    Delete,
    /// One unit bought for a company.
    Buy,
    /// One unit sold by a company.
    Sell,
}

impl MutationKind {
    /// Returns the status codes the API answers with on success.
    #[must_use]
    pub const fn accepted_status(self) -> AcceptedStatus {
        match self {
            Self::Create | Self::Delete => AcceptedStatus::AnySuccess,
            Self::Buy | Self::Sell => AcceptedStatus::Exactly(202),
        }
    }
}

impl std::fmt::Display for MutationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Delete => write!(f, "delete"),
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// State-changing request with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Post a new aircraft type.
    Create(Aircraft),
    /// Delete an aircraft type by ICAO.
    Delete {
        /// Aircraft ICAO.
        icao: String,
    },
    /// Buy one unit of an aircraft for a company.
    Buy {
        /// Company ICAO.
        company_icao: String,
        /// Aircraft ICAO.
        aircraft_icao: String,
    },
    /// Sell one unit of an aircraft from a company.
    Sell {
        /// Company ICAO.
        company_icao: String,
        /// Aircraft ICAO.
        aircraft_icao: String,
    },
}

impl Mutation {
    /// Returns the mutation kind.
    #[must_use]
    pub const fn kind(&self) -> MutationKind {
        match self {
            Self::Create(_) => MutationKind::Create,
            Self::Delete { .. } => MutationKind::Delete,
            Self::Buy { .. } => MutationKind::Buy,
            Self::Sell { .. } => MutationKind::Sell,
        }
    }
}

/// Response to a mutation, judged against the operation's accepted status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiOutcome {
    /// HTTP status code.
    pub status: u16,
    /// Canonical reason phrase for the status.
    pub reason: String,
    /// Response body text.
    pub body: String,
    /// Whether the status matched the operation's accepted status.
    pub accepted: bool,
}

impl ApiOutcome {
    /// Creates an outcome, deciding success from `expected`.
    #[must_use]
    pub fn new(
        status: u16,
        reason: impl Into<String>,
        body: impl Into<String>,
        expected: AcceptedStatus,
    ) -> Self {
        Self {
            status,
            reason: reason.into(),
            body: body.into(),
            accepted: expected.accepts(status),
        }
    }

    /// Returns `"{status} : {reason}"`.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!("{} : {}", self.status, self.reason)
    }
}

/// Port for the remote fleet API.
#[async_trait]
pub trait FleetApiPort: Send + Sync {
    /// Lists catalog aircraft.
    async fn list_aircraft(&self, query: CatalogQuery) -> Result<Vec<Aircraft>, ApiError>;

    /// Lists companies sorted by name.
    async fn list_companies(&self) -> Result<Vec<Company>, ApiError>;

    /// Posts a new aircraft type.
    async fn create_aircraft(&self, aircraft: &Aircraft) -> Result<ApiOutcome, ApiError>;

    /// Deletes an aircraft type.
    async fn delete_aircraft(&self, icao: &str) -> Result<ApiOutcome, ApiError>;

    /// Buys one unit of `aircraft_icao` for `company_icao`.
    async fn buy(&self, company_icao: &str, aircraft_icao: &str)
    -> Result<ApiOutcome, ApiError>;

    /// Sells one unit of `aircraft_icao` from `company_icao`.
    async fn sell(
        &self,
        company_icao: &str,
        aircraft_icao: &str,
    ) -> Result<ApiOutcome, ApiError>;
}
