//! Fleet API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::entities::{Aircraft, Company};
use crate::domain::errors::ApiError;
use crate::domain::ports::{ApiOutcome, CatalogQuery, FleetApiPort, MutationKind};

/// Default API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.dai.swisspotter.ch";

const AIRCRAFT_PATH: &str = "avions";
const COMPANY_PATH: &str = "company";
const USER_AGENT: &str = concat!("hangar/", env!("CARGO_PKG_VERSION"));

/// reqwest adapter for [`FleetApiPort`].
pub struct FleetApiClient {
    client: Client,
    base_url: Url,
}

impl FleetApiClient {
    /// Creates client for a custom origin with an optional request timeout.
    ///
    /// # Errors
    /// Returns error if the URL is invalid or HTTP client creation fails.
    pub fn with_base_url(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::client(format!("invalid base URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::client(format!("{base_url} cannot be a base URL")));
        }

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::client(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client.request(method, self.url(segments))
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        request.send().await.map_err(|e| {
            warn!(error = %e, "Failed to reach fleet API");
            if e.is_timeout() {
                ApiError::network("request timed out")
            } else if e.is_connect() {
                ApiError::network("failed to connect to fleet API")
            } else {
                ApiError::network(e.to_string())
            }
        })
    }

    async fn fetch_list<T: DeserializeOwned>(request: RequestBuilder) -> Result<Vec<T>, ApiError> {
        let response = Self::send(request).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::status(status.as_u16(), body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(format!("failed to read response: {e}")))?;

        serde_json::from_str::<Vec<T>>(&body).map_err(|e| {
            warn!(error = %e, bytes = body.len(), "Failed to parse listing");
            ApiError::decode(e.to_string())
        })
    }

    async fn mutate(request: RequestBuilder, kind: MutationKind) -> Result<ApiOutcome, ApiError> {
        let response = Self::send(request).await?;
        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let body = response.text().await.unwrap_or_default();

        let outcome = ApiOutcome::new(status.as_u16(), reason, body, kind.accepted_status());
        debug!(
            kind = %kind,
            status = outcome.status,
            accepted = outcome.accepted,
            "Mutation answered"
        );
        Ok(outcome)
    }
}

#[async_trait]
impl FleetApiPort for FleetApiClient {
    async fn list_aircraft(&self, query: CatalogQuery) -> Result<Vec<Aircraft>, ApiError> {
        let request = self.request(Method::GET, &[AIRCRAFT_PATH]);
        let request = match &query {
            CatalogQuery::Sorted => request.query(&[("sort", "icao"), ("sort", "constructor")]),
            CatalogQuery::Manufacturer(name) => request.query(&[("constructor", name.as_str())]),
        };

        debug!(?query, "Listing aircraft");
        Self::fetch_list(request).await
    }

    async fn list_companies(&self) -> Result<Vec<Company>, ApiError> {
        let request = self
            .request(Method::GET, &[COMPANY_PATH])
            .query(&[("sort", "name")]);

        debug!("Listing companies");
        Self::fetch_list(request).await
    }

    async fn create_aircraft(&self, aircraft: &Aircraft) -> Result<ApiOutcome, ApiError> {
        let request = self
            .request(Method::POST, &[AIRCRAFT_PATH])
            .header(header::CONTENT_TYPE, "application/json")
            .json(aircraft);

        debug!(icao = %aircraft.icao(), "Posting aircraft");
        Self::mutate(request, MutationKind::Create).await
    }

    async fn delete_aircraft(&self, icao: &str) -> Result<ApiOutcome, ApiError> {
        let request = self
            .request(Method::DELETE, &[AIRCRAFT_PATH])
            .query(&[("icao", icao)]);

        debug!(icao, "Deleting aircraft");
        Self::mutate(request, MutationKind::Delete).await
    }

    async fn buy(&self, company_icao: &str, aircraft_icao: &str) -> Result<ApiOutcome, ApiError> {
        let request = self
            .request(Method::PUT, &[COMPANY_PATH, company_icao, "buy"])
            .header(header::CONTENT_TYPE, "application/json")
            .query(&[("aircraftICAO", aircraft_icao)]);

        debug!(company_icao, aircraft_icao, "Buying aircraft");
        Self::mutate(request, MutationKind::Buy).await
    }

    async fn sell(&self, company_icao: &str, aircraft_icao: &str) -> Result<ApiOutcome, ApiError> {
        let request = self
            .request(Method::PUT, &[COMPANY_PATH, company_icao, "sell"])
            .header(header::CONTENT_TYPE, "application/json")
            .query(&[("aircraftICAO", aircraft_icao)]);

        debug!(company_icao, aircraft_icao, "Selling aircraft");
        Self::mutate(request, MutationKind::Sell).await
    }
}
