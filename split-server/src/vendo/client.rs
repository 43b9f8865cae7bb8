//! Journey search HTTP client.
//!
//! Queries the `/journeys` endpoint of a db-vendo style REST API for one
//! segment at a time and converts the answer to domain journeys.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Journey, RiderConfiguration, TravelClass};
use crate::split::{JourneySearchProvider, ProviderError, SegmentQuery};

use super::convert::convert_journeys;
use super::error::VendoError;
use super::types::JourneysResponse;

/// Default base URL for the journey search API.
const DEFAULT_BASE_URL: &str = "https://v6.db.transport.rest";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Configuration for the journey search client.
#[derive(Debug, Clone)]
pub struct VendoConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Journeys requested per search
    pub results: u8,
    /// Maximum number of transfers per journey
    pub transfers: u8,
}

impl Default for VendoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
            results: 1,
            transfers: 3,
        }
    }
}

impl VendoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_results(mut self, results: u8) -> Self {
        self.results = results;
        self
    }

    pub fn with_transfers(mut self, transfers: u8) -> Self {
        self.transfers = transfers;
        self
    }
}

/// The `loyaltyCard` parameter, e.g. `bahncard-2nd-50`.
fn loyalty_card_param(rider: &RiderConfiguration) -> Option<String> {
    rider.loyalty_card.map(|card| {
        let class = match card.class {
            TravelClass::First => "1st",
            TravelClass::Second => "2nd",
        };
        format!("bahncard-{class}-{}", card.discount.percent())
    })
}

/// Journey search API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct VendoClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
    results: u8,
    transfers: u8,
}

impl VendoClient {
    /// Create a new client with the given configuration.
    pub fn new(config: VendoConfig) -> Result<Self, VendoError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
            results: config.results,
            transfers: config.transfers,
        })
    }

    fn query_params(&self, query: &SegmentQuery) -> Vec<(&'static str, String)> {
        let rider = &query.rider;

        let mut params = vec![
            ("from", query.from.as_str().to_string()),
            ("to", query.to.as_str().to_string()),
            ("departure", query.departure.to_rfc3339()),
            ("results", self.results.to_string()),
            ("stopovers", "true".to_string()),
            (
                "firstClass",
                (rider.travel_class == TravelClass::First).to_string(),
            ),
            ("notOnlyFastRoutes", "true".to_string()),
            ("remarks", "true".to_string()),
            ("transfers", self.transfers.to_string()),
        ];

        if let Some(age) = rider.age {
            params.push(("age", age.to_string()));
        }
        if let Some(card) = loyalty_card_param(rider) {
            params.push(("loyaltyCard", card));
        }
        if rider.has_flat_ticket {
            params.push(("deutschlandTicketDiscount", "true".to_string()));
        }

        params
    }

    /// Search journeys for one segment.
    ///
    /// Journeys that fail validation are skipped; a body that is not a
    /// journeys response at all is a `Json` error.
    pub async fn journeys(&self, query: &SegmentQuery) -> Result<Vec<Journey>, VendoError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| VendoError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/journeys", self.base_url);

        debug!(from = %query.from, to = %query.to, departure = %query.departure, "searching journeys");

        let response = self
            .http
            .get(&url)
            .query(&self.query_params(query))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(VendoError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VendoError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: JourneysResponse =
            serde_json::from_str(&body).map_err(|e| VendoError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        let journeys = convert_journeys(&parsed);
        debug!(count = journeys.len(), "journey search returned");

        Ok(journeys)
    }
}

impl JourneySearchProvider for VendoClient {
    async fn search(&self, query: &SegmentQuery) -> Result<Vec<Journey>, ProviderError> {
        Ok(self.journeys(query).await?)
    }
}
