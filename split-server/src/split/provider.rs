//! The journey search capability the analysis consumes.

use std::future::Future;

use chrono::{DateTime, FixedOffset};

use crate::domain::{Journey, RiderConfiguration, StationId};

/// A failed segment lookup.
///
/// These never abort an analysis run; the split point is simply skipped.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// Network-level failure (connection refused, TLS, ...)
    #[error("network error: {0}")]
    Http(String),

    /// Provider answered with a non-success status
    #[error("provider error {status}: {message}")]
    Api { status: u16, message: String },

    /// Provider asked us to slow down
    #[error("rate limited by provider")]
    RateLimited,

    /// Response did not match the expected journey schema
    #[error("unexpected response schema: {0}")]
    Schema(String),

    /// Lookup exceeded the per-call timeout
    #[error("lookup timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// One segment lookup: journeys from `from` to `to` around `departure`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentQuery {
    pub from: StationId,
    pub to: StationId,
    pub departure: DateTime<FixedOffset>,
    pub rider: RiderConfiguration,
}

impl SegmentQuery {
    /// Create a new segment query.
    pub fn new(
        from: StationId,
        to: StationId,
        departure: DateTime<FixedOffset>,
        rider: RiderConfiguration,
    ) -> Self {
        Self {
            from,
            to,
            departure,
            rider,
        }
    }
}

/// Trait for searching journeys between two stations.
///
/// The provider performs a fuzzy schedule search: results may depart at
/// nearby times or take other routes, in no particular order. Matching the
/// exact train is the caller's job.
///
/// This abstraction allows the analyzer to be tested with mock data.
pub trait JourneySearchProvider: Send + Sync {
    fn search(
        &self,
        query: &SegmentQuery,
    ) -> impl Future<Output = Result<Vec<Journey>, ProviderError>> + Send;
}
