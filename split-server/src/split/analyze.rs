//! Split-ticket analysis driver.
//!
//! For every candidate split point, looks up both segments concurrently,
//! matches the exact trains, prices the split and keeps it if it saves money.
//! Progress is reported as an ordered stream of events that always ends in
//! exactly one `Complete` or `Error`, unless the consumer goes away first.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use futures::future::join_all;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn};

use crate::domain::{Journey, RiderConfiguration, StationId, ValidationError};

use super::config::AnalysisConfig;
use super::extract::{SplitPoint, extract_split_points};
use super::matcher::find_matching_journey;
use super::pricing::{SplitResult, aggregate};
use super::provider::{JourneySearchProvider, ProviderError, SegmentQuery};

/// Events buffered between the analysis task and a slow consumer.
const EVENT_BUFFER: usize = 16;

/// One step of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ProgressEvent {
    /// Split points were extracted; `total` of them will be checked.
    Start { total: usize },

    /// Split point number `checked` (zero-based) is about to be evaluated.
    #[serde(rename_all = "camelCase")]
    Processing {
        checked: usize,
        total: usize,
        current_station: String,
    },

    /// Another split point has been evaluated; `checked` points are done.
    PointDone { checked: usize, total: usize },

    /// Terminal: accepted splits, best savings first.
    #[serde(rename_all = "camelCase")]
    Complete {
        results: Vec<SplitResult>,
        original_price: f64,
    },

    /// Terminal: the run could not be started.
    Error { message: String },
}

/// The consumer dropped the progress stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("progress stream cancelled by consumer")]
pub struct StreamCancelled;

/// Where the journey starts and ends, resolved once per run.
#[derive(Debug, Clone)]
struct Endpoints {
    origin: StationId,
    destination: StationId,
    departure: DateTime<FixedOffset>,
}

impl Endpoints {
    fn of(journey: &Journey) -> Result<Self, ValidationError> {
        let first = journey.first_leg().ok_or(ValidationError::EmptyJourney)?;
        let last = journey.last_leg().ok_or(ValidationError::EmptyJourney)?;

        let origin = first
            .origin
            .as_ref()
            .ok_or(ValidationError::MissingOrigin)?;
        let destination = last
            .destination
            .as_ref()
            .ok_or(ValidationError::MissingDestination)?;

        Ok(Self {
            origin: origin.id.clone(),
            destination: destination.id.clone(),
            departure: first.departure,
        })
    }
}

async fn emit(
    events: &mpsc::Sender<ProgressEvent>,
    event: ProgressEvent,
) -> Result<(), StreamCancelled> {
    events.send(event).await.map_err(|_| StreamCancelled)
}

/// Split-ticket analyzer.
///
/// Holds the injected provider and an immutable configuration. Runs share
/// nothing with each other.
pub struct SplitAnalyzer<P> {
    provider: Arc<P>,
    config: AnalysisConfig,
}

impl<P> Clone for SplitAnalyzer<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            config: self.config.clone(),
        }
    }
}

impl<P: JourneySearchProvider + 'static> SplitAnalyzer<P> {
    /// Create a new analyzer.
    pub fn new(provider: Arc<P>, config: AnalysisConfig) -> Self {
        Self { provider, config }
    }

    /// Start an analysis run in the background and stream its progress.
    ///
    /// Dropping the returned stream cancels the run: no further lookups are
    /// issued, in-flight ones are dropped and no `Complete` is sent.
    pub fn analyze(
        &self,
        journey: Journey,
        rider: RiderConfiguration,
    ) -> ReceiverStream<ProgressEvent> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let analyzer = self.clone();

        tokio::spawn(async move {
            if let Err(e) = analyzer.run(&journey, &rider, &tx).await {
                debug!(error = %e, "split analysis stopped early");
            }
        });

        ReceiverStream::new(rx)
    }

    /// Run an analysis to completion, sending progress into `events`.
    ///
    /// Returns `Err(StreamCancelled)` if the receiving side was dropped.
    pub async fn run(
        &self,
        journey: &Journey,
        rider: &RiderConfiguration,
        events: &mpsc::Sender<ProgressEvent>,
    ) -> Result<(), StreamCancelled> {
        let endpoints = match Endpoints::of(journey) {
            Ok(endpoints) => endpoints,
            Err(e) => {
                warn!(error = %e, "rejecting journey for split analysis");
                return emit(
                    events,
                    ProgressEvent::Error {
                        message: e.to_string(),
                    },
                )
                .await;
            }
        };

        let original_price = journey.price_amount().unwrap_or(0.0);
        let points = extract_split_points(journey);
        let total = points.len();

        info!(
            total,
            original_price,
            origin = %endpoints.origin,
            destination = %endpoints.destination,
            "starting split analysis"
        );

        emit(events, ProgressEvent::Start { total }).await?;

        let mut results = Vec::new();
        let mut checked = 0;

        for batch in points.chunks(self.config.effective_batch_size()) {
            for (offset, point) in batch.iter().enumerate() {
                emit(
                    events,
                    ProgressEvent::Processing {
                        checked: checked + offset,
                        total,
                        current_station: point.station.display_name().to_string(),
                    },
                )
                .await?;
            }

            let evaluations = join_all(
                batch
                    .iter()
                    .map(|point| self.evaluate(&endpoints, point, original_price, rider)),
            );

            let outcomes = tokio::select! {
                _ = events.closed() => return Err(StreamCancelled),
                outcomes = evaluations => outcomes,
            };

            for outcome in outcomes {
                results.extend(outcome);
                checked += 1;
                emit(events, ProgressEvent::PointDone { checked, total }).await?;
            }

            if checked < total {
                tokio::select! {
                    _ = events.closed() => return Err(StreamCancelled),
                    _ = tokio::time::sleep(self.config.pacing_delay()) => {}
                }
            }
        }

        results.sort_by(|a, b| b.savings.total_cmp(&a.savings));

        info!(found = results.len(), total, "split analysis complete");

        emit(
            events,
            ProgressEvent::Complete {
                results,
                original_price,
            },
        )
        .await
    }

    /// Evaluate one split point. Every failure is absorbed here.
    async fn evaluate(
        &self,
        endpoints: &Endpoints,
        point: &SplitPoint,
        original_price: f64,
        rider: &RiderConfiguration,
    ) -> Option<SplitResult> {
        let station = point.station.display_name();

        let first_query = SegmentQuery::new(
            endpoints.origin.clone(),
            point.station.id.clone(),
            endpoints.departure,
            rider.clone(),
        );
        let second_query = SegmentQuery::new(
            point.station.id.clone(),
            endpoints.destination.clone(),
            point.departure,
            rider.clone(),
        );

        let (first, second) = tokio::join!(self.lookup(&first_query), self.lookup(&second_query));

        let (first, second) = match (first, second) {
            (Ok(Some(first)), Ok(Some(second))) => (first, second),
            (Err(e), _) | (_, Err(e)) => {
                warn!(station, error = %e, "segment lookup failed");
                return None;
            }
            _ => {
                debug!(station, "no matching train for a segment");
                return None;
            }
        };

        match aggregate(point, first, second, original_price, rider) {
            Ok(result) => {
                info!(
                    station,
                    total = result.adjusted_total_price,
                    savings = result.savings,
                    "found cheaper split"
                );
                Some(result)
            }
            Err(rejection) => {
                debug!(station, %rejection, "split rejected");
                None
            }
        }
    }

    /// Search one segment and pick the journey on the requested train.
    async fn lookup(&self, query: &SegmentQuery) -> Result<Option<Journey>, ProviderError> {
        let timeout = self.config.lookup_timeout();

        let candidates = tokio::time::timeout(timeout, self.provider.search(query))
            .await
            .map_err(|_| ProviderError::Timeout(timeout))??;

        Ok(find_matching_journey(&candidates, query.departure).cloned())
    }
}

#[cfg(test)]
#[path = "analyze_tests.rs"]
mod tests;
