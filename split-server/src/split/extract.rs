//! Split point extraction.
//!
//! Candidate split stations come straight from the stopovers the provider
//! already returned for the original journey, so extraction costs no
//! additional lookups.

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tracing::debug;

use crate::domain::{Journey, Line, Station, StationId};

/// Line summary attached to split points and results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainLine {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
}

impl From<&Line> for TrainLine {
    fn from(line: &Line) -> Self {
        Self {
            name: line.name.clone(),
            product: line.product_or_name().map(str::to_string),
        }
    }
}

/// An intermediate station where the journey could be re-ticketed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitPoint {
    pub station: Station,
    pub arrival: DateTime<FixedOffset>,
    pub departure: DateTime<FixedOffset>,
    /// Line of the leg the stopover was found on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_line: Option<TrainLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_factor: Option<String>,
    pub leg_index: usize,
    pub stop_index: usize,
}

/// Station ids that coincide with the journey's true endpoints.
fn endpoint_ids(journey: &Journey) -> HashSet<&StationId> {
    let mut ids = HashSet::new();

    if let Some(first) = journey.first_leg() {
        ids.extend(first.origin.as_ref().map(|s| &s.id));
        ids.extend(
            first
                .stopovers
                .first()
                .and_then(|s| s.station.as_ref())
                .map(|s| &s.id),
        );
    }

    if let Some(last) = journey.last_leg() {
        ids.extend(last.destination.as_ref().map(|s| &s.id));
        ids.extend(
            last.stopovers
                .last()
                .and_then(|s| s.station.as_ref())
                .map(|s| &s.id),
        );
    }

    ids
}

/// Extract candidate split points from a journey's stopovers.
///
/// Walks the stopovers of every transport leg in order. The first stopover
/// of the first leg and the last stopover of the last leg are skipped, as is
/// any stopover at the journey's origin or destination station. Stopovers
/// without a station, arrival or departure are skipped. The first occurrence
/// of each station wins.
///
/// The returned order (leg index, then stopover index) is the order in which
/// split points are analysed and reported.
pub fn extract_split_points(journey: &Journey) -> Vec<SplitPoint> {
    let legs = journey.legs();
    let endpoints = endpoint_ids(journey);
    let mut seen: HashSet<&StationId> = HashSet::new();
    let mut points = Vec::new();

    for (leg_index, leg) in legs.iter().enumerate() {
        if leg.walking {
            continue;
        }

        let last_stop = leg.stopovers.len().saturating_sub(1);

        for (stop_index, stopover) in leg.stopovers.iter().enumerate() {
            if leg_index == 0 && stop_index == 0 {
                continue;
            }
            if leg_index == legs.len() - 1 && stop_index == last_stop {
                continue;
            }

            let (Some(station), Some(arrival), Some(departure)) =
                (&stopover.station, stopover.arrival, stopover.departure)
            else {
                continue;
            };

            if endpoints.contains(&station.id) || !seen.insert(&station.id) {
                continue;
            }

            points.push(SplitPoint {
                station: station.clone(),
                arrival,
                departure,
                train_line: leg.line.as_ref().map(TrainLine::from),
                load_factor: stopover.load_factor.clone(),
                leg_index,
                stop_index,
            });
        }
    }

    debug!(count = points.len(), "extracted unique split candidates");

    points
}
