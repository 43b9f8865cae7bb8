//! Conversion from provider DTOs to domain types.
//!
//! This is where the loosely typed provider JSON is validated: station ids
//! are parsed, timestamps are parsed as RFC 3339 with their offset, and the
//! walking flag is resolved. Everything downstream works on typed journeys.

use chrono::{DateTime, FixedOffset};
use serde_json::Value;
use tracing::warn;

use crate::domain::{
    InvalidStationId, Journey, Leg, Line, Operator, Price, Station, StationId, Stopover,
};

use super::types::{
    JourneysResponse, VendoJourney, VendoLeg, VendoLine, VendoPrice, VendoStation, VendoStopover,
};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// A station reference had an unusable id
    #[error("invalid station: {0}")]
    InvalidStation(#[from] InvalidStationId),

    /// A timestamp was not RFC 3339
    #[error("invalid time: {0}")]
    InvalidTime(String),
}

fn parse_time(s: &str) -> Result<DateTime<FixedOffset>, ConversionError> {
    DateTime::parse_from_rfc3339(s).map_err(|_| ConversionError::InvalidTime(s.to_string()))
}

/// Stopover times are optional; null or absent means "no time".
fn parse_optional_time(value: &Value) -> Result<Option<DateTime<FixedOffset>>, ConversionError> {
    match value {
        Value::String(s) => parse_time(s).map(Some),
        _ => Ok(None),
    }
}

fn convert_station(station: &VendoStation) -> Result<Station, ConversionError> {
    Ok(Station::new(
        StationId::parse(&station.id)?,
        station.name.clone(),
    ))
}

fn convert_optional_station(
    station: Option<&VendoStation>,
) -> Result<Option<Station>, ConversionError> {
    station.map(convert_station).transpose()
}

fn convert_line(line: &VendoLine) -> Line {
    Line {
        name: line.name.clone(),
        product: line.product.clone(),
        product_name: line.product_name.clone(),
        operator: line.operator.as_ref().map(|op| Operator {
            id: op.id.clone(),
            name: op.name.clone(),
        }),
    }
}

fn convert_price(price: &VendoPrice) -> Price {
    Price {
        amount: price.amount,
        currency: price.currency.clone(),
        hint: price.hint.clone(),
    }
}

fn convert_stopover(stopover: &VendoStopover) -> Result<Stopover, ConversionError> {
    Ok(Stopover {
        station: convert_optional_station(stopover.stop.as_ref())?,
        arrival: parse_optional_time(&stopover.arrival)?,
        departure: parse_optional_time(&stopover.departure)?,
        load_factor: stopover.load_factor.as_str().map(str::to_string),
    })
}

fn is_walking(leg: &VendoLeg) -> bool {
    leg.walking == Value::Bool(true) || leg.mode.as_deref() == Some("walking")
}

fn convert_leg(leg: &VendoLeg) -> Result<Leg, ConversionError> {
    let stopovers = leg
        .stopovers
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(convert_stopover)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Leg {
        origin: convert_optional_station(leg.origin.as_ref())?,
        destination: convert_optional_station(leg.destination.as_ref())?,
        departure: parse_time(&leg.departure)?,
        arrival: parse_time(&leg.arrival)?,
        line: leg.line.as_ref().map(convert_line),
        walking: is_walking(leg),
        stopovers,
    })
}

/// Convert a single journey.
///
/// A journey without legs converts fine; whether it can be analysed is
/// decided by the analyzer.
pub fn convert_journey(journey: &VendoJourney) -> Result<Journey, ConversionError> {
    let legs = journey
        .legs
        .iter()
        .map(convert_leg)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Journey::new(legs, journey.price.as_ref().map(convert_price)))
}

/// Convert a search response, skipping journeys that fail validation.
pub fn convert_journeys(response: &JourneysResponse) -> Vec<Journey> {
    response
        .journeys
        .iter()
        .filter_map(|journey| match convert_journey(journey) {
            Ok(converted) => Some(converted),
            Err(e) => {
                warn!(error = %e, "skipping malformed journey");
                None
            }
        })
        .collect()
}
