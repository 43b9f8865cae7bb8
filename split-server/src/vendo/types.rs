//! Journey search API DTOs.
//!
//! These mirror the JSON shape of the `/journeys` endpoint. Fields the API
//! is loose about (stopover times, load factor, walking) are kept as raw
//! `serde_json::Value` and interpreted during conversion.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response from `GET /journeys`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneysResponse {
    #[serde(default)]
    pub journeys: Vec<VendoJourney>,
}

/// A journey as returned by the provider.
///
/// Also accepted as the `originalJourney` of an incoming request, so it
/// serializes back to the same shape.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendoJourney {
    pub legs: Vec<VendoLeg>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<VendoPrice>,
}

/// A station, stop or location reference.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VendoStation {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VendoPrice {
    pub amount: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VendoOperator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendoLine {
    /// Display name, e.g. "ICE 597" or "FLX 10"
    pub name: String,

    /// Product id, e.g. "nationalExpress", "regional"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,

    /// Product label, e.g. "ICE", "RE"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<VendoOperator>,
}

/// An intermediate stop on a leg.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendoStopover {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<VendoStation>,

    /// Usually an RFC 3339 string, sometimes null
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub arrival: Value,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub departure: Value,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub load_factor: Value,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendoLeg {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<VendoStation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<VendoStation>,

    /// RFC 3339, always present on transport legs
    pub departure: String,

    pub arrival: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<VendoLine>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// `true` for walking transfers; other values are ignored
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub walking: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopovers: Option<Vec<VendoStopover>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_journey() {
        let json = r#"{
            "legs": [{
                "origin": {"id": "8000105", "name": "Frankfurt(Main)Hbf"},
                "destination": {"id": "8000261"},
                "departure": "2025-07-20T10:00:00+02:00",
                "arrival": "2025-07-20T13:30:00+02:00"
            }]
        }"#;

        let journey: VendoJourney = serde_json::from_str(json).unwrap();
        assert_eq!(journey.legs.len(), 1);
        assert!(journey.price.is_none());
        assert_eq!(journey.legs[0].destination.as_ref().unwrap().id, "8000261");
        assert!(journey.legs[0].walking.is_null());
        assert!(journey.legs[0].stopovers.is_none());
    }

    #[test]
    fn parses_loose_stopover_fields() {
        let json = r#"{
            "stop": {"id": "8000244", "name": "Mannheim Hbf"},
            "arrival": null,
            "departure": "2025-07-20T10:40:00+02:00",
            "loadFactor": "low-to-medium"
        }"#;

        let stopover: VendoStopover = serde_json::from_str(json).unwrap();
        assert!(stopover.arrival.is_null());
        assert_eq!(stopover.departure.as_str(), Some("2025-07-20T10:40:00+02:00"));
        assert_eq!(stopover.load_factor.as_str(), Some("low-to-medium"));
    }

    #[test]
    fn missing_journeys_defaults_to_empty() {
        let response: JourneysResponse = serde_json::from_str("{}").unwrap();
        assert!(response.journeys.is_empty());
    }

    #[test]
    fn leg_without_departure_is_rejected() {
        let json = r#"{"legs": [{"arrival": "2025-07-20T13:30:00+02:00"}]}"#;
        assert!(serde_json::from_str::<VendoJourney>(json).is_err());
    }
}
