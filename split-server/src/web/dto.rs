//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{RiderConfiguration, TravelClass};
use crate::split::{ProgressEvent, SplitResult};
use crate::vendo::VendoJourney;

/// A form value that clients send either as a number or as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    /// Small non-negative integer value, if there is one.
    ///
    /// `"25"` and `25` both give 25; `"none"`, `""` and `2.5` give `None`.
    pub fn as_u8(&self) -> Option<u8> {
        match self {
            NumberOrString::Number(n) => {
                (n.fract() == 0.0 && (0.0..=255.0).contains(n)).then_some(*n as u8)
            }
            NumberOrString::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Request to analyse a journey for split-ticket savings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitJourneyRequest {
    /// The priced journey, as returned by the journey search
    pub original_journey: VendoJourney,

    /// BahnCard percentage (25, 50 or 100); anything else means none
    #[serde(default)]
    pub bahn_card: Option<NumberOrString>,

    #[serde(default)]
    pub has_deutschland_ticket: bool,

    #[serde(default)]
    pub passenger_age: Option<u8>,

    /// 1 or 2; defaults to 2
    #[serde(default)]
    pub travel_class: Option<NumberOrString>,

    /// Respond with server-sent events instead of a single JSON body
    #[serde(default)]
    pub use_streaming: bool,
}

impl SplitJourneyRequest {
    /// The rider the fares should be computed for.
    pub fn rider(&self) -> RiderConfiguration {
        let class = self
            .travel_class
            .as_ref()
            .and_then(NumberOrString::as_u8)
            .map(TravelClass::from_number)
            .unwrap_or_default();

        let mut rider = RiderConfiguration::default()
            .with_travel_class(class)
            .with_flat_ticket(self.has_deutschland_ticket);

        if let Some(percent) = self.bahn_card.as_ref().and_then(NumberOrString::as_u8) {
            rider = rider.with_bahncard(percent);
        }
        if let Some(age) = self.passenger_age {
            rider = rider.with_age(age);
        }

        rider
    }
}

/// Non-streaming response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitJourneyResponse {
    pub success: bool,

    pub split_options: Vec<SplitResult>,

    pub original_price: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One server-sent event payload.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StreamMessage {
    #[serde(rename_all = "camelCase")]
    Progress {
        checked: usize,
        total: usize,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        current_station: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    Complete {
        success: bool,
        split_options: Vec<SplitResult>,
        original_price: f64,
    },

    Error { error: String },
}

impl From<ProgressEvent> for StreamMessage {
    fn from(event: ProgressEvent) -> Self {
        match event {
            ProgressEvent::Start { total } => StreamMessage::Progress {
                checked: 0,
                total,
                message: "Analysis started...".to_string(),
                current_station: None,
            },
            ProgressEvent::Processing {
                checked,
                total,
                current_station,
            } => StreamMessage::Progress {
                checked,
                total,
                message: format!("Checking {current_station}..."),
                current_station: Some(current_station),
            },
            ProgressEvent::PointDone { checked, total } => StreamMessage::Progress {
                checked,
                total,
                message: if checked == total {
                    "Analysis complete".to_string()
                } else {
                    format!("{checked}/{total} stations checked")
                },
                current_station: None,
            },
            ProgressEvent::Complete {
                results,
                original_price,
            } => StreamMessage::Complete {
                success: true,
                split_options: results,
                original_price,
            },
            ProgressEvent::Error { message } => StreamMessage::Error { error: message },
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
