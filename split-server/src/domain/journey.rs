//! Journey types.
//!
//! A `Journey` is an itinerary as returned by the journey search provider:
//! an ordered list of legs plus an optional price for the whole trip.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::Station;

/// A price quoted by the provider.
///
/// A missing `Price` means the fare is unknown, never that it is free.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Price {
    /// Amount in the provider's currency unit (e.g. euros, not cents).
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Free-text qualifier such as "subject to availability".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Price {
    /// A price with no currency or hint attached.
    pub fn new(amount: f64) -> Self {
        Self {
            amount,
            currency: None,
            hint: None,
        }
    }
}

/// Operator of a line (e.g. "DB Fernverkehr AG", "FlixTrain").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operator {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

/// The line a transport leg runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// Display name, e.g. "ICE 597" or "RE 5".
    pub name: String,
    /// Product category, e.g. "nationalExpress", "regional", "suburban".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    /// Short product name, e.g. "ICE", "RE", "FLX".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
}

impl Line {
    /// Product category, falling back to the short product name.
    pub fn product_or_name(&self) -> Option<&str> {
        self.product.as_deref().or(self.product_name.as_deref())
    }
}

#[cfg(test)]
impl Line {
    /// A line with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            product: None,
            product_name: None,
            operator: None,
        }
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }
}

/// A station visited within a leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stopover {
    #[serde(rename = "stop")]
    pub station: Option<Station>,
    pub arrival: Option<DateTime<FixedOffset>>,
    pub departure: Option<DateTime<FixedOffset>>,
    /// Provider load-factor hint, e.g. "low-to-medium".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_factor: Option<String>,
}

/// One movement within a journey: a scheduled transport or a walk.
///
/// Endpoints are optional because the provider occasionally omits them.
/// Departure and arrival instants are always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub origin: Option<Station>,
    pub destination: Option<Station>,
    pub departure: DateTime<FixedOffset>,
    pub arrival: DateTime<FixedOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    pub walking: bool,
    pub stopovers: Vec<Stopover>,
}

impl Leg {
    /// Returns true for scheduled transport (anything that is not a walk).
    pub fn is_transport(&self) -> bool {
        !self.walking
    }
}

/// A complete itinerary as delivered by the provider.
///
/// Immutable once constructed. A journey with no legs can exist (providers
/// do return them) but is never matched or analysed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Journey {
    legs: Vec<Leg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<Price>,
}

impl Journey {
    /// Constructs a journey.
    pub fn new(legs: Vec<Leg>, price: Option<Price>) -> Self {
        Self { legs, price }
    }

    /// Returns the legs in travel order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Returns the price, if the provider quoted one.
    pub fn price(&self) -> Option<&Price> {
        self.price.as_ref()
    }

    /// Returns the price amount, if known.
    pub fn price_amount(&self) -> Option<f64> {
        self.price.as_ref().map(|p| p.amount)
    }

    /// Returns the first leg.
    pub fn first_leg(&self) -> Option<&Leg> {
        self.legs.first()
    }

    /// Returns the last leg.
    pub fn last_leg(&self) -> Option<&Leg> {
        self.legs.last()
    }

    /// Departure instant of the first leg.
    pub fn departure(&self) -> Option<DateTime<FixedOffset>> {
        self.first_leg().map(|leg| leg.departure)
    }

    /// Iterates over non-walking legs.
    pub fn transport_legs(&self) -> impl Iterator<Item = &Leg> {
        self.legs.iter().filter(|leg| leg.is_transport())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn station(id: &str) -> Station {
        Station::new(StationId::parse(id).unwrap(), None)
    }

    fn leg(walking: bool) -> Leg {
        Leg {
            origin: Some(station("1")),
            destination: Some(station("2")),
            departure: at("2025-07-20T10:00:00+02:00"),
            arrival: at("2025-07-20T10:45:00+02:00"),
            line: (!walking).then(|| Line::named("RE 1").with_product("regionalExpress")),
            walking,
            stopovers: Vec::new(),
        }
    }

    #[test]
    fn accessors() {
        let journey = Journey::new(vec![leg(false), leg(true)], Some(Price::new(19.9)));

        assert_eq!(journey.legs().len(), 2);
        assert_eq!(journey.price_amount(), Some(19.9));
        assert_eq!(journey.departure(), Some(at("2025-07-20T10:00:00+02:00")));
        assert_eq!(journey.transport_legs().count(), 1);
    }

    #[test]
    fn empty_journey_has_no_departure() {
        let journey = Journey::new(Vec::new(), None);
        assert!(journey.departure().is_none());
        assert!(journey.first_leg().is_none());
        assert!(journey.price().is_none());
    }

    #[test]
    fn product_falls_back_to_product_name() {
        let mut line = Line::named("FLX 10");
        line.product_name = Some("FLX".into());
        assert_eq!(line.product_or_name(), Some("FLX"));

        let line = line.with_product("regional");
        assert_eq!(line.product_or_name(), Some("regional"));
    }

    #[test]
    fn serializes_in_provider_shape() {
        let journey = Journey::new(vec![leg(false)], Some(Price::new(29.9)));
        let json = serde_json::to_value(&journey).unwrap();

        assert_eq!(json["price"]["amount"], 29.9);
        assert_eq!(json["legs"][0]["line"]["product"], "regionalExpress");
        assert_eq!(json["legs"][0]["walking"], false);
        assert_eq!(json["legs"][0]["origin"]["id"], "1");
    }
}
