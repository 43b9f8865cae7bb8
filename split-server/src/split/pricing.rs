//! Pricing of a split and the savings rule.
//!
//! Two segment prices are combined into a total, taking into account legs
//! that the rider's flat-rate ticket already pays for and segments the
//! provider could not price. A split is only reported when the resulting
//! total is known and strictly below the original price.

use serde::Serialize;

use crate::domain::{Journey, Leg, RiderConfiguration, Station};

use super::extract::{SplitPoint, TrainLine};

/// Products accepted by the flat-rate ticket (local and regional transport).
const FLAT_TICKET_PRODUCTS: &[&str] = &[
    "regionalexpress",
    "regional",
    "suburban",
    "bus",
    "ferry",
    "subway",
    "tram",
];

/// Products labelled as regional trains.
const REGIONAL_PRODUCTS: &[&str] = &[
    "regional",
    "regionalbahn",
    "regionalexpress",
    "sbahn",
    "suburban",
];

/// Why a split was not accepted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    /// Neither segment carries a usable price
    #[error("no usable segment price")]
    NoUsablePrice,

    /// Split costs as much as or more than the original ticket
    #[error("split total {total:.2} is not below original {original:.2}")]
    NotCheaper { total: f64, original: f64 },
}

/// Line and product of the train the split was found on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainInfo {
    pub line: String,
    pub product: String,
}

impl From<Option<&TrainLine>> for TrainInfo {
    fn from(line: Option<&TrainLine>) -> Self {
        Self {
            line: line.map_or_else(|| "Unknown".to_string(), |l| l.name.clone()),
            product: line
                .and_then(|l| l.product.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// An accepted split: two separately ticketed segments on the same trains.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitResult {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub split_stations: Vec<Station>,
    pub segments: [Journey; 2],
    /// Sum of both segment prices; unknown unless both are priced.
    pub total_price: Option<f64>,
    /// Total after flat-ticket coverage and partial pricing.
    pub adjusted_total_price: f64,
    pub original_price: f64,
    pub savings: f64,
    /// Savings relative to the original price, one decimal digit.
    pub savings_percentage: String,
    pub train_info: TrainInfo,
    pub is_fully_covered: bool,
    pub has_regional_trains: bool,
    pub has_unpriceable_products: bool,
    pub cannot_show_price: bool,
    pub has_partial_pricing: bool,
    pub segments_without_pricing: Vec<usize>,
}

fn product_of(leg: &Leg) -> Option<String> {
    leg.line
        .as_ref()
        .and_then(|line| line.product_or_name())
        .map(str::to_lowercase)
}

/// Returns true for legs run by operators whose fares the provider cannot
/// quote (FlixTrain and similar private operators).
pub fn is_unpriceable(leg: &Leg) -> bool {
    let Some(line) = &leg.line else {
        return false;
    };

    let mentions_flix = |s: &str| s.to_lowercase().contains("flix");

    line.name.to_uppercase().starts_with("FLX")
        || line.product_name.as_deref().is_some_and(|p| p.eq_ignore_ascii_case("FLX"))
        || line.operator.as_ref().is_some_and(|op| mentions_flix(&op.name))
        || mentions_flix(&line.name)
}

/// Returns true for regional and suburban trains.
pub fn is_regional(leg: &Leg) -> bool {
    product_of(leg).is_some_and(|p| REGIONAL_PRODUCTS.contains(&p.as_str()))
}

/// Returns true if the flat-rate ticket pays for this transport leg.
pub fn is_covered_by_flat_ticket(leg: &Leg, rider: &RiderConfiguration) -> bool {
    rider.has_flat_ticket
        && !is_unpriceable(leg)
        && product_of(leg).is_some_and(|p| FLAT_TICKET_PRODUCTS.contains(&p.as_str()))
}

fn segment_covered(segment: &Journey, rider: &RiderConfiguration) -> bool {
    segment
        .transport_legs()
        .all(|leg| is_covered_by_flat_ticket(leg, rider))
}

fn savings_percentage(savings: f64, original: f64) -> String {
    format!("{:.1}", savings / original * 100.0)
}

/// Price a split and decide whether it saves money.
///
/// With a flat-rate ticket, segments whose legs are all covered cost
/// nothing; the adjusted total is the sum of the remaining segment prices.
/// A remaining segment that has no price (or, without a flat-rate ticket,
/// contains an unpriceable product) is left out of the total and the result
/// is flagged as partially priced. If none of the remaining segments can be
/// priced, the split is rejected.
pub fn aggregate(
    point: &SplitPoint,
    first: Journey,
    second: Journey,
    original_price: f64,
    rider: &RiderConfiguration,
) -> Result<SplitResult, Rejection> {
    let segments = [first, second];

    let total_price = match (segments[0].price_amount(), segments[1].price_amount()) {
        (Some(a), Some(b)) => Some(a + b),
        _ => None,
    };

    let has_regional_trains = segments
        .iter()
        .any(|s| s.transport_legs().any(is_regional));
    let has_unpriceable_products = segments
        .iter()
        .any(|s| s.transport_legs().any(is_unpriceable));

    let all_covered = segments.iter().all(|s| segment_covered(s, rider));

    // Segments the rider still has to buy a ticket for
    let charged: Vec<usize> = (0..segments.len())
        .filter(|&index| !(rider.has_flat_ticket && segment_covered(&segments[index], rider)))
        .collect();

    let segments_without_pricing: Vec<usize> = charged
        .iter()
        .copied()
        .filter(|&index| {
            let segment = &segments[index];
            segment.price().is_none()
                || (!rider.has_flat_ticket && segment.transport_legs().any(is_unpriceable))
        })
        .collect();

    let priced = charged.len() - segments_without_pricing.len();
    let cannot_show_price = !charged.is_empty() && priced == 0;
    let has_partial_pricing = priced > 0 && priced < charged.len();

    let adjusted_total_price = (!cannot_show_price).then(|| {
        charged
            .iter()
            .copied()
            .filter(|index| !segments_without_pricing.contains(index))
            .filter_map(|index| segments[index].price_amount())
            .fold(0.0, |total, amount| total + amount)
    });

    let Some(adjusted_total_price) = adjusted_total_price else {
        return Err(Rejection::NoUsablePrice);
    };

    if adjusted_total_price >= original_price {
        return Err(Rejection::NotCheaper {
            total: adjusted_total_price,
            original: original_price,
        });
    }

    let savings = original_price - adjusted_total_price;

    Ok(SplitResult {
        kind: "same-train-single-split",
        split_stations: vec![point.station.clone()],
        segments,
        total_price,
        adjusted_total_price,
        original_price,
        savings,
        savings_percentage: savings_percentage(savings, original_price),
        train_info: TrainInfo::from(point.train_line.as_ref()),
        is_fully_covered: all_covered && rider.has_flat_ticket,
        has_regional_trains,
        has_unpriceable_products,
        cannot_show_price,
        has_partial_pricing,
        segments_without_pricing,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::split::extract::extract_split_points;
    use crate::split::fixtures::*;
    use proptest::prelude::*;

    proptest! {
        /// Accepted results are always strictly cheaper than the original
        #[test]
        fn strict_savings(
            first in prop::option::of(0u32..10_000),
            second in prop::option::of(0u32..10_000),
            original in 0u32..15_000,
            flat in any::<bool>(),
            regional in any::<bool>(),
        ) {
            let original_journey = journey(
                vec![train(
                    "ICE 1",
                    "nationalExpress",
                    vec![stop("A", "", "10:00"), stop("B", "10:30", "10:32"), stop("C", "11:00", "")],
                )],
                None,
            );
            let point = extract_split_points(&original_journey).remove(0);
            let product = if regional { "regional" } else { "nationalExpress" };
            let to_price = |cents: Option<u32>| cents.map(|c| f64::from(c) / 100.0);

            let rider = RiderConfiguration::default().with_flat_ticket(flat);
            let original = f64::from(original) / 100.0;

            if let Ok(result) = aggregate(
                &point,
                journey(vec![hop("X 1", product, "A", "B", "10:00", "10:30")], to_price(first)),
                journey(vec![hop("X 2", product, "B", "C", "10:32", "11:00")], to_price(second)),
                original,
                &rider,
            ) {
                prop_assert!(result.adjusted_total_price < original);
                prop_assert!(result.savings > 0.0);
                prop_assert!(!result.cannot_show_price);
            }
        }
    }
}
