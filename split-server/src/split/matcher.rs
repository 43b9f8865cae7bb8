//! Matching provider results against the exact train.
//!
//! The provider's search is fuzzy: asked for a departure at 10:32 it may
//! return the 10:32 train, an earlier or later one, or a different route.
//! A candidate is treated as "the same train" when its first leg departs
//! within a fixed tolerance of the target.

use chrono::{DateTime, FixedOffset};

use crate::domain::Journey;

/// Maximum departure difference for two departures to be the same train.
pub const MATCH_TOLERANCE_MS: i64 = 60_000;

/// Returns true if `candidate` departs within tolerance of `target`.
pub fn departs_within_tolerance(candidate: &Journey, target: DateTime<FixedOffset>) -> bool {
    candidate.departure().is_some_and(|departure| {
        departure
            .signed_duration_since(target)
            .num_milliseconds()
            .abs()
            <= MATCH_TOLERANCE_MS
    })
}

/// Find the candidate that corresponds to the requested departure.
///
/// Returns the first qualifying candidate in provider order; there is no
/// secondary ranking. `None` is a normal outcome, not an error.
pub fn find_matching_journey(
    candidates: &[Journey],
    target: DateTime<FixedOffset>,
) -> Option<&Journey> {
    candidates
        .iter()
        .find(|candidate| departs_within_tolerance(candidate, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::fixtures::*;

    fn departing(dep: &str, price: f64) -> Journey {
        journey(
            vec![hop("ICE 1", "nationalExpress", "A", "B", dep, "12:00")],
            Some(price),
        )
    }

    #[test]
    fn empty_candidates() {
        assert!(find_matching_journey(&[], at("10:00")).is_none());
    }

    #[test]
    fn exact_match() {
        let candidates = vec![departing("09:30", 1.0), departing("10:00", 2.0)];
        let matched = find_matching_journey(&candidates, at("10:00")).unwrap();
        assert_eq!(matched.price_amount(), Some(2.0));
    }

    #[test]
    fn tolerance_is_inclusive() {
        let candidates = vec![departing("10:01:00", 1.0)];
        assert!(find_matching_journey(&candidates, at("10:00")).is_some());

        let candidates = vec![departing("09:59:00", 1.0)];
        assert!(find_matching_journey(&candidates, at("10:00")).is_some());
    }

    #[test]
    fn outside_tolerance() {
        let candidates = vec![departing("10:01:01", 1.0), departing("09:58:59", 2.0)];
        assert!(find_matching_journey(&candidates, at("10:00")).is_none());
    }

    #[test]
    fn first_qualifying_candidate_wins() {
        let candidates = vec![
            departing("10:15", 1.0),
            departing("10:00:30", 2.0),
            departing("10:00", 3.0),
        ];
        let matched = find_matching_journey(&candidates, at("10:00")).unwrap();
        assert_eq!(matched.price_amount(), Some(2.0));
    }

    #[test]
    fn journey_without_legs_never_matches() {
        let candidates = vec![journey(Vec::new(), Some(1.0))];
        assert!(find_matching_journey(&candidates, at("10:00")).is_none());
    }

    #[test]
    fn offsets_are_compared_as_instants() {
        // 08:00 UTC is 10:00 CEST
        let utc = DateTime::parse_from_rfc3339("2025-07-20T08:00:00+00:00").unwrap();
        let candidates = vec![departing("10:00", 1.0)];
        assert!(find_matching_journey(&candidates, utc).is_some());
    }
}
