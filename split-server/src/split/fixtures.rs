//! Journey builders shared by the analysis tests.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};

use crate::domain::{Journey, Leg, Line, Price, Station, StationId, Stopover};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 20).unwrap()
}

/// Instant at "HH:MM" or "HH:MM:SS" on the test date, CEST.
pub fn at(s: &str) -> DateTime<FixedOffset> {
    let time = NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .unwrap();
    FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .from_local_datetime(&date().and_time(time))
        .unwrap()
}

pub fn sid(id: &str) -> StationId {
    StationId::parse(id).unwrap()
}

pub fn station(id: &str) -> Station {
    Station::new(sid(id), Some(format!("Station {id}")))
}

fn optional_time(s: &str) -> Option<DateTime<FixedOffset>> {
    (!s.is_empty()).then(|| at(s))
}

/// A stopover; empty strings mean "no time".
pub fn stop(id: &str, arr: &str, dep: &str) -> Stopover {
    Stopover {
        station: Some(station(id)),
        arrival: optional_time(arr),
        departure: optional_time(dep),
        load_factor: None,
    }
}

/// A transport leg running through `stops`.
pub fn train(name: &str, product: &str, stops: Vec<Stopover>) -> Leg {
    let first = stops.first().unwrap();
    let last = stops.last().unwrap();
    Leg {
        origin: first.station.clone(),
        destination: last.station.clone(),
        departure: first.departure.or(first.arrival).unwrap(),
        arrival: last.arrival.or(last.departure).unwrap(),
        line: Some(Line::named(name).with_product(product)),
        walking: false,
        stopovers: stops,
    }
}

/// A bare transport leg without stopovers, as segment lookups return them.
pub fn hop(name: &str, product: &str, from: &str, to: &str, dep: &str, arr: &str) -> Leg {
    Leg {
        origin: Some(station(from)),
        destination: Some(station(to)),
        departure: at(dep),
        arrival: at(arr),
        line: Some(Line::named(name).with_product(product)),
        walking: false,
        stopovers: Vec::new(),
    }
}

pub fn walk(from: &str, to: &str, dep: &str, arr: &str) -> Leg {
    Leg {
        origin: Some(station(from)),
        destination: Some(station(to)),
        departure: at(dep),
        arrival: at(arr),
        line: None,
        walking: true,
        stopovers: Vec::new(),
    }
}

pub fn journey(legs: Vec<Leg>, price: Option<f64>) -> Journey {
    Journey::new(legs, price.map(Price::new))
}
