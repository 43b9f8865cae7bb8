//! Domain types for split-ticket analysis.
//!
//! This module contains the strongly-typed journey model that the provider
//! adapter produces and the analysis engine consumes. Nothing here inspects
//! untyped provider data.

mod error;
mod journey;
mod rider;
mod station;

pub use error::ValidationError;
pub use journey::{Journey, Leg, Line, Operator, Price, Stopover};
pub use rider::{BahnCardDiscount, LoyaltyCard, RiderConfiguration, TravelClass};
pub use station::{InvalidStationId, Station, StationId};
