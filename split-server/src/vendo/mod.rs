//! Journey search client for db-vendo style REST APIs.
//!
//! This module provides the HTTP implementation of
//! [`JourneySearchProvider`](crate::split::JourneySearchProvider), plus the
//! DTOs and conversion used for both search responses and the journeys
//! submitted by clients.
//!
//! Key characteristics of the API:
//! - Searches are fuzzy: results may depart at other times or take other
//!   routes, so the analyzer matches trains itself
//! - Timestamps are RFC 3339 with the local offset
//! - Stopover times may be null, and often are at the first and last stop

mod client;
mod convert;
mod error;
mod types;

pub use client::{VendoClient, VendoConfig};
pub use convert::{ConversionError, convert_journey, convert_journeys};
pub use error::VendoError;
pub use types::{
    JourneysResponse, VendoJourney, VendoLeg, VendoLine, VendoOperator, VendoPrice, VendoStation,
    VendoStopover,
};
