//! Split-ticket savings server.
//!
//! A web service that answers: "Would buying two tickets for the same
//! trains be cheaper than my through ticket, and where should I split?"

pub mod cache;
pub mod domain;
pub mod split;
pub mod vendo;
pub mod web;
