//! Web layer for the split-ticket server.
//!
//! Provides the HTTP endpoint that analyses a journey, either as a single
//! JSON response or as a stream of server-sent progress events.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
