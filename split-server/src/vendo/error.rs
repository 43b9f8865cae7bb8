//! Journey search client error types.

use std::fmt;

use crate::split::ProviderError;

/// Errors from the journey search HTTP client.
#[derive(Debug)]
pub enum VendoError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// Rate limited by the API
    RateLimited,
}

impl fmt::Display for VendoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VendoError::Http(e) => write!(f, "HTTP error: {e}"),
            VendoError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            VendoError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            VendoError::RateLimited => write!(f, "rate limited by journey search API"),
        }
    }
}

impl std::error::Error for VendoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VendoError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for VendoError {
    fn from(err: reqwest::Error) -> Self {
        VendoError::Http(err)
    }
}

impl From<VendoError> for ProviderError {
    fn from(err: VendoError) -> Self {
        match err {
            VendoError::Http(e) => ProviderError::Http(e.to_string()),
            VendoError::Json { message, .. } => ProviderError::Schema(message),
            VendoError::ApiError { status, message } => ProviderError::Api { status, message },
            VendoError::RateLimited => ProviderError::RateLimited,
        }
    }
}
