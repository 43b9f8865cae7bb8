//! Station identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A provider station identifier (e.g. an IBNR/EVA number like `8000105`).
///
/// Identifiers are opaque to us, but they are never empty and never carry
/// surrounding whitespace. Any `StationId` value is valid by construction.
///
/// # Examples
///
/// ```
/// use split_server::domain::StationId;
///
/// let frankfurt = StationId::parse("8000105").unwrap();
/// assert_eq!(frankfurt.as_str(), "8000105");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("   ").is_err());
/// assert!(StationId::parse(" 8000105").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    /// Parse a station id from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if s.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        if s.trim() != s {
            return Err(InvalidStationId {
                reason: "must not have leading or trailing whitespace",
            });
        }

        Ok(StationId(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for StationId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        StationId::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A station reference: id plus an optional human-readable name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Station {
    /// Creates a station reference.
    pub fn new(id: StationId, name: Option<String>) -> Self {
        Self { id, name }
    }

    /// Name for logs and progress messages, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }
}
