//! Configuration for split-ticket analysis.

use std::time::Duration;

/// Configuration parameters for an analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Number of split points evaluated concurrently.
    /// The provider rate-limits aggressively, so the default is one at a time.
    pub batch_size: usize,

    /// Pause between batches of split points (milliseconds).
    pub pacing_delay_ms: u64,

    /// Upper bound for a single segment lookup (seconds).
    /// Slower lookups count as failures for that split point.
    pub lookup_timeout_secs: u64,
}

impl AnalysisConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(batch_size: usize, pacing_delay_ms: u64, lookup_timeout_secs: u64) -> Self {
        Self {
            batch_size,
            pacing_delay_ms,
            lookup_timeout_secs,
        }
    }

    /// Returns the batch size, never less than one.
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }

    /// Returns the pacing delay as a Duration.
    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    /// Returns the lookup timeout as a Duration.
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            batch_size: 1,
            pacing_delay_ms: 100,
            lookup_timeout_secs: 20,
        }
    }
}
