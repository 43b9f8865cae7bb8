//! Application state for the web layer.

use crate::split::SplitAnalyzer;

/// Shared application state.
///
/// Generic over the journey search provider so routes can be exercised
/// against a mock.
pub struct AppState<P> {
    /// Split-ticket analyzer (holds the provider and analysis config)
    pub analyzer: SplitAnalyzer<P>,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            analyzer: self.analyzer.clone(),
        }
    }
}

impl<P> AppState<P> {
    /// Create a new app state.
    pub fn new(analyzer: SplitAnalyzer<P>) -> Self {
        Self { analyzer }
    }
}
