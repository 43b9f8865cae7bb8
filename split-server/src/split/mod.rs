//! Split-ticket analysis.
//!
//! Given a priced journey, finds intermediate stations where buying two
//! tickets for the same trains is cheaper than one through ticket.

mod analyze;
mod config;
mod extract;
mod matcher;
mod pricing;
mod provider;

#[cfg(test)]
mod fixtures;

pub use analyze::{ProgressEvent, SplitAnalyzer, StreamCancelled};
pub use config::AnalysisConfig;
pub use extract::{SplitPoint, TrainLine, extract_split_points};
pub use matcher::{MATCH_TOLERANCE_MS, departs_within_tolerance, find_matching_journey};
pub use pricing::{
    Rejection, SplitResult, TrainInfo, aggregate, is_covered_by_flat_ticket, is_regional,
    is_unpriceable,
};
pub use provider::{JourneySearchProvider, ProviderError, SegmentQuery};
