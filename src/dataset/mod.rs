//! The candidate dataset: records, loading, and collection-wide statistics.

pub mod record;
pub mod source;
pub mod stats;

pub use record::{CandidateId, CandidateRecord, Rupees};
pub use source::{Dataset, LoadOutcome, fetch};
pub use stats::{DatasetStats, Insight, insights_for};
