//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use jan_saarthi::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{Result, SaarthiError};

// Dataset
pub use crate::dataset::{CandidateId, CandidateRecord, Dataset, DatasetStats, Insight, LoadOutcome, Rupees, fetch};

// Directory
pub use crate::directory::{
    COMPARISON_CAPACITY, ComparisonSet, Criteria, PartyFilter, SortKey, ToggleOutcome, visible,
};

// Locale
pub use crate::locale::{Language, translate};

// Session
pub use crate::session::{Session, SessionModel, SessionMsg, update};

// Presentation
pub use crate::present::{ShareChannel, ShareLink, card_view, comparison_table, detail_view, share_link};
