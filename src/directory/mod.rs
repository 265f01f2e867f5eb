//! Directory browsing: filter/sort criteria, the engine that applies them,
//! and the comparison selection.

pub mod comparison;
pub mod criteria;
pub mod engine;

pub use comparison::{COMPARISON_CAPACITY, ComparisonSet, MIN_FOR_COMPARISON, ToggleOutcome};
pub use criteria::{Criteria, PartyFilter, SortKey};
pub use engine::{NameCollator, visible};
