//! Bounded, ordered comparison selection.

#![allow(missing_docs)]

use serde::Serialize;

use crate::dataset::{CandidateId, CandidateRecord, Dataset};

/// Most candidates that can be compared side by side.
pub const COMPARISON_CAPACITY: usize = 5;

/// Fewest candidates for which comparison is available.
pub const MIN_FOR_COMPARISON: usize = 2;

/// What a toggle did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// The id was appended.
    Added,
    /// The id was present and has been removed.
    Removed,
    /// The set was full; nothing changed.
    AtCapacity,
}

impl ToggleOutcome {
    #[must_use]
    pub const fn changed(self) -> bool {
        !matches!(self, Self::AtCapacity)
    }
}

/// Ordered, duplicate-free set of at most [`COMPARISON_CAPACITY`] ids, kept in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ComparisonSet {
    ids: Vec<CandidateId>,
}

impl ComparisonSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Remove `id` if selected, otherwise append it when there is room.
    pub fn toggle(&mut self, id: CandidateId) -> ToggleOutcome {
        if let Some(pos) = self.ids.iter().position(|&x| x == id) {
            self.ids.remove(pos);
            ToggleOutcome::Removed
        } else if self.ids.len() >= COMPARISON_CAPACITY {
            ToggleOutcome::AtCapacity
        } else {
            self.ids.push(id);
            ToggleOutcome::Added
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    #[must_use]
    pub fn is_selected(&self, id: CandidateId) -> bool {
        self.ids.contains(&id)
    }

    /// Selected ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[CandidateId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.ids.len() >= COMPARISON_CAPACITY
    }

    /// Whether enough candidates are selected to open the comparison.
    #[must_use]
    pub fn can_compare(&self) -> bool {
        self.ids.len() >= MIN_FOR_COMPARISON
    }

    /// Resolve selected ids against the dataset, skipping ids it lacks.
    #[must_use]
    pub fn resolve<'a>(&self, dataset: &'a Dataset) -> Vec<&'a CandidateRecord> {
        self.ids.iter().filter_map(|&id| dataset.get(id)).collect()
    }
}
