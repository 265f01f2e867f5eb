//! Dataset loading: one read of a JSON array of candidate records.
//!
//! The dataset is immutable once built. [`fetch`] never fails: a missing or
//! unreadable file yields [`LoadOutcome::Failed`], which the session turns
//! into an empty collection and an error state. There is no retry.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use super::record::{CandidateId, CandidateRecord};
use super::stats::DatasetStats;
use crate::core::errors::{Result, SaarthiError};

/// Immutable, id-unique candidate collection with its precomputed stats.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<CandidateRecord>,
    stats: DatasetStats,
}

/// A record dropped while building a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// Position in the source array.
    pub index: usize,
    /// Id, when one could be read.
    pub id: Option<CandidateId>,
    /// Why the record was dropped.
    pub reason: String,
}

impl Dataset {
    /// An empty collection (the failed-load state).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a dataset, dropping later records whose id repeats an earlier one.
    #[must_use]
    pub fn from_records(records: Vec<CandidateRecord>) -> (Self, Vec<SkippedRecord>) {
        let mut seen = HashSet::with_capacity(records.len());
        let mut kept = Vec::with_capacity(records.len());
        let mut skipped = Vec::new();
        for (index, record) in records.into_iter().enumerate() {
            if seen.insert(record.id) {
                kept.push(record);
            } else {
                skipped.push(SkippedRecord {
                    index,
                    id: Some(record.id),
                    reason: format!("duplicate id {}", record.id),
                });
            }
        }
        let stats = DatasetStats::compute(&kept);
        (
            Self {
                records: kept,
                stats,
            },
            skipped,
        )
    }

    /// Records in source order (the relevance order).
    #[must_use]
    pub fn records(&self) -> &[CandidateRecord] {
        &self.records
    }

    /// Look a candidate up by id.
    #[must_use]
    pub fn get(&self, id: CandidateId) -> Option<&CandidateRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Like [`Dataset::get`], but an unknown id is an error.
    pub fn require(&self, id: CandidateId) -> Result<&CandidateRecord> {
        self.get(id).ok_or(SaarthiError::UnknownCandidate { id })
    }

    #[must_use]
    pub fn contains(&self, id: CandidateId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Aggregates computed when the dataset was built.
    #[must_use]
    pub const fn stats(&self) -> &DatasetStats {
        &self.stats
    }
}

/// A parsed dataset plus the records that had to be dropped.
#[derive(Debug, Clone, Default)]
pub struct ParsedDataset {
    pub dataset: Dataset,
    pub skipped: Vec<SkippedRecord>,
}

/// Parse a JSON array of records. Individual bad records are skipped, not
/// fatal; a document that is not an array is an error.
pub fn parse_dataset(json: &str, origin: &Path) -> Result<ParsedDataset> {
    let Value::Array(items) = serde_json::from_str::<Value>(json)? else {
        return Err(SaarthiError::DatasetShape {
            path: origin.to_path_buf(),
        });
    };

    let mut records = Vec::with_capacity(items.len());
    let mut positions = Vec::with_capacity(items.len());
    let mut skipped = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        let id = item.get("id").and_then(Value::as_u64);
        match CandidateRecord::from_json(item) {
            Ok(record) => {
                records.push(record);
                positions.push(index);
            }
            Err(e) => skipped.push(SkippedRecord {
                index,
                id,
                reason: e.to_string(),
            }),
        }
    }

    let (dataset, mut duplicates) = Dataset::from_records(records);
    // Report duplicates by their position in the source array.
    for dup in &mut duplicates {
        dup.index = positions[dup.index];
    }
    skipped.extend(duplicates);
    skipped.sort_by_key(|s| s.index);

    Ok(ParsedDataset { dataset, skipped })
}

/// Read and parse the dataset file.
pub fn read_dataset(path: &Path) -> Result<ParsedDataset> {
    let raw = fs::read_to_string(path).map_err(|source| SaarthiError::io(path, source))?;
    parse_dataset(&raw, path)
}

/// Result of the one-time startup load.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// The dataset loaded (possibly with skipped records).
    Loaded {
        path: PathBuf,
        parsed: ParsedDataset,
    },
    /// The dataset could not be loaded; the collection stays empty.
    Failed {
        path: PathBuf,
        code: &'static str,
        details: String,
    },
}

impl LoadOutcome {
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// Load the dataset once, folding any failure into [`LoadOutcome::Failed`].
pub fn fetch(path: &Path) -> LoadOutcome {
    match read_dataset(path) {
        Ok(parsed) => LoadOutcome::Loaded {
            path: path.to_path_buf(),
            parsed,
        },
        Err(e) => LoadOutcome::Failed {
            path: path.to_path_buf(),
            code: e.code(),
            details: e.to_string(),
        },
    }
}
