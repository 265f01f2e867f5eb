//! Aggregate statistics and insight badges derived once per dataset load.

use serde::Serialize;

use super::record::{CandidateRecord, Rupees};
use crate::locale::catalog::keys;

/// A candidate is flagged for high assets above this multiple of the average.
pub const HIGH_ASSETS_MULTIPLIER: f64 = 2.0;

/// A candidate is flagged when declared criminal cases exceed this count.
pub const HIGH_CRIMINAL_CASES_THRESHOLD: u32 = 2;

/// Collection-wide aggregates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DatasetStats {
    /// Number of candidates loaded.
    pub count: usize,
    /// Sum of declared assets, absent counted as zero.
    pub total_assets: u128,
    /// `total_assets / count`, zero for an empty collection.
    pub average_assets: f64,
    /// Candidates declaring at least one criminal case.
    pub with_criminal_cases: usize,
}

impl DatasetStats {
    /// Compute aggregates over the full collection.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(records: &[CandidateRecord]) -> Self {
        let count = records.len();
        let total_assets: u128 = records
            .iter()
            .map(|r| u128::from(r.assets_or_zero()))
            .sum();
        let average_assets = if count == 0 {
            0.0
        } else {
            total_assets as f64 / count as f64
        };
        let with_criminal_cases = records.iter().filter(|r| r.has_criminal_cases()).count();
        Self {
            count,
            total_assets,
            average_assets,
            with_criminal_cases,
        }
    }

    /// Whether `assets` exceeds the high-assets threshold.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn is_high_assets(&self, assets: Rupees) -> bool {
        self.count > 0 && assets as f64 > HIGH_ASSETS_MULTIPLIER * self.average_assets
    }
}

/// Badges shown next to a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Insight {
    /// Assets more than double the collection average.
    HighAssets,
    /// More than two declared criminal cases.
    HighCriminalCaseCount,
}

impl Insight {
    /// Catalog key of the badge label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::HighAssets => keys::HIGH_ASSETS,
            Self::HighCriminalCaseCount => keys::HIGH_CRIMINAL_CASE_COUNT,
        }
    }
}

/// Badges earned by `record` relative to `stats`, in display order.
#[must_use]
pub fn insights_for(record: &CandidateRecord, stats: &DatasetStats) -> Vec<Insight> {
    let mut badges = Vec::new();
    if record
        .assets_inr
        .is_some_and(|assets| stats.is_high_assets(assets))
    {
        badges.push(Insight::HighAssets);
    }
    if record.criminal_cases > HIGH_CRIMINAL_CASES_THRESHOLD {
        badges.push(Insight::HighCriminalCaseCount);
    }
    badges
}
