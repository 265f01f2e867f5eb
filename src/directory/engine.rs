//! Filter/sort engine: derives the visible list from the collection and
//! the current [`Criteria`].
//!
//! Pure and deterministic. All sorts are stable, so candidates with equal
//! keys keep their prior relative order and re-applying the same criteria to
//! an already-derived list returns it unchanged.

use std::cmp::{Ordering, Reverse};

use feruca::Collator;

use super::criteria::{Criteria, PartyFilter, SortKey};
use crate::dataset::CandidateRecord;

/// Derive the visible, ordered candidate list.
pub fn visible<'a, I>(candidates: I, criteria: &Criteria) -> Vec<&'a CandidateRecord>
where
    I: IntoIterator<Item = &'a CandidateRecord>,
{
    let query = criteria.normalized_query();
    let mut list: Vec<&CandidateRecord> = candidates
        .into_iter()
        .filter(|c| query.as_deref().is_none_or(|q| matches_query(c, q)))
        .filter(|c| matches_party(c, criteria.party_filter))
        .collect();
    sort_candidates(&mut list, criteria.sort_key);
    list
}

/// Whether any searchable field contains the lower-cased query.
#[must_use]
pub fn matches_query(candidate: &CandidateRecord, lowered_query: &str) -> bool {
    candidate
        .searchable_fields()
        .any(|field| field.to_lowercase().contains(lowered_query))
}

fn matches_party(candidate: &CandidateRecord, filter: PartyFilter) -> bool {
    filter.matches(&candidate.party)
}

/// Stable in-place sort by `key`; `Relevance` leaves the order untouched.
pub fn sort_candidates(list: &mut [&CandidateRecord], key: SortKey) {
    match key {
        SortKey::Relevance => {}
        SortKey::AssetsDesc => list.sort_by_key(|c| Reverse(c.assets_or_zero())),
        SortKey::AssetsAsc => list.sort_by_key(|c| c.assets_or_zero()),
        SortKey::NameAsc => {
            let mut collator = NameCollator::new();
            list.sort_by(|a, b| collator.compare(&a.name, &b.name));
        }
    }
}

/// Unicode (CLDR root) collation for candidate names.
///
/// Accented Latin letters sort with their base letter and case differences
/// only break ties, so "carol" falls between "Bob" and "Dev" and "Émile"
/// before "Zara". Names that collate equal fall back to the raw text.
pub struct NameCollator {
    inner: Collator,
}

impl NameCollator {
    /// Root-locale collator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Collator::default(),
        }
    }

    /// Collation order, raw text as tiebreak.
    pub fn compare(&mut self, a: &str, b: &str) -> Ordering {
        self.inner.collate(a, b).then_with(|| a.cmp(b))
    }
}

impl Default for NameCollator {
    fn default() -> Self {
        Self::new()
    }
}

/// One-off name comparison. Sorting code should reuse a [`NameCollator`].
#[must_use]
pub fn collate_names(a: &str, b: &str) -> Ordering {
    NameCollator::new().compare(a, b)
}
