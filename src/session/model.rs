//! Elm-style session state for the candidate directory.
//!
//! All browsing state lives in [`SessionModel`]. User and data events arrive
//! as [`SessionMsg`] values; side-effects are described by [`SessionCmd`]
//! values returned from [`super::update::update`]. Nothing here performs I/O.

#![allow(missing_docs)]

use crate::dataset::{CandidateId, CandidateRecord, Dataset, DatasetStats, LoadOutcome};
use crate::directory::{ComparisonSet, Criteria, PartyFilter, SortKey, ToggleOutcome, visible};
use crate::locale::Language;
use crate::logger::LogEntry;

// ──────────────────── load state ────────────────────

/// Progress of the one-time dataset load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Waiting for the load to complete.
    #[default]
    Loading,
    /// The dataset is available (possibly empty).
    Ready,
    /// The load failed; the collection stays empty for the whole session.
    Failed { code: &'static str, details: String },
}

// ──────────────────── navigation ────────────────────

/// Page currently shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Route {
    /// The filtered, sorted candidate list.
    #[default]
    List,
    /// One candidate's full affidavit detail.
    Detail(CandidateId),
}

/// Dialog layered over the current page. At most one is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Plain-language summary of one candidate.
    Summary(CandidateId),
    /// Side-by-side comparison of the comparison set.
    Compare,
    /// Declared criminal cases of one candidate.
    CaseDetails(CandidateId),
}

// ──────────────────── model ────────────────────

/// Complete session state.
#[derive(Debug, Clone, Default)]
pub struct SessionModel {
    pub dataset: Dataset,
    pub load: LoadState,
    pub criteria: Criteria,
    pub comparison: ComparisonSet,
    pub language: Language,
    pub route: Route,
    pub modal: Option<Modal>,
    /// Result of the most recent comparison toggle, for user feedback.
    pub last_toggle: Option<ToggleOutcome>,
}

impl SessionModel {
    /// A fresh session waiting for its dataset.
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// The visible list under the current criteria.
    #[must_use]
    pub fn visible(&self) -> Vec<&CandidateRecord> {
        visible(self.dataset.records(), &self.criteria)
    }

    #[must_use]
    pub const fn stats(&self) -> &DatasetStats {
        self.dataset.stats()
    }

    #[must_use]
    pub fn is_compared(&self, id: CandidateId) -> bool {
        self.comparison.is_selected(id)
    }

    /// Comparison members resolved to records, in toggle order.
    #[must_use]
    pub fn compared_records(&self) -> Vec<&CandidateRecord> {
        self.comparison.resolve(&self.dataset)
    }

    /// Whether the "no candidates" empty state applies.
    #[must_use]
    pub fn shows_empty_state(&self) -> bool {
        !matches!(self.load, LoadState::Loading) && self.visible().is_empty()
    }

    pub(crate) fn reset_criteria(&mut self) {
        self.criteria = Criteria {
            search_text: String::new(),
            party_filter: PartyFilter::All,
            sort_key: SortKey::Relevance,
        };
    }
}

// ──────────────────── messages ────────────────────

/// Events that drive state transitions.
#[derive(Debug, Clone)]
pub enum SessionMsg {
    /// The one-time dataset load finished.
    DataLoaded(Box<LoadOutcome>),
    SetSearch(String),
    ClearSearch,
    SetPartyFilter(PartyFilter),
    SetSort(SortKey),
    /// Clear search, party back to all, sort back to relevance.
    ResetFilters,
    ToggleCompare(CandidateId),
    ClearComparison,
    OpenSummary(CandidateId),
    /// Ignored with fewer than two members.
    OpenCompare,
    OpenCaseDetails(CandidateId),
    CloseModal,
    Navigate(Route),
    ToggleLocale,
    SetLocale(Language),
    /// The runtime failed to persist the language preference.
    PersistFailed { details: String },
}

// ──────────────────── commands ────────────────────

/// Side-effects for the runtime to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCmd {
    None,
    /// Write the language preference to disk.
    PersistLocale(Language),
    /// Append an entry to the activity log.
    Log(Box<LogEntry>),
    Batch(Vec<Self>),
}

impl SessionCmd {
    /// Wrap a list of commands, collapsing the trivial cases.
    #[must_use]
    pub fn batch(mut cmds: Vec<Self>) -> Self {
        cmds.retain(|c| !matches!(c, Self::None));
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or(Self::None),
            _ => Self::Batch(cmds),
        }
    }

    #[must_use]
    pub fn log(entry: LogEntry) -> Self {
        Self::Log(Box::new(entry))
    }

    /// Flatten nested batches into execution order.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::None => Vec::new(),
            Self::Batch(cmds) => cmds.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}

// ──────────────────── tests ────────────────────
