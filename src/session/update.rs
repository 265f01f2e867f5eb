//! Pure update function for the session state machine.
//!
//! `update()` applies one message to the model and returns a command for the
//! runtime. No I/O happens here; persistence and logging are described by
//! [`SessionCmd`] values.

use super::model::{LoadState, Modal, Route, SessionCmd, SessionModel, SessionMsg};
use crate::dataset::{CandidateId, LoadOutcome};
use crate::directory::ToggleOutcome;
use crate::locale::Language;
use crate::logger::{EventType, LogEntry, Severity};

/// Apply a message to the model and return the next command for the runtime.
pub fn update(model: &mut SessionModel, msg: SessionMsg) -> SessionCmd {
    match msg {
        SessionMsg::DataLoaded(outcome) => apply_load(model, *outcome),

        SessionMsg::SetSearch(text) => {
            model.criteria.search_text = text;
            SessionCmd::None
        }
        SessionMsg::ClearSearch => {
            model.criteria.search_text.clear();
            SessionCmd::None
        }
        SessionMsg::SetPartyFilter(filter) => {
            model.criteria.party_filter = filter;
            SessionCmd::None
        }
        SessionMsg::SetSort(key) => {
            model.criteria.sort_key = key;
            SessionCmd::None
        }
        SessionMsg::ResetFilters => {
            model.reset_criteria();
            SessionCmd::None
        }

        SessionMsg::ToggleCompare(id) => toggle_compare(model, id),
        SessionMsg::ClearComparison => {
            let had_members = !model.comparison.is_empty();
            model.comparison.clear();
            model.last_toggle = None;
            close_compare_if_short(model);
            if had_members {
                comparison_changed(model, None)
            } else {
                SessionCmd::None
            }
        }

        SessionMsg::OpenSummary(id) => open_for_candidate(model, id, Modal::Summary(id)),
        SessionMsg::OpenCaseDetails(id) => open_for_candidate(model, id, Modal::CaseDetails(id)),
        SessionMsg::OpenCompare => {
            if model.comparison.can_compare() {
                model.modal = Some(Modal::Compare);
            }
            SessionCmd::None
        }
        SessionMsg::CloseModal => {
            model.modal = None;
            SessionCmd::None
        }

        SessionMsg::Navigate(route) => {
            model.route = route;
            model.modal = None;
            SessionCmd::None
        }

        SessionMsg::ToggleLocale => {
            let next = model.language.toggled();
            set_language(model, next)
        }
        SessionMsg::SetLocale(language) => set_language(model, language),

        SessionMsg::PersistFailed { details } => SessionCmd::log(
            LogEntry::new(EventType::PreferenceSaveFailed, Severity::Warning)
                .with_details(details),
        ),
    }
}

fn apply_load(model: &mut SessionModel, outcome: LoadOutcome) -> SessionCmd {
    match outcome {
        LoadOutcome::Loaded { path, parsed } => {
            let mut loaded = LogEntry::new(EventType::DatasetLoaded, Severity::Info).with_path(&path);
            loaded.count = Some(parsed.dataset.len());
            loaded.ok = Some(true);

            let mut cmds = vec![SessionCmd::log(loaded)];
            for skipped in &parsed.skipped {
                let mut entry = LogEntry::new(EventType::RecordSkipped, Severity::Warning)
                    .with_path(&path)
                    .with_details(format!("record {}: {}", skipped.index, skipped.reason));
                entry.candidate_id = skipped.id;
                cmds.push(SessionCmd::log(entry));
            }

            model.dataset = parsed.dataset;
            model.load = LoadState::Ready;
            // Selections made before the load can only survive if the ids exist.
            let stale: Vec<CandidateId> = model
                .comparison
                .ids()
                .iter()
                .copied()
                .filter(|&id| !model.dataset.contains(id))
                .collect();
            for id in stale {
                model.comparison.toggle(id);
            }
            close_compare_if_short(model);
            SessionCmd::batch(cmds)
        }
        LoadOutcome::Failed {
            path,
            code,
            details,
        } => {
            let mut entry = LogEntry::new(EventType::DatasetLoadFailed, Severity::Error)
                .with_path(&path)
                .with_details(details.clone());
            entry.ok = Some(false);
            entry.error_code = Some(code.to_string());

            model.dataset = crate::dataset::Dataset::empty();
            model.comparison.clear();
            model.modal = None;
            model.load = LoadState::Failed { code, details };
            SessionCmd::log(entry)
        }
    }
}

fn toggle_compare(model: &mut SessionModel, id: CandidateId) -> SessionCmd {
    if !model.dataset.contains(id) {
        return SessionCmd::None;
    }
    let outcome = model.comparison.toggle(id);
    model.last_toggle = Some(outcome);
    if outcome == ToggleOutcome::AtCapacity {
        return SessionCmd::None;
    }
    close_compare_if_short(model);
    comparison_changed(model, Some(id))
}

fn comparison_changed(model: &SessionModel, id: Option<CandidateId>) -> SessionCmd {
    let mut entry = LogEntry::new(EventType::ComparisonChanged, Severity::Info);
    entry.candidate_id = id;
    entry.comparison = Some(model.comparison.ids().to_vec());
    entry.count = Some(model.comparison.len());
    SessionCmd::log(entry)
}

fn close_compare_if_short(model: &mut SessionModel) {
    if model.modal == Some(Modal::Compare) && !model.comparison.can_compare() {
        model.modal = None;
    }
}

fn open_for_candidate(model: &mut SessionModel, id: CandidateId, modal: Modal) -> SessionCmd {
    if model.dataset.contains(id) {
        model.modal = Some(modal);
    }
    SessionCmd::None
}

fn set_language(model: &mut SessionModel, language: Language) -> SessionCmd {
    if model.language == language {
        return SessionCmd::None;
    }
    model.language = language;
    let mut entry = LogEntry::new(EventType::LocaleChanged, Severity::Info);
    entry.language = Some(language.tag().to_string());
    SessionCmd::batch(vec![SessionCmd::PersistLocale(language), SessionCmd::log(entry)])
}
