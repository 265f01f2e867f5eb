//! Property-based tests for session reducer and engine invariants.
//!
//! Arbitrary message sequences must keep the comparison set bounded and
//! duplicate-free, keep the compare modal consistent with membership, and
//! leave the visible list a stable, idempotent derivation of the dataset.

use std::cmp::Ordering;
use std::path::PathBuf;

use proptest::prelude::*;

use super::model::{Modal, Route, SessionModel, SessionMsg};
use super::update;
use crate::dataset::{CandidateRecord, Dataset, LoadOutcome};
use crate::dataset::source::ParsedDataset;
use crate::directory::{
    COMPARISON_CAPACITY, ComparisonSet, Criteria, NameCollator, PartyFilter, SortKey, visible,
};
use crate::locale::Language;

// ──────────────────── strategies ────────────────────

const PARTIES: [&str; 4] = ["BJP", "Indian National Congress", "AAP", "Independent"];

// Small pool so equal and accent-only-different names are common.
const NAMES: [&str; 7] = ["Asha", "asha", "Émile", "Eshan", "Zara", "अमित", "राहुल"];

fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(NAMES.to_vec()).prop_map(str::to_owned),
        "[A-Za-z]{1,8}",
    ]
}

fn arb_record(id: u64) -> impl Strategy<Value = CandidateRecord> {
    (
        arb_name(),
        0usize..PARTIES.len(),
        prop::option::of(0u64..1_000),
        0u32..5,
    )
        .prop_map(move |(name, party, assets, cases)| {
            let mut r = CandidateRecord::new(id, name, PARTIES[party]);
            r.assets_inr = assets;
            r.criminal_cases = cases;
            r
        })
}

fn arb_records() -> impl Strategy<Value = Vec<CandidateRecord>> {
    (1u64..12).prop_flat_map(|n| (1..=n).map(arb_record).collect::<Vec<_>>())
}

fn arb_party() -> impl Strategy<Value = PartyFilter> {
    prop::sample::select(PartyFilter::ALL.to_vec())
}

fn arb_sort() -> impl Strategy<Value = SortKey> {
    prop::sample::select(SortKey::ALL.to_vec())
}

fn arb_criteria() -> impl Strategy<Value = Criteria> {
    ("[a-c ]{0,3}", arb_party(), arb_sort()).prop_map(|(search_text, party_filter, sort_key)| {
        Criteria {
            search_text,
            party_filter,
            sort_key,
        }
    })
}

fn arb_msg() -> impl Strategy<Value = SessionMsg> {
    prop_oneof![
        4 => (0u64..14).prop_map(SessionMsg::ToggleCompare),
        1 => Just(SessionMsg::ClearComparison),
        2 => Just(SessionMsg::OpenCompare),
        1 => (0u64..14).prop_map(SessionMsg::OpenSummary),
        1 => (0u64..14).prop_map(SessionMsg::OpenCaseDetails),
        1 => Just(SessionMsg::CloseModal),
        1 => "[a-z]{0,2}".prop_map(SessionMsg::SetSearch),
        1 => Just(SessionMsg::ClearSearch),
        1 => arb_party().prop_map(SessionMsg::SetPartyFilter),
        1 => arb_sort().prop_map(SessionMsg::SetSort),
        1 => Just(SessionMsg::ResetFilters),
        1 => (0u64..14).prop_map(|id| SessionMsg::Navigate(Route::Detail(id))),
        1 => Just(SessionMsg::Navigate(Route::List)),
        1 => Just(SessionMsg::ToggleLocale),
    ]
}

fn loaded_model(records: Vec<CandidateRecord>) -> SessionModel {
    let (dataset, skipped) = Dataset::from_records(records);
    let mut model = SessionModel::new(Language::En);
    update::update(
        &mut model,
        SessionMsg::DataLoaded(Box::new(LoadOutcome::Loaded {
            path: PathBuf::from("prop.json"),
            parsed: ParsedDataset { dataset, skipped },
        })),
    );
    model
}

fn assert_model_invariants(model: &SessionModel) {
    let ids = model.comparison.ids();
    assert!(ids.len() <= COMPARISON_CAPACITY, "comparison overflow: {ids:?}");
    for (i, id) in ids.iter().enumerate() {
        assert!(!ids[i + 1..].contains(id), "duplicate id {id} in {ids:?}");
        assert!(model.dataset.contains(*id), "unknown id {id} selected");
    }
    if model.modal == Some(Modal::Compare) {
        assert!(model.comparison.can_compare(), "compare open with {ids:?}");
    }
    if let Some(Modal::Summary(id) | Modal::CaseDetails(id)) = model.modal {
        assert!(model.dataset.contains(id));
    }
}

// ──────────────────── property tests ────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any message sequence preserves the model invariants.
    #[test]
    fn reducer_preserves_invariants(
        records in arb_records(),
        msgs in prop::collection::vec(arb_msg(), 1..60)
    ) {
        let mut model = loaded_model(records);
        for msg in msgs {
            let _ = update::update(&mut model, msg);
            assert_model_invariants(&model);
        }
    }

    /// No toggle sequence grows the set past capacity.
    #[test]
    fn comparison_never_exceeds_capacity(toggles in prop::collection::vec(0u64..20, 0..80)) {
        let mut set = ComparisonSet::new();
        for id in toggles {
            set.toggle(id);
            prop_assert!(set.len() <= COMPARISON_CAPACITY);
        }
    }

    /// Toggling an id twice restores membership. Order is restored when the
    /// first toggle adds; an id removed from mid-set comes back at the end.
    #[test]
    fn double_toggle_restores_set(
        seed in prop::collection::vec(0u64..10, 0..8),
        id in 0u64..12
    ) {
        let mut set = ComparisonSet::new();
        for s in seed {
            set.toggle(s);
        }
        let before = set.clone();
        let first = set.toggle(id);
        set.toggle(id);
        if first.changed() {
            // Removed then re-appended ids land at the end.
            if before.is_selected(id) {
                let mut expected: Vec<u64> =
                    before.ids().iter().copied().filter(|&x| x != id).collect();
                expected.push(id);
                prop_assert_eq!(set.ids(), expected.as_slice());
            } else {
                prop_assert_eq!(&set, &before);
            }
        } else {
            prop_assert_eq!(&set, &before);
        }
    }

    /// Re-applying the same criteria to a derived list changes nothing.
    #[test]
    fn filtering_is_idempotent(records in arb_records(), criteria in arb_criteria()) {
        let once = visible(&records, &criteria);
        let twice = visible(once.iter().copied(), &criteria);
        prop_assert_eq!(once, twice);
    }

    /// Every sort orders by its key, and equal keys keep source order.
    #[test]
    fn sorts_are_stable(records in arb_records(), sort_key in arb_sort()) {
        let criteria = Criteria {
            sort_key,
            ..Criteria::default()
        };
        let out = visible(&records, &criteria);
        let mut collator = NameCollator::new();
        for pair in out.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let order = match sort_key {
                SortKey::Relevance => Ordering::Equal,
                SortKey::AssetsDesc => b.assets_or_zero().cmp(&a.assets_or_zero()),
                SortKey::AssetsAsc => a.assets_or_zero().cmp(&b.assets_or_zero()),
                SortKey::NameAsc => collator.compare(&a.name, &b.name),
            };
            prop_assert!(order != Ordering::Greater, "{:?} out of order: {} before {}", sort_key, a.id, b.id);
            if order == Ordering::Equal {
                prop_assert!(a.id < b.id, "tie order broken: {} before {}", a.id, b.id);
            }
        }
    }

    /// The visible list is always a subset of the dataset, in any criteria.
    #[test]
    fn visible_is_subset(records in arb_records(), criteria in arb_criteria()) {
        let out = visible(&records, &criteria);
        prop_assert!(out.len() <= records.len());
        for c in out {
            prop_assert!(records.iter().any(|r| r.id == c.id));
        }
    }
}
