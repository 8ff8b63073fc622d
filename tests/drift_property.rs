//! Property tests for drift summarization and snapshot comparison.

use proptest::prelude::*;
use std::collections::BTreeMap;
use storm_dashboard::comparer::{
    Changelist, ChangelistSource, SnapshotComparer,
};
use storm_dashboard::drift::{summarize_drift, ChangeSummary, DriftStatus};
use storm_dashboard::snapshot::{ConfigSnapshot, DEFAULT_COLLECTION};
use storm_dashboard::types::ChangeKind;

/// Comparer stub reporting fixed changelists.
#[derive(Debug, Clone)]
struct FixedChangelists {
    lists: BTreeMap<String, Changelist>,
}

impl ChangelistSource for FixedChangelists {
    fn create_changelist(&mut self) {}

    fn has_changes(&self) -> bool {
        self.lists
            .values()
            .any(|changelist| changelist.values().any(|names| !names.is_empty()))
    }

    fn collection_names(&self) -> Vec<String> {
        self.lists.keys().cloned().collect()
    }

    fn changelist(&self, collection: &str) -> Changelist {
        self.lists.get(collection).cloned().unwrap_or_default()
    }
}

fn kind_strategy() -> impl Strategy<Value = ChangeKind> {
    prop_oneof![
        Just(ChangeKind::Create),
        Just(ChangeKind::Update),
        Just(ChangeKind::Delete),
        Just(ChangeKind::Rename),
    ]
}

fn changelists_strategy() -> impl Strategy<Value = BTreeMap<String, Changelist>> {
    prop::collection::btree_map(
        "[a-z]{1,8}",
        prop::collection::btree_map(
            kind_strategy(),
            prop::collection::vec("[a-z]{1,12}", 0..4),
            0..5,
        ),
        0..4,
    )
}

fn snapshot_strategy() -> impl Strategy<Value = ConfigSnapshot> {
    prop::collection::btree_map("[a-z]{1,6}", 0..5i64, 0..6).prop_map(|entries| {
        let mut snapshot = ConfigSnapshot::new();
        for (name, value) in entries {
            snapshot.insert(DEFAULT_COLLECTION, &name, serde_json::json!(value));
        }
        snapshot
    })
}

fn changelist_names(comparer: &SnapshotComparer, kind: ChangeKind) -> Vec<String> {
    comparer
        .changelist(DEFAULT_COLLECTION)
        .get(&kind)
        .cloned()
        .unwrap_or_default()
}

proptest! {
    /// The summarized count per kind equals the sum of that kind's
    /// name-list lengths across collections.
    #[test]
    fn summarized_counts_match_changelist_lengths(lists in changelists_strategy()) {
        let comparer = FixedChangelists { lists: lists.clone() };
        let mut sync = ConfigSnapshot::new();
        sync.insert(DEFAULT_COLLECTION, "system.site", serde_json::json!({}));

        let mut expected = ChangeSummary::new();
        for changelist in lists.values() {
            for (kind, names) in changelist {
                if !names.is_empty() {
                    *expected.entry(*kind).or_insert(0) += names.len() as u64;
                }
            }
        }

        match summarize_drift(&sync, &comparer) {
            DriftStatus::UpToDate => prop_assert!(expected.is_empty()),
            DriftStatus::Pending(summary) => prop_assert_eq!(summary, expected),
        }
    }

    /// Swapping source and target swaps creates and deletes; updates are
    /// unaffected.
    #[test]
    fn swapping_sides_swaps_create_and_delete(
        a in snapshot_strategy(),
        b in snapshot_strategy(),
    ) {
        let mut forward = SnapshotComparer::new(a.clone(), b.clone());
        forward.create_changelist();
        let mut backward = SnapshotComparer::new(b, a);
        backward.create_changelist();

        prop_assert_eq!(
            changelist_names(&forward, ChangeKind::Create),
            changelist_names(&backward, ChangeKind::Delete)
        );
        prop_assert_eq!(
            changelist_names(&forward, ChangeKind::Delete),
            changelist_names(&backward, ChangeKind::Create)
        );
        prop_assert_eq!(
            changelist_names(&forward, ChangeKind::Update),
            changelist_names(&backward, ChangeKind::Update)
        );
    }

    /// A comparer over equal snapshots reports no changes, and the
    /// summarizer agrees.
    #[test]
    fn equal_snapshots_are_always_up_to_date(a in snapshot_strategy()) {
        let mut comparer = SnapshotComparer::new(a.clone(), a.clone());
        comparer.create_changelist();
        prop_assert!(!comparer.has_changes());
        prop_assert_eq!(summarize_drift(&a, &comparer), DriftStatus::UpToDate);
    }
}
