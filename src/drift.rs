//! Configuration drift summarization.
//!
//! Aggregates a comparer's per-collection changelists into one flat count
//! per change kind, or reports that all configurations are up to date. Pure
//! aggregation over data the comparer already computed; every request
//! rebuilds the summary from scratch.

use crate::comparer::ChangelistSource;
use crate::snapshot::ConfigSnapshot;
use crate::types::ChangeKind;
use std::collections::BTreeMap;

/// Aggregate count of affected entry names per change kind.
pub type ChangeSummary = BTreeMap<ChangeKind, u64>;

/// Drift between the sync snapshot and the active configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriftStatus {
    /// All configurations are up to date.
    UpToDate,
    /// Pending changes, counted per change kind across all collections.
    Pending(ChangeSummary),
}

impl DriftStatus {
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, DriftStatus::UpToDate)
    }
}

/// Summarize pending drift reported by the comparer.
///
/// An empty sync snapshot reads as up to date regardless of the comparer:
/// an empty export means nothing has been synchronized yet, not that the
/// whole active configuration is pending deletion. Change kinds with no
/// affected names are omitted from the summary. An entry moved between
/// collections counts once, under whatever kind the comparer assigned it.
pub fn summarize_drift<C>(sync: &ConfigSnapshot, comparer: &C) -> DriftStatus
where
    C: ChangelistSource + ?Sized,
{
    if sync.is_empty() || !comparer.has_changes() {
        return DriftStatus::UpToDate;
    }

    let mut summary = ChangeSummary::new();
    for collection in comparer.collection_names() {
        for (kind, names) in comparer.changelist(&collection) {
            if names.is_empty() {
                continue;
            }
            *summary.entry(kind).or_insert(0) += names.len() as u64;
        }
    }
    DriftStatus::Pending(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparer::Changelist;
    use crate::snapshot::DEFAULT_COLLECTION;
    use serde_json::json;

    /// Comparer stub reporting fixed changelists.
    struct FixedChangelists {
        lists: BTreeMap<String, Changelist>,
    }

    impl FixedChangelists {
        fn new(lists: &[(&str, &[(ChangeKind, &[&str])])]) -> Self {
            let lists = lists
                .iter()
                .map(|(collection, kinds)| {
                    let changelist = kinds
                        .iter()
                        .map(|(kind, names)| {
                            (*kind, names.iter().map(|n| n.to_string()).collect())
                        })
                        .collect();
                    (collection.to_string(), changelist)
                })
                .collect();
            Self { lists }
        }
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

    fn non_empty_sync() -> ConfigSnapshot {
        let mut snapshot = ConfigSnapshot::new();
        snapshot.insert(DEFAULT_COLLECTION, "system.site", json!({"name": "Storm"}));
        snapshot
    }

    #[test]
    fn test_empty_sync_snapshot_is_up_to_date() {
        let comparer = FixedChangelists::new(&[(
            DEFAULT_COLLECTION,
            &[(ChangeKind::Create, &["a", "b"][..])],
        )]);
        let status = summarize_drift(&ConfigSnapshot::new(), &comparer);
        assert_eq!(status, DriftStatus::UpToDate);
    }

    #[test]
    fn test_no_changes_is_up_to_date() {
        let comparer = FixedChangelists::new(&[(
            DEFAULT_COLLECTION,
            &[(ChangeKind::Create, &[][..]), (ChangeKind::Update, &[][..])],
        )]);
        let status = summarize_drift(&non_empty_sync(), &comparer);
        assert!(status.is_up_to_date());
    }

    #[test]
    fn test_counts_aggregate_across_collections() {
        let comparer = FixedChangelists::new(&[
            (DEFAULT_COLLECTION, &[(ChangeKind::Create, &["x", "y"][..])]),
            ("language.fr", &[(ChangeKind::Update, &["z"][..])]),
        ]);
        let status = summarize_drift(&non_empty_sync(), &comparer);

        let expected: ChangeSummary =
            [(ChangeKind::Create, 2), (ChangeKind::Update, 1)].into_iter().collect();
        assert_eq!(status, DriftStatus::Pending(expected));
    }

    #[test]
    fn test_same_kind_accumulates_across_collections() {
        let comparer = FixedChangelists::new(&[
            (DEFAULT_COLLECTION, &[(ChangeKind::Delete, &["a"][..])]),
            ("language.fr", &[(ChangeKind::Delete, &["b", "c"][..])]),
        ]);
        let status = summarize_drift(&non_empty_sync(), &comparer);

        let expected: ChangeSummary = [(ChangeKind::Delete, 3)].into_iter().collect();
        assert_eq!(status, DriftStatus::Pending(expected));
    }

    #[test]
    fn test_empty_kinds_are_omitted_not_zero() {
        let comparer = FixedChangelists::new(&[(
            DEFAULT_COLLECTION,
            &[
                (ChangeKind::Create, &["x"][..]),
                (ChangeKind::Update, &[][..]),
                (ChangeKind::Delete, &[][..]),
            ],
        )]);
        match summarize_drift(&non_empty_sync(), &comparer) {
            DriftStatus::Pending(summary) => {
                assert_eq!(summary.get(&ChangeKind::Create), Some(&1));
                assert!(!summary.contains_key(&ChangeKind::Update));
                assert!(!summary.contains_key(&ChangeKind::Delete));
            }
            DriftStatus::UpToDate => panic!("expected pending changes"),
        }
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let comparer = FixedChangelists::new(&[(
            DEFAULT_COLLECTION,
            &[(ChangeKind::Rename, &["old::new"][..])],
        )]);
        let sync = non_empty_sync();
        assert_eq!(
            summarize_drift(&sync, &comparer),
            summarize_drift(&sync, &comparer)
        );
    }
}
