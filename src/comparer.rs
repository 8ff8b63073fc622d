//! Snapshot comparison: per-collection changelists keyed by change kind.
//!
//! Compares a source (transformed sync) snapshot against a target (active)
//! snapshot. The changelist direction reads as "what an import of the source
//! would do to the target": source-only entries are creates, target-only
//! entries are deletes.

use crate::snapshot::ConfigSnapshot;
use crate::types::ChangeKind;
use serde_json::Value;
use std::collections::BTreeMap;

/// Changelist for one collection: change kind to affected entry names.
pub type Changelist = BTreeMap<ChangeKind, Vec<String>>;

/// Payload key carrying a stable entry identity, used for rename detection.
const IDENTITY_KEY: &str = "uuid";

/// Separator between old and new names in a rename record.
pub const RENAME_SEPARATOR: &str = "::";

/// Comparison capability consumed by the drift summarizer.
pub trait ChangelistSource {
    /// Compute changelists for every collection present on either side.
    /// Idempotent; must be called before the accessors.
    fn create_changelist(&mut self);

    /// True when any collection's changelist has a non-empty change kind.
    fn has_changes(&self) -> bool;

    /// Every collection a changelist was computed for.
    fn collection_names(&self) -> Vec<String>;

    /// Changelist of one collection. Empty for an unknown collection; kinds
    /// without affected names may be present as empty lists.
    fn changelist(&self, collection: &str) -> Changelist;
}

/// Compares two configuration snapshots collection by collection.
pub struct SnapshotComparer {
    source: ConfigSnapshot,
    target: ConfigSnapshot,
    changelists: BTreeMap<String, Changelist>,
}

impl SnapshotComparer {
    pub fn new(source: ConfigSnapshot, target: ConfigSnapshot) -> Self {
        Self {
            source,
            target,
            changelists: BTreeMap::new(),
        }
    }

    fn diff_collection(&self, collection: &str) -> Changelist {
        let empty = BTreeMap::new();
        let source = self.source.collection(collection).unwrap_or(&empty);
        let target = self.target.collection(collection).unwrap_or(&empty);

        let mut created: Vec<String> = source
            .keys()
            .filter(|name| !target.contains_key(*name))
            .cloned()
            .collect();
        let mut deleted: Vec<String> = target
            .keys()
            .filter(|name| !source.contains_key(*name))
            .cloned()
            .collect();
        let mut updated = Vec::new();
        for (name, value) in source {
            if let Some(active_value) = target.get(name) {
                if active_value != value {
                    updated.push(name.clone());
                }
            }
        }

        // Pair source-only and target-only entries sharing a stable identity
        // into renames instead of a create/delete pair.
        let mut renamed = Vec::new();
        let mut target_identities: BTreeMap<String, String> = deleted
            .iter()
            .filter_map(|name| {
                identity_of(target.get(name)).map(|id| (id, name.clone()))
            })
            .collect();
        created.retain(|name| {
            if let Some(id) = identity_of(source.get(name)) {
                if let Some(old_name) = target_identities.remove(&id) {
                    renamed.push(format!("{}{}{}", old_name, RENAME_SEPARATOR, name));
                    deleted.retain(|d| *d != old_name);
                    return false;
                }
            }
            true
        });
        renamed.sort();

        let mut changelist = Changelist::new();
        changelist.insert(ChangeKind::Create, created);
        changelist.insert(ChangeKind::Update, updated);
        changelist.insert(ChangeKind::Delete, deleted);
        changelist.insert(ChangeKind::Rename, renamed);
        changelist
    }
}

fn identity_of(value: Option<&Value>) -> Option<String> {
    value?
        .get(IDENTITY_KEY)?
        .as_str()
        .map(|id| id.to_string())
}

impl ChangelistSource for SnapshotComparer {
    fn create_changelist(&mut self) {
        let mut collections = self.source.collection_names();
        collections.extend(self.target.collection_names());
        collections.sort();
        collections.dedup();

        self.changelists = collections
            .into_iter()
            .map(|collection| {
                let changelist = self.diff_collection(&collection);
                (collection, changelist)
            })
            .collect();
    }

    fn has_changes(&self) -> bool {
        self.changelists
            .values()
            .any(|changelist| changelist.values().any(|names| !names.is_empty()))
    }

    fn collection_names(&self) -> Vec<String> {
        self.changelists.keys().cloned().collect()
    }

    fn changelist(&self, collection: &str) -> Changelist {
        self.changelists
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}
