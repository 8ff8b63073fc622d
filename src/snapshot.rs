//! Configuration snapshots and snapshot storage.
//!
//! A snapshot is one point-in-time view of system configuration: named
//! entries with structured payloads, grouped into collections (independent
//! namespaces, e.g. per-language overrides). Storage backends expose the
//! read-only, key-enumerable interface the widgets consume.

pub mod dir;

pub use dir::DirSnapshotStorage;

use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Name of the default (unnamed) collection.
pub const DEFAULT_COLLECTION: &str = "";

/// One point-in-time view of system configuration, grouped by collection.
///
/// Entries within a collection are ordered by name; collections are ordered
/// by collection name with the default collection first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    collections: BTreeMap<String, BTreeMap<String, Value>>,
}

impl ConfigSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry in the given collection.
    pub fn insert(&mut self, collection: &str, name: &str, value: Value) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(name.to_string(), value);
    }

    /// Entry payload, if present.
    pub fn get(&self, collection: &str, name: &str) -> Option<&Value> {
        self.collections.get(collection)?.get(name)
    }

    /// Names of all collections present in the snapshot.
    pub fn collection_names(&self) -> Vec<String> {
        self.collections.keys().cloned().collect()
    }

    /// Entries of one collection, ordered by name. Empty for an absent collection.
    pub fn collection(&self, name: &str) -> Option<&BTreeMap<String, Value>> {
        self.collections.get(name)
    }

    /// Entry names of one collection, ordered.
    pub fn list_all(&self, collection: &str) -> Vec<String> {
        self.collections
            .get(collection)
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// True when no collection holds any entry.
    pub fn is_empty(&self) -> bool {
        self.collections.values().all(|entries| entries.is_empty())
    }

    /// Total entry count across all collections.
    pub fn len(&self) -> usize {
        self.collections.values().map(|entries| entries.len()).sum()
    }
}

/// Read-only, key-enumerable configuration storage.
pub trait SnapshotStorage {
    /// Names of all collections the storage holds, including the default one.
    fn collection_names(&self) -> Result<Vec<String>, StorageError>;

    /// Entry names of one collection, ordered.
    fn list_all(&self, collection: &str) -> Result<Vec<String>, StorageError>;

    /// Entry payload, or `None` when the entry does not exist.
    fn read(&self, collection: &str, name: &str) -> Result<Option<Value>, StorageError>;

    /// Materialize the full snapshot.
    fn load(&self) -> Result<ConfigSnapshot, StorageError> {
        let mut snapshot = ConfigSnapshot::new();
        for collection in self.collection_names()? {
            for name in self.list_all(&collection)? {
                if let Some(value) = self.read(&collection, &name)? {
                    snapshot.insert(&collection, &name, value);
                }
            }
        }
        Ok(snapshot)
    }
}

/// In-memory snapshot storage for tests and embedding applications.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStorage {
    snapshot: ConfigSnapshot,
}

impl MemorySnapshotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: ConfigSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn insert(&mut self, collection: &str, name: &str, value: Value) {
        self.snapshot.insert(collection, name, value);
    }
}

impl SnapshotStorage for MemorySnapshotStorage {
    fn collection_names(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.snapshot.collection_names())
    }

    fn list_all(&self, collection: &str) -> Result<Vec<String>, StorageError> {
        Ok(self.snapshot.list_all(collection))
    }

    fn read(&self, collection: &str, name: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.snapshot.get(collection, name).cloned())
    }

    fn load(&self) -> Result<ConfigSnapshot, StorageError> {
        Ok(self.snapshot.clone())
    }
}
