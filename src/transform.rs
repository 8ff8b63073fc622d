//! Snapshot transformation applied to the sync storage before comparison.
//!
//! The embedding application may rewrite exported configuration on the way
//! in (environment splits, ignored keys). The widgets only consume the seam;
//! the identity transformer is the default.

use crate::error::DashboardError;
use crate::snapshot::{ConfigSnapshot, SnapshotStorage};

/// Transforms a sync-side storage into its comparable snapshot form.
pub trait StorageTransformer {
    fn transform(&self, storage: &dyn SnapshotStorage) -> Result<ConfigSnapshot, DashboardError>;
}

/// Passes the stored configuration through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransformer;

impl StorageTransformer for IdentityTransformer {
    fn transform(&self, storage: &dyn SnapshotStorage) -> Result<ConfigSnapshot, DashboardError> {
        Ok(storage.load()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{MemorySnapshotStorage, DEFAULT_COLLECTION};
    use serde_json::json;

    #[test]
    fn test_identity_transform_preserves_entries() {
        let mut storage = MemorySnapshotStorage::new();
        storage.insert(DEFAULT_COLLECTION, "system.site", json!({"name": "Storm"}));

        let snapshot = IdentityTransformer.transform(&storage).unwrap();
        assert_eq!(
            snapshot.get(DEFAULT_COLLECTION, "system.site"),
            Some(&json!({"name": "Storm"}))
        );
    }
}
