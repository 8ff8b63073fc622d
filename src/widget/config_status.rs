//! Configuration status widget: pending drift between the synchronized
//! snapshot and the active configuration.

use crate::comparer::{ChangelistSource, SnapshotComparer};
use crate::drift::{summarize_drift, ChangeSummary, DriftStatus};
use crate::error::DashboardError;
use crate::snapshot::SnapshotStorage;
use crate::transform::StorageTransformer;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Status message when no changes are pending.
pub const UP_TO_DATE_MESSAGE: &str = "All configurations are up to date.";

/// Status message when changes are pending.
pub const PENDING_MESSAGE: &str = "There are pending configuration changes.";

/// Render-ready output of the configuration status widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigStatusOutput {
    pub status_message: String,
    pub changes: ChangeSummary,
}

/// Reports pending configuration drift.
///
/// Capabilities are injected at construction; every `build` recomputes the
/// comparison from scratch.
pub struct ConfigStatusWidget<'a> {
    sync_storage: &'a dyn SnapshotStorage,
    active_storage: &'a dyn SnapshotStorage,
    transformer: &'a dyn StorageTransformer,
}

impl<'a> ConfigStatusWidget<'a> {
    pub fn new(
        sync_storage: &'a dyn SnapshotStorage,
        active_storage: &'a dyn SnapshotStorage,
        transformer: &'a dyn StorageTransformer,
    ) -> Self {
        Self {
            sync_storage,
            active_storage,
            transformer,
        }
    }

    /// Build the widget output.
    pub fn build(&self) -> Result<ConfigStatusOutput, DashboardError> {
        let sync = self.transformer.transform(self.sync_storage)?;
        let active = self.active_storage.load()?;

        let mut comparer = SnapshotComparer::new(sync.clone(), active);
        comparer.create_changelist();

        match summarize_drift(&sync, &comparer) {
            DriftStatus::UpToDate => Ok(ConfigStatusOutput {
                status_message: UP_TO_DATE_MESSAGE.to_string(),
                changes: ChangeSummary::new(),
            }),
            DriftStatus::Pending(changes) => {
                debug!(kinds = changes.len(), "pending configuration changes");
                Ok(ConfigStatusOutput {
                    status_message: PENDING_MESSAGE.to_string(),
                    changes,
                })
            }
        }
    }

    /// Widget renders are never cached.
    pub fn cache_max_age(&self) -> Duration {
        Duration::ZERO
    }
}
