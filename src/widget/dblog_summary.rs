//! Log summary widget: critical/warning counts from the database log store.

use crate::dblog::{count_severities, LogSummary, SeverityCountStore};
use crate::error::DashboardError;
use crate::features::{FeatureProbe, DBLOG_FEATURE};
use std::time::Duration;
use tracing::debug;

/// Reports critical and warning counts when database logging is available.
pub struct DbLogSummaryWidget<'a> {
    features: &'a dyn FeatureProbe,
    store: &'a dyn SeverityCountStore,
}

impl<'a> DbLogSummaryWidget<'a> {
    pub fn new(features: &'a dyn FeatureProbe, store: &'a dyn SeverityCountStore) -> Self {
        Self { features, store }
    }

    /// Build the widget output. Availability means the `dblog` feature is
    /// present; the store is never queried without it.
    pub fn build(&self) -> Result<LogSummary, DashboardError> {
        let enabled = self.features.exists(DBLOG_FEATURE);
        if !enabled {
            debug!("database logging feature absent, reporting zeros");
        }
        Ok(count_severities(enabled, self.store)?)
    }

    /// Widget renders are never cached.
    pub fn cache_max_age(&self) -> Duration {
        Duration::ZERO
    }
}
