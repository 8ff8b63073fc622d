//! Log summary: severity counting over the database-backed log store.

pub mod store;

pub use store::{LogRecord, SledLogStore};

use crate::error::StorageError;
use crate::types::Severity;
use serde::{Deserialize, Serialize};

/// Counting capability over the log store.
pub trait SeverityCountStore {
    fn count_by_severity(&self, severity: Severity) -> Result<u64, StorageError>;
}

/// Critical/warning counts for the log summary widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSummary {
    pub criticals: u64,
    pub warnings: u64,
    pub logging_available: bool,
}

impl LogSummary {
    /// Summary reported when the log subsystem is unavailable.
    pub fn unavailable() -> Self {
        Self {
            criticals: 0,
            warnings: 0,
            logging_available: false,
        }
    }
}

/// Count critical and warning entries, or report zeros when logging is
/// disabled.
///
/// With `logging_enabled` false the store is never queried; its backing
/// database may not exist.
pub fn count_severities(
    logging_enabled: bool,
    store: &dyn SeverityCountStore,
) -> Result<LogSummary, StorageError> {
    if !logging_enabled {
        return Ok(LogSummary::unavailable());
    }
    Ok(LogSummary {
        criticals: store.count_by_severity(Severity::Critical)?,
        warnings: store.count_by_severity(Severity::Warning)?,
        logging_available: true,
    })
}
