//! Sled-backed log store.
//!
//! Records are bincode-encoded under monotonically increasing big-endian
//! u64 keys, so iteration order is append order.

use super::SeverityCountStore;
use crate::error::StorageError;
use crate::types::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    /// Subsystem the entry originated from (e.g. "cron", "php").
    pub channel: String,
    pub message: String,
}

impl LogRecord {
    /// New record stamped with the current time.
    pub fn new(
        severity: Severity,
        channel: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            severity,
            channel: channel.into(),
            message: message.into(),
        }
    }
}

/// Sled-based log store implementing the severity counting capability.
pub struct SledLogStore {
    db: sled::Db,
}

impl SledLogStore {
    /// Open (or create) the store at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path).map_err(|e| StorageError::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Append a record, returning its assigned id.
    pub fn append(&self, record: &LogRecord) -> Result<u64, StorageError> {
        let id = self
            .db
            .generate_id()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let value =
            bincode::serialize(record).map_err(|e| StorageError::Encoding(e.to_string()))?;
        self.db
            .insert(id.to_be_bytes(), value)
            .map_err(|e| StorageError::Database(e.to_string()))?;
        Ok(id)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// Flush pending writes to disk.
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db
            .flush()
            .map(|_| ())
            .map_err(|e| StorageError::Database(e.to_string()))
    }
}

impl SeverityCountStore for SledLogStore {
    fn count_by_severity(&self, severity: Severity) -> Result<u64, StorageError> {
        let mut count = 0;
        for item in self.db.iter() {
            let (_, value) = item.map_err(|e| StorageError::Database(e.to_string()))?;
            let record: LogRecord = bincode::deserialize(&value)
                .map_err(|e| StorageError::Encoding(e.to_string()))?;
            if record.severity == severity {
                count += 1;
            }
        }
        Ok(count)
    }
}
