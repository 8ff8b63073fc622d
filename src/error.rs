//! Error types for the Storm dashboard widgets.

use thiserror::Error;

/// Storage-related errors: configuration snapshots and the log store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Invalid config entry {name}: {reason}")]
    InvalidEntry { name: String, reason: String },

    #[error("Log database error: {0}")]
    Database(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Widget and CLI layer errors.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Snapshot transform failed: {0}")]
    TransformError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for DashboardError {
    fn from(err: config::ConfigError) -> Self {
        DashboardError::ConfigError(err.to_string())
    }
}
