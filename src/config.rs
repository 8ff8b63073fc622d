//! Crate configuration.
//!
//! Resolves where the dashboard finds its inputs: the sync and active
//! configuration directories, the log database, and the enabled feature
//! list. Loaded with layered sources: defaults, then `stormdash.toml` in
//! the workspace, then `STORMDASH_*` environment variables.

use crate::error::DashboardError;
use crate::features::DBLOG_FEATURE;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file name looked up in the workspace root.
pub const CONFIG_FILE: &str = "stormdash.toml";

/// Root configuration for the CLI and embedding applications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Directory holding the exported (sync) configuration.
    #[serde(default = "default_sync_dir")]
    pub sync_dir: PathBuf,

    /// Directory holding the active configuration.
    #[serde(default = "default_active_dir")]
    pub active_dir: PathBuf,

    /// Log database path. Resolved under the user data directory when unset.
    #[serde(default)]
    pub log_db: Option<PathBuf>,

    /// Enabled features of the embedding application.
    #[serde(default = "default_features")]
    pub features: Vec<String>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_sync_dir() -> PathBuf {
    PathBuf::from("config/sync")
}

fn default_active_dir() -> PathBuf {
    PathBuf::from("config/active")
}

fn default_features() -> Vec<String> {
    vec![DBLOG_FEATURE.to_string()]
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sync_dir: default_sync_dir(),
            active_dir: default_active_dir(),
            log_db: None,
            features: default_features(),
            logging: LoggingConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration for a workspace.
    ///
    /// Sources, lowest to highest precedence: defaults, `stormdash.toml`
    /// under the workspace root (optional), `STORMDASH_*` environment
    /// variables (`__` separates nested keys, e.g. `STORMDASH_LOGGING__LEVEL`).
    pub fn load(workspace_root: &Path) -> Result<Self, DashboardError> {
        let path = workspace_root.join(CONFIG_FILE);
        let mut builder = Config::builder();
        if path.is_file() {
            builder = builder.add_source(File::from(path).required(false));
        }
        let settings = builder
            .add_source(Environment::with_prefix("STORMDASH").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Load configuration from an explicit file, no environment layering.
    pub fn load_from_file(path: &Path) -> Result<Self, DashboardError> {
        let settings = Config::builder()
            .add_source(File::from(path.to_path_buf()))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Resolve the log database path, defaulting under the user data dir.
    pub fn log_db_path(&self) -> Result<PathBuf, DashboardError> {
        if let Some(ref path) = self.log_db {
            return Ok(path.clone());
        }
        let dirs = ProjectDirs::from("", "", "stormdash").ok_or_else(|| {
            DashboardError::ConfigError("Cannot determine user data directory".to_string())
        })?;
        Ok(dirs.data_dir().join("dblog"))
    }
}
