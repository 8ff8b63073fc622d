//! CLI domain: clap definitions and command execution.
//!
//! `RunContext` holds the loaded configuration and dispatches commands to
//! the widgets; handlers return the rendered output string.

use crate::config::DashboardConfig;
use crate::dblog::{LogRecord, LogSummary, SledLogStore};
use crate::error::DashboardError;
use crate::features::{FeatureProbe, StaticFeatureSet, DBLOG_FEATURE};
use crate::render;
use crate::snapshot::DirSnapshotStorage;
use crate::transform::IdentityTransformer;
use crate::types::Severity;
use crate::widget::{ConfigStatusOutput, ConfigStatusWidget, DashboardStatus, DbLogSummaryWidget};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

/// Stormdash CLI - Administrative dashboard widgets for Storm CMS
#[derive(Parser)]
#[command(name = "stormdash")]
#[command(about = "Administrative dashboard widgets: configuration drift and log summaries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show dashboard status (configuration drift, log summary)
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Show only the configuration status widget
        #[arg(long)]
        config_only: bool,
        /// Show only the log summary widget
        #[arg(long)]
        logs_only: bool,
    },
    /// Log store operations
    Log {
        #[command(subcommand)]
        command: LogCommands,
    },
}

#[derive(Subcommand)]
pub enum LogCommands {
    /// Append a record to the log store
    Record {
        /// Record severity (emergency, alert, critical, error, warning, notice, info, debug)
        #[arg(long, default_value = "notice")]
        severity: Severity,
        /// Channel the record originates from
        #[arg(long, default_value = "stormdash")]
        channel: String,
        /// Log message
        message: String,
    },
}

/// Execution context: workspace root plus loaded configuration.
pub struct RunContext {
    workspace: PathBuf,
    config: DashboardConfig,
}

impl RunContext {
    pub fn new(workspace: PathBuf, config_path: Option<PathBuf>) -> Result<Self, DashboardError> {
        let config = match config_path {
            Some(ref path) => DashboardConfig::load_from_file(path)?,
            None => DashboardConfig::load(&workspace)?,
        };
        Ok(Self { workspace, config })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Execute a command, returning its rendered output.
    pub fn execute(&self, command: &Commands) -> Result<String, DashboardError> {
        match command {
            Commands::Status {
                format,
                config_only,
                logs_only,
            } => self.run_status(format, *config_only, *logs_only),
            Commands::Log {
                command: LogCommands::Record {
                    severity,
                    channel,
                    message,
                },
            } => self.run_log_record(*severity, channel, message),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace.join(path)
        }
    }

    fn build_config_status(&self) -> Result<ConfigStatusOutput, DashboardError> {
        let sync = DirSnapshotStorage::new(self.resolve(&self.config.sync_dir));
        let active = DirSnapshotStorage::new(self.resolve(&self.config.active_dir));
        let transformer = IdentityTransformer;
        ConfigStatusWidget::new(&sync, &active, &transformer).build()
    }

    fn build_log_summary(&self) -> Result<LogSummary, DashboardError> {
        let features = StaticFeatureSet::new(self.config.features.iter().cloned());
        // Opening the store would create its database; skip it entirely
        // when the feature is absent.
        if !features.exists(DBLOG_FEATURE) {
            return Ok(LogSummary::unavailable());
        }
        let store = self.open_log_store()?;
        DbLogSummaryWidget::new(&features, &store).build()
    }

    fn open_log_store(&self) -> Result<SledLogStore, DashboardError> {
        let path = self.resolve(&self.config.log_db_path()?);
        Ok(SledLogStore::new(path)?)
    }

    fn run_status(
        &self,
        format: &str,
        config_only: bool,
        logs_only: bool,
    ) -> Result<String, DashboardError> {
        if config_only && logs_only {
            return Err(DashboardError::ConfigError(
                "--config-only and --logs-only are mutually exclusive".to_string(),
            ));
        }

        match format {
            "json" => {
                let json = if config_only {
                    to_json(&self.build_config_status()?)?
                } else if logs_only {
                    to_json(&self.build_log_summary()?)?
                } else {
                    to_json(&DashboardStatus {
                        config: self.build_config_status()?,
                        logs: self.build_log_summary()?,
                    })?
                };
                Ok(json)
            }
            "text" => {
                let mut out = String::new();
                if !logs_only {
                    out.push_str(&render::format_config_status_text(
                        &self.build_config_status()?,
                    ));
                }
                if !config_only {
                    if !logs_only {
                        out.push('\n');
                    }
                    out.push_str(&render::format_log_summary_text(&self.build_log_summary()?));
                }
                Ok(out)
            }
            other => Err(DashboardError::ConfigError(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }

    fn run_log_record(
        &self,
        severity: Severity,
        channel: &str,
        message: &str,
    ) -> Result<String, DashboardError> {
        let store = self.open_log_store()?;
        let record = LogRecord::new(severity, channel, message);
        let id = store.append(&record)?;
        store.flush()?;
        info!(id, severity = %severity, channel, "log record appended");
        Ok(format!("Recorded {} entry {}.", severity, id))
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, DashboardError> {
    serde_json::to_string_pretty(value).map_err(|e| DashboardError::Serialization(e.to_string()))
}

/// Map domain errors to a string for CLI output.
/// Keeps route handlers thin; extend with stable categories if needed.
pub fn map_error(e: &DashboardError) -> String {
    e.to_string()
}
