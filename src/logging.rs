//! Logging System
//!
//! Structured logging via the `tracing` crate: configurable level, output
//! format, and destination, with `STORMDASH_LOG*` environment overrides.

use crate::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (if output is "file")
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// Enable colored output (text format, terminal destinations only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stdout".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("stormdash.log")
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: default_log_file(),
            color: default_true(),
        }
    }
}

/// Initialize the logging system.
///
/// Priority order (highest to lowest): environment variables
/// (STORMDASH_LOG, STORMDASH_LOG_FORMAT, STORMDASH_LOG_OUTPUT), the passed
/// configuration, defaults.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), DashboardError> {
    let filter = build_env_filter(config);
    let format = determine_format(config)?;
    let output = determine_output(config)?;

    let base_subscriber = Registry::default().with(filter);
    let use_color = config.map(|c| c.color).unwrap_or(true);

    let open_log_file = || -> Result<std::fs::File, DashboardError> {
        let log_file = config
            .map(|c| c.file.clone())
            .unwrap_or_else(default_log_file);
        if let Some(parent) = log_file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DashboardError::ConfigError(format!("Failed to create log directory: {}", e))
                })?;
            }
        }
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .map_err(|e| {
                DashboardError::ConfigError(format!("Failed to open log file {:?}: {}", log_file, e))
            })
    };

    if format == "json" {
        let layer = fmt::layer()
            .json()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339());
        match output.as_str() {
            "file" => {
                let writer = open_log_file()?;
                base_subscriber.with(layer.with_writer(writer)).init();
            }
            "stderr" => {
                base_subscriber.with(layer.with_writer(std::io::stderr)).init();
            }
            _ => {
                base_subscriber.with(layer.with_writer(std::io::stdout)).init();
            }
        }
    } else {
        let layer = fmt::layer()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339());
        match output.as_str() {
            "file" => {
                let writer = open_log_file()?;
                base_subscriber
                    .with(layer.with_ansi(false).with_writer(writer))
                    .init();
            }
            "stderr" => {
                base_subscriber
                    .with(layer.with_ansi(use_color).with_writer(std::io::stderr))
                    .init();
            }
            _ => {
                base_subscriber
                    .with(layer.with_ansi(use_color).with_writer(std::io::stdout))
                    .init();
            }
        }
    }

    Ok(())
}

/// Build the environment filter from STORMDASH_LOG or the configured level.
fn build_env_filter(config: Option<&LoggingConfig>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env("STORMDASH_LOG") {
        return filter;
    }
    let level = config.map(|c| c.level.as_str()).unwrap_or("info");
    EnvFilter::new(level)
}

/// Determine output format from environment or config.
fn determine_format(config: Option<&LoggingConfig>) -> Result<String, DashboardError> {
    if let Ok(format) = std::env::var("STORMDASH_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    if format != "json" && format != "text" {
        return Err(DashboardError::ConfigError(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }
    Ok(format.to_string())
}

/// Determine output destination from environment or config.
fn determine_output(config: Option<&LoggingConfig>) -> Result<String, DashboardError> {
    let output = match std::env::var("STORMDASH_LOG_OUTPUT") {
        Ok(output) => output,
        Err(_) => config
            .map(|c| c.output.clone())
            .unwrap_or_else(default_output),
    };
    match output.as_str() {
        "stdout" | "stderr" | "file" => Ok(output),
        _ => Err(DashboardError::ConfigError(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
            output
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_logging_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "text");
        assert_eq!(config.output, "stdout");
        assert!(config.color);
    }

    #[test]
    fn test_invalid_format_rejected() {
        let config = LoggingConfig {
            format: "xml".to_string(),
            ..Default::default()
        };
        assert!(determine_format(Some(&config)).is_err());
    }

    #[test]
    fn test_invalid_output_rejected() {
        let config = LoggingConfig {
            output: "syslog".to_string(),
            ..Default::default()
        };
        assert!(determine_output(Some(&config)).is_err());
    }
}
