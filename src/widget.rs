//! Dashboard widgets.
//!
//! Thin adapters from injected platform capabilities to render-ready output
//! records. Widgets hold no state between builds and declare a zero-duration
//! cache lifetime: the embedding display layer must recompute on every
//! render, never serve a stale one.

pub mod config_status;
pub mod dblog_summary;

pub use config_status::{ConfigStatusOutput, ConfigStatusWidget};
pub use dblog_summary::DbLogSummaryWidget;

use crate::dblog::LogSummary;
use serde::{Deserialize, Serialize};

/// Combined output for the dashboard status view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStatus {
    pub config: ConfigStatusOutput,
    pub logs: LogSummary,
}
