//! Text rendering for widget outputs.
//!
//! Produces the human-readable form of each widget for `stormdash status`:
//! styled section headings and comfy-table tables. JSON output is plain
//! serde serialization of the output records, handled by the CLI.

use crate::dblog::LogSummary;
use crate::widget::{ConfigStatusOutput, DashboardStatus};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline. Honors NO_COLOR and TTY.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Format the configuration status widget as human-readable text.
pub fn format_config_status_text(output: &ConfigStatusOutput) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading("Configuration Status")
    ));
    out.push_str(&format!("{}\n", output.status_message));
    if !output.changes.is_empty() {
        out.push('\n');
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Change", "Entries"]);
        for (kind, count) in &output.changes {
            table.add_row(vec![kind.to_string(), count.to_string()]);
        }
        out.push_str(&format!("{}\n", table));
    }
    out
}

/// Format the log summary widget as human-readable text.
pub fn format_log_summary_text(summary: &LogSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Log Summary")));
    if !summary.logging_available {
        out.push_str("Database logging is not enabled.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Severity", "Entries"]);
    table.add_row(vec!["critical".to_string(), summary.criticals.to_string()]);
    table.add_row(vec!["warning".to_string(), summary.warnings.to_string()]);
    out.push_str(&format!("{}\n", table));
    out
}

/// Format the combined dashboard status as human-readable text.
pub fn format_dashboard_text(status: &DashboardStatus) -> String {
    let mut out = String::new();
    out.push_str(&format_config_status_text(&status.config));
    out.push('\n');
    out.push_str(&format_log_summary_text(&status.logs));
    out
}
