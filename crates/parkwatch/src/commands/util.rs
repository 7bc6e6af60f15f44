//! Shared helpers for command handlers.

use chrono::{DateTime, FixedOffset};
use owo_colors::OwoColorize;

use parkwatch_api::types::{DeviceStatus, Severity};

/// Status cell text, colored when the terminal supports it.
pub fn paint_status(status: DeviceStatus, color: bool) -> String {
    if !color {
        return status.as_str().to_owned();
    }
    match status {
        DeviceStatus::Normal => status.as_str().green().to_string(),
        DeviceStatus::Warning => status.as_str().yellow().to_string(),
        DeviceStatus::Critical => status.as_str().red().to_string(),
    }
}

/// Severity cell text, colored when the terminal supports it.
pub fn paint_severity(severity: Severity, color: bool) -> String {
    if !color {
        return severity.as_str().to_owned();
    }
    match severity {
        Severity::Info => severity.as_str().cyan().to_string(),
        Severity::Warning => severity.as_str().yellow().to_string(),
        Severity::Critical => severity.as_str().red().to_string(),
    }
}

/// Render an optional timestamp, `-` when absent.
pub fn fmt_timestamp(ts: Option<DateTime<FixedOffset>>) -> String {
    ts.map_or_else(|| "-".to_owned(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Render an optional score with one decimal place, `-` when absent.
pub fn fmt_score(score: Option<f64>) -> String {
    score.map_or_else(|| "-".to_owned(), |s| format!("{s:.1}"))
}
