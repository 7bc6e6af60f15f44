//! Wire types for the parkwatch backend JSON API.
//!
//! Field names match the snake_case wire format directly, so no serde
//! renames are needed. Timestamps are RFC 3339 with whatever UTC offset
//! the backend serialized; the offset is preserved because hour-of-day
//! derivation on the dashboard respects it.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

// ── Device status ────────────────────────────────────────────────────

/// Per-device health classification.
///
/// Derived by the backend from open alerts: a device with an open
/// CRITICAL alert is `Critical`, with an open WARNING alert `Warning`,
/// otherwise `Normal`. Deployed backends emit `"OK"` for the healthy
/// state, accepted here as an alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceStatus {
    #[serde(alias = "OK")]
    Normal,
    Warning,
    Critical,
}

impl DeviceStatus {
    pub fn is_healthy(self) -> bool {
        matches!(self, Self::Normal)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }
}

/// One row of `GET /api/devices/status/` -- the live snapshot of a single
/// physical parking sensor. Produced fresh on every poll; never mutated
/// client-side, only replaced wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatusRecord {
    pub id: i64,
    /// Human-readable device code (e.g. `DEV-1`).
    pub code: String,
    pub zone_id: i64,
    pub zone_code: String,
    pub facility_id: i64,
    pub facility_name: String,
    pub status: DeviceStatus,
    /// 0-100 score computed by the backend; absent when never scored.
    pub health_score: Option<f64>,
    pub last_telemetry_at: Option<DateTime<FixedOffset>>,
    pub last_parking_log_at: Option<DateTime<FixedOffset>>,
}

// ── Alerts ───────────────────────────────────────────────────────────

/// Alert severity, also used as the `severity` query-parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One raised condition from `GET /api/alerts/`.
///
/// An alert is either active or acknowledged; acknowledgment is monotonic
/// and happens exactly once. The active-alert query simply stops
/// returning it afterwards, so `acknowledged_at` is only populated when
/// querying historical (non-active) alerts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: i64,
    /// Absent for fleet-level alerts not tied to one device.
    pub device_code: Option<String>,
    pub severity: Severity,
    pub alert_type: String,
    pub message: String,
    pub created_at: DateTime<FixedOffset>,
    #[serde(default)]
    pub acknowledged_at: Option<DateTime<FixedOffset>>,
}

// ── Dashboard summary ────────────────────────────────────────────────

/// One entry of the hourly parking-event histogram.
///
/// The backend truncates timestamps to the hour; a null hour can appear
/// for rows it could not bucket and maps to the `0:00` label downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyUsage {
    pub hour: Option<DateTime<FixedOffset>>,
    pub count: i64,
}

/// Target-vs-actual row, scoped to a zone or a single device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneBreakdownRow {
    #[serde(default)]
    pub zone_code: Option<String>,
    #[serde(default)]
    pub device_code: Option<String>,
    pub target: f64,
    pub actual: f64,
    #[serde(default)]
    pub efficiency_pct: Option<f64>,
}

/// Fleet-wide target/actual totals across all breakdown rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetActualTotals {
    pub target: f64,
    pub actual: f64,
}

/// `GET /api/dashboard/summary/?date=YYYY-MM-DD` -- aggregates for one
/// calendar date. Immutable once fetched; re-fetched wholesale whenever
/// the selected date changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Echo of the requested date (`YYYY-MM-DD`).
    #[serde(default)]
    pub date: Option<String>,
    pub total_parking_events: i64,
    pub current_occupancy_count: i64,
    pub active_devices_count: i64,
    pub alerts_triggered: i64,
    /// Overall efficiency; `None` when no targets exist for the date.
    #[serde(default)]
    pub efficiency_pct: Option<f64>,
    /// Chronological, one entry per observed hour.
    #[serde(default)]
    pub hourly_usage: Vec<HourlyUsage>,
    #[serde(default)]
    pub target_actual_comparison: Option<TargetActualTotals>,
    #[serde(default)]
    pub zone_breakdown: Vec<ZoneBreakdownRow>,
}
