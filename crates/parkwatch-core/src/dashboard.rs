// ── Daily dashboard aggregation view model ──
//
// Fetches the date-scoped summary and a one-shot device snapshot, then
// derives presentation-ready series without mutating any server-supplied
// number. The two fetches are independent: a summary failure is
// operator-visible, a device-table failure degrades silently to an empty
// heartbeat panel.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeDelta, Timelike, Utc};
use tracing::{debug, warn};

use parkwatch_api::ApiClient;
use parkwatch_api::types::{DashboardSummary, DeviceStatus, DeviceStatusRecord};

use crate::poller::DeviceSnapshot;

/// Devices without telemetry for this long are flagged stale on the
/// heartbeat panel. Matches the backend's health-score offline window.
pub const STALE_AFTER_DEFAULT: TimeDelta = TimeDelta::minutes(5);

/// View model for the daily dashboard.
///
/// Holds the latest summary, the latest device snapshot, and the summary
/// fetch error. Every call to [`load`](Self::load) re-fetches both --
/// switching back to a previously-viewed date re-fetches on purpose,
/// since a day's aggregates keep changing while the day progresses.
pub struct DashboardViewModel {
    client: Arc<ApiClient>,
    date: Option<NaiveDate>,
    summary: Option<DashboardSummary>,
    summary_error: Option<String>,
    devices: DeviceSnapshot,
}

impl DashboardViewModel {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            date: None,
            summary: None,
            summary_error: None,
            devices: Arc::new(Vec::new()),
        }
    }

    /// The currently-loaded date.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// The latest summary, if its fetch succeeded.
    pub fn summary(&self) -> Option<&DashboardSummary> {
        self.summary.as_ref()
    }

    /// The summary fetch error, if any. Operator-visible.
    pub fn summary_error(&self) -> Option<&str> {
        self.summary_error.as_deref()
    }

    /// The heartbeat device snapshot. Empty when its fetch failed --
    /// the panel is supplementary, so that failure stays silent.
    pub fn devices(&self) -> &DeviceSnapshot {
        &self.devices
    }

    /// Fetch the summary for `date` and the device snapshot, concurrently
    /// and independently: neither failure blocks the other's data.
    pub async fn load(&mut self, date: NaiveDate) {
        self.date = Some(date);

        let (summary, devices) = tokio::join!(
            self.client.dashboard_summary(date),
            self.client.device_status(),
        );

        match summary {
            Ok(s) => {
                debug!(%date, "dashboard summary loaded");
                self.summary = Some(s);
                self.summary_error = None;
            }
            Err(e) => {
                warn!(%date, error = %e, "dashboard summary load failed");
                self.summary = None;
                self.summary_error = Some(e.detail());
            }
        }

        self.devices = Arc::new(devices.unwrap_or_default());
    }
}

// ── Derived series (pure) ────────────────────────────────────────────

/// One bar of the hourly parking-events chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourBucket {
    /// `"<hour>:00"`, hour-of-day in the timestamp's own UTC offset.
    pub label: String,
    pub count: i64,
}

/// Derive the hourly chart series from a summary.
///
/// Ordering is preserved from the source sequence (the backend already
/// sorts chronologically). A null hour buckets to `0:00`.
pub fn hourly_series(summary: &DashboardSummary) -> Vec<HourBucket> {
    summary
        .hourly_usage
        .iter()
        .map(|entry| {
            let hour = entry.hour.map_or(0, |ts| ts.hour());
            HourBucket {
                label: format!("{hour}:00"),
                count: entry.count,
            }
        })
        .collect()
}

/// One row of the target-vs-actual efficiency table.
#[derive(Debug, Clone, PartialEq)]
pub struct EfficiencyRow {
    /// Zone code if present, else device code, else a placeholder.
    pub label: String,
    pub target: f64,
    pub actual: f64,
    /// Rounded to one decimal place for display.
    pub efficiency_pct: Option<f64>,
}

/// Derive the zone/device efficiency table from a summary.
///
/// Rows pass through unchanged apart from display rounding.
pub fn efficiency_rows(summary: &DashboardSummary) -> Vec<EfficiencyRow> {
    summary
        .zone_breakdown
        .iter()
        .map(|row| EfficiencyRow {
            label: row
                .zone_code
                .clone()
                .or_else(|| row.device_code.clone())
                .unwrap_or_else(|| "—".to_owned()),
            target: row.target,
            actual: row.actual,
            efficiency_pct: row.efficiency_pct.map(|pct| (pct * 10.0).round() / 10.0),
        })
        .collect()
}

/// One row of the device heartbeat panel.
#[derive(Debug, Clone, PartialEq)]
pub struct HeartbeatRow {
    pub code: String,
    pub zone_code: String,
    pub status: DeviceStatus,
    pub health_score: Option<f64>,
    pub last_telemetry_at: Option<DateTime<chrono::FixedOffset>>,
    pub last_parking_log_at: Option<DateTime<chrono::FixedOffset>>,
    /// No telemetry ever, or none within the staleness window.
    pub stale: bool,
}

/// Derive heartbeat rows with staleness flags.
///
/// `now` is passed in so the derivation stays pure and testable.
pub fn heartbeat_rows(
    devices: &[DeviceStatusRecord],
    now: DateTime<Utc>,
    stale_after: TimeDelta,
) -> Vec<HeartbeatRow> {
    devices
        .iter()
        .map(|d| {
            let stale = d
                .last_telemetry_at
                .is_none_or(|ts| now.signed_duration_since(ts) > stale_after);
            HeartbeatRow {
                code: d.code.clone(),
                zone_code: d.zone_code.clone(),
                status: d.status,
                health_score: d.health_score,
                last_telemetry_at: d.last_telemetry_at,
                last_parking_log_at: d.last_parking_log_at,
                stale,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use parkwatch_api::types::{HourlyUsage, ZoneBreakdownRow};

    fn summary_with(hourly: Vec<HourlyUsage>, breakdown: Vec<ZoneBreakdownRow>) -> DashboardSummary {
        DashboardSummary {
            date: Some("2024-01-01".to_owned()),
            total_parking_events: 0,
            current_occupancy_count: 0,
            active_devices_count: 0,
            alerts_triggered: 0,
            efficiency_pct: None,
            hourly_usage: hourly,
            target_actual_comparison: None,
            zone_breakdown: breakdown,
        }
    }

    fn ts(s: &str) -> DateTime<chrono::FixedOffset> {
        DateTime::parse_from_rfc3339(s).expect("static timestamp")
    }

    #[test]
    fn hourly_series_labels_and_order() {
        let summary = summary_with(
            vec![
                HourlyUsage {
                    hour: Some(ts("2024-01-01T09:00:00Z")),
                    count: 5,
                },
                HourlyUsage {
                    hour: Some(ts("2024-01-01T23:00:00Z")),
                    count: 2,
                },
                HourlyUsage { hour: None, count: 1 },
            ],
            Vec::new(),
        );

        let series = hourly_series(&summary);

        assert_eq!(series.len(), 3);
        assert_eq!(series[0], HourBucket { label: "9:00".to_owned(), count: 5 });
        assert_eq!(series[1].label, "23:00");
        // Null hour buckets to 0:00, as the original board did.
        assert_eq!(series[2].label, "0:00");
    }

    #[test]
    fn hourly_series_respects_payload_offset() {
        let summary = summary_with(
            vec![HourlyUsage {
                hour: Some(ts("2024-01-01T09:00:00+02:00")),
                count: 4,
            }],
            Vec::new(),
        );

        // Hour-of-day in the timestamp's own offset, not re-localized.
        assert_eq!(hourly_series(&summary)[0].label, "9:00");
    }

    #[test]
    fn hourly_series_is_idempotent() {
        let summary = summary_with(
            vec![HourlyUsage {
                hour: Some(ts("2024-01-01T09:00:00Z")),
                count: 5,
            }],
            Vec::new(),
        );

        assert_eq!(hourly_series(&summary), hourly_series(&summary));
    }

    #[test]
    fn efficiency_rows_round_to_one_decimal() {
        let summary = summary_with(
            Vec::new(),
            vec![ZoneBreakdownRow {
                zone_code: Some("Z1".to_owned()),
                device_code: None,
                target: 120.0,
                actual: 80.0,
                efficiency_pct: Some(66.666_666),
            }],
        );

        let rows = efficiency_rows(&summary);
        assert_eq!(rows[0].label, "Z1");
        assert_eq!(rows[0].efficiency_pct, Some(66.7));
        // Server-supplied numbers pass through unchanged.
        assert_eq!(rows[0].target, 120.0);
        assert_eq!(rows[0].actual, 80.0);
    }

    #[test]
    fn efficiency_row_label_falls_back_to_device_then_placeholder() {
        let summary = summary_with(
            Vec::new(),
            vec![
                ZoneBreakdownRow {
                    zone_code: None,
                    device_code: Some("DEV-9".to_owned()),
                    target: 1.0,
                    actual: 1.0,
                    efficiency_pct: None,
                },
                ZoneBreakdownRow {
                    zone_code: None,
                    device_code: None,
                    target: 1.0,
                    actual: 0.0,
                    efficiency_pct: None,
                },
            ],
        );

        let rows = efficiency_rows(&summary);
        assert_eq!(rows[0].label, "DEV-9");
        assert_eq!(rows[1].label, "—");
    }

    #[test]
    fn heartbeat_staleness_flags() {
        let now = DateTime::parse_from_rfc3339("2024-01-01T10:00:00Z")
            .expect("static timestamp")
            .with_timezone(&Utc);

        let fresh = DeviceStatusRecord {
            id: 1,
            code: "DEV-1".to_owned(),
            zone_id: 10,
            zone_code: "Z1".to_owned(),
            facility_id: 100,
            facility_name: "Central".to_owned(),
            status: DeviceStatus::Normal,
            health_score: Some(100.0),
            last_telemetry_at: Some(ts("2024-01-01T09:59:00Z")),
            last_parking_log_at: None,
        };
        let old = DeviceStatusRecord {
            id: 2,
            code: "DEV-2".to_owned(),
            last_telemetry_at: Some(ts("2024-01-01T09:30:00Z")),
            ..fresh.clone()
        };
        let silent = DeviceStatusRecord {
            id: 3,
            code: "DEV-3".to_owned(),
            last_telemetry_at: None,
            ..fresh.clone()
        };

        let rows = heartbeat_rows(&[fresh, old, silent], now, STALE_AFTER_DEFAULT);

        assert!(!rows[0].stale);
        assert!(rows[1].stale);
        assert!(rows[2].stale);
    }
}
