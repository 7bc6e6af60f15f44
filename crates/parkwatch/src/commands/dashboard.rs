//! Daily dashboard command handler.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{Local, Utc};
use tabled::Tabled;

use parkwatch_api::ApiClient;
use parkwatch_api::types::DashboardSummary;
use parkwatch_config::MonitorConfig;
use parkwatch_core::{
    DashboardViewModel, DeviceStatusRecord, efficiency_rows, heartbeat_rows, hourly_series,
};

use crate::cli::{DashboardArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct HourRow {
    #[tabled(rename = "Hour")]
    hour: String,
    #[tabled(rename = "Events")]
    events: i64,
}

#[derive(Tabled)]
struct EfficiencyTableRow {
    #[tabled(rename = "Zone/Device")]
    label: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Efficiency")]
    efficiency: String,
}

#[derive(Tabled)]
struct HeartbeatTableRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Zone")]
    zone: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Health")]
    health: String,
    #[tabled(rename = "Last telemetry")]
    last_telemetry: String,
    #[tabled(rename = "Stale")]
    stale: String,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: Arc<ApiClient>,
    monitor: &MonitorConfig,
    args: DashboardArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());

    let mut vm = DashboardViewModel::new(client);
    vm.load(date).await;

    if let Some(message) = vm.summary_error() {
        return Err(CliError::Backend {
            message: message.to_owned(),
        });
    }
    let Some(summary) = vm.summary() else {
        return Err(CliError::Backend {
            message: "empty dashboard response".to_owned(),
        });
    };

    let devices = vm.devices().clone();
    let color = output::should_color(&global.color);
    let stale_after = monitor.stale_after;

    let out = output::render_single(
        &global.output,
        summary,
        |s| render_dashboard(s, &devices, stale_after, color),
        |s| s.date.clone().unwrap_or_else(|| date.to_string()),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Table rendering ─────────────────────────────────────────────────

fn render_dashboard(
    summary: &DashboardSummary,
    devices: &[DeviceStatusRecord],
    stale_after: chrono::TimeDelta,
    color: bool,
) -> String {
    let mut out = String::new();

    let date = summary.date.as_deref().unwrap_or("-");
    let _ = writeln!(out, "Dashboard for {date}");
    let _ = writeln!(out, "  Parking events:   {}", summary.total_parking_events);
    let _ = writeln!(out, "  Current occupancy: {}", summary.current_occupancy_count);
    let _ = writeln!(out, "  Active devices:   {}", summary.active_devices_count);
    let _ = writeln!(out, "  Alerts triggered: {}", summary.alerts_triggered);
    if let Some(pct) = summary.efficiency_pct {
        let _ = writeln!(out, "  Overall efficiency: {pct:.1}%");
    }

    let hours: Vec<HourRow> = hourly_series(summary)
        .into_iter()
        .map(|b| HourRow {
            hour: b.label,
            events: b.count,
        })
        .collect();
    if !hours.is_empty() {
        let _ = writeln!(out, "\nHourly usage");
        let _ = writeln!(out, "{}", output::render_table(&hours));
    }

    let efficiency: Vec<EfficiencyTableRow> = efficiency_rows(summary)
        .into_iter()
        .map(|r| EfficiencyTableRow {
            label: r.label,
            target: format!("{:.0}", r.target),
            actual: format!("{:.0}", r.actual),
            efficiency: r
                .efficiency_pct
                .map_or_else(|| "-".to_owned(), |pct| format!("{pct:.1}%")),
        })
        .collect();
    if !efficiency.is_empty() {
        let _ = writeln!(out, "\nTarget vs actual");
        let _ = writeln!(out, "{}", output::render_table(&efficiency));
    }

    let heartbeats: Vec<HeartbeatTableRow> = heartbeat_rows(devices, Utc::now(), stale_after)
        .into_iter()
        .map(|r| HeartbeatTableRow {
            code: r.code,
            zone: r.zone_code,
            status: util::paint_status(r.status, color),
            health: util::fmt_score(r.health_score),
            last_telemetry: util::fmt_timestamp(r.last_telemetry_at),
            stale: if r.stale { "yes" } else { "no" }.into(),
        })
        .collect();
    if !heartbeats.is_empty() {
        let _ = writeln!(out, "\nDevice heartbeats");
        let _ = writeln!(out, "{}", output::render_table(&heartbeats));
    }

    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out
}
