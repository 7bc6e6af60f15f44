//! Device-status command handler: one-shot table or watch mode.

use std::sync::Arc;
use std::time::Duration;

use tabled::Tabled;

use parkwatch_api::ApiClient;
use parkwatch_config::MonitorConfig;
use parkwatch_core::{DeviceSnapshot, StatusPoller, filter_devices};

use crate::cli::{DevicesArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Zone")]
    zone: String,
    #[tabled(rename = "Facility")]
    facility: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Health")]
    health: String,
    #[tabled(rename = "Last telemetry")]
    last_telemetry: String,
}

impl DeviceRow {
    fn from_record(record: &parkwatch_core::DeviceStatusRecord, color: bool) -> Self {
        Self {
            code: record.code.clone(),
            zone: record.zone_code.clone(),
            facility: record.facility_name.clone(),
            status: util::paint_status(record.status, color),
            health: util::fmt_score(record.health_score),
            last_telemetry: util::fmt_timestamp(record.last_telemetry_at),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &Arc<ApiClient>,
    monitor: &MonitorConfig,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let query = args.search.unwrap_or_default();

    if args.watch {
        let poller = StatusPoller::new(Arc::clone(client));
        watch(&poller, monitor, &query, args.interval, global).await;
        return Ok(());
    }

    // One-shot: fetch directly so the typed error keeps its exit-code
    // mapping (connection vs not-found vs backend).
    let records = client.device_status().await?;
    print_snapshot(&Arc::new(records), &query, global);
    Ok(())
}

/// Poll on a fixed cadence and reprint the filtered table on every state
/// replacement, until Ctrl-C.
async fn watch(
    poller: &StatusPoller,
    monitor: &MonitorConfig,
    query: &str,
    interval: Option<u64>,
    global: &GlobalOpts,
) {
    let period = interval.map_or(monitor.poll_interval, Duration::from_secs);

    let mut state_rx = poller.subscribe();
    let handle = poller.start(period);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = state_rx.borrow_and_update().clone();
                if let Some(message) = state.error {
                    eprintln!("poll failed: {message}");
                } else {
                    print_snapshot(&state.devices, query, global);
                }
            }
        }
    }

    handle.shutdown().await;
}

fn print_snapshot(snapshot: &DeviceSnapshot, query: &str, global: &GlobalOpts) {
    let filtered = filter_devices(snapshot, query);
    let color = output::should_color(&global.color);

    let out = output::render_list(
        &global.output,
        &filtered,
        |d| DeviceRow::from_record(d, color),
        |d| d.code.clone(),
    );
    output::print_output(&out, global.quiet);
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeDelta;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::cli::{ColorMode, OutputFormat};
    use crate::error::exit_code;

    fn global() -> GlobalOpts {
        GlobalOpts {
            backend: None,
            output: OutputFormat::Plain,
            color: ColorMode::Never,
            verbose: 0,
            quiet: true,
            timeout: None,
        }
    }

    fn monitor(uri: &str) -> MonitorConfig {
        MonitorConfig {
            base_url: Url::parse(uri).expect("mock server URI"),
            poll_interval: Duration::from_secs(10),
            timeout: Duration::from_secs(5),
            stale_after: TimeDelta::minutes(5),
        }
    }

    fn one_shot() -> DevicesArgs {
        DevicesArgs {
            search: None,
            watch: false,
            interval: None,
        }
    }

    #[tokio::test]
    async fn one_shot_not_found_maps_to_not_found_exit_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/devices/status/"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not found."))
            .mount(&server)
            .await;

        let client = Arc::new(
            ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap(),
        );

        let err = handle(&client, &monitor(&server.uri()), one_shot(), &global())
            .await
            .expect_err("404 should fail");
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
    }

    #[tokio::test]
    async fn one_shot_unreachable_backend_maps_to_connection_exit_code() {
        // Port 9 (discard) refuses connections.
        let client = Arc::new(
            ApiClient::from_reqwest("http://127.0.0.1:9", reqwest::Client::new()).unwrap(),
        );

        let err = handle(&client, &monitor("http://127.0.0.1:9"), one_shot(), &global())
            .await
            .expect_err("connect should fail");
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
    }
}
