// Integration tests for `ApiClient` using wiremock.

use chrono::NaiveDate;
use futures_util::StreamExt;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use parkwatch_api::types::{DeviceStatus, Severity};
use parkwatch_api::{ApiClient, Error, ReportQuery};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_device_status_snapshot() {
    let (server, client) = setup().await;

    let body = json!([
        {
            "id": 1,
            "code": "DEV-1",
            "zone_id": 10,
            "zone_code": "Z1",
            "facility_id": 100,
            "facility_name": "Central Garage",
            "status": "CRITICAL",
            "health_score": 40.0,
            "last_telemetry_at": "2024-01-01T09:58:00+00:00",
            "last_parking_log_at": null
        },
        {
            "id": 2,
            "code": "DEV-2",
            "zone_id": 10,
            "zone_code": "Z1",
            "facility_id": 100,
            "facility_name": "Central Garage",
            "status": "OK",
            "health_score": null,
            "last_telemetry_at": null,
            "last_parking_log_at": null
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/devices/status/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let devices = client.device_status().await.unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].code, "DEV-1");
    assert_eq!(devices[0].status, DeviceStatus::Critical);
    assert_eq!(devices[0].health_score, Some(40.0));
    // Deployed backends emit "OK" for the healthy state.
    assert_eq!(devices[1].status, DeviceStatus::Normal);
    assert!(devices[1].last_telemetry_at.is_none());
}

#[tokio::test]
async fn test_device_status_scoped_params() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/devices/status/"))
        .and(query_param("facility", "100"))
        .and(query_param("zone", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let devices = client.device_status_scoped(Some(100), Some(10)).await.unwrap();
    assert!(devices.is_empty());
}

#[tokio::test]
async fn test_active_alerts_with_severity_scope() {
    let (server, client) = setup().await;

    let body = json!([
        {
            "id": 42,
            "device_code": "DEV-1",
            "severity": "CRITICAL",
            "alert_type": "OFFLINE",
            "message": "No telemetry received for 2 minutes.",
            "created_at": "2024-01-01T10:00:00+00:00",
            "acknowledged_at": null
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/alerts/"))
        .and(query_param("active", "true"))
        .and(query_param("severity", "CRITICAL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let alerts = client.active_alerts(Some(Severity::Critical)).await.unwrap();

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].id, 42);
    assert_eq!(alerts[0].severity, Severity::Critical);
    assert_eq!(alerts[0].device_code.as_deref(), Some("DEV-1"));
}

#[tokio::test]
async fn test_acknowledge_alert_commits() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/alerts/42/acknowledge/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "acknowledged_at": "2024-01-01T10:05:00+00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client.acknowledge_alert(42).await.unwrap();
}

#[tokio::test]
async fn test_dashboard_summary_parse() {
    let (server, client) = setup().await;

    let body = json!({
        "date": "2024-01-01",
        "total_parking_events": 120,
        "current_occupancy_count": 34,
        "active_devices_count": 12,
        "alerts_triggered": 3,
        "efficiency_pct": 87.5,
        "hourly_usage": [
            { "hour": "2024-01-01T09:00:00+00:00", "count": 5 },
            { "hour": "2024-01-01T10:00:00+00:00", "count": 9 }
        ],
        "target_actual_comparison": { "target": 200.0, "actual": 175.0 },
        "zone_breakdown": [
            { "zone_code": "Z1", "target": 100.0, "actual": 90.0, "efficiency_pct": 90.0 },
            { "device_code": "DEV-9", "target": 100.0, "actual": 85.0, "efficiency_pct": 85.0 }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/dashboard/summary/"))
        .and(query_param("date", "2024-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let summary = client.dashboard_summary(date("2024-01-01")).await.unwrap();

    assert_eq!(summary.total_parking_events, 120);
    assert_eq!(summary.hourly_usage.len(), 2);
    assert_eq!(summary.hourly_usage[0].count, 5);
    assert_eq!(summary.zone_breakdown[0].zone_code.as_deref(), Some("Z1"));
    assert_eq!(summary.zone_breakdown[1].device_code.as_deref(), Some("DEV-9"));
    assert_eq!(summary.efficiency_pct, Some(87.5));
}

#[tokio::test]
async fn test_download_report_streams_bytes() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/reports/usage/"))
        .and(query_param("date_from", "2024-01-01"))
        .and(query_param("date_to", "2024-01-07"))
        .and(query_param("format", "csv"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("device,count\nDEV-1,5\n", "text/csv"),
        )
        .mount(&server)
        .await;

    let query = ReportQuery {
        date_from: date("2024-01-01"),
        date_to: date("2024-01-07"),
        facility_id: None,
        zone_id: None,
    };
    let request = query.export_request(client.base_url()).unwrap();

    let stream = client.download_report(&request).await.unwrap();
    let mut stream = Box::pin(stream);

    let mut collected = Vec::new();
    while let Some(chunk) = stream.next().await {
        collected.extend_from_slice(&chunk.unwrap());
    }

    assert_eq!(collected, b"device,count\nDEV-1,5\n");
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_acknowledge_404_carries_body_text() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/alerts/999/acknowledge/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found."))
        .mount(&server)
        .await;

    let result = client.acknowledge_alert(999).await;

    match result {
        Err(Error::Server { status, ref body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "Not found.");
        }
        other => panic!("expected Server error, got: {other:?}"),
    }

    // detail() is the operator-facing text: the body verbatim.
    assert_eq!(result.unwrap_err().detail(), "Not found.");
}

#[tokio::test]
async fn test_server_500_is_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let result = client.device_status().await;

    match result {
        Err(Error::Server { status, ref body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("expected Server error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/devices/status/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.device_status().await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => {
            assert_eq!(body, "not json");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_network_failure_is_transport_error() {
    // Nothing listening on this port.
    let client =
        ApiClient::from_reqwest("http://127.0.0.1:9", reqwest::Client::new()).unwrap();

    let result = client.device_status().await;

    match result {
        Err(ref e @ Error::Transport(_)) => assert!(e.is_network()),
        other => panic!("expected Transport error, got: {other:?}"),
    }
}
