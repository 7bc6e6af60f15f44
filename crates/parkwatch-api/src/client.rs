// HTTP client for the parkwatch monitoring backend.
//
// Wraps `reqwest::Client` with base-URL joining, status checking, and
// body-preserving error capture. The backend reports failures as an HTTP
// status plus a plain-text body, so every non-2xx response is captured
// verbatim into `Error::Server` before the caller sees it.

use bytes::Bytes;
use chrono::NaiveDate;
use futures_core::Stream;
use futures_util::TryStreamExt;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::report::ExportRequest;
use crate::transport::TransportConfig;
use crate::types::{AlertRecord, DashboardSummary, DeviceStatusRecord, Severity};

/// Async client for the parkwatch backend API.
///
/// The base URL is injected at construction -- there is deliberately no
/// global backend origin, so tests and tools can point each client at a
/// different (or fake) backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Create a new client from a base URL and transport config.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client`.
    ///
    /// Used by tests to point at a mock server URI.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET /api/devices/status/` -- the full device-status snapshot.
    pub async fn device_status(&self) -> Result<Vec<DeviceStatusRecord>, Error> {
        self.device_status_scoped(None, None).await
    }

    /// Device-status snapshot scoped to a facility and/or zone.
    pub async fn device_status_scoped(
        &self,
        facility_id: Option<i64>,
        zone_id: Option<i64>,
    ) -> Result<Vec<DeviceStatusRecord>, Error> {
        let url = self.base_url.join("/api/devices/status/")?;
        debug!("GET {url}");

        let mut request = self.http.get(url);
        if let Some(facility) = facility_id {
            request = request.query(&[("facility", facility.to_string())]);
        }
        if let Some(zone) = zone_id {
            request = request.query(&[("zone", zone.to_string())]);
        }

        let resp = request.send().await.map_err(Error::Transport)?;
        Self::parse_json(resp).await
    }

    /// `GET /api/alerts/?active=true[&severity=...]` -- active alerts,
    /// optionally scoped by severity.
    pub async fn active_alerts(
        &self,
        severity: Option<Severity>,
    ) -> Result<Vec<AlertRecord>, Error> {
        let url = self.base_url.join("/api/alerts/")?;
        debug!("GET {url} severity={severity:?}");

        let mut request = self.http.get(url).query(&[("active", "true")]);
        if let Some(severity) = severity {
            request = request.query(&[("severity", severity.as_str())]);
        }

        let resp = request.send().await.map_err(Error::Transport)?;
        Self::parse_json(resp).await
    }

    /// `PATCH /api/alerts/{id}/acknowledge/` -- commit an acknowledgment.
    ///
    /// A 2xx response commits; any non-2xx (including a 404 for an alert
    /// already acknowledged elsewhere) surfaces as [`Error::Server`] with
    /// the backend's diagnostic body.
    pub async fn acknowledge_alert(&self, id: i64) -> Result<(), Error> {
        let url = self.base_url.join(&format!("/api/alerts/{id}/acknowledge/"))?;
        debug!("PATCH {url}");

        let resp = self.http.patch(url).send().await.map_err(Error::Transport)?;
        Self::check_status(resp).await?;
        Ok(())
    }

    /// `GET /api/dashboard/summary/?date=YYYY-MM-DD` -- aggregates for
    /// one calendar date.
    pub async fn dashboard_summary(&self, date: NaiveDate) -> Result<DashboardSummary, Error> {
        let url = self.base_url.join("/api/dashboard/summary/")?;
        debug!("GET {url} date={date}");

        let resp = self
            .http
            .get(url)
            .query(&[("date", date.format("%Y-%m-%d").to_string())])
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::parse_json(resp).await
    }

    /// Issue a prepared export request and return the raw byte stream.
    ///
    /// The caller persists the stream; this method performs no buffering
    /// beyond reqwest's own. Non-2xx responses are captured into
    /// [`Error::Server`] before any bytes are yielded.
    pub async fn download_report(
        &self,
        request: &ExportRequest,
    ) -> Result<impl Stream<Item = Result<Bytes, Error>> + Send + use<>, Error> {
        debug!("{} {}", request.method, request.url);

        let resp = self
            .http
            .request(request.method.clone(), request.url.clone())
            .send()
            .await
            .map_err(Error::Transport)?;
        let resp = Self::check_status(resp).await?;

        Ok(resp.bytes_stream().map_err(Error::Transport))
    }

    // ── Response helpers ─────────────────────────────────────────────

    /// Reject non-2xx responses, carrying the body as diagnostic text.
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(Error::Server {
            status: status.as_u16(),
            body,
        })
    }

    /// Check the status, then deserialize the body, keeping the raw text
    /// around for diagnostics when parsing fails.
    async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let resp = Self::check_status(resp).await?;
        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
