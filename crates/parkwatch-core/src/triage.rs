// ── Alert triage ──
//
// Active-alert loading, severity re-scoping, and the acknowledge state
// transition. The backend is the sole source of truth: a committed
// acknowledgment reloads the active set instead of splicing locally, so
// the view never drifts from the backend's own filter criteria.

use std::sync::Arc;

use tracing::{debug, warn};

use parkwatch_api::ApiClient;
use parkwatch_api::types::{AlertRecord, Severity};

/// Controller for the alert triage board.
///
/// Holds the current active-alert collection, the severity scope, and the
/// latest error. The collection is replaced wholesale per load and
/// cleared to empty on failure (same fail-empty policy as the poller).
pub struct AlertTriage {
    client: Arc<ApiClient>,
    severity: Option<Severity>,
    alerts: Vec<AlertRecord>,
    error: Option<String>,
}

impl AlertTriage {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            severity: None,
            alerts: Vec::new(),
            error: None,
        }
    }

    /// The current active-alert collection.
    pub fn alerts(&self) -> &[AlertRecord] {
        &self.alerts
    }

    /// The latest load/acknowledge failure, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The current severity scope (`None` means all severities).
    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }

    /// Fetch the active alerts under the current severity scope.
    ///
    /// Success replaces the collection wholesale and clears the error;
    /// failure clears the collection and records the error detail.
    pub async fn load_active(&mut self) {
        match self.client.active_alerts(self.severity).await {
            Ok(alerts) => {
                debug!(count = alerts.len(), "active alerts loaded");
                self.alerts = alerts;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "active alert load failed");
                self.alerts.clear();
                self.error = Some(e.detail());
            }
        }
    }

    /// Change the severity scope and immediately reload.
    pub async fn set_severity(&mut self, severity: Option<Severity>) {
        self.severity = severity;
        self.load_active().await;
    }

    /// Acknowledge one alert.
    ///
    /// On backend confirmation the active set is fully reloaded, which is
    /// what removes the alert from view. On failure the collection is
    /// left untouched and the backend's diagnostic body becomes the
    /// error; the command is not retried -- a retry is a fresh call. An
    /// alert already acknowledged elsewhere fails the same way as any
    /// other backend rejection.
    pub async fn acknowledge(&mut self, id: i64) {
        match self.client.acknowledge_alert(id).await {
            Ok(()) => {
                debug!(id, "alert acknowledged");
                self.load_active().await;
            }
            Err(e) => {
                warn!(id, error = %e, "acknowledge failed");
                self.error = Some(e.detail());
            }
        }
    }
}
