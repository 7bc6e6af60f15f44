// ── Periodic device-status polling ──
//
// Publishes the latest fetch outcome through a single `watch` channel. The
// snapshot is replaced wholesale per fetch; on failure it is reset to
// empty rather than left stale (fail-empty).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use parkwatch_api::ApiClient;
use parkwatch_api::types::DeviceStatusRecord;

/// The device collection as published by the poller: a whole-collection
/// snapshot, never incrementally patched.
pub type DeviceSnapshot = Arc<Vec<DeviceStatusRecord>>;

/// One published fetch outcome: snapshot and error as a single unit.
///
/// Racing fetch completions each replace the whole state, so a consumer
/// can never observe one fetch's snapshot paired with another fetch's
/// error.
#[derive(Debug, Clone, Default)]
pub struct PollState {
    /// Empty when the fetch that produced this state failed.
    pub devices: DeviceSnapshot,
    /// `None` when the fetch that produced this state succeeded; a
    /// successful fetch always clears a previous error.
    pub error: Option<String>,
}

/// Periodic device-status poller.
///
/// Owns the state `watch` channel. Consumers subscribe once and observe
/// every replacement; the poller itself holds the sender, so a fetch
/// completing after all subscribers are gone is simply discarded.
pub struct StatusPoller {
    client: Arc<ApiClient>,
    state: watch::Sender<PollState>,
}

impl StatusPoller {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let (state, _) = watch::channel(PollState::default());
        Self { client, state }
    }

    // ── Observation ──────────────────────────────────────────────────

    /// Subscribe to state replacements.
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state.subscribe()
    }

    /// The current snapshot.
    pub fn devices(&self) -> DeviceSnapshot {
        self.state.borrow().devices.clone()
    }

    /// The current error, if the latest fetch failed.
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    // ── Fetching ─────────────────────────────────────────────────────

    /// Run a single fetch-and-apply cycle without starting the timer.
    pub async fn refresh_once(&self) {
        apply_fetch(&self.client, &self.state).await;
    }

    /// Begin polling: one fetch immediately, then one per `period`.
    ///
    /// The timer is fixed-cadence; a tick missed behind a slow request is
    /// skipped, not replayed. Each fetch runs as its own task so that an
    /// overlapping slow response never delays the cadence -- whichever
    /// fetch completes last owns the published state, regardless of
    /// issue order.
    ///
    /// The returned handle must be stopped (or dropped) on teardown; the
    /// timer is the only long-lived resource the poller acquires.
    pub fn start(&self, period: Duration) -> PollerHandle {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(poll_task(
            Arc::clone(&self.client),
            self.state.clone(),
            period,
            cancel.clone(),
        ));
        PollerHandle {
            cancel,
            task: Some(task),
        }
    }
}

/// Scoped handle for a running poll timer.
///
/// Stop is idempotent and also runs on drop, so the timer is released on
/// every exit path. In-flight fetches are not cancelled; their late
/// completions land in the poller's still-alive channel and are never
/// observed by anyone.
pub struct PollerHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Cancel the poll timer. Safe to call multiple times.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Cancel the timer and wait for the poll task to wind down.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ── Poll task ────────────────────────────────────────────────────────

async fn poll_task(
    client: Arc<ApiClient>,
    state: watch::Sender<PollState>,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                let client = Arc::clone(&client);
                let state = state.clone();
                tokio::spawn(async move {
                    apply_fetch(&client, &state).await;
                });
            }
        }
    }

    debug!("status poller stopped");
}

/// Fetch the device snapshot and publish the outcome.
///
/// Success replaces the snapshot wholesale with a cleared error; failure
/// publishes an empty snapshot plus the error detail. Both land in one
/// `send_replace`, so snapshot and error can never mix across fetches.
/// Last-known-good data is deliberately not retained across a failed poll.
async fn apply_fetch(client: &ApiClient, state: &watch::Sender<PollState>) {
    match client.device_status().await {
        Ok(records) => {
            debug!(count = records.len(), "device status refreshed");
            state.send_replace(PollState {
                devices: Arc::new(records),
                error: None,
            });
        }
        Err(e) => {
            warn!(error = %e, "device status poll failed");
            state.send_replace(PollState {
                devices: Arc::new(Vec::new()),
                error: Some(e.detail()),
            });
        }
    }
}
