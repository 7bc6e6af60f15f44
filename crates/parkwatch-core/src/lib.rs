//! Client-side live-state layer between `parkwatch-api` and UI consumers.
//!
//! Four independent subsystems share one read model fetched over HTTP:
//!
//! - **[`StatusPoller`]** — periodic device-status refresh on a fixed
//!   cadence, publishing each fetch outcome as one [`PollState`] through
//!   a `watch` channel. [`PollerHandle`] is the scoped timer resource:
//!   stopping is idempotent and also runs on drop.
//!
//! - **[`filter_devices`]** — pure, case-insensitive free-text filtering
//!   of a device snapshot, never mutating the snapshot itself.
//!
//! - **[`AlertTriage`]** — active-alert loading, severity re-scoping, and
//!   the acknowledge state transition. The backend stays the sole source
//!   of truth: a committed acknowledgment triggers a full reload instead
//!   of a local splice.
//!
//! - **[`DashboardViewModel`]** — date-scoped summary plus a one-shot
//!   device snapshot, with pure derivations ([`hourly_series`],
//!   [`efficiency_rows`], [`heartbeat_rows`]) for presentation.
//!
//! All persistent truth lives in the backend; every collection here is an
//! ephemeral cache replaced wholesale per successful fetch, and cleared to
//! empty when its backing fetch fails (fail-empty).

pub mod dashboard;
pub mod filter;
pub mod poller;
pub mod triage;

pub use dashboard::{
    DashboardViewModel, EfficiencyRow, HeartbeatRow, HourBucket, STALE_AFTER_DEFAULT,
    efficiency_rows, heartbeat_rows, hourly_series,
};
pub use filter::filter_devices;
pub use poller::{DeviceSnapshot, PollState, PollerHandle, StatusPoller};
pub use triage::AlertTriage;

// Re-export the wire model for consumers that only depend on core.
pub use parkwatch_api::types::{
    AlertRecord, DashboardSummary, DeviceStatus, DeviceStatusRecord, Severity,
};
