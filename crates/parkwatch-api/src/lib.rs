// parkwatch-api: Async Rust client for the parkwatch monitoring backend

pub mod client;
pub mod error;
pub mod report;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::Error;
pub use report::{ExportRequest, ReportQuery};
pub use transport::TransportConfig;
