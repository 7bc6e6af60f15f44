//! CLI error types with miette diagnostics.
//!
//! Maps `parkwatch-api` and config errors into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

/// Exit codes for process termination.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const CONFIG: i32 = 78;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the backend: {message}")]
    #[diagnostic(
        code(parkwatch::connection_failed),
        help(
            "Check that the monitoring backend is running and reachable.\n\
             Override the URL with --backend or PARKWATCH_BACKEND."
        )
    )]
    Connection { message: String },

    // ── Backend ──────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(
        code(parkwatch::not_found),
        help("Run: parkwatch alerts list to see the current active alerts.")
    )]
    NotFound { message: String },

    #[error("Backend request failed: {message}")]
    #[diagnostic(code(parkwatch::backend))]
    Backend { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(parkwatch::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(
        code(parkwatch::config),
        help("Check the config file and any PARKWATCH_* environment overrides.")
    )]
    Config(#[from] parkwatch_config::ConfigError),

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<parkwatch_api::Error> for CliError {
    fn from(err: parkwatch_api::Error) -> Self {
        if err.is_not_found() {
            Self::NotFound {
                message: err.detail(),
            }
        } else if err.is_network() {
            Self::Connection {
                message: err.to_string(),
            }
        } else {
            Self::Backend {
                message: err.detail(),
            }
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Connection { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Config(_) => exit_code::CONFIG,
            Self::Backend { .. } | Self::Io(_) => exit_code::GENERAL,
        }
    }
}
