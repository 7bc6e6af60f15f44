//! Configuration for the parkwatch monitoring tools.
//!
//! TOML file + `PARKWATCH_*` environment overrides, resolved into a typed
//! [`MonitorConfig`] that is injected into each component at construction.
//! There is deliberately no module-wide backend origin: the original
//! dashboard hardcoded its API base, which made it impossible to point at
//! a fake backend in tests.

use std::path::PathBuf;
use std::time::Duration;

use chrono::TimeDelta;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// Raw configuration as read from file and environment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Monitoring backend origin.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Device-status poll cadence in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Heartbeat staleness window in seconds.
    #[serde(default = "default_stale_after")]
    pub stale_after_secs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            poll_interval_secs: default_poll_interval(),
            timeout_secs: default_timeout(),
            stale_after_secs: default_stale_after(),
        }
    }
}

fn default_backend_url() -> String {
    "http://127.0.0.1:8000".into()
}
fn default_poll_interval() -> u64 {
    10
}
fn default_timeout() -> u64 {
    30
}
fn default_stale_after() -> u32 {
    300
}

/// Path of the user-level config file.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "parkwatch", "parkwatch")
        .map_or_else(|| PathBuf::from("parkwatch.toml"), |dirs| {
            dirs.config_dir().join("config.toml")
        })
}

/// The figment stack: defaults, then the config file, then environment.
fn figment() -> Figment {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("PARKWATCH_"))
}

/// Load configuration from the standard sources.
pub fn load() -> Result<Config, ConfigError> {
    Ok(figment().extract()?)
}

// ── Resolved config ─────────────────────────────────────────────────

/// Validated, typed configuration handed to components.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub base_url: Url,
    pub poll_interval: Duration,
    pub timeout: Duration,
    pub stale_after: TimeDelta,
}

impl Config {
    /// Validate and convert into a [`MonitorConfig`].
    pub fn resolve(&self) -> Result<MonitorConfig, ConfigError> {
        let base_url: Url =
            self.backend_url
                .parse()
                .map_err(|e| ConfigError::Validation {
                    field: "backend_url".into(),
                    reason: format!("invalid URL '{}': {e}", self.backend_url),
                })?;

        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Validation {
                field: "poll_interval_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }

        Ok(MonitorConfig {
            base_url,
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            stale_after: TimeDelta::seconds(i64::from(self.stale_after_secs)),
        })
    }
}
