//! Clap derive structures for the `parkwatch` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use parkwatch_api::types::Severity;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// parkwatch -- operator console for parking device fleets
#[derive(Debug, Parser)]
#[command(
    name = "parkwatch",
    version,
    about = "Monitor parking device fleets from the command line",
    long_about = "Operator console for a parking monitoring backend.\n\n\
        Live device-status tables, alert triage, daily dashboards, and\n\
        CSV usage-report exports, all against the backend's JSON API.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend URL (overrides the config file)
    #[arg(long, short = 'b', env = "PARKWATCH_BACKEND", global = true)]
    pub backend: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PARKWATCH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, env = "PARKWATCH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Daily dashboard: counters, hourly chart, efficiency, heartbeats
    #[command(alias = "dash")]
    Dashboard(DashboardArgs),

    /// Live device-status table
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// List and acknowledge alerts
    #[command(alias = "al")]
    Alerts(AlertsArgs),

    /// Usage report exports
    Report(ReportArgs),

    /// Inspect CLI configuration
    Config(ConfigArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DASHBOARD
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Date to summarize (YYYY-MM-DD, default: today)
    #[arg(long, value_name = "DATE")]
    pub date: Option<NaiveDate>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    /// Case-insensitive filter on device code, zone code, or facility name
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Keep polling and reprint the table on every snapshot change
    #[arg(long, short = 'w')]
    pub watch: bool,

    /// Poll cadence in seconds (watch mode; overrides the config file)
    #[arg(long, requires = "watch")]
    pub interval: Option<u64>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ALERTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AlertsArgs {
    #[command(subcommand)]
    pub command: AlertsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AlertsCommand {
    /// List active alerts
    #[command(alias = "ls")]
    List {
        /// Only show alerts of this severity
        #[arg(long, value_enum)]
        severity: Option<SeverityArg>,
    },

    /// Acknowledge an active alert
    Ack {
        /// Alert ID
        id: i64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SeverityArg {
    Info,
    Warning,
    Critical,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Info => Self::Info,
            SeverityArg::Warning => Self::Warning,
            SeverityArg::Critical => Self::Critical,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REPORT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Export the usage report for a date range as CSV
    Export {
        /// Range start (YYYY-MM-DD, inclusive)
        #[arg(long, value_name = "DATE")]
        from: NaiveDate,

        /// Range end (YYYY-MM-DD, inclusive)
        #[arg(long, value_name = "DATE")]
        to: NaiveDate,

        /// Restrict to one facility ID
        #[arg(long)]
        facility: Option<i64>,

        /// Restrict to one zone ID
        #[arg(long)]
        zone: Option<i64>,

        /// Output file path
        #[arg(long, short = 'O', value_name = "FILE")]
        out: PathBuf,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the current resolved configuration
    Show,

    /// Print the config file path
    Path,
}
