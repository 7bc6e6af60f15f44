mod cli;
mod commands;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use parkwatch_api::{ApiClient, TransportConfig};
use parkwatch_config::MonitorConfig;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a backend connection
        Command::Config(args) => commands::config_cmd::handle(&args, &cli.global),

        // All other commands talk to the backend
        cmd => {
            let monitor = build_monitor_config(&cli.global)?;
            let transport = TransportConfig {
                timeout: monitor.timeout,
            };
            let client = Arc::new(ApiClient::new(monitor.base_url.clone(), &transport)?);

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, client, &monitor, &cli.global).await
        }
    }
}

/// Build a `MonitorConfig` from the config file, environment, and CLI overrides.
fn build_monitor_config(global: &GlobalOpts) -> Result<MonitorConfig, CliError> {
    let mut cfg = parkwatch_config::load()?;

    if let Some(ref backend) = global.backend {
        cfg.backend_url = backend.clone();
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout_secs = timeout;
    }

    Ok(cfg.resolve()?)
}
