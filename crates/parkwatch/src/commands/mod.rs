//! Command dispatch: bridges CLI args -> core components -> output formatting.

pub mod alerts;
pub mod config_cmd;
pub mod dashboard;
pub mod devices;
pub mod report;
pub mod util;

use std::sync::Arc;

use parkwatch_api::ApiClient;
use parkwatch_config::MonitorConfig;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: Arc<ApiClient>,
    monitor: &MonitorConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Dashboard(args) => dashboard::handle(client, monitor, args, global).await,
        Command::Devices(args) => devices::handle(&client, monitor, args, global).await,
        Command::Alerts(args) => alerts::handle(&client, args, global).await,
        Command::Report(args) => report::handle(&client, args, global).await,
        // Config is handled before dispatch
        Command::Config(_) => unreachable!(),
    }
}
