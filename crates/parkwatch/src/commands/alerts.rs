//! Alert command handlers.

use std::sync::Arc;

use tabled::Tabled;

use parkwatch_api::ApiClient;
use parkwatch_api::types::AlertRecord;

use crate::cli::{AlertsArgs, AlertsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Raised")]
    raised: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Type")]
    alert_type: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Message")]
    message: String,
}

impl AlertRow {
    fn from_record(alert: &AlertRecord, color: bool) -> Self {
        Self {
            id: alert.id.to_string(),
            raised: alert.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            severity: util::paint_severity(alert.severity, color),
            alert_type: alert.alert_type.clone(),
            device: alert.device_code.clone().unwrap_or_else(|| "-".to_owned()),
            message: alert.message.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &Arc<ApiClient>,
    args: AlertsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AlertsCommand::List { severity } => {
            let alerts = client.active_alerts(severity.map(Into::into)).await?;
            let color = output::should_color(&global.color);

            let out = output::render_list(
                &global.output,
                &alerts,
                |a| AlertRow::from_record(a, color),
                |a| a.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AlertsCommand::Ack { id } => {
            client.acknowledge_alert(id).await?;
            if !global.quiet {
                eprintln!("Alert {id} acknowledged");
            }
            Ok(())
        }
    }
}
