//! Usage-report export handler.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;

use parkwatch_api::{ApiClient, ReportQuery};

use crate::cli::{GlobalOpts, ReportArgs, ReportCommand};
use crate::error::CliError;

pub async fn handle(
    client: &Arc<ApiClient>,
    args: ReportArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ReportCommand::Export {
            from,
            to,
            facility,
            zone,
            out,
        } => {
            if from > to {
                return Err(CliError::Validation {
                    field: "from".into(),
                    reason: format!("range start {from} is after range end {to}"),
                });
            }

            let query = ReportQuery {
                date_from: from,
                date_to: to,
                facility_id: facility,
                zone_id: zone,
            };
            let request = query.export_request(client.base_url())?;

            // Stream the CSV straight to disk, no full-body buffering.
            let stream = client.download_report(&request).await?;
            let mut stream = Box::pin(stream);
            let mut file = tokio::fs::File::create(&out).await?;

            let mut written = 0usize;
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                file.write_all(&chunk).await?;
                written += chunk.len();
            }
            file.flush().await?;

            if !global.quiet {
                eprintln!("Wrote {written} bytes to {}", out.display());
            }
            Ok(())
        }
    }
}
