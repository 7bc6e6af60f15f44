//! Config command handlers.

use std::fmt::Write as _;

use parkwatch_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = parkwatch_config::load()?;
            let out = output::render_single(&global.output, &cfg, render_show, |c| {
                c.backend_url.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", parkwatch_config::config_path().display());
            Ok(())
        }
    }
}

fn render_show(cfg: &Config) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "backend_url        {}", cfg.backend_url);
    let _ = writeln!(out, "poll_interval_secs {}", cfg.poll_interval_secs);
    let _ = writeln!(out, "timeout_secs       {}", cfg.timeout_secs);
    let _ = write!(out, "stale_after_secs   {}", cfg.stale_after_secs);
    out
}
