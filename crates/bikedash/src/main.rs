//! Main entry point for the bike rental dashboard.

use anyhow::Context;
use bikedash::{load_config, Cli, DashboardApp, RunRequest};
use bikedash_common::init_logging;
use clap::Parser;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply_overrides(&mut config);
    config.validate().context("invalid configuration")?;

    init_logging(&config.logging).context("failed to initialize logging")?;
    info!("Starting bike rental dashboard");

    let app = DashboardApp::new(config);
    let request = RunRequest {
        start: cli.start,
        end: cli.end,
        skip_charts: cli.no_charts,
    };

    let outcome = match app.run(request) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Dashboard run failed: {}", e);
            return Err(e).context("dashboard run failed");
        }
    };

    print!("{}", outcome.report);
    for path in &outcome.written {
        println!("wrote {}", path.display());
    }

    Ok(())
}
