mod main_runtime;

use anyhow::{bail, Context};
use clap::Parser;
use macropulse::adapters::start_api_server;
use macropulse::api::AppState;
use macropulse::cli::{self, Cli, Commands};
use macropulse::config::AppConfig;
use main_runtime::{init_logging, init_logging_simple, shutdown_signal};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config))?;
    cli.apply_overrides(&mut config);
    if let Err(errors) = config.validate() {
        bail!("invalid configuration:\n  {}", errors.join("\n  "));
    }

    match cli.command() {
        Commands::Serve { .. } => {
            init_logging(&config.logging);
            info!(
                feed = config.feed.mode.as_str(),
                move_threshold_pct = config.signal.detector.move_threshold_pct,
                "starting macropulse"
            );
            let state = AppState::from_config(&config).context("building feed")?;
            start_api_server(state, &config.server, shutdown_signal()).await?;
            info!("Shutdown complete");
        }
        Commands::Snapshot { pretty } => {
            init_logging_simple();
            let json = cli::render_snapshot(&config, pretty).await?;
            println!("{json}");
        }
    }

    Ok(())
}
