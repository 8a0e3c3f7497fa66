use clap::{Parser, Subcommand};

use crate::api::types::SnapshotResponse;
use crate::config::{AppConfig, FeedMode};
use crate::error::Result;
use crate::feed;
use crate::signal::SignalComputer;

#[derive(Parser)]
#[command(name = "macropulse")]
#[command(version)]
#[command(about = "Cross-asset regime preview dashboard (simulated data)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config directory (default.toml, <MACROPULSE_ENV>.toml)
    #[arg(short, long, default_value = "config")]
    pub config: String,

    /// Mock data source
    #[arg(long, value_enum, env = "MACROPULSE_FEED")]
    pub feed: Option<FeedMode>,

    /// Seed for the random-walk feed
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Serve the dashboard and JSON API (default)
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print one computed snapshot as JSON and exit
    Snapshot {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

impl Cli {
    /// Subcommand to run; bare `macropulse` serves
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve {
            host: None,
            port: None,
        })
    }

    /// Apply flag overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(mode) = self.feed {
            config.feed.mode = mode;
        }
        if let Some(seed) = self.seed {
            config.feed.seed = Some(seed);
        }
        if let Some(Commands::Serve { host, port }) = &self.command {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }
    }
}

/// Take one snapshot, compute its report and render it as JSON
pub async fn render_snapshot(config: &AppConfig, pretty: bool) -> Result<String> {
    let source = feed::from_config(&config.feed)?;
    let snapshot = source.snapshot().await?;
    let report = SignalComputer::new(config.signal.clone()).compute(&snapshot)?;
    let response = SnapshotResponse::from(&report);

    let json = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    Ok(json)
}
