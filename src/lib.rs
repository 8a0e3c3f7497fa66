pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod signal;

pub use crate::config::AppConfig;
pub use domain::{AssetSnapshot, Snapshot, Symbol};
pub use error::{PulseError, Result};
pub use feed::{FixedFeed, QuoteFeed, QuoteSource, SimulatedFeed, SnapshotSource};
pub use signal::{
    DetectorResult, RegimeLabel, SignalComputer, SignalConfig, SignalPreview, SignalReport,
};
