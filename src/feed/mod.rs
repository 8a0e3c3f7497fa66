//! Snapshot generation
//!
//! Everything that produces readings sits behind one of two traits:
//! - `SnapshotSource`: a complete snapshot of all tracked symbols
//! - `QuoteSource`: a single symbol, wrapped by `QuoteFeed` to build snapshots

pub mod fixed;
pub mod quote;
pub mod simulated;

pub use fixed::FixedFeed;
pub use quote::QuoteFeed;
pub use simulated::SimulatedFeed;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{FeedConfig, FeedMode};
use crate::domain::{AssetSnapshot, Snapshot, Symbol};
use crate::error::Result;

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Short label reported by `/health`
    fn name(&self) -> &'static str;

    async fn snapshot(&self) -> Result<Snapshot>;
}

#[async_trait]
pub trait QuoteSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn quote(&self, symbol: Symbol) -> Result<AssetSnapshot>;
}

/// Build the configured mock source
pub fn from_config(config: &FeedConfig) -> Result<Arc<dyn SnapshotSource>> {
    let source: Arc<dyn SnapshotSource> = match config.mode {
        FeedMode::Random => Arc::new(QuoteFeed::new(
            SimulatedFeed::new(config)?,
            Duration::from_millis(config.quote_timeout_ms),
        )),
        FeedMode::Fixed => Arc::new(FixedFeed::new(config.fixed.clone())),
    };
    Ok(source)
}
