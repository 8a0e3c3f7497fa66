use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::Result;
use crate::feed::{self, SnapshotSource};
use crate::signal::SignalComputer;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct AppState {
    /// Mock market data source
    pub source: Arc<dyn SnapshotSource>,

    /// Stateless signal computer
    pub computer: Arc<SignalComputer>,

    /// Application start time
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(source: Arc<dyn SnapshotSource>, computer: SignalComputer) -> Self {
        Self {
            source,
            computer: Arc::new(computer),
            start_time: Utc::now(),
        }
    }

    /// Wire the configured feed and signal thresholds
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let source = feed::from_config(&config.feed)?;
        Ok(Self::new(source, SignalComputer::new(config.signal.clone())))
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.start_time).num_seconds()
    }
}
