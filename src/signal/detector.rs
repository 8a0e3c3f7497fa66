//! Per-asset move and volume detectors
//!
//! Each detector is a fixed-threshold check over a single reading:
//! - Move detector: absolute percent change above `move_threshold_pct`
//! - Volume-spike detector: volume above `volume_baseline * volume_spike_multiplier`
//!
//! Both comparisons are strict, so a reading sitting exactly on a threshold
//! is not flagged.

use serde::{Deserialize, Serialize};

use crate::domain::{AssetSnapshot, Symbol};

/// Configuration for the detector panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Absolute percent change that counts as a move (1.5 = 1.5%)
    #[serde(default = "default_move_threshold_pct")]
    pub move_threshold_pct: f64,
    /// Reference volume for spike detection
    #[serde(default = "default_volume_baseline")]
    pub volume_baseline: u64,
    /// Multiple of the baseline that counts as a spike
    #[serde(default = "default_volume_spike_multiplier")]
    pub volume_spike_multiplier: f64,
}

fn default_move_threshold_pct() -> f64 {
    1.5
}

fn default_volume_baseline() -> u64 {
    1_000_000
}

fn default_volume_spike_multiplier() -> f64 {
    1.5
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            move_threshold_pct: default_move_threshold_pct(),
            volume_baseline: default_volume_baseline(),
            volume_spike_multiplier: default_volume_spike_multiplier(),
        }
    }
}

impl DetectorConfig {
    /// Volume above which `vol_spike_flag` is raised
    pub fn spike_volume(&self) -> f64 {
        self.volume_baseline as f64 * self.volume_spike_multiplier
    }

    pub fn is_move(&self, percent_change: f64) -> bool {
        percent_change.abs() > self.move_threshold_pct
    }

    pub fn is_volume_spike(&self, volume: u64) -> bool {
        volume as f64 > self.spike_volume()
    }
}

/// Detector panel row for one asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorResult {
    pub symbol: Symbol,
    pub move_flag: bool,
    pub vol_spike_flag: bool,
    pub volume: u64,
}

/// Run both detectors over one reading
pub fn detect(asset: &AssetSnapshot, config: &DetectorConfig) -> DetectorResult {
    DetectorResult {
        symbol: asset.symbol,
        move_flag: config.is_move(asset.percent_change),
        vol_spike_flag: config.is_volume_spike(asset.volume),
        volume: asset.volume,
    }
}
