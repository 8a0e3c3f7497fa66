//! Signal computation over a four-asset snapshot
//!
//! `SignalComputer` is a pure function of the snapshot it is given:
//! - Detector panel: per-asset move and volume-spike flags
//! - Regime: Risk-On / Risk-Off / Transition with a rough confidence
//! - Preview: demo BUY/SELL/HOLD derived from the regime
//! - Relative strength and per-asset demo signals
//!
//! A snapshot missing a tracked symbol, or carrying a malformed value, fails
//! the whole computation. There is no partial report.

pub mod detector;
pub mod preview;
pub mod ranking;
pub mod regime;

pub use detector::{detect, DetectorConfig, DetectorResult};
pub use preview::{asset_signal, AssetSignal, SignalPreview, DISCLAIMER};
pub use ranking::{rank, RelativeStrength, StrengthEntry};
pub use regime::{classify, CrossAssetChanges, RegimeConfig, RegimeLabel, RegimeReading};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{AssetSnapshot, Snapshot, Symbol};
use crate::error::{PulseError, Result};

/// Thresholds passed into the signal computer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalConfig {
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub regime: RegimeConfig,
}

/// Everything derived from one snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalReport {
    pub snapshot_id: Uuid,
    pub taken_at: DateTime<Utc>,
    /// Readings in dashboard order
    pub assets: Vec<AssetSnapshot>,
    pub detectors: Vec<DetectorResult>,
    pub regime: RegimeReading,
    pub signal: SignalPreview,
    pub relative_strength: RelativeStrength,
    pub signals: Vec<AssetSignal>,
}

#[derive(Debug, Clone, Default)]
pub struct SignalComputer {
    config: SignalConfig,
}

impl SignalComputer {
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    pub fn compute(&self, snapshot: &Snapshot) -> Result<SignalReport> {
        let assets = validate(snapshot)?;
        let [gld, spy, btc, tlt] = &assets;

        let detectors: Vec<DetectorResult> = assets
            .iter()
            .map(|a| detect(a, &self.config.detector))
            .collect();

        let changes = CrossAssetChanges {
            gld: gld.percent_change,
            spy: spy.percent_change,
            btc: btc.percent_change,
            tlt: tlt.percent_change,
        };
        let regime = classify(&changes, &self.config.detector, &self.config.regime);
        let signal = SignalPreview::from_regime(regime.label);

        let relative_strength = rank(&assets).ok_or_else(|| {
            PulseError::Internal("relative strength over an empty snapshot".to_string())
        })?;

        let signals = assets
            .iter()
            .zip(&detectors)
            .map(|(a, d)| asset_signal(a, d.vol_spike_flag, regime.label))
            .collect();

        debug!(
            snapshot_id = %snapshot.id,
            regime = %regime.label,
            signal = %signal,
            flagged_moves = detectors.iter().filter(|d| d.move_flag).count(),
            "signal report computed"
        );

        Ok(SignalReport {
            snapshot_id: snapshot.id,
            taken_at: snapshot.taken_at,
            assets: assets.to_vec(),
            detectors,
            regime,
            signal,
            relative_strength,
            signals,
        })
    }
}

/// Pull one well-formed reading per tracked symbol, in dashboard order
fn validate(snapshot: &Snapshot) -> Result<[AssetSnapshot; 4]> {
    let pick = |symbol: Symbol| -> Result<AssetSnapshot> {
        let mut matches = snapshot.assets.iter().filter(|a| a.symbol == symbol);
        let asset = matches
            .next()
            .ok_or(PulseError::MissingAssetData(symbol))?;
        if matches.next().is_some() {
            return Err(PulseError::InvalidSnapshotValue(format!(
                "{symbol} appears more than once"
            )));
        }
        if !asset.price.is_finite() || asset.price <= 0.0 {
            return Err(PulseError::InvalidSnapshotValue(format!(
                "{symbol} price must be a positive number, got {}",
                asset.price
            )));
        }
        if !asset.percent_change.is_finite() {
            return Err(PulseError::InvalidSnapshotValue(format!(
                "{symbol} percent_change must be finite, got {}",
                asset.percent_change
            )));
        }
        Ok(asset.clone())
    };

    let [gld, spy, btc, tlt] = Symbol::TRACKED;
    Ok([pick(gld)?, pick(spy)?, pick(btc)?, pick(tlt)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_snapshot() -> Snapshot {
        Snapshot::new(vec![
            AssetSnapshot::new(Symbol::Gld, 189.62, -0.2, 1_050_000),
            AssetSnapshot::new(Symbol::Spy, 510.0, 2.0, 1_320_000),
            AssetSnapshot::new(Symbol::BtcUsd, 51_750.0, 3.5, 1_800_000),
            AssetSnapshot::new(Symbol::Tlt, 94.62, -0.4, 980_000),
        ])
    }

    #[test]
    fn example_snapshot_is_risk_on_buy() {
        let report = SignalComputer::default()
            .compute(&example_snapshot())
            .unwrap();

        let flagged: Vec<Symbol> = report
            .detectors
            .iter()
            .filter(|d| d.move_flag)
            .map(|d| d.symbol)
            .collect();
        assert_eq!(flagged, vec![Symbol::Spy, Symbol::BtcUsd]);
        assert_eq!(report.regime.label, RegimeLabel::RiskOn);
        assert_eq!(report.signal, SignalPreview::Buy);
        assert_eq!(report.relative_strength.leader, Symbol::BtcUsd);
    }

    #[test]
    fn one_detector_per_tracked_symbol() {
        let mut snapshot = example_snapshot();
        snapshot.assets.reverse();
        let report = SignalComputer::default().compute(&snapshot).unwrap();

        let symbols: Vec<Symbol> = report.detectors.iter().map(|d| d.symbol).collect();
        assert_eq!(symbols, Symbol::TRACKED.to_vec());
        assert_eq!(report.signals.len(), 4);
        assert_eq!(report.snapshot_id, snapshot.id);
    }

    #[test]
    fn missing_symbol_fails() {
        let mut snapshot = example_snapshot();
        snapshot.assets.retain(|a| a.symbol != Symbol::Tlt);
        let err = SignalComputer::default().compute(&snapshot).unwrap_err();
        assert!(matches!(err, PulseError::MissingAssetData(Symbol::Tlt)));
    }

    #[test]
    fn malformed_values_fail() {
        let mut snapshot = example_snapshot();
        snapshot.assets[0].price = f64::NAN;
        let err = SignalComputer::default().compute(&snapshot).unwrap_err();
        assert!(matches!(err, PulseError::InvalidSnapshotValue(_)));

        let mut snapshot = example_snapshot();
        snapshot.assets[1].price = 0.0;
        assert!(SignalComputer::default().compute(&snapshot).is_err());

        let mut snapshot = example_snapshot();
        snapshot.assets[2].percent_change = f64::INFINITY;
        assert!(SignalComputer::default().compute(&snapshot).is_err());
    }

    #[test]
    fn duplicate_symbol_fails() {
        let mut snapshot = example_snapshot();
        snapshot
            .assets
            .push(AssetSnapshot::new(Symbol::Spy, 511.0, 2.1, 1_000_000));
        let err = SignalComputer::default().compute(&snapshot).unwrap_err();
        assert!(err.to_string().contains("SPY appears more than once"));
    }

    #[test]
    fn same_changes_same_outcome() {
        let computer = SignalComputer::default();
        let a = computer.compute(&example_snapshot()).unwrap();
        let mut other = example_snapshot();
        for asset in &mut other.assets {
            asset.price *= 1.1;
            asset.volume += 7;
        }
        let b = computer.compute(&other).unwrap();
        assert_eq!(a.regime, b.regime);
        assert_eq!(a.signal, b.signal);
    }

    #[test]
    fn stricter_threshold_turns_example_into_transition() {
        let computer = SignalComputer::new(SignalConfig {
            detector: DetectorConfig {
                move_threshold_pct: 5.0,
                ..DetectorConfig::default()
            },
            regime: RegimeConfig::default(),
        });
        let report = computer.compute(&example_snapshot()).unwrap();
        assert!(report.detectors.iter().all(|d| !d.move_flag));
        assert_eq!(report.regime.label, RegimeLabel::Transition);
        assert_eq!(report.signal, SignalPreview::Hold);
    }
}
