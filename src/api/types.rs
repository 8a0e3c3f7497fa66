use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AssetSnapshot, Snapshot, Symbol};
use crate::error::{PulseError, Result};
use crate::signal::{
    AssetSignal, DetectorResult, RegimeLabel, SignalPreview, SignalReport, StrengthEntry,
    DISCLAIMER,
};

// ============================================================================
// Snapshot Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetView {
    pub symbol: Symbol,
    pub name: String,
    pub price: f64,
    pub percent_change: f64,
    pub volume: u64,
    pub stale: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: Uuid,
    pub ts_utc: String,
    pub assets: Vec<AssetView>,
    pub detectors: Vec<DetectorResult>,
    pub regime: RegimeLabel,
    /// Percent with one decimal
    pub regime_confidence: f64,
    pub signal: SignalPreview,
    pub leader: Symbol,
    pub laggard: Symbol,
    pub relative_strength: Vec<StrengthEntry>,
    pub signals: Vec<AssetSignal>,
    pub disclaimer: String,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

impl From<&SignalReport> for SnapshotResponse {
    fn from(report: &SignalReport) -> Self {
        Self {
            snapshot_id: report.snapshot_id,
            ts_utc: report
                .taken_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            assets: report
                .assets
                .iter()
                .map(|a| AssetView {
                    symbol: a.symbol,
                    name: a.symbol.display_name().to_string(),
                    price: round_to(a.price, 2),
                    percent_change: round_to(a.percent_change, 3),
                    volume: a.volume,
                    stale: a.stale,
                })
                .collect(),
            detectors: report.detectors.clone(),
            regime: report.regime.label,
            regime_confidence: round_to(report.regime.confidence * 100.0, 1),
            signal: report.signal,
            leader: report.relative_strength.leader,
            laggard: report.relative_strength.laggard,
            relative_strength: report
                .relative_strength
                .ranking
                .iter()
                .map(|e| StrengthEntry {
                    symbol: e.symbol,
                    percent_change: round_to(e.percent_change, 3),
                })
                .collect(),
            signals: report.signals.clone(),
            disclaimer: DISCLAIMER.to_string(),
        }
    }
}

// ============================================================================
// Evaluate Types
// ============================================================================

/// Client-supplied reading; checked before it reaches the signal computer
#[derive(Debug, Clone, Deserialize)]
pub struct AssetInput {
    pub symbol: String,
    pub price: f64,
    pub percent_change: f64,
    pub volume: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateRequest {
    pub assets: Vec<AssetInput>,
}

impl EvaluateRequest {
    pub fn into_snapshot(self) -> Result<Snapshot> {
        let assets = self
            .assets
            .into_iter()
            .map(|input| -> Result<AssetSnapshot> {
                let symbol: Symbol = input.symbol.parse()?;
                let volume = u64::try_from(input.volume).map_err(|_| {
                    PulseError::InvalidSnapshotValue(format!(
                        "{symbol} volume must be non-negative, got {}",
                        input.volume
                    ))
                })?;
                Ok(AssetSnapshot::new(
                    symbol,
                    input.price,
                    input.percent_change,
                    volume,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Snapshot::new(assets))
    }
}

// ============================================================================
// Health / Error Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub feed: String,
    pub uptime_secs: i64,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl From<&PulseError> for ErrorResponse {
    fn from(err: &PulseError) -> Self {
        Self {
            error: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::SignalComputer;
    use serde_json::json;

    #[test]
    fn evaluate_request_rejects_unknown_symbol() {
        let req: EvaluateRequest = serde_json::from_value(json!({
            "assets": [{"symbol": "ETH", "price": 1.0, "percent_change": 0.0, "volume": 1}]
        }))
        .unwrap();
        let err = req.into_snapshot().unwrap_err();
        assert!(matches!(err, PulseError::UnknownSymbol(_)));
    }

    #[test]
    fn evaluate_request_rejects_negative_volume() {
        let req: EvaluateRequest = serde_json::from_value(json!({
            "assets": [{"symbol": "gld", "price": 190.0, "percent_change": 0.0, "volume": -5}]
        }))
        .unwrap();
        let err = req.into_snapshot().unwrap_err();
        assert!(matches!(err, PulseError::InvalidSnapshotValue(_)));
    }

    #[test]
    fn response_rounds_for_display() {
        let snapshot = Snapshot::new(vec![
            AssetSnapshot::new(Symbol::Gld, 190.123456, -0.20004, 1),
            AssetSnapshot::new(Symbol::Spy, 500.0, 2.0, 1),
            AssetSnapshot::new(Symbol::BtcUsd, 50_000.0, 3.5, 1),
            AssetSnapshot::new(Symbol::Tlt, 95.0, -0.4, 1),
        ]);
        let report = SignalComputer::default().compute(&snapshot).unwrap();
        let resp = SnapshotResponse::from(&report);

        assert_eq!(resp.assets[0].price, 190.12);
        assert_eq!(resp.assets[0].percent_change, -0.2);
        assert_eq!(resp.assets[0].name, "Gold (GLD)");
        assert_eq!(resp.regime_confidence, 95.0);
        assert!(resp.ts_utc.ends_with(" UTC"));

        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["regime"], "Risk-On");
        assert_eq!(value["signal"], "BUY");
        assert_eq!(value["detectors"].as_array().unwrap().len(), 4);
    }
}
