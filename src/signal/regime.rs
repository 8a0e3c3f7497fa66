//! Cross-asset regime classification
//!
//! Classifies the snapshot into one of three illustrative regimes:
//! - Risk-On: SPY and BTC-USD up while Treasuries sell off
//! - Risk-Off: Treasuries and Gold bid while SPY falls
//! - Transition: anything else
//!
//! A direction pattern only counts once at least `min_confirming_moves` of its
//! three legs carry a move flag. The rule and its constants are demo values,
//! not a calibrated model.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::detector::DetectorConfig;

/// Market mood classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegimeLabel {
    #[serde(rename = "Risk-On")]
    RiskOn,
    #[serde(rename = "Risk-Off")]
    RiskOff,
    #[serde(rename = "Transition")]
    Transition,
}

impl RegimeLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegimeLabel::RiskOn => "Risk-On",
            RegimeLabel::RiskOff => "Risk-Off",
            RegimeLabel::Transition => "Transition",
        }
    }
}

impl std::fmt::Display for RegimeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tunable regime rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeConfig {
    /// Move-flagged legs required before a direction pattern is accepted
    #[serde(default = "default_min_confirming_moves")]
    pub min_confirming_moves: usize,
}

fn default_min_confirming_moves() -> usize {
    1
}

impl Default for RegimeConfig {
    fn default() -> Self {
        Self {
            min_confirming_moves: default_min_confirming_moves(),
        }
    }
}

/// Percent changes of the four tracked assets at one snapshot instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossAssetChanges {
    pub gld: f64,
    pub spy: f64,
    pub btc: f64,
    pub tlt: f64,
}

/// Regime label with a rough confidence score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeReading {
    pub label: RegimeLabel,
    /// Confidence in the classification (0.0-1.0)
    pub confidence: f64,
}

/// Classify one snapshot's percent changes.
///
/// GLD plays no part in Risk-On; only SPY, BTC-USD and TLT are read there.
pub fn classify(
    changes: &CrossAssetChanges,
    detector: &DetectorConfig,
    config: &RegimeConfig,
) -> RegimeReading {
    let CrossAssetChanges { gld, spy, btc, tlt } = *changes;
    let confirmed = |legs: [f64; 3]| {
        legs.iter().filter(|c| detector.is_move(**c)).count() >= config.min_confirming_moves
    };

    let reading = if spy > 0.0 && btc > 0.0 && tlt < 0.0 && confirmed([spy, btc, tlt]) {
        RegimeReading {
            label: RegimeLabel::RiskOn,
            confidence: (0.55 + 0.08 * (spy.abs() + btc.abs() + tlt.abs())).min(0.95),
        }
    } else if tlt > 0.0 && gld > 0.0 && spy < 0.0 && confirmed([tlt, gld, spy]) {
        RegimeReading {
            label: RegimeLabel::RiskOff,
            confidence: (0.55 + 0.08 * (tlt.abs() + gld.abs() + spy.abs())).min(0.95),
        }
    } else {
        RegimeReading {
            label: RegimeLabel::Transition,
            confidence: (0.45 + 0.04 * (spy.abs() + btc.abs())).min(0.75),
        }
    };

    debug!(
        regime = %reading.label,
        confidence = reading.confidence,
        gld, spy, btc, tlt,
        "regime classified"
    );
    reading
}
