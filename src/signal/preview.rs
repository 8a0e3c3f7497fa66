//! Demo trading suggestions
//!
//! Nothing here is a trading recommendation. The overall preview is a direct
//! lookup on the regime label, and the per-asset signals nudge a momentum
//! probability by regime fit and volume spikes.

use serde::{Deserialize, Serialize};

use super::regime::RegimeLabel;
use crate::domain::{AssetClass, AssetSnapshot};

/// Attached to every report that carries a preview
pub const DISCLAIMER: &str =
    "Illustrative demo output from simulated data. Not a trading recommendation.";

/// Demo action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalPreview {
    Buy,
    Sell,
    Hold,
}

impl SignalPreview {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalPreview::Buy => "BUY",
            SignalPreview::Sell => "SELL",
            SignalPreview::Hold => "HOLD",
        }
    }

    /// Risk-On → BUY, Risk-Off → SELL, Transition → HOLD
    pub fn from_regime(regime: RegimeLabel) -> Self {
        match regime {
            RegimeLabel::RiskOn => SignalPreview::Buy,
            RegimeLabel::RiskOff => SignalPreview::Sell,
            RegimeLabel::Transition => SignalPreview::Hold,
        }
    }
}

impl std::fmt::Display for SignalPreview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-asset demo signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSignal {
    pub symbol: crate::domain::Symbol,
    pub action: SignalPreview,
    /// Probability of an up move, in percent with one decimal
    pub confidence: f64,
    pub drivers: Vec<String>,
}

const MOMENTUM_WEIGHT: f64 = 0.06;
const MOMENTUM_CLAMP_PCT: f64 = 5.0;
const REGIME_FIT_BONUS: f64 = 0.08;
const VOL_SPIKE_PENALTY: f64 = 0.05;
const BUY_AT: f64 = 0.60;
const SELL_AT: f64 = 0.40;

pub fn asset_signal(asset: &AssetSnapshot, vol_spike: bool, regime: RegimeLabel) -> AssetSignal {
    let momentum = asset
        .percent_change
        .clamp(-MOMENTUM_CLAMP_PCT, MOMENTUM_CLAMP_PCT);
    let mut p_up = 0.50 + MOMENTUM_WEIGHT * momentum;

    let regime_fit = matches!(
        (regime, asset.symbol.class()),
        (RegimeLabel::RiskOn, AssetClass::Risk) | (RegimeLabel::RiskOff, AssetClass::Haven)
    );
    if regime_fit {
        p_up += REGIME_FIT_BONUS;
    }
    if vol_spike {
        p_up -= VOL_SPIKE_PENALTY;
    }
    let p_up = p_up.clamp(0.05, 0.95);

    let action = if p_up >= BUY_AT {
        SignalPreview::Buy
    } else if p_up <= SELL_AT {
        SignalPreview::Sell
    } else {
        SignalPreview::Hold
    };

    AssetSignal {
        symbol: asset.symbol,
        action,
        confidence: (p_up * 1000.0).round() / 10.0,
        drivers: vec![
            format!("1-tick momentum: {:+.2}%", asset.percent_change),
            format!("regime: {regime}"),
        ],
    }
}
