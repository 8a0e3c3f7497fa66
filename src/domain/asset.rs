use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PulseError;

/// Tracked instruments shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Symbol {
    #[serde(rename = "GLD")]
    Gld,
    #[serde(rename = "SPY")]
    Spy,
    #[serde(rename = "BTC-USD")]
    BtcUsd,
    #[serde(rename = "TLT")]
    Tlt,
}

/// Whether an asset trades with risk appetite or against it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Risk,
    Haven,
}

impl Symbol {
    /// Every tracked symbol, in dashboard order
    pub const TRACKED: [Symbol; 4] = [Symbol::Gld, Symbol::Spy, Symbol::BtcUsd, Symbol::Tlt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::Gld => "GLD",
            Symbol::Spy => "SPY",
            Symbol::BtcUsd => "BTC-USD",
            Symbol::Tlt => "TLT",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Symbol::Gld => "Gold (GLD)",
            Symbol::Spy => "S&P 500 (SPY)",
            Symbol::BtcUsd => "Bitcoin (BTC-USD)",
            Symbol::Tlt => "Treasuries (TLT)",
        }
    }

    pub fn class(&self) -> AssetClass {
        match self {
            Symbol::Spy | Symbol::BtcUsd => AssetClass::Risk,
            Symbol::Gld | Symbol::Tlt => AssetClass::Haven,
        }
    }

    /// Listing order of the quote board (SPY, GLD, BTC-USD, TLT); breaks
    /// relative-strength ties
    pub fn listing_rank(&self) -> usize {
        match self {
            Symbol::Spy => 0,
            Symbol::Gld => 1,
            Symbol::BtcUsd => 2,
            Symbol::Tlt => 3,
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Symbol {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GLD" => Ok(Symbol::Gld),
            "SPY" => Ok(Symbol::Spy),
            "BTC-USD" | "BTCUSD" | "BTC" => Ok(Symbol::BtcUsd),
            "TLT" => Ok(Symbol::Tlt),
            _ => Err(PulseError::UnknownSymbol(s.to_string())),
        }
    }
}

impl TryFrom<String> for Symbol {
    type Error = PulseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Price/volume reading for one asset at the snapshot instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    pub symbol: Symbol,
    pub price: f64,
    /// Change versus the previous tick, in percent (1.5 = 1.5%)
    pub percent_change: f64,
    pub volume: u64,
    /// Set when the feed substituted a last-known reading
    #[serde(default)]
    pub stale: bool,
}

impl AssetSnapshot {
    pub fn new(symbol: Symbol, price: f64, percent_change: f64, volume: u64) -> Self {
        Self {
            symbol,
            price,
            percent_change,
            volume,
            stale: false,
        }
    }

    pub fn marked_stale(mut self) -> Self {
        self.stale = true;
        self
    }
}

/// Single-instant set of readings for the tracked assets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: Uuid,
    pub taken_at: DateTime<Utc>,
    pub assets: Vec<AssetSnapshot>,
}

impl Snapshot {
    pub fn new(assets: Vec<AssetSnapshot>) -> Self {
        Self {
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            assets,
        }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&AssetSnapshot> {
        self.assets.iter().find(|a| a.symbol == symbol)
    }

    pub fn has_stale(&self) -> bool {
        self.assets.iter().any(|a| a.stale)
    }
}
