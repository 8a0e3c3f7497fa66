use serde::{Deserialize, Serialize};

use crate::domain::{AssetSnapshot, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthEntry {
    pub symbol: Symbol,
    pub percent_change: f64,
}

/// Relative-strength ranking, strongest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeStrength {
    pub leader: Symbol,
    pub laggard: Symbol,
    pub ranking: Vec<StrengthEntry>,
}

/// Rank readings by percent change; ties keep quote-board listing order.
/// Returns `None` for an empty slice.
pub fn rank(assets: &[AssetSnapshot]) -> Option<RelativeStrength> {
    let mut ranking: Vec<StrengthEntry> = assets
        .iter()
        .map(|a| StrengthEntry {
            symbol: a.symbol,
            percent_change: a.percent_change,
        })
        .collect();
    ranking.sort_by(|a, b| {
        b.percent_change
            .total_cmp(&a.percent_change)
            .then(a.symbol.listing_rank().cmp(&b.symbol.listing_rank()))
    });

    let leader = ranking.first()?.symbol;
    let laggard = ranking.last()?.symbol;
    Some(RelativeStrength {
        leader,
        laggard,
        ranking,
    })
}
