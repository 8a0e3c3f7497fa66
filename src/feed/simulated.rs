//! Gaussian random-walk market simulator
//!
//! Each call moves the requested symbol one tick from its previous price and
//! reports the change against that previous price. Volume is drawn fresh each
//! tick around the configured base volume.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::{QuoteSource, SnapshotSource};
use crate::config::FeedConfig;
use crate::domain::{AssetSnapshot, Snapshot, Symbol};
use crate::error::{PulseError, Result};

const PRICE_FLOOR: f64 = 0.01;

#[derive(Debug)]
struct WalkState {
    rng: StdRng,
    last: HashMap<Symbol, f64>,
}

#[derive(Debug)]
pub struct SimulatedFeed {
    shocks: HashMap<Symbol, Normal<f64>>,
    volume_noise: Normal<f64>,
    base_volume: u64,
    state: Mutex<WalkState>,
}

impl SimulatedFeed {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let mut shocks = HashMap::new();
        let mut last = HashMap::new();
        for asset in &config.assets {
            let normal = Normal::new(0.0, asset.volatility).map_err(|e| {
                PulseError::Feed(format!("bad volatility for {}: {e}", asset.symbol))
            })?;
            shocks.insert(asset.symbol, normal);
            last.insert(asset.symbol, asset.base_price);
        }
        let volume_noise = Normal::new(0.0, config.volume_dispersion)
            .map_err(|e| PulseError::Feed(format!("bad volume dispersion: {e}")))?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            shocks,
            volume_noise,
            base_volume: config.base_volume,
            state: Mutex::new(WalkState { rng, last }),
        })
    }

    fn tick(&self, state: &mut WalkState, symbol: Symbol) -> Result<AssetSnapshot> {
        let shock = self
            .shocks
            .get(&symbol)
            .ok_or_else(|| PulseError::Feed(format!("{symbol} is not simulated")))?;
        let old = state
            .last
            .get(&symbol)
            .copied()
            .ok_or_else(|| PulseError::Feed(format!("{symbol} has no starting price")))?;

        let new = (old * (1.0 + shock.sample(&mut state.rng))).max(PRICE_FLOOR);
        let volume_mult = 1.0 + self.volume_noise.sample(&mut state.rng).abs();
        let volume = (self.base_volume as f64 * volume_mult) as u64;

        state.last.insert(symbol, new);
        Ok(AssetSnapshot::new(symbol, new, percent_change(new, old), volume))
    }
}

fn percent_change(new: f64, old: f64) -> f64 {
    if old == 0.0 {
        return 0.0;
    }
    (new - old) / old * 100.0
}

#[async_trait]
impl QuoteSource for SimulatedFeed {
    fn name(&self) -> &'static str {
        "random"
    }

    async fn quote(&self, symbol: Symbol) -> Result<AssetSnapshot> {
        let mut state = self.state.lock().await;
        self.tick(&mut state, symbol)
    }
}

#[async_trait]
impl SnapshotSource for SimulatedFeed {
    fn name(&self) -> &'static str {
        "random"
    }

    async fn snapshot(&self) -> Result<Snapshot> {
        let mut state = self.state.lock().await;
        let assets = Symbol::TRACKED
            .iter()
            .map(|s| self.tick(&mut state, *s))
            .collect::<Result<Vec<_>>>()?;
        Ok(Snapshot::new(assets))
    }
}
