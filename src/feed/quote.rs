//! Per-symbol fan-out with a last-known fallback
//!
//! `QuoteFeed` asks its `QuoteSource` for every tracked symbol concurrently,
//! each under its own timeout. A symbol that fails or times out is replaced by
//! its last good reading, flagged `stale`, so one bad symbol never blocks the
//! others. A symbol with no good reading yet fails the snapshot.

use async_trait::async_trait;
use futures::future::join_all;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::{QuoteSource, SnapshotSource};
use crate::domain::{AssetSnapshot, Snapshot, Symbol};
use crate::error::{PulseError, Result};

pub struct QuoteFeed<Q> {
    source: Q,
    quote_timeout: Duration,
    last_known: Mutex<HashMap<Symbol, AssetSnapshot>>,
}

impl<Q: QuoteSource> QuoteFeed<Q> {
    pub fn new(source: Q, quote_timeout: Duration) -> Self {
        Self {
            source,
            quote_timeout,
            last_known: Mutex::new(HashMap::new()),
        }
    }

    async fn fetch(&self, symbol: Symbol) -> Result<AssetSnapshot> {
        match timeout(self.quote_timeout, self.source.quote(symbol)).await {
            Ok(result) => result,
            Err(_) => Err(PulseError::Feed(format!(
                "{symbol} quote timed out after {}ms",
                self.quote_timeout.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl<Q: QuoteSource> SnapshotSource for QuoteFeed<Q> {
    fn name(&self) -> &'static str {
        self.source.name()
    }

    async fn snapshot(&self) -> Result<Snapshot> {
        let results = join_all(Symbol::TRACKED.iter().map(|s| self.fetch(*s))).await;

        let mut last_known = self.last_known.lock().await;
        let mut assets = Vec::with_capacity(Symbol::TRACKED.len());
        for (symbol, result) in Symbol::TRACKED.into_iter().zip(results) {
            match result {
                Ok(asset) => {
                    last_known.insert(symbol, asset.clone());
                    assets.push(asset);
                }
                Err(e) => {
                    let Some(previous) = last_known.get(&symbol) else {
                        return Err(PulseError::Feed(format!(
                            "{symbol} unavailable and no last-known reading: {e}"
                        )));
                    };
                    warn!(%symbol, error = %e, "quote failed, substituting last-known reading");
                    assets.push(previous.clone().marked_stale());
                }
            }
        }

        let snapshot = Snapshot::new(assets);
        debug!(snapshot_id = %snapshot.id, stale = snapshot.has_stale(), "snapshot assembled");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FixedFeed;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn readings() -> Vec<AssetSnapshot> {
        vec![
            AssetSnapshot::new(Symbol::Gld, 190.0, 0.1, 1_000_000),
            AssetSnapshot::new(Symbol::Spy, 500.0, 0.2, 1_000_000),
            AssetSnapshot::new(Symbol::BtcUsd, 50_000.0, 0.3, 1_000_000),
            AssetSnapshot::new(Symbol::Tlt, 95.0, -0.1, 1_000_000),
        ]
    }

    /// Serves fixed readings, but breaks one symbol from the second round on
    struct FlakySource {
        inner: FixedFeed,
        broken: Symbol,
        calls: AtomicUsize,
        hang: bool,
    }

    #[async_trait]
    impl QuoteSource for FlakySource {
        fn name(&self) -> &'static str {
            "flaky"
        }

        async fn quote(&self, symbol: Symbol) -> Result<AssetSnapshot> {
            if symbol == self.broken && self.calls.fetch_add(1, Ordering::SeqCst) > 0 {
                if self.hang {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                }
                return Err(PulseError::Feed("exchange down".to_string()));
            }
            self.inner.quote(symbol).await
        }
    }

    fn flaky(broken: Symbol, hang: bool) -> QuoteFeed<FlakySource> {
        QuoteFeed::new(
            FlakySource {
                inner: FixedFeed::new(readings()),
                broken,
                calls: AtomicUsize::new(0),
                hang,
            },
            Duration::from_millis(50),
        )
    }

    #[tokio::test]
    async fn healthy_quotes_pass_through() {
        let feed = QuoteFeed::new(FixedFeed::new(readings()), Duration::from_millis(50));
        let snapshot = feed.snapshot().await.unwrap();
        assert_eq!(snapshot.assets, readings());
        assert!(!snapshot.has_stale());
        assert_eq!(feed.name(), "fixed");
    }

    #[tokio::test]
    async fn failed_symbol_falls_back_to_last_known() {
        let feed = flaky(Symbol::Tlt, false);
        feed.snapshot().await.unwrap();

        let snapshot = feed.snapshot().await.unwrap();
        assert_eq!(snapshot.assets.len(), 4);
        let tlt = snapshot.get(Symbol::Tlt).unwrap();
        assert!(tlt.stale);
        assert_eq!(tlt.price, 95.0);
        assert!(!snapshot.get(Symbol::Spy).unwrap().stale);
    }

    #[tokio::test]
    async fn slow_symbol_times_out_without_blocking_others() {
        let feed = flaky(Symbol::BtcUsd, true);
        feed.snapshot().await.unwrap();

        let started = std::time::Instant::now();
        let snapshot = feed.snapshot().await.unwrap();
        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(snapshot.get(Symbol::BtcUsd).unwrap().stale);
        assert!(!snapshot.get(Symbol::Gld).unwrap().stale);
    }

    #[tokio::test]
    async fn no_last_known_fails_snapshot() {
        let mut partial = readings();
        partial.retain(|a| a.symbol != Symbol::Gld);
        let feed = QuoteFeed::new(FixedFeed::new(partial), Duration::from_millis(50));

        let err = feed.snapshot().await.unwrap_err();
        assert!(matches!(err, PulseError::Feed(_)));
        assert!(err.to_string().contains("GLD"));
    }
}
