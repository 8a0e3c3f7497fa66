use async_trait::async_trait;

use super::{QuoteSource, SnapshotSource};
use crate::domain::{AssetSnapshot, Snapshot, Symbol};
use crate::error::{PulseError, Result};

/// Serves the same readings on every call
#[derive(Debug, Clone)]
pub struct FixedFeed {
    readings: Vec<AssetSnapshot>,
}

impl FixedFeed {
    pub fn new(readings: Vec<AssetSnapshot>) -> Self {
        Self { readings }
    }
}

#[async_trait]
impl SnapshotSource for FixedFeed {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot::new(self.readings.clone()))
    }
}

#[async_trait]
impl QuoteSource for FixedFeed {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn quote(&self, symbol: Symbol) -> Result<AssetSnapshot> {
        self.readings
            .iter()
            .find(|a| a.symbol == symbol)
            .cloned()
            .ok_or_else(|| PulseError::Feed(format!("no fixed reading for {symbol}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_snapshot_is_fresh() {
        let feed = FixedFeed::new(vec![AssetSnapshot::new(Symbol::Gld, 190.0, 0.1, 10)]);
        let a = tokio_test::block_on(feed.snapshot()).unwrap();
        let b = tokio_test::block_on(feed.snapshot()).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.assets, b.assets);
    }

    #[tokio::test]
    async fn quote_unknown_symbol_is_feed_error() {
        let feed = FixedFeed::new(vec![AssetSnapshot::new(Symbol::Gld, 190.0, 0.1, 10)]);
        assert_eq!(feed.quote(Symbol::Gld).await.unwrap().price, 190.0);
        let err = feed.quote(Symbol::Tlt).await.unwrap_err();
        assert!(matches!(err, PulseError::Feed(_)));
    }
}
