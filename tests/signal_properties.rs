use macropulse::config::FeedConfig;
use macropulse::signal::{DetectorConfig, RegimeLabel, SignalConfig, SignalPreview};
use macropulse::{
    AssetSnapshot, PulseError, SignalComputer, SimulatedFeed, Snapshot, SnapshotSource, Symbol,
};

/// Regime/signal must depend on the percent changes only
#[tokio::test]
async fn simulated_snapshots_satisfy_report_invariants() {
    let feed = SimulatedFeed::new(&FeedConfig {
        seed: Some(2024),
        ..FeedConfig::default()
    })
    .unwrap();
    let config = DetectorConfig::default();
    let computer = SignalComputer::default();

    for _ in 0..200 {
        let snapshot = feed.snapshot().await.unwrap();
        let report = computer.compute(&snapshot).unwrap();

        assert_eq!(report.snapshot_id, snapshot.id);
        assert_eq!(report.detectors.len(), 4);
        let symbols: Vec<Symbol> = report.detectors.iter().map(|d| d.symbol).collect();
        assert_eq!(symbols, Symbol::TRACKED.to_vec());

        for detector in &report.detectors {
            let asset = snapshot.get(detector.symbol).unwrap();
            assert_eq!(
                detector.move_flag,
                asset.percent_change.abs() > config.move_threshold_pct
            );
            assert_eq!(
                detector.vol_spike_flag,
                asset.volume as f64
                    > config.volume_baseline as f64 * config.volume_spike_multiplier
            );
            assert_eq!(detector.volume, asset.volume);
        }

        assert_eq!(report.signal, SignalPreview::from_regime(report.regime.label));

        // Same percent changes, different prices and volumes
        let twin = Snapshot::new(
            snapshot
                .assets
                .iter()
                .map(|a| {
                    AssetSnapshot::new(a.symbol, a.price * 2.0, a.percent_change, a.volume / 2)
                })
                .collect(),
        );
        let twin_report = computer.compute(&twin).unwrap();
        assert_eq!(twin_report.regime, report.regime);
        assert_eq!(twin_report.signal, report.signal);
    }
}

#[test]
fn boundary_values_do_not_flag() {
    let computer = SignalComputer::new(SignalConfig::default());
    let snapshot = Snapshot::new(vec![
        AssetSnapshot::new(Symbol::Gld, 190.0, 1.5, 1_500_000),
        AssetSnapshot::new(Symbol::Spy, 500.0, -1.5, 1_500_000),
        AssetSnapshot::new(Symbol::BtcUsd, 50_000.0, 1.5, 1_500_000),
        AssetSnapshot::new(Symbol::Tlt, 95.0, -1.5, 1_500_000),
    ]);
    let report = computer.compute(&snapshot).unwrap();
    assert!(report.detectors.iter().all(|d| !d.move_flag && !d.vol_spike_flag));
    assert_eq!(report.regime.label, RegimeLabel::Transition);
    assert_eq!(report.signal, SignalPreview::Hold);
}

#[test]
fn every_missing_symbol_is_reported() {
    let computer = SignalComputer::default();
    for missing in Symbol::TRACKED {
        let assets = Symbol::TRACKED
            .iter()
            .filter(|s| **s != missing)
            .map(|s| AssetSnapshot::new(*s, 100.0, 0.5, 1_000_000))
            .collect();
        match computer.compute(&Snapshot::new(assets)) {
            Err(PulseError::MissingAssetData(symbol)) => assert_eq!(symbol, missing),
            other => panic!("expected MissingAssetData({missing}), got {other:?}"),
        }
    }
}
