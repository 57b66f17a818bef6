use std::{collections::HashMap, sync::Arc};

use anyhow::{Context, Result};
use approx::assert_relative_eq;
use async_trait::async_trait;
use chrono::{Days, NaiveDate, NaiveDateTime};

use smc_scanner::{
    AnalysisPipeline, BatchRunner, Candle, CandleSeries, JsonResultsRepository, MarketDataProvider,
    ResultsRepository, WatchlistEntry,
    analysis::verify::{check_all, check_fair_value_gap, check_swing_low},
    config::{ANALYSIS, PriceLike},
    data::DateRange,
    models::{BatchStatus, GapKind, SwingKind, TradeDirection},
};

fn stamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 11, 12)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap()
}

/// Uptrend with swing lows at 2 (8.0) and 5 (10.0), swing highs at 3 (15.0) and 6 (17.0)
/// for lookback 2, plus one bullish gap ending at 7.
fn uptrend() -> Vec<Candle> {
    let start = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
    let bars = [
        (11.0, 9.0),
        (12.0, 10.0),
        (11.0, 8.0),
        (15.0, 12.0),
        (14.0, 11.0),
        (13.0, 10.0),
        (17.0, 13.0),
        (16.0, 14.0),
        (16.5, 15.0),
        (17.5, 16.0),
    ];
    bars.iter()
        .enumerate()
        .map(|(i, &(high, low))| {
            let close = (high + low) / 2.0;
            Candle::new(start + Days::new(i as u64), low, high, low, close, 1_000 * (i as u64 + 1))
        })
        .collect()
}

fn lookback_two() -> AnalysisPipeline {
    AnalysisPipeline::new(ANALYSIS.with_lookback(2))
}

#[test]
fn uptrend_produces_long_setup() {
    let series = CandleSeries::new(uptrend()).unwrap();
    let result = lookback_two().run("1513", &series, stamp());

    let swings: Vec<(usize, SwingKind, f64)> = result
        .swing_points
        .iter()
        .map(|p| (p.index, p.kind, p.level.value()))
        .collect();
    assert_eq!(
        swings,
        vec![
            (2, SwingKind::Low, 8.0),
            (3, SwingKind::High, 15.0),
            (5, SwingKind::Low, 10.0),
            (6, SwingKind::High, 17.0),
        ]
    );

    let setup = &result.setup;
    assert_eq!(setup.direction, TradeDirection::Long);
    assert!(setup.entry_zone.contains(10.0));
    assert_relative_eq!(setup.entry_zone.low().value(), 9.95);
    assert_relative_eq!(setup.entry_zone.high().value(), 10.05);
    assert!(setup.take_profit.value() >= setup.entry_zone.high().value());
    assert_relative_eq!(setup.take_profit.value(), 17.0);
    // only two lows: fallback stop from the latest close (16.75)
    assert_relative_eq!(setup.stop_loss.value(), 15.91);
    assert_relative_eq!(setup.risk_reward.value(), 1.2);
    assert!((setup.reward() / setup.risk() - setup.risk_reward.value()).abs() <= 0.1);

    assert_eq!(result.fair_value_gaps.len(), 1);
    let gap = &result.fair_value_gaps[0];
    assert_eq!((gap.index, gap.kind, gap.start_index), (7, GapKind::Bullish, 5));
    assert_eq!((gap.top.value(), gap.bottom.value()), (14.0, 13.0));

    assert!(result.structure_signals.is_empty());
}

#[test]
fn flat_series_waits_around_close() {
    let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    let candles = (0..20)
        .map(|i| Candle::new(start + Days::new(i), 50.0, 50.0, 50.0, 50.0, 0))
        .collect();
    let series = CandleSeries::new(candles).unwrap();
    let result = AnalysisPipeline::default().run("0050", &series, stamp());

    assert_eq!(result.setup.direction, TradeDirection::Wait);
    assert_relative_eq!(result.setup.entry_zone.low().value(), 49.0);
    assert_relative_eq!(result.setup.entry_zone.high().value(), 51.0);
}

#[test]
fn payload_uses_wire_names_and_is_reproducible() {
    let series = CandleSeries::new(uptrend()).unwrap();
    let pipeline = lookback_two();

    let first = serde_json::to_string_pretty(&pipeline.run("1513", &series, stamp())).unwrap();
    let second = serde_json::to_string_pretty(&pipeline.run("1513", &series, stamp())).unwrap();
    assert_eq!(first, second);

    let json: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(json["symbol"], "1513");
    assert_eq!(json["data_range"]["count"], 10);
    assert_eq!(json["data_range"]["start"], "2025-11-01");
    assert_eq!(json["lookback"], 2);
    assert_eq!(json["swing_points"][0]["type"], "swing_low");
    assert_eq!(json["swing_points"][1]["type"], "swing_high");
    assert_eq!(json["fvg"][0]["type"], "bullish");
    assert!(json["bos_choch"].as_array().unwrap().is_empty());
    assert_eq!(json["setup"]["direction"], "LONG");
    assert_eq!(json["setup"]["entry_zone"], serde_json::json!([9.95, 10.05]));
    assert_eq!(json["setup"]["tp"], 17.0);
    assert_eq!(json["setup"]["rr"], 1.2);
    assert_eq!(json["setup"]["latest_close"], 16.75);
}

#[test]
fn spot_checks_agree_with_detectors() {
    let series = CandleSeries::new(uptrend()).unwrap();
    let result = lookback_two().run("1513", &series, stamp());

    let checks = check_all(&result, 2);
    assert_eq!(checks.len(), 5);
    assert!(checks.iter().all(|c| c.passed), "{:#?}", checks);

    assert!(check_swing_low(&result.candles, 5, 2).passed);
    assert!(!check_swing_low(&result.candles, 4, 2).passed);
    assert!(!check_fair_value_gap(&result.candles, 7, GapKind::Bearish).passed);
}

struct FixtureProvider(HashMap<&'static str, Vec<Candle>>);

#[async_trait]
impl MarketDataProvider for FixtureProvider {
    async fn fetch_candles(&self, symbol: &str, range: DateRange) -> Result<Vec<Candle>> {
        let candles = self
            .0
            .get(symbol)
            .with_context(|| format!("{}: no such fixture", symbol))?;
        Ok(candles.iter().filter(|c| range.contains(c.date)).cloned().collect())
    }

    fn name(&self) -> &str {
        "fixtures"
    }
}

#[tokio::test]
async fn batch_keeps_going_past_a_failing_symbol() {
    let tmp = tempfile::tempdir().unwrap();
    let mut shuffled = uptrend();
    shuffled.swap(3, 4);

    let provider = FixtureProvider(HashMap::from([
        ("1513", uptrend()),
        ("2330", uptrend()),
        ("BAD", shuffled),
    ]));
    let repo = Arc::new(JsonResultsRepository::new(tmp.path()));

    let runner = BatchRunner::new(Arc::new(provider), repo.clone(), lookback_two())
        .with_end_date(NaiveDate::from_ymd_opt(2025, 11, 12).unwrap())
        .with_concurrency(3);

    let entries: Vec<WatchlistEntry> = ["1513", "BAD", "NOPE", "2330"]
        .into_iter()
        .map(WatchlistEntry::from_code)
        .collect();
    let index = runner.run_at(&entries, stamp()).await.unwrap();

    assert_eq!(index.source, "fixtures");
    assert_eq!(index.total, 4);
    assert_eq!(index.success + index.failed, index.total);
    assert_eq!(index.success, 2);

    let statuses: Vec<bool> = index.stocks.iter().map(|e| e.is_success()).collect();
    assert_eq!(statuses, vec![true, false, false, true]);
    match &index.stocks[1].status {
        BatchStatus::Failed { error } => assert!(error.contains("ascending"), "{}", error),
        other => panic!("expected failure, got {:?}", other),
    }
    match &index.stocks[2].status {
        BatchStatus::Failed { error } => assert!(error.contains("no such fixture"), "{}", error),
        other => panic!("expected failure, got {:?}", other),
    }

    let saved = repo.load_result("1513").await.unwrap();
    assert_eq!(saved.generated_at, stamp());
    assert_eq!(saved.setup.direction, TradeDirection::Long);
    assert_eq!(saved.swing_lookback(), 2);
    assert!(check_all(&saved, saved.swing_lookback()).iter().all(|c| c.passed));

    // same inputs, same bytes
    let before = std::fs::read_to_string(tmp.path().join("2330.json")).unwrap();
    repo.save_result(&saved).await.unwrap();
    runner.run_at(&entries, stamp()).await.unwrap();
    let after = std::fs::read_to_string(tmp.path().join("2330.json")).unwrap();
    assert_eq!(before, after);
}
