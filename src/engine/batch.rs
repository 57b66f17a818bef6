use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use futures::{StreamExt, stream};
use rayon::prelude::*;

use crate::{
    analysis::AnalysisPipeline,
    config::BATCH,
    data::{DateRange, MarketDataProvider, ResultsRepository, WatchlistEntry},
    domain::{Candle, CandleSeries},
    models::{AnalysisResult, BatchEntry, BatchIndex, BatchStatus},
    utils::{AppInstant, TimeUtils, format_duration},
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Drives fetch -> analyse -> save for many symbols.
/// One symbol failing never stops the others.
pub struct BatchRunner {
    provider: Arc<dyn MarketDataProvider>,
    repo: Arc<dyn ResultsRepository>,
    pipeline: AnalysisPipeline,
    max_concurrent_fetches: usize,
    end_date: NaiveDate,
    source: String,
}

impl BatchRunner {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        repo: Arc<dyn ResultsRepository>,
        pipeline: AnalysisPipeline,
    ) -> Self {
        let source = provider.name().to_string();
        Self {
            provider,
            repo,
            pipeline,
            max_concurrent_fetches: BATCH.max_concurrent_fetches,
            end_date: TimeUtils::today(),
            source,
        }
    }

    pub fn with_concurrency(mut self, max_concurrent_fetches: usize) -> Self {
        self.max_concurrent_fetches = max_concurrent_fetches.max(1);
        self
    }

    /// Last day of the requested history (defaults to today).
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = end_date;
        self
    }

    /// Recorded as `source` in the index (watchlist URL, "cli", ...).
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn date_range(&self) -> DateRange {
        DateRange::last_days(self.end_date, self.pipeline.config.history_days)
    }

    /// Fetches, analyses and saves one symbol.
    pub async fn analyze_symbol(
        &self,
        symbol: &str,
        generated_at: NaiveDateTime,
    ) -> Result<(AnalysisResult, PathBuf)> {
        let candles = self.provider.fetch_candles(symbol, self.date_range()).await?;
        let result = Self::analyze(&self.pipeline, symbol, candles, generated_at)?;
        let path = self.repo.save_result(&result).await?;
        Ok((result, path))
    }

    pub async fn run(&self, entries: &[WatchlistEntry]) -> Result<BatchIndex> {
        self.run_at(entries, TimeUtils::now_local()).await
    }

    /// Every result in the run shares `generated_at`.
    pub async fn run_at(
        &self,
        entries: &[WatchlistEntry],
        generated_at: NaiveDateTime,
    ) -> Result<BatchIndex> {
        let started = AppInstant::now();
        let range = self.date_range();
        let total = entries.len();

        // 1. Fetch (bounded concurrency, completion order)
        let mut fetched: Vec<(usize, Result<Vec<Candle>>)> = stream::iter(entries.iter().enumerate())
            .map(|(i, entry)| {
                let provider = &self.provider;
                async move { (i, provider.fetch_candles(&entry.code, range).await) }
            })
            .buffer_unordered(self.max_concurrent_fetches)
            .boxed()
            .collect()
            .await;
        fetched.sort_by_key(|(i, _)| *i);

        // 2. Analyse (CPU bound, rayon on the blocking pool, input order kept)
        let pipeline = self.pipeline.clone();
        let codes: Vec<String> = entries.iter().map(|e| e.code.clone()).collect();
        let analysed: Vec<Result<AnalysisResult>> = tokio::task::spawn_blocking(move || {
            fetched
                .into_par_iter()
                .map(|(i, candles)| Self::analyze(&pipeline, &codes[i], candles?, generated_at))
                .collect()
        })
        .await
        .context("Analysis task panicked")?;

        // 3. Save and record
        let mut stocks = Vec::with_capacity(total);
        for (n, (entry, outcome)) in entries.iter().zip(analysed).enumerate() {
            let status = match outcome {
                Ok(result) => match self.repo.save_result(&result).await {
                    Ok(path) => {
                        #[cfg(debug_assertions)]
                        if DF.log_batch {
                            log::info!("[{}/{}] {}", n + 1, total, result.summary());
                        }
                        BatchStatus::Success {
                            file: path.display().to_string(),
                        }
                    }
                    Err(e) => BatchStatus::Failed {
                        error: format!("{:#}", e),
                    },
                },
                Err(e) => BatchStatus::Failed {
                    error: format!("{:#}", e),
                },
            };

            if let BatchStatus::Failed { error } = &status {
                log::warn!("[{}/{}] {} {} failed: {}", n + 1, total, entry.code, entry.name, error);
            }

            stocks.push(BatchEntry {
                code: entry.code.clone(),
                name: entry.name.clone(),
                status,
            });
        }

        let index = BatchIndex::new(self.source.clone(), stocks);
        self.repo
            .save_index(&index)
            .await
            .context("Failed to write batch index")?;

        log::info!(
            "Batch done: {}/{} ok in {}",
            index.success,
            index.total,
            format_duration(started.elapsed().as_millis() as i64)
        );

        Ok(index)
    }

    fn analyze(
        pipeline: &AnalysisPipeline,
        symbol: &str,
        candles: Vec<Candle>,
        generated_at: NaiveDateTime,
    ) -> Result<AnalysisResult> {
        let series = CandleSeries::new(candles)
            .with_context(|| format!("{}: unusable price history", symbol))?;
        Ok(pipeline.run(symbol, &series, generated_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::JsonResultsRepository;
    use async_trait::async_trait;
    use chrono::Days;
    use std::collections::HashMap;

    struct MapProvider(HashMap<String, Vec<Candle>>);

    #[async_trait]
    impl MarketDataProvider for MapProvider {
        async fn fetch_candles(&self, symbol: &str, _range: DateRange) -> Result<Vec<Candle>> {
            self.0
                .get(symbol)
                .cloned()
                .with_context(|| format!("unknown symbol {}", symbol))
        }

        fn name(&self) -> &str {
            "memory"
        }
    }

    fn rising(n: u64) -> Vec<Candle> {
        let start = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        (0..n)
            .map(|i| {
                let p = 20.0 + i as f64;
                Candle::new(start + Days::new(i), p, p + 0.5, p - 0.5, p + 0.2, 1)
            })
            .collect()
    }

    #[tokio::test]
    async fn failures_are_recorded_in_input_order() {
        let tmp = tempfile::tempdir().unwrap();
        let mut data = HashMap::new();
        data.insert("A".to_string(), rising(12));
        data.insert("EMPTY".to_string(), vec![]);
        data.insert("C".to_string(), rising(30));

        let runner = BatchRunner::new(
            Arc::new(MapProvider(data)),
            Arc::new(JsonResultsRepository::new(tmp.path())),
            AnalysisPipeline::default(),
        )
        .with_concurrency(2)
        .with_source("cli");

        let entries: Vec<WatchlistEntry> = ["A", "MISSING", "EMPTY", "C"]
            .into_iter()
            .map(WatchlistEntry::from_code)
            .collect();
        let stamp = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let index = runner.run_at(&entries, stamp).await.unwrap();

        assert_eq!(index.source, "cli");
        assert_eq!((index.total, index.success, index.failed), (4, 2, 2));
        let codes: Vec<&str> = index.stocks.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, ["A", "MISSING", "EMPTY", "C"]);
        assert!(index.stocks[0].is_success());
        assert!(!index.stocks[1].is_success());
        assert!(matches!(&index.stocks[2].status, BatchStatus::Failed { error } if error.contains("empty")));

        assert!(tmp.path().join("A.json").exists());
        assert!(tmp.path().join("C.json").exists());
        assert!(!tmp.path().join("MISSING.json").exists());
        assert!(tmp.path().join("index.json").exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn runs_as_a_spawned_task_beside_other_work() {
        let tmp = tempfile::tempdir().unwrap();
        let data: HashMap<String, Vec<Candle>> = (0..8)
            .map(|n| (format!("S{}", n), rising(40 + n)))
            .collect();
        let runner = Arc::new(BatchRunner::new(
            Arc::new(MapProvider(data)),
            Arc::new(JsonResultsRepository::new(tmp.path())),
            AnalysisPipeline::default(),
        ));
        let entries: Vec<WatchlistEntry> = (0..8)
            .map(|n| WatchlistEntry::from_code(format!("S{}", n)))
            .collect();
        let stamp = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();

        let batch = {
            let runner = runner.clone();
            tokio::spawn(async move { runner.run_at(&entries, stamp).await })
        };
        let ticker = tokio::spawn(async {
            for _ in 0..3 {
                tokio::task::yield_now().await;
            }
            "ticked"
        });

        let index = batch.await.unwrap().unwrap();
        assert_eq!(ticker.await.unwrap(), "ticked");
        assert_eq!((index.total, index.success, index.failed), (8, 8, 0));
        let codes: Vec<&str> = index.stocks.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, ["S0", "S1", "S2", "S3", "S4", "S5", "S6", "S7"]);
    }
}
