use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use serde::Deserialize;

use crate::{config::result_filename, domain::Candle};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Inclusive calendar range of a history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// `days` calendar days back from `end`.
    pub fn last_days(end: NaiveDate, days: u32) -> Self {
        let start = end
            .checked_sub_days(Days::new(days as u64))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Abstract interface for fetching daily history.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Candles for `symbol` inside `range`, oldest first.
    async fn fetch_candles(&self, symbol: &str, range: DateRange) -> Result<Vec<Candle>>;

    /// Short label used in logs and the batch index.
    fn name(&self) -> &str;
}

/// Reads `<dir>/<symbol>.json`: a bare candle array, or a saved result.
pub struct JsonFileProvider {
    dir: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CandleFile {
    Bare(Vec<Candle>),
    Saved { candles: Vec<Candle> },
}

impl JsonFileProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl MarketDataProvider for JsonFileProvider {
    async fn fetch_candles(&self, symbol: &str, range: DateRange) -> Result<Vec<Candle>> {
        let path = self.dir.join(result_filename(symbol));
        let text = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let candles = match serde_json::from_str(&text)
            .with_context(|| format!("Unrecognised candle file {}", path.display()))?
        {
            CandleFile::Bare(candles) | CandleFile::Saved { candles } => candles,
        };

        let in_range: Vec<Candle> = candles
            .into_iter()
            .filter(|c| range.contains(c.date))
            .collect();

        #[cfg(debug_assertions)]
        if DF.log_provider {
            log::info!(
                "FILES: {} -> {} candles in {} ~ {}",
                symbol,
                in_range.len(),
                range.start,
                range.end
            );
        }

        Ok(in_range)
    }

    fn name(&self) -> &str {
        "files"
    }
}
