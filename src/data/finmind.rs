use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    config::{FINMIND, FinMindApiConfig},
    data::{DateRange, MarketDataProvider},
    domain::Candle,
    utils::TimeUtils,
};

#[cfg(debug_assertions)]
use crate::config::DF;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{symbol}: HTTP {status}")]
    Http { symbol: String, status: u16 },
    #[error("{symbol}: FinMind status {status}: {msg}")]
    Api {
        symbol: String,
        status: i64,
        msg: String,
    },
    #[error("{symbol}: no price rows between {start} and {end}")]
    NoData {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// Body of every FinMind v4 data response.
#[derive(Debug, Deserialize)]
struct FinMindResponse {
    status: i64,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Vec<FinMindRow>,
}

/// One `TaiwanStockPrice` row. FinMind names high/low `max`/`min`.
#[derive(Debug, Clone, Deserialize)]
struct FinMindRow {
    date: NaiveDate,
    open: f64,
    max: f64,
    min: f64,
    close: f64,
    #[serde(rename = "Trading_Volume", default)]
    trading_volume: Option<f64>,
}

impl From<FinMindRow> for Candle {
    fn from(row: FinMindRow) -> Self {
        Candle::new(
            row.date,
            row.open,
            row.max,
            row.min,
            row.close,
            // null, missing or negative volume counts as 0
            row.trading_volume.map_or(0, |v| v.max(0.0) as u64),
        )
    }
}

/// Daily history from the FinMind REST API.
pub struct FinMindProvider {
    client: reqwest::Client,
    config: &'static FinMindApiConfig,
    token: Option<String>,
}

impl FinMindProvider {
    pub fn new(client: reqwest::Client, token: Option<String>) -> Self {
        Self {
            client,
            config: &FINMIND,
            token,
        }
    }

    /// Token taken from the configured environment variable when set.
    pub fn from_env(client: reqwest::Client) -> Self {
        let token = std::env::var(FINMIND.token_env_var)
            .ok()
            .filter(|t| !t.is_empty());
        Self::new(client, token)
    }

    pub fn build_client() -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(FINMIND.timeout)
            .build()
            .context("Failed to build HTTP client")
    }
}

/// Sorted by date, one row per date (the last one seen wins).
fn rows_to_candles(mut rows: Vec<FinMindRow>) -> Vec<Candle> {
    rows.reverse();
    // Reversed so the stable sort + dedup keeps the last row per date.
    rows.sort_by_key(|r| r.date);
    rows.dedup_by_key(|r| r.date);
    rows.into_iter().map(Candle::from).collect()
}

#[async_trait]
impl MarketDataProvider for FinMindProvider {
    async fn fetch_candles(&self, symbol: &str, range: DateRange) -> Result<Vec<Candle>> {
        let start_date = TimeUtils::format_date(range.start);
        let end_date = TimeUtils::format_date(range.end);

        #[cfg(debug_assertions)]
        if DF.log_provider {
            log::info!(
                "FINMIND: {} {} {} ~ {}",
                self.config.dataset,
                symbol,
                start_date,
                end_date
            );
        }

        let mut request = self.client.get(self.config.base_url).query(&[
            ("dataset", self.config.dataset),
            ("data_id", symbol),
            ("start_date", start_date.as_str()),
            ("end_date", end_date.as_str()),
        ]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("FinMind request failed for {}", symbol))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Http {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body: FinMindResponse = response
            .json()
            .await
            .with_context(|| format!("Malformed FinMind body for {}", symbol))?;

        if body.status != self.config.ok_status {
            return Err(ProviderError::Api {
                symbol: symbol.to_string(),
                status: body.status,
                msg: body.msg,
            }
            .into());
        }
        if body.data.is_empty() {
            return Err(ProviderError::NoData {
                symbol: symbol.to_string(),
                start: range.start,
                end: range.end,
            }
            .into());
        }

        let candles = rows_to_candles(body.data);

        #[cfg(debug_assertions)]
        if DF.log_provider {
            log::info!("FINMIND: {} -> {} candles", symbol, candles.len());
        }

        Ok(candles)
    }

    fn name(&self) -> &str {
        "finmind"
    }
}
