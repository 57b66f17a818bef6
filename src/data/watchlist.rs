use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[cfg(debug_assertions)]
use crate::config::DF;

/// One symbol to analyse, as listed by the watchlist service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub change_percent: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl WatchlistEntry {
    /// Entry for a symbol typed on the command line.
    pub fn from_code(code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            name: code.clone(),
            code,
            change_percent: None,
            price: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WatchlistBody {
    #[serde(default)]
    stocks: Vec<WatchlistEntry>,
}

fn parse_watchlist(text: &str) -> Result<Vec<WatchlistEntry>> {
    let body: WatchlistBody = serde_json::from_str(text).context("Malformed watchlist body")?;
    Ok(body.stocks)
}

/// GET `url` and read its `stocks` array. A body without one is an empty list.
pub async fn fetch_watchlist(client: &reqwest::Client, url: &str) -> Result<Vec<WatchlistEntry>> {
    let text = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Watchlist request failed: {}", url))?
        .error_for_status()
        .with_context(|| format!("Watchlist endpoint returned an error: {}", url))?
        .text()
        .await?;

    let entries = parse_watchlist(&text)?;

    #[cfg(debug_assertions)]
    if DF.log_batch {
        log::info!("WATCHLIST: {} entries from {}", entries.len(), url);
    }

    Ok(entries)
}
