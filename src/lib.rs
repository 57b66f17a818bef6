#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod utils;

// Re-export commonly used types outside of crate (for the binaries and integration tests)
pub use analysis::AnalysisPipeline;
pub use data::{
    FinMindProvider, JsonFileProvider, JsonResultsRepository, MarketDataProvider,
    ResultsRepository, WatchlistEntry,
};
pub use domain::{Candle, CandleSeries};
pub use engine::BatchRunner;
pub use models::{AnalysisResult, BatchIndex, TradeSetup};

use std::{path::PathBuf, sync::Arc};

use crate::config::{ANALYSIS, AnalysisConfig, BATCH, PERSISTENCE};

// CLI argument parsing
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Swing structure, FVG and BOS scanner for daily candles", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Where price history comes from
    #[arg(long, value_enum, default_value_t = Source::Finmind, global = true)]
    pub source: Source,

    /// Directory of `<symbol>.json` candle files (with `--source files`)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Candles on each side a swing point must dominate
    #[arg(long, global = true)]
    pub lookback: Option<usize>,

    /// Calendar days of history to request
    #[arg(long, global = true)]
    pub days: Option<u32>,

    /// Directory results and the batch index are written to
    #[arg(long, default_value = PERSISTENCE.results.directory, global = true)]
    pub output_dir: PathBuf,

    /// Maximum in-flight history requests during a batch
    #[arg(long, default_value_t = BATCH.max_concurrent_fetches, global = true)]
    pub concurrency: usize,

    /// FinMind API token (falls back to FINMIND_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyse one symbol and save its result
    Analyze { symbol: String },
    /// Analyse a watchlist (or an explicit symbol list) and write index.json
    Batch {
        #[arg(long, conflicts_with = "symbols")]
        watchlist_url: Option<String>,
        #[arg(long, value_delimiter = ',')]
        symbols: Vec<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Finmind,
    Files,
}

impl Cli {
    /// The analysis blueprint with any command-line overrides applied.
    pub fn analysis_config(&self) -> AnalysisConfig {
        let mut config = ANALYSIS;
        if let Some(lookback) = self.lookback {
            config = config.with_lookback(lookback);
        }
        if let Some(days) = self.days {
            config = config.with_history_days(days);
        }
        config
    }

    pub fn build_provider(&self, client: reqwest::Client) -> anyhow::Result<Arc<dyn MarketDataProvider>> {
        let provider: Arc<dyn MarketDataProvider> = match self.source {
            Source::Finmind => match &self.token {
                Some(token) => Arc::new(FinMindProvider::new(client, Some(token.clone()))),
                None => Arc::new(FinMindProvider::from_env(client)),
            },
            Source::Files => {
                let dir = self
                    .data_dir
                    .clone()
                    .ok_or_else(|| anyhow::anyhow!("--source files needs --data-dir"))?;
                Arc::new(JsonFileProvider::new(dir))
            }
        };
        Ok(provider)
    }
}
