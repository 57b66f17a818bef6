mod finmind;
mod provider;
mod results_repo;
mod watchlist;

pub use {
    finmind::{FinMindProvider, ProviderError},
    provider::{DateRange, JsonFileProvider, MarketDataProvider},
    results_repo::{JsonResultsRepository, ResultsRepository},
    watchlist::{WatchlistEntry, fetch_watchlist},
};
