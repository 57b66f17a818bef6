//! Batch run configuration

/// Tunables for driving many symbols in one run
pub struct BatchConfig {
    /// Upper bound on in-flight history requests
    pub max_concurrent_fetches: usize,
    /// Default watchlist endpoint (`{"stocks": [...]}`)
    pub watchlist_url: &'static str,
}

pub const BATCH: BatchConfig = BatchConfig {
    max_concurrent_fetches: 4,
    watchlist_url: "https://stock-replay-production.up.railway.app/api/stocks/day-trading/losers",
};
