//! FinMind REST API configuration

use std::time::Duration;

/// Configuration for the FinMind data provider
pub struct FinMindApiConfig {
    /// Endpoint serving every dataset
    pub base_url: &'static str,
    /// Daily OHLCV dataset for Taiwan listed stocks
    pub dataset: &'static str,
    /// Per-request timeout
    pub timeout: Duration,
    /// Environment variable holding the optional API token
    pub token_env_var: &'static str,
    /// Status code FinMind reports in the body on success
    pub ok_status: i64,
}

pub const FINMIND: FinMindApiConfig = FinMindApiConfig {
    base_url: "https://api.finmindtrade.com/api/v4/data",
    dataset: "TaiwanStockPrice",
    timeout: Duration::from_secs(30),
    token_env_var: "FINMIND_TOKEN",
    ok_status: 200,
};
