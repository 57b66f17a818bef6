//! Configuration module for the scanner.

// Can all be private now because we have a public re-export.
mod analysis;
mod batch;
mod debug;
mod finmind;
mod persistence;
mod types;

// Re-export commonly used items
pub use analysis::{ANALYSIS, AnalysisConfig, DEFAULT_SETUP_PARAMS, SetupParams};
pub use batch::{BATCH, BatchConfig};
pub use debug::DF;
pub use finmind::{FINMIND, FinMindApiConfig};
pub use persistence::{PERSISTENCE, result_filename};
pub use types::{
    ClosePrice, HighPrice, LowPrice, OpenPrice, Price, PriceBand, PriceLike, RiskReward, StopPrice,
    TargetPrice, Volume,
};
