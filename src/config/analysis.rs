//! Analysis and computation configuration

use serde::{Deserialize, Serialize};

/// Price multipliers used to derive a setup from the latest close or a swing level.
/// Pairs are `(lower, upper)` factors.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SetupParams {
    /// Band placed around the anchoring swing level (LONG: last low, SHORT: last high).
    pub swing_entry_band: (f64, f64),
    /// LONG entry when there are no swing lows at all.
    pub long_fallback_entry: (f64, f64),
    /// SHORT entry when there are no swing highs at all.
    pub short_fallback_entry: (f64, f64),
    /// WAIT entry band around the latest close.
    pub wait_entry: (f64, f64),

    pub long_fallback_stop: f64,
    pub long_fallback_target: f64,
    pub short_fallback_stop: f64,
    pub short_fallback_target: f64,
    pub wait_stop: f64,
    pub wait_target: f64,

    /// How many trailing swings the stop is taken from (and must exist).
    pub stop_swing_count: usize,
    /// How many trailing swings the target is taken from (and must exist).
    pub target_swing_count: usize,

    pub price_decimals: u32,
}

/// The Master Analysis Configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Candles on each side a swing point must dominate.
    pub swing_lookback: usize,
    /// Calendar days of history requested per symbol.
    pub history_days: u32,
    pub setup: SetupParams,
}

pub const DEFAULT_SETUP_PARAMS: SetupParams = SetupParams {
    swing_entry_band: (0.995, 1.005),
    long_fallback_entry: (0.97, 0.99),
    short_fallback_entry: (1.01, 1.03),
    wait_entry: (0.98, 1.02),

    long_fallback_stop: 0.95,
    long_fallback_target: 1.10,
    short_fallback_stop: 1.05,
    short_fallback_target: 0.90,
    wait_stop: 0.95,
    wait_target: 1.10,

    stop_swing_count: 3,
    target_swing_count: 2,

    price_decimals: 2,
};

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    swing_lookback: 5,
    history_days: 120,
    setup: DEFAULT_SETUP_PARAMS,
};

impl AnalysisConfig {
    /// Same blueprint with a different swing lookback (CLI override).
    pub fn with_lookback(&self, swing_lookback: usize) -> Self {
        Self {
            swing_lookback,
            ..self.clone()
        }
    }

    pub fn with_history_days(&self, history_days: u32) -> Self {
        Self {
            history_days,
            ..self.clone()
        }
    }
}
