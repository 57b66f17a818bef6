use {
    crate::config::Price,
    chrono::NaiveDate,
    serde::{Deserialize, Serialize},
    strum_macros::Display,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum GapKind {
    Bullish,
    Bearish,
}

/// Three-candle imbalance, recorded at the third candle.
/// Only the raw gap at creation time; fills are not tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairValueGap {
    pub index: usize,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: GapKind,
    pub top: Price,
    pub bottom: Price,
    pub start_index: usize,
}

