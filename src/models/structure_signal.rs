use {
    crate::config::Price,
    chrono::NaiveDate,
    serde::{Deserialize, Serialize},
    strum_macros::Display,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum SignalKind {
    /// Break of Structure: a close beyond the latest swing extremum.
    #[serde(rename = "BOS")]
    #[strum(to_string = "BOS")]
    Bos,
    /// Change of Character. Part of the payload vocabulary; no current rule emits it.
    #[serde(rename = "CHoCH")]
    #[strum(to_string = "CHoCH")]
    Choch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum BreakDirection {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureSignal {
    /// Candle whose close made the break.
    pub index: usize,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: SignalKind,
    pub direction: BreakDirection,
    /// The swing level that was broken.
    pub level: Price,
}
