use {
    crate::config::{ClosePrice, HighPrice, LowPrice, OpenPrice, PriceLike, Volume},
    chrono::NaiveDate,
    serde::{Deserialize, Serialize},
};

/// One trading day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub date: NaiveDate,

    pub open: OpenPrice,
    pub high: HighPrice,
    pub low: LowPrice,
    pub close: ClosePrice,

    #[serde(default)]
    pub volume: Volume,
}

impl Candle {
    // A constructor for convenience
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Candle {
            date,
            open: OpenPrice::new(open),
            high: HighPrice::new(high),
            low: LowPrice::new(low),
            close: ClosePrice::new(close),
            volume: Volume::new(volume),
        }
    }

    /// All four prices finite and non-negative.
    pub fn has_valid_prices(&self) -> bool {
        self.open.is_valid() && self.high.is_valid() && self.low.is_valid() && self.close.is_valid()
    }
}
