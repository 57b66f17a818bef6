use {
    crate::{
        config::ClosePrice,
        domain::Candle,
    },
    chrono::NaiveDate,
    serde::Serialize,
    thiserror::Error,
};

/// Ways a raw candle list can fail to be an analysable series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("candle series is empty")]
    Empty,
    #[error("dates not strictly ascending at index {index}: {previous} then {current}")]
    NotAscending {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },
    #[error("non-finite or negative price at index {index} ({date})")]
    InvalidPrice { index: usize, date: NaiveDate },
}

/// A validated, chronological, non-empty candle sequence.
/// Immutable once built: detectors borrow it as a slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(candles: Vec<Candle>) -> Result<Self, SeriesError> {
        if candles.is_empty() {
            return Err(SeriesError::Empty);
        }

        for (index, candle) in candles.iter().enumerate() {
            if !candle.has_valid_prices() {
                return Err(SeriesError::InvalidPrice {
                    index,
                    date: candle.date,
                });
            }
        }

        if let Some((index, pair)) = candles
            .windows(2)
            .enumerate()
            .find(|(_, pair)| pair[1].date <= pair[0].date)
        {
            return Err(SeriesError::NotAscending {
                index: index + 1,
                previous: pair[0].date,
                current: pair[1].date,
            });
        }

        Ok(Self { candles })
    }

    pub fn as_slice(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Never true for a constructed series; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn first(&self) -> &Candle {
        &self.candles[0]
    }

    pub fn last(&self) -> &Candle {
        &self.candles[self.candles.len() - 1]
    }

    pub fn latest_close(&self) -> ClosePrice {
        self.last().close
    }
}
