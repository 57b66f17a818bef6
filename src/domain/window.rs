//! Bounds-checked views into a candle slice.
//!
//! Detectors never index the series by hand: a swing check asks for a
//! [`CandleWindow`] (which refuses to exist near the edges) and a break scan
//! walks [`forward_from`].

use crate::domain::Candle;

/// A centered window of `radius` candles on each side of `center`.
#[derive(Debug, Clone, Copy)]
pub struct CandleWindow<'a> {
    candles: &'a [Candle],
    center: usize,
    radius: usize,
}

impl<'a> CandleWindow<'a> {
    /// `None` unless `[center - radius, center + radius]` fits inside the series.
    pub fn centered(candles: &'a [Candle], center: usize, radius: usize) -> Option<Self> {
        center.checked_sub(radius)?;
        let end = center.checked_add(radius)?;
        if end >= candles.len() {
            return None;
        }
        Some(Self {
            candles,
            center,
            radius,
        })
    }

    pub fn center(&self) -> &'a Candle {
        &self.candles[self.center]
    }

    /// Inclusive index bounds of the window.
    pub fn bounds(&self) -> (usize, usize) {
        (self.center - self.radius, self.center + self.radius)
    }

    /// Every candle in the window except the center, with its index.
    pub fn neighbours(self) -> impl Iterator<Item = (usize, &'a Candle)> {
        let (start, end) = self.bounds();
        let center = self.center;
        self.candles[start..=end]
            .iter()
            .enumerate()
            .map(move |(offset, candle)| (start + offset, candle))
            .filter(move |(idx, _)| *idx != center)
    }
}

/// Indices at which a window of `radius` fits: `radius..len - radius`.
pub fn window_centers(len: usize, radius: usize) -> std::ops::Range<usize> {
    let end = len.saturating_sub(radius);
    radius.min(end)..end
}

/// Enumerated candles from `start` (inclusive) to the end of the series.
/// Empty when `start` is past the end.
pub fn forward_from(candles: &[Candle], start: usize) -> impl Iterator<Item = (usize, &Candle)> {
    candles
        .get(start..)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(move |(offset, candle)| (start + offset, candle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(n: usize) -> Vec<Candle> {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        (0..n)
            .map(|i| {
                let p = 10.0 + i as f64;
                Candle::new(start + chrono::Days::new(i as u64), p, p, p, p, 0)
            })
            .collect()
    }

    #[test]
    fn window_refuses_edges() {
        let candles = series(5);
        assert!(CandleWindow::centered(&candles, 0, 1).is_none());
        assert!(CandleWindow::centered(&candles, 4, 1).is_none());
        assert!(CandleWindow::centered(&candles, 2, 3).is_none());

        let w = CandleWindow::centered(&candles, 2, 2).unwrap();
        assert_eq!(w.bounds(), (0, 4));
        let idx: Vec<usize> = w.neighbours().map(|(i, _)| i).collect();
        assert_eq!(idx, vec![0, 1, 3, 4]);
    }

    #[test]
    fn window_centers_range() {
        assert_eq!(window_centers(10, 2), 2..8);
        assert_eq!(window_centers(4, 2), 2..2);
        assert!(window_centers(3, 2).is_empty());
        assert_eq!(window_centers(3, 0), 0..3);
    }

    #[test]
    fn forward_from_is_bounds_checked() {
        let candles = series(4);
        let idx: Vec<usize> = forward_from(&candles, 2).map(|(i, _)| i).collect();
        assert_eq!(idx, vec![2, 3]);
        assert_eq!(forward_from(&candles, 4).count(), 0);
        assert_eq!(forward_from(&candles, 99).count(), 0);
    }
}
