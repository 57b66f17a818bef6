use crate::{
    config::Price,
    domain::{Candle, CandleWindow, window_centers},
    models::{SwingKind, SwingPoint},
};

pub struct SwingPointDetector;

impl SwingPointDetector {
    /// Flags every candle whose high (low) is >= (<=) every other high (low)
    /// within `lookback` candles on both sides. Ties count, so a plateau
    /// produces several adjacent swings at the same level.
    /// The first and last `lookback` candles are never evaluated.
    pub fn detect(candles: &[Candle], lookback: usize) -> Vec<SwingPoint> {
        let mut swing_points = Vec::new();

        for idx in window_centers(candles.len(), lookback) {
            let Some(window) = CandleWindow::centered(candles, idx, lookback) else {
                continue;
            };
            let center = window.center();

            if Self::is_swing_high(window) {
                swing_points.push(SwingPoint {
                    index: idx,
                    date: center.date,
                    kind: SwingKind::High,
                    level: Price::from(center.high),
                });
            }

            if Self::is_swing_low(window) {
                swing_points.push(SwingPoint {
                    index: idx,
                    date: center.date,
                    kind: SwingKind::Low,
                    level: Price::from(center.low),
                });
            }
        }

        swing_points
    }

    pub(crate) fn is_swing_high(window: CandleWindow<'_>) -> bool {
        let high = window.center().high;
        window.neighbours().all(|(_, other)| high >= other.high)
    }

    pub(crate) fn is_swing_low(window: CandleWindow<'_>) -> bool {
        let low = window.center().low;
        window.neighbours().all(|(_, other)| low <= other.low)
    }
}
