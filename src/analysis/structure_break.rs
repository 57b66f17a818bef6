use crate::{
    config::{ClosePrice, Price},
    domain::{Candle, forward_from},
    models::{BreakDirection, SignalKind, StructureSignal, SwingPoint, SwingSides},
};

#[cfg(debug_assertions)]
use crate::config::DF;

pub struct StructureBreakDetector;

impl StructureBreakDetector {
    /// At most one bullish and one bearish BOS, in that order.
    ///
    /// Each side needs two swings of its kind. Only the latest one sets the
    /// level; the one before it is read but does not affect the result.
    pub fn detect(candles: &[Candle], swing_points: &[SwingPoint]) -> Vec<StructureSignal> {
        let sides = SwingSides::split(swing_points);
        let mut signals = Vec::new();

        if let Some(signal) = Self::first_break(
            candles,
            &sides.highs,
            BreakDirection::Bullish,
            |close, level| close > level,
        ) {
            signals.push(signal);
        }

        if let Some(signal) = Self::first_break(
            candles,
            &sides.lows,
            BreakDirection::Bearish,
            |close, level| close < level,
        ) {
            signals.push(signal);
        }

        signals
    }

    /// Walks forward from the latest swing (inclusive) and stops at the first
    /// close that satisfies `breaks`.
    fn first_break(
        candles: &[Candle],
        swings: &[&SwingPoint],
        direction: BreakDirection,
        breaks: impl Fn(ClosePrice, Price) -> bool,
    ) -> Option<StructureSignal> {
        let [.., previous, latest] = swings else {
            return None;
        };

        #[cfg(debug_assertions)]
        if DF.log_pipeline {
            log::debug!(
                "{} break scan from #{} @ {} (previous swing #{} @ {} not used)",
                direction,
                latest.index,
                latest.level,
                previous.index,
                previous.level
            );
        }
        #[cfg(not(debug_assertions))]
        let _ = previous;

        forward_from(candles, latest.index)
            .find(|(_, candle)| breaks(candle.close, latest.level))
            .map(|(index, candle)| StructureSignal {
                index,
                date: candle.date,
                kind: SignalKind::Bos,
                direction,
                level: latest.level,
            })
    }
}
