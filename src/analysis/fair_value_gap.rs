use crate::{
    config::Price,
    domain::Candle,
    models::{FairValueGap, GapKind},
};

pub struct FairValueGapDetector;

impl FairValueGapDetector {
    /// Scans every run of three candles. The middle candle is never looked at:
    /// a gap exists when the first and third ranges do not overlap.
    pub fn detect(candles: &[Candle]) -> Vec<FairValueGap> {
        let mut gaps = Vec::new();

        for (start_index, triple) in candles.windows(3).enumerate() {
            let (first, third) = (&triple[0], &triple[2]);
            let index = start_index + 2;

            if first.high < third.low {
                gaps.push(FairValueGap {
                    index,
                    date: third.date,
                    kind: GapKind::Bullish,
                    top: Price::from(third.low),
                    bottom: Price::from(first.high),
                    start_index,
                });
            }

            if first.low > third.high {
                gaps.push(FairValueGap {
                    index,
                    date: third.date,
                    kind: GapKind::Bearish,
                    top: Price::from(first.low),
                    bottom: Price::from(third.high),
                    start_index,
                });
            }
        }

        gaps
    }
}
