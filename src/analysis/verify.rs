//! Independent spot checks against a saved result.
//!
//! Each check recomputes one claim from the raw candles and reports the
//! values it looked at, so a reader can eyeball the neighbourhood.

use std::fmt;

use serde::Serialize;

use crate::{
    analysis::SwingPointDetector,
    config::PriceLike,
    domain::{Candle, CandleWindow},
    models::{AnalysisResult, GapKind, SwingKind},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpotCheck {
    pub subject: String,
    pub passed: bool,
    pub details: Vec<String>,
}

impl fmt::Display for SpotCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.passed { "PASS" } else { "FAIL" };
        writeln!(f, "[{}] {}", mark, self.subject)?;
        for line in &self.details {
            writeln!(f, "    {}", line)?;
        }
        Ok(())
    }
}

pub fn check_swing_low(candles: &[Candle], index: usize, lookback: usize) -> SpotCheck {
    check_swing(candles, index, lookback, SwingKind::Low)
}

pub fn check_swing_high(candles: &[Candle], index: usize, lookback: usize) -> SpotCheck {
    check_swing(candles, index, lookback, SwingKind::High)
}

fn check_swing(candles: &[Candle], index: usize, lookback: usize, kind: SwingKind) -> SpotCheck {
    let subject = format!("{} at #{} (lookback {})", kind, index, lookback);

    let Some(window) = CandleWindow::centered(candles, index, lookback) else {
        return SpotCheck {
            subject,
            passed: false,
            details: vec![format!(
                "window of +/-{} does not fit in {} candles",
                lookback,
                candles.len()
            )],
        };
    };

    let pick = |c: &Candle| match kind {
        SwingKind::High => c.high.value(),
        SwingKind::Low => c.low.value(),
    };

    let (start, end) = window.bounds();
    let details = (start..=end)
        .map(|i| {
            let c = &candles[i];
            let marker = if i == index { "  <-" } else { "" };
            format!("#{:<4} {}  {}={}{}", i, c.date, kind, pick(c), marker)
        })
        .collect();

    let passed = match kind {
        SwingKind::High => SwingPointDetector::is_swing_high(window),
        SwingKind::Low => SwingPointDetector::is_swing_low(window),
    };

    SpotCheck {
        subject,
        passed,
        details,
    }
}

/// `index` is the third candle of the triple.
pub fn check_fair_value_gap(candles: &[Candle], index: usize, kind: GapKind) -> SpotCheck {
    let subject = format!("{} FVG at #{}", kind, index);

    let Some(triple) = index.checked_sub(2).and_then(|start| candles.get(start..=index)) else {
        return SpotCheck {
            subject,
            passed: false,
            details: vec![format!("no three-candle run ends at #{}", index)],
        };
    };

    let (first, third) = (&triple[0], &triple[2]);
    let mut details: Vec<String> = triple
        .iter()
        .enumerate()
        .map(|(offset, c)| {
            format!(
                "#{:<4} {}  high={} low={}",
                index - 2 + offset,
                c.date,
                c.high.value(),
                c.low.value()
            )
        })
        .collect();

    let passed = match kind {
        GapKind::Bullish => {
            details.push(format!(
                "first.high ({}) < third.low ({})",
                first.high.value(),
                third.low.value()
            ));
            first.high < third.low
        }
        GapKind::Bearish => {
            details.push(format!(
                "first.low ({}) > third.high ({})",
                first.low.value(),
                third.high.value()
            ));
            first.low > third.high
        }
    };

    SpotCheck {
        subject,
        passed,
        details,
    }
}

/// Re-checks every swing point and gap a result reports.
pub fn check_all(result: &AnalysisResult, lookback: usize) -> Vec<SpotCheck> {
    let swings = result.swing_points.iter().map(|p| match p.kind {
        SwingKind::High => check_swing_high(&result.candles, p.index, lookback),
        SwingKind::Low => check_swing_low(&result.candles, p.index, lookback),
    });
    let gaps = result
        .fair_value_gaps
        .iter()
        .map(|g| check_fair_value_gap(&result.candles, g.index, g.kind));
    swings.chain(gaps).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn candles(highs: &[f64], lows: &[f64]) -> Vec<Candle> {
        let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        highs
            .iter()
            .zip(lows)
            .enumerate()
            .map(|(i, (&h, &l))| Candle::new(start + Days::new(i as u64), l, h, l, h, 0))
            .collect()
    }

    #[test]
    fn swing_low_passes_and_lists_neighbourhood() {
        let data = candles(&[12.0, 11.0, 10.0, 11.0, 12.0], &[9.0, 8.0, 7.0, 8.0, 9.0]);
        let check = check_swing_low(&data, 2, 2);
        assert!(check.passed);
        assert_eq!(check.details.len(), 5);
        assert!(check.details[2].ends_with("<-"));
        assert!(!check_swing_high(&data, 2, 2).passed);
    }

    #[test]
    fn window_off_the_edge_fails() {
        let data = candles(&[12.0, 11.0, 10.0], &[9.0, 8.0, 7.0]);
        let check = check_swing_high(&data, 0, 1);
        assert!(!check.passed);
        assert_eq!(check.details.len(), 1);
    }

    #[test]
    fn fair_value_gap_checks() {
        let data = candles(&[20.0, 12.0, 11.0], &[19.0, 10.0, 10.0]);
        assert!(check_fair_value_gap(&data, 2, GapKind::Bearish).passed);
        assert!(!check_fair_value_gap(&data, 2, GapKind::Bullish).passed);
        assert!(!check_fair_value_gap(&data, 1, GapKind::Bearish).passed);
        assert!(!check_fair_value_gap(&data, 5, GapKind::Bearish).passed);
    }
}
