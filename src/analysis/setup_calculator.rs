use crate::{
    config::{PriceBand, PriceLike, RiskReward, SetupParams, StopPrice, TargetPrice},
    domain::CandleSeries,
    models::{SwingPoint, SwingSides, TradeDirection, TradeSetup},
    utils::{max_of, min_of, tail},
};

pub struct SetupCalculator;

impl SetupCalculator {
    /// Derives entry zone, stop, target and reward:risk from swing structure.
    /// Higher highs + higher lows => LONG, lower highs + lower lows => SHORT,
    /// anything else (or fewer than two swings on either side) => WAIT.
    pub fn compute(
        series: &CandleSeries,
        swing_points: &[SwingPoint],
        params: &SetupParams,
    ) -> TradeSetup {
        let latest_close = series.latest_close();
        let close = latest_close.value();

        let sides = SwingSides::split(swing_points);
        let direction = Self::classify(&sides);
        let highs = sides.high_levels();
        let lows = sides.low_levels();

        let (entry_zone, stop, target) = match direction {
            TradeDirection::Long => {
                let entry = match lows.last() {
                    Some(&level) => PriceBand::around(level, params.swing_entry_band),
                    None => PriceBand::around(close, params.long_fallback_entry),
                };
                let stop = Self::swing_extreme(&lows, params.stop_swing_count, min_of)
                    .unwrap_or(close * params.long_fallback_stop);
                let target = Self::swing_extreme(&highs, params.target_swing_count, max_of)
                    .unwrap_or(close * params.long_fallback_target);
                (entry, stop, target)
            }
            TradeDirection::Short => {
                let entry = match highs.last() {
                    Some(&level) => PriceBand::around(level, params.swing_entry_band),
                    None => PriceBand::around(close, params.short_fallback_entry),
                };
                let stop = Self::swing_extreme(&highs, params.stop_swing_count, max_of)
                    .unwrap_or(close * params.short_fallback_stop);
                let target = Self::swing_extreme(&lows, params.target_swing_count, min_of)
                    .unwrap_or(close * params.short_fallback_target);
                (entry, stop, target)
            }
            TradeDirection::Wait => (
                PriceBand::around(close, params.wait_entry),
                close * params.wait_stop,
                close * params.wait_target,
            ),
        };

        let decimals = params.price_decimals;
        let entry_zone = entry_zone.rounded(decimals);
        let stop_loss = StopPrice::new(stop).rounded(decimals);
        let take_profit = TargetPrice::new(target).rounded(decimals);

        // Ratio comes from the rounded prices the setup reports
        let entry_mid = entry_zone.mid();
        let risk = (entry_mid - stop_loss.value()).abs();
        let reward = (take_profit.value() - entry_mid).abs();

        TradeSetup {
            direction,
            entry_zone,
            stop_loss,
            take_profit,
            risk_reward: RiskReward::calculate(reward, risk),
            latest_close: latest_close.rounded(decimals),
        }
    }

    pub(crate) fn classify(sides: &SwingSides<'_>) -> TradeDirection {
        let ([.., prev_high, recent_high], [.., prev_low, recent_low]) =
            (sides.highs.as_slice(), sides.lows.as_slice())
        else {
            return TradeDirection::Wait;
        };

        if recent_high.level > prev_high.level && recent_low.level > prev_low.level {
            TradeDirection::Long
        } else if recent_high.level < prev_high.level && recent_low.level < prev_low.level {
            TradeDirection::Short
        } else {
            TradeDirection::Wait
        }
    }

    /// `pick` over the last `count` levels, only when at least `count` exist.
    fn swing_extreme(levels: &[f64], count: usize, pick: fn(&[f64]) -> Option<f64>) -> Option<f64> {
        if levels.len() >= count {
            pick(tail(levels, count))
        } else {
            None
        }
    }
}
