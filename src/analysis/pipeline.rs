use chrono::NaiveDateTime;

use crate::{
    analysis::{FairValueGapDetector, SetupCalculator, StructureBreakDetector, SwingPointDetector},
    config::{ANALYSIS, AnalysisConfig},
    domain::CandleSeries,
    models::{AnalysisResult, DataRange},
    trace_time,
    utils::TimeUtils,
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Runs every detector over one validated series and assembles the result.
/// Pure apart from the timestamp, which the caller supplies.
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    pub config: AnalysisConfig,
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new(ANALYSIS)
    }
}

impl AnalysisPipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn run(
        &self,
        symbol: &str,
        series: &CandleSeries,
        generated_at: NaiveDateTime,
    ) -> AnalysisResult {
        trace_time!("AnalysisPipeline::run", 2, {
            let candles = series.as_slice();

            let swing_points = SwingPointDetector::detect(candles, self.config.swing_lookback);
            let fair_value_gaps = FairValueGapDetector::detect(candles);
            let structure_signals = StructureBreakDetector::detect(candles, &swing_points);
            let setup = SetupCalculator::compute(series, &swing_points, &self.config.setup);

            #[cfg(debug_assertions)]
            if DF.log_pipeline {
                log::debug!(
                    "{}: lookback={} swings={} fvg={} bos={} -> {}",
                    symbol,
                    self.config.swing_lookback,
                    swing_points.len(),
                    fair_value_gaps.len(),
                    structure_signals.len(),
                    setup.direction
                );
            }

            AnalysisResult {
                symbol: symbol.to_string(),
                generated_at,
                data_range: DataRange::of(series),
                lookback: Some(self.config.swing_lookback),
                candles: candles.to_vec(),
                swing_points,
                fair_value_gaps,
                structure_signals,
                setup,
            }
        })
    }

    /// `run` stamped with the current local time.
    pub fn run_now(&self, symbol: &str, series: &CandleSeries) -> AnalysisResult {
        self.run(symbol, series, TimeUtils::now_local())
    }
}
