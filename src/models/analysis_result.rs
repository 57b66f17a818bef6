use {
    crate::{
        config::ANALYSIS,
        domain::{Candle, CandleSeries},
        models::{FairValueGap, StructureSignal, SwingPoint, TradeSetup},
    },
    chrono::{NaiveDate, NaiveDateTime},
    serde::{Deserialize, Serialize},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub count: usize,
}

impl DataRange {
    pub fn of(series: &CandleSeries) -> Self {
        Self {
            start: series.first().date,
            end: series.last().date,
            count: series.len(),
        }
    }
}

/// Everything computed for one symbol, in the shape consumers read from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub symbol: String,
    pub generated_at: NaiveDateTime,
    pub data_range: DataRange,
    /// Swing lookback the detections were made with. Absent in older payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookback: Option<usize>,
    pub candles: Vec<Candle>,
    pub swing_points: Vec<SwingPoint>,
    #[serde(rename = "fvg")]
    pub fair_value_gaps: Vec<FairValueGap>,
    #[serde(rename = "bos_choch")]
    pub structure_signals: Vec<StructureSignal>,
    pub setup: TradeSetup,
}

impl AnalysisResult {
    /// Recorded lookback, or the default blueprint's when the payload predates it.
    pub fn swing_lookback(&self) -> usize {
        self.lookback.unwrap_or(ANALYSIS.swing_lookback)
    }

    /// One-line digest for logs.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} candles ({} ~ {}) | swings={} fvg={} bos/choch={} | {}",
            self.symbol,
            self.data_range.count,
            self.data_range.start,
            self.data_range.end,
            self.swing_points.len(),
            self.fair_value_gaps.len(),
            self.structure_signals.len(),
            self.setup
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisPipeline;
    use chrono::{Days, NaiveDate};

    fn result_with_lookback(lookback: usize) -> AnalysisResult {
        let start = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let candles = (0..12)
            .map(|i| {
                let base = 20.0 + (i % 4) as f64;
                Candle::new(start + Days::new(i), base, base + 1.0, base - 1.0, base, 100)
            })
            .collect();
        let series = CandleSeries::new(candles).unwrap();
        let stamp = start.and_hms_opt(9, 0, 0).unwrap();
        AnalysisPipeline::new(ANALYSIS.with_lookback(lookback)).run("2603", &series, stamp)
    }

    #[test]
    fn lookback_survives_the_payload() {
        let result = result_with_lookback(3);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(r#""lookback":3"#), "{}", json);

        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.lookback, Some(3));
        assert_eq!(back.swing_lookback(), 3);
    }

    #[test]
    fn payload_without_lookback_falls_back_to_default() {
        let mut value = serde_json::to_value(result_with_lookback(3)).unwrap();
        value.as_object_mut().unwrap().remove("lookback");

        let old: AnalysisResult = serde_json::from_value(value).unwrap();
        assert_eq!(old.lookback, None);
        assert_eq!(old.swing_lookback(), ANALYSIS.swing_lookback);
        assert!(!serde_json::to_string(&old).unwrap().contains("lookback"));
    }
}
