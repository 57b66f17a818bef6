use {
    crate::config::{Price, PriceLike},
    chrono::NaiveDate,
    itertools::{Either, Itertools},
    serde::{Deserialize, Serialize},
    strum_macros::Display,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum SwingKind {
    #[serde(rename = "swing_high")]
    #[strum(to_string = "Swing High")]
    High,
    #[serde(rename = "swing_low")]
    #[strum(to_string = "Swing Low")]
    Low,
}

/// Local extremum relative to a symmetric neighbourhood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwingPoint {
    pub index: usize,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: SwingKind,
    pub level: Price,
}

impl SwingPoint {
    pub fn is_high(&self) -> bool {
        self.kind == SwingKind::High
    }

    pub fn is_low(&self) -> bool {
        self.kind == SwingKind::Low
    }
}

/// Swing points split by kind, each side still in chronological order.
#[derive(Debug, Clone, Default)]
pub struct SwingSides<'a> {
    pub highs: Vec<&'a SwingPoint>,
    pub lows: Vec<&'a SwingPoint>,
}

impl<'a> SwingSides<'a> {
    pub fn split(swing_points: &'a [SwingPoint]) -> Self {
        let (highs, lows) = swing_points.iter().partition_map(|p| match p.kind {
            SwingKind::High => Either::Left(p),
            SwingKind::Low => Either::Right(p),
        });
        Self { highs, lows }
    }

    pub fn high_levels(&self) -> Vec<f64> {
        self.highs.iter().map(|p| p.level.value()).collect()
    }

    pub fn low_levels(&self) -> Vec<f64> {
        self.lows.iter().map(|p| p.level.value()).collect()
    }
}
