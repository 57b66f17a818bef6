//! Price and ratio newtypes shared by the detectors and the setup payload.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

use crate::utils::round_to;

/// A behavioral contract for anything that behaves like a price.
pub trait PriceLike {
    fn value(&self) -> f64;

    /// Finite and not below zero. Anything else is malformed market data.
    fn is_valid(&self) -> bool {
        let v = self.value();
        v.is_finite() && v >= 0.0
    }

    /// Formats a price with "Trader Precision" adaptive decimals.
    fn format_price(&self) -> String {
        let price = self.value();
        if price == 0.0 {
            return "0.00".to_string();
        }

        let abs_price = price.abs();

        if abs_price >= 1.0 {
            format!("{:.2}", price)
        } else if abs_price >= 0.01 {
            format!("{:.4}", price)
        } else {
            format!("{:.8}", price)
        }
    }
}

macro_rules! impl_into_price {
    ($from:ident) => {
        impl From<$from> for Price {
            fn from(p: $from) -> Self {
                Price(p.value())
            }
        }
    };
}

// Constructors deliberately do not clamp: a negative or NaN price must survive
// long enough for `CandleSeries::new` to reject it.
macro_rules! define_price_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
        #[serde(transparent)]
        pub struct $name(f64);

        impl From<f64> for $name {
            fn from(v: f64) -> Self {
                $name::new(v)
            }
        }

        impl $name {
            pub const fn new(val: f64) -> Self {
                Self(val)
            }

            /// Rounds to `decimals` places (half away from zero).
            pub fn rounded(self, decimals: u32) -> Self {
                Self(round_to(self.0, decimals))
            }
        }

        impl PriceLike for $name {
            fn value(&self) -> f64 {
                self.0
            }
        }

        impl Add for $name {
            type Output = f64;

            fn add(self, rhs: Self) -> Self::Output {
                self.value() + rhs.value()
            }
        }

        impl Sub for $name {
            type Output = f64;

            fn sub(self, rhs: Self) -> Self::Output {
                self.value() - rhs.value()
            }
        }

        impl Div for $name {
            type Output = f64;

            fn div(self, rhs: Self) -> Self::Output {
                self.value() / rhs.value()
            }
        }

        impl Mul<f64> for $name {
            type Output = $name;

            fn mul(self, rhs: f64) -> Self::Output {
                $name::new(self.value() * rhs)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.format_price())
            }
        }
    };
}

macro_rules! impl_price_compare {
    ($a:ty, $b:ty) => {
        impl PartialEq<$b> for $a {
            fn eq(&self, other: &$b) -> bool {
                self.value() == other.value()
            }
        }

        impl PartialOrd<$b> for $a {
            fn partial_cmp(&self, other: &$b) -> Option<std::cmp::Ordering> {
                self.value().partial_cmp(&other.value())
            }
        }
    };
}

// Generate the Price Hierarchy
define_price_type!(Price);
define_price_type!(OpenPrice);
define_price_type!(HighPrice);
define_price_type!(LowPrice);
define_price_type!(ClosePrice);
define_price_type!(TargetPrice);
define_price_type!(StopPrice);

impl_into_price!(OpenPrice);
impl_into_price!(HighPrice);
impl_into_price!(LowPrice);
impl_into_price!(ClosePrice);
impl_into_price!(TargetPrice);
impl_into_price!(StopPrice);

impl_price_compare!(HighPrice, LowPrice);
impl_price_compare!(LowPrice, HighPrice);
impl_price_compare!(ClosePrice, Price);
impl_price_compare!(TargetPrice, Price);
impl_price_compare!(StopPrice, Price);
impl_price_compare!(Price, TargetPrice);
impl_price_compare!(Price, StopPrice);

/// Entry zone bounds. Always ordered `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 2]", from = "[f64; 2]")]
pub struct PriceBand {
    low: Price,
    high: Price,
}

impl PriceBand {
    /// Builds a band from two bounds in either order.
    pub fn new(a: Price, b: Price) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// `base * [lower_factor, upper_factor]`
    pub fn around(base: f64, (lower_factor, upper_factor): (f64, f64)) -> Self {
        Self::new(Price::new(base * lower_factor), Price::new(base * upper_factor))
    }

    pub fn low(&self) -> Price {
        self.low
    }

    pub fn high(&self) -> Price {
        self.high
    }

    pub fn mid(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.low.value() && price <= self.high.value()
    }

    pub fn rounded(self, decimals: u32) -> Self {
        Self::new(self.low.rounded(decimals), self.high.rounded(decimals))
    }
}

impl From<PriceBand> for [f64; 2] {
    fn from(band: PriceBand) -> Self {
        [band.low.value(), band.high.value()]
    }
}

impl From<[f64; 2]> for PriceBand {
    fn from([a, b]: [f64; 2]) -> Self {
        PriceBand::new(Price::new(a), Price::new(b))
    }
}

impl std::fmt::Display for PriceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.low, self.high)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct RiskReward(f64);

impl RiskReward {
    pub const ZERO: Self = Self(0.0);

    pub const fn new(val: f64) -> Self {
        let v = if val < 0.0 { 0.0 } else { val };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// reward / risk rounded to one decimal. Zero when there is no risk.
    pub fn calculate(reward: f64, risk: f64) -> Self {
        if risk > 0.0 {
            Self::new(round_to(reward / risk, 1))
        } else {
            Self::ZERO
        }
    }
}

impl std::fmt::Display for RiskReward {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}R", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Volume(u64);

impl Volume {
    pub const fn new(val: u64) -> Self {
        Self(val)
    }

    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_band_orders_its_bounds() {
        let band = PriceBand::new(Price::new(12.0), Price::new(10.0));
        assert_eq!(band.low(), Price::new(10.0));
        assert_eq!(band.high(), Price::new(12.0));
        assert_eq!(band.mid(), 11.0);
        assert!(band.contains(11.5));
        assert!(!band.contains(12.5));
    }

    #[test]
    fn price_band_serializes_as_pair() {
        let band = PriceBand::around(100.0, (0.98, 1.02));
        let json = serde_json::to_string(&band.rounded(2)).unwrap();
        assert_eq!(json, "[98.0,102.0]");
    }

    #[test]
    fn risk_reward_is_zero_without_risk() {
        assert_eq!(RiskReward::calculate(5.0, 0.0), RiskReward::ZERO);
        assert_eq!(RiskReward::calculate(5.0, 2.0).value(), 2.5);
        assert_eq!(RiskReward::calculate(1.0, 3.0).value(), 0.3);
    }

    #[test]
    fn validity_rejects_nan_and_negative() {
        assert!(HighPrice::new(1.0).is_valid());
        assert!(HighPrice::new(0.0).is_valid());
        assert!(!HighPrice::new(-1.0).is_valid());
        assert!(!HighPrice::new(f64::NAN).is_valid());
        assert!(!HighPrice::new(f64::INFINITY).is_valid());
    }
}
