use {
    crate::config::{ClosePrice, PriceBand, PriceLike, RiskReward, StopPrice, TargetPrice},
    serde::{Deserialize, Serialize},
    std::fmt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeDirection {
    Long,
    Short,
    Wait,
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeDirection::Long => write!(f, "LONG"),
            TradeDirection::Short => write!(f, "SHORT"),
            TradeDirection::Wait => write!(f, "WAIT"),
        }
    }
}

/// The single directional plan derived from swing structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSetup {
    pub direction: TradeDirection,
    pub entry_zone: PriceBand,
    #[serde(rename = "sl")]
    pub stop_loss: StopPrice,
    #[serde(rename = "tp")]
    pub take_profit: TargetPrice,
    #[serde(rename = "rr")]
    pub risk_reward: RiskReward,
    pub latest_close: ClosePrice,
}

impl TradeSetup {
    /// |entry mid - stop|, from the (rounded) values this setup carries.
    pub fn risk(&self) -> f64 {
        (self.entry_zone.mid() - self.stop_loss.value()).abs()
    }

    /// |target - entry mid|, from the (rounded) values this setup carries.
    pub fn reward(&self) -> f64 {
        (self.take_profit.value() - self.entry_zone.mid()).abs()
    }
}

impl fmt::Display for TradeSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | entry {} | SL {} | TP {} | {} | close {}",
            self.direction,
            self.entry_zone,
            self.stop_loss,
            self.take_profit,
            self.risk_reward,
            self.latest_close
        )
    }
}
