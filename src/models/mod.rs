mod analysis_result;
mod batch_index;
mod fair_value_gap;
mod structure_signal;
mod swing_point;
mod trade_setup;

pub use {
    analysis_result::{AnalysisResult, DataRange},
    batch_index::{BatchEntry, BatchIndex, BatchStatus},
    fair_value_gap::{FairValueGap, GapKind},
    structure_signal::{BreakDirection, SignalKind, StructureSignal},
    swing_point::{SwingKind, SwingPoint, SwingSides},
    trade_setup::{TradeDirection, TradeSetup},
};
