// Detectors, setup derivation and the pipeline tying them together
mod fair_value_gap;
mod pipeline;
mod setup_calculator;
mod structure_break;
mod swing_points;
pub mod verify;

pub use {
    fair_value_gap::FairValueGapDetector, pipeline::AnalysisPipeline,
    setup_calculator::SetupCalculator, structure_break::StructureBreakDetector,
    swing_points::SwingPointDetector,
};
