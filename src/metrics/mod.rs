//! Bias metric computations over trial and population statistics.
//!
//! Every function here is total: zero denominators resolve to documented
//! fallback values instead of NaN or infinity. Range validation of counts
//! and percentages belongs to whoever ingests the data.

pub mod attrition;
pub mod demographic;

pub use attrition::{
    AttritionBiasResult, DropoutPoint, EffectivenessInflation, HiddenPopulation, SensitivityBounds,
    TrialPatient,
};
pub use demographic::{
    BenchmarkComparison, BenchmarkSource, BiasSeverity, DemographicBenchmark,
    DemographicBiasResult, TrafficLight,
};

/// `numerator / denominator * 100`, or `0.0` when the denominator is zero.
pub(crate) fn percent(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}
