//! Representation of demographic groups relative to a reference population.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ratio band treated as "no bias" when bucketing severity.
const NONE_BAND: (f64, f64) = (0.8, 1.2);
const MILD_BAND: (f64, f64) = (0.6, 1.4);
const MODERATE_BAND: (f64, f64) = (0.4, 1.6);
/// Narrower band used for narrative text only.
const ADEQUATE_BAND: (f64, f64) = (0.9, 1.1);

/// Severity bucket for a representation ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasSeverity {
    None,
    Mild,
    Moderate,
    Severe,
}

impl BiasSeverity {
    /// Bucket a ratio using the fixed, nested bands around 1.0.
    pub fn from_ratio(ratio: f64) -> Self {
        if within(ratio, NONE_BAND) {
            Self::None
        } else if within(ratio, MILD_BAND) {
            Self::Mild
        } else if within(ratio, MODERATE_BAND) {
            Self::Moderate
        } else {
            Self::Severe
        }
    }

    pub fn traffic_light(self) -> TrafficLight {
        match self {
            Self::None => TrafficLight::Green,
            Self::Mild => TrafficLight::Amber,
            Self::Moderate | Self::Severe => TrafficLight::Red,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

/// Three-colour summary of a severity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLight {
    Green,
    Amber,
    Red,
}

/// Citation for an external reference distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSource {
    pub name: String,
    pub citation: String,
    pub doi: Option<String>,
    pub year: i32,
}

/// A named reference distribution (epidemiology, peer trials, census, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicBenchmark {
    pub id: String,
    pub label: String,
    pub description: String,
    pub source: BenchmarkSource,
    /// Category label to percentage share.
    pub values: IndexMap<String, f64>,
}

impl DemographicBenchmark {
    /// Percentage for `category`, matched case-insensitively.
    pub fn value_for(&self, category: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(category))
            .map(|(_, value)| *value)
    }
}

/// One category compared against one benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkComparison {
    pub benchmark_id: String,
    pub benchmark_label: String,
    pub baseline_percentage: f64,
    pub representation_ratio: f64,
    pub absolute_gap: f64,
    pub severity: BiasSeverity,
}

/// Observed share of one category in a trial against its reference share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicBiasResult {
    pub category: String,
    pub trial_count: u32,
    pub trial_percentage: f64,
    pub population_percentage: f64,
    pub representation_ratio: f64,
    /// Signed, in percentage points.
    pub absolute_gap: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub benchmarks: Vec<BenchmarkComparison>,
}

impl DemographicBiasResult {
    pub fn new(
        category: impl Into<String>,
        trial_count: u32,
        trial_percentage: f64,
        population_percentage: f64,
    ) -> Self {
        Self {
            category: category.into(),
            trial_count,
            trial_percentage,
            population_percentage,
            representation_ratio: representation_ratio(trial_percentage, population_percentage),
            absolute_gap: trial_percentage - population_percentage,
            benchmarks: Vec::new(),
        }
    }

    /// Attach a comparison for every benchmark that covers this category.
    pub fn with_benchmarks(mut self, benchmarks: &[DemographicBenchmark]) -> Self {
        self.benchmarks = benchmarks
            .iter()
            .filter_map(|benchmark| {
                let baseline = benchmark.value_for(&self.category)?;
                let ratio = representation_ratio(self.trial_percentage, baseline);
                Some(BenchmarkComparison {
                    benchmark_id: benchmark.id.clone(),
                    benchmark_label: benchmark.label.clone(),
                    baseline_percentage: baseline,
                    representation_ratio: ratio,
                    absolute_gap: self.trial_percentage - baseline,
                    severity: BiasSeverity::from_ratio(ratio),
                })
            })
            .collect();
        self
    }

    pub fn benchmark(&self, id: &str) -> Option<&BenchmarkComparison> {
        self.benchmarks.iter().find(|b| b.benchmark_id == id)
    }

    /// Severity against the primary population baseline.
    pub fn severity(&self) -> BiasSeverity {
        BiasSeverity::from_ratio(self.representation_ratio)
    }
}

/// Trial share divided by population share; `0.0` when there is no baseline.
pub fn representation_ratio(trial_percentage: f64, population_percentage: f64) -> f64 {
    if population_percentage == 0.0 {
        return 0.0;
    }
    trial_percentage / population_percentage
}

pub fn bias_severity(ratio: f64) -> BiasSeverity {
    BiasSeverity::from_ratio(ratio)
}

/// Human readable sentence describing how a category is represented.
pub fn describe_bias(result: &DemographicBiasResult) -> String {
    let ratio = result.representation_ratio;
    if within(ratio, ADEQUATE_BAND) {
        return format!("{} participants are adequately represented.", result.category);
    }

    let direction = if ratio < 1.0 {
        "underrepresented"
    } else {
        "overrepresented"
    };
    let magnitude = ((1.0 - ratio).abs() * 100.0).round();

    format!(
        "{} participants are {direction} by {magnitude:.0}% ({:.1} percentage points from population baseline).",
        result.category,
        result.absolute_gap.abs()
    )
}

/// Overall representativeness in `[0, 100]`, 100 being a perfect match.
///
/// The mean absolute deviation of the ratios from 1.0 is inverted and
/// rounded to a whole number; deviations of 1.0 or more floor at zero. An
/// empty slice carries no evidence of bias and scores 100.
pub fn representativeness_score(results: &[DemographicBiasResult]) -> f64 {
    if results.is_empty() {
        return 100.0;
    }
    let mean_deviation = results
        .iter()
        .map(|r| (1.0 - r.representation_ratio).abs())
        .sum::<f64>()
        / results.len() as f64;
    ((1.0 - mean_deviation) * 100.0).round().max(0.0)
}

/// Tally raw records by category and compare each against `baseline`.
///
/// Categories appear in first-seen order. Baseline categories with no
/// matching record are appended with a zero count; observed categories
/// missing from the baseline get a zero population share, hence ratio 0.
pub fn representation_by<R, F>(
    records: &[R],
    key: F,
    baseline: &IndexMap<String, f64>,
) -> Vec<DemographicBiasResult>
where
    F: Fn(&R) -> String,
{
    let mut counts: IndexMap<String, u32> = IndexMap::new();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }
    for category in baseline.keys() {
        if !counts.keys().any(|seen| seen.eq_ignore_ascii_case(category)) {
            counts.insert(category.clone(), 0);
        }
    }

    let total = records.len() as f64;
    counts
        .into_iter()
        .map(|(category, count)| {
            let trial_percentage = super::percent(f64::from(count), total);
            let population_percentage = baseline
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(&category))
                .map(|(_, pct)| *pct)
                .unwrap_or(0.0);
            DemographicBiasResult::new(category, count, trial_percentage, population_percentage)
        })
        .collect()
}

fn within(value: f64, (low, high): (f64, f64)) -> bool {
    value >= low && value <= high
}
