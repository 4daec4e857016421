//! Cardiovascular Phase III sample: sex imbalance against two benchmarks.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use serde::Serialize;

use super::profile::{
    ActiveBias, BiasInteraction, DatasetProfile, Insight, Level, OutcomeRate, ProspectiveMilestone,
    RadarAxis, Strength, TrialContext,
};
use crate::metrics::{
    demographic::{representation_by, DemographicBiasResult},
    percent, BenchmarkSource, DemographicBenchmark,
};

pub const TOTAL_PATIENTS: u32 = 920;

/// Enrolled participants by sex.
pub const SEX_COUNTS: [(&str, u32); 2] = [("Male", 726), ("Female", 194)];

/// `(sex, enrolled, with heart disease)`.
pub const DISEASE_BY_SEX: [(&str, u32, u32); 2] = [("Male", 726, 459), ("Female", 194, 50)];

/// Benchmark that drives the headline severity.
pub const PRIMARY_BENCHMARK: &str = "epidemiological";

/// Reference distributions the trial is compared against.
pub static BENCHMARKS: Lazy<Vec<DemographicBenchmark>> = Lazy::new(|| {
    vec![
        DemographicBenchmark {
            id: PRIMARY_BENCHMARK.to_string(),
            label: "Disease Epidemiology (IHD)".to_string(),
            description: "Global IHD prevalence by sex from the Global Burden of Disease study"
                .to_string(),
            source: BenchmarkSource {
                name: "GBD 2023 (JACC)".to_string(),
                citation: "Lindstrom et al. (2025) Global, Regional, and National Burden of \
                           Cardiovascular Diseases, 1990-2023. JACC."
                    .to_string(),
                doi: Some("10.1016/j.jacc.2025.08.015".to_string()),
                year: 2025,
            },
            values: shares(57.3, 42.7),
        },
        DemographicBenchmark {
            id: "peer-trial".to_string(),
            label: "Peer CV Trial Average".to_string(),
            description: "Average sex distribution across 1,593 cardiovascular trials (2017-2023)"
                .to_string(),
            source: BenchmarkSource {
                name: "JAMA Network Open".to_string(),
                citation: "Haering et al. (2024) Participation of Women in Cardiovascular \
                           Trials, 2017-2023. JAMA Netw Open."
                    .to_string(),
                doi: Some("10.1001/jamanetworkopen.2024.56498".to_string()),
                year: 2024,
            },
            values: shares(61.5, 38.5),
        },
    ]
});

/// Per-sex representation against the epidemiological baseline, with every
/// benchmark attached.
pub fn demographic_bias() -> Vec<DemographicBiasResult> {
    let primary = BENCHMARKS
        .iter()
        .find(|b| b.id == PRIMARY_BENCHMARK);
    SEX_COUNTS
        .iter()
        .map(|&(category, count)| {
            let baseline = primary
                .and_then(|b| b.value_for(category))
                .unwrap_or(0.0);
            DemographicBiasResult::new(
                category,
                count,
                percent(f64::from(count), f64::from(TOTAL_PATIENTS)),
                baseline,
            )
            .with_benchmarks(&BENCHMARKS)
        })
        .collect()
}

fn shares(male: f64, female: f64) -> IndexMap<String, f64> {
    IndexMap::from([("Male".to_string(), male), ("Female".to_string(), female)])
}

pub fn outcomes_by_sex() -> Vec<OutcomeRate> {
    DISEASE_BY_SEX
        .iter()
        .map(|&(sex, total, with_disease)| OutcomeRate::new(sex, total, with_disease))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgeSummary {
    pub mean: f64,
    pub median: f64,
}

/// Age in years at enrolment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeDistribution {
    pub overall: AgeSummary,
    pub min: u32,
    pub max: u32,
    pub by_sex: [(&'static str, AgeSummary); 2],
}

pub const AGE_DISTRIBUTION: AgeDistribution = AgeDistribution {
    overall: AgeSummary {
        mean: 53.5,
        median: 54.0,
    },
    min: 28,
    max: 77,
    by_sex: [
        (
            "Male",
            AgeSummary {
                mean: 52.8,
                median: 53.0,
            },
        ),
        (
            "Female",
            AgeSummary {
                mean: 55.6,
                median: 56.0,
            },
        ),
    ],
};

/// Drill-down record from the 50-patient extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardioPatient {
    pub id: u32,
    pub age: u32,
    pub sex: &'static str,
    pub has_heart_disease: bool,
}

const fn cardio(id: u32, age: u32, sex: &'static str, has_heart_disease: bool) -> CardioPatient {
    CardioPatient {
        id,
        age,
        sex,
        has_heart_disease,
    }
}

pub const PATIENT_SAMPLE: [CardioPatient; 50] = [
    cardio(1, 63, "Male", false),
    cardio(2, 67, "Male", true),
    cardio(3, 67, "Male", true),
    cardio(4, 37, "Male", false),
    cardio(5, 41, "Female", false),
    cardio(6, 56, "Male", false),
    cardio(7, 62, "Female", true),
    cardio(8, 57, "Female", false),
    cardio(9, 63, "Male", true),
    cardio(10, 53, "Male", true),
    cardio(11, 57, "Male", false),
    cardio(12, 56, "Female", false),
    cardio(13, 56, "Male", true),
    cardio(14, 44, "Male", false),
    cardio(15, 52, "Male", false),
    cardio(16, 57, "Male", false),
    cardio(17, 48, "Male", true),
    cardio(18, 54, "Male", false),
    cardio(19, 48, "Female", false),
    cardio(20, 49, "Male", false),
    cardio(21, 64, "Male", false),
    cardio(22, 58, "Female", false),
    cardio(23, 58, "Male", true),
    cardio(24, 58, "Male", true),
    cardio(25, 60, "Male", true),
    cardio(26, 50, "Female", false),
    cardio(27, 58, "Female", false),
    cardio(28, 66, "Female", false),
    cardio(29, 43, "Male", false),
    cardio(30, 40, "Male", false),
    cardio(31, 69, "Male", true),
    cardio(32, 60, "Male", true),
    cardio(33, 64, "Male", false),
    cardio(34, 59, "Male", true),
    cardio(35, 44, "Male", false),
    cardio(36, 42, "Male", false),
    cardio(37, 43, "Male", false),
    cardio(38, 57, "Male", false),
    cardio(39, 55, "Male", false),
    cardio(40, 61, "Male", false),
    cardio(41, 65, "Female", false),
    cardio(42, 40, "Male", true),
    cardio(43, 71, "Male", false),
    cardio(44, 59, "Male", true),
    cardio(45, 61, "Female", false),
    cardio(46, 58, "Male", true),
    cardio(47, 51, "Male", false),
    cardio(48, 50, "Male", true),
    cardio(49, 65, "Male", true),
    cardio(50, 53, "Male", true),
];

/// Sex representation in the drill-down extract against the primary
/// benchmark.
pub fn sample_representation() -> Vec<DemographicBiasResult> {
    let baseline = BENCHMARKS
        .iter()
        .find(|b| b.id == PRIMARY_BENCHMARK)
        .map(|b| b.values.clone())
        .unwrap_or_default();
    representation_by(&PATIENT_SAMPLE, |p| p.sex.to_string(), &baseline)
}

pub static PROFILE: DatasetProfile = DatasetProfile {
    context: TrialContext {
        phase: "Phase III",
        therapeutic_area: "Cardiovascular",
        indication: "Coronary Artery Disease Prevention",
        sites: 4,
        countries: &["USA", "Hungary", "Switzerland"],
        enrollment_period: "2019-2022",
        sponsor: "Simulated Pharma Co.",
        regulatory_target: "FDA / EMA",
        primary_endpoint: None,
    },
    insight: Insight {
        headline: "Women are underrepresented by 51%",
        detail: "Ischemic heart disease affects men more than women (57% vs 43% of prevalent \
                 cases globally), yet this trial's 21% female enrollment falls far below even \
                 that lower baseline. Women are also underrepresented relative to peer \
                 cardiovascular trials, which average 38.5% female enrollment.",
        implication: "Treatment protocols developed from this data may miss female-specific \
                      symptoms and risk factors. The gap persists even when accounting for the \
                      higher male disease prevalence.",
    },
    radar_axes: &[
        RadarAxis {
            key: "female_enrollment",
            label: "Female %",
            trial: 21,
            benchmark: 39,
            description: "This trial: 21% female. Peer CV trials: 38.5% female.",
        },
        RadarAxis {
            key: "age_range",
            label: "Age Range",
            trial: 70,
            benchmark: 58,
            description: "This trial: 28-77 yrs. Peer CV trials typically 40-75.",
        },
        RadarAxis {
            key: "geographic_spread",
            label: "Regions",
            trial: 30,
            benchmark: 55,
            description: "This trial: 3 countries. Peer Phase III avg: ~8 countries.",
        },
        RadarAxis {
            key: "sample_size",
            label: "Sample Size",
            trial: 75,
            benchmark: 50,
            description: "This trial: 920 patients. Peer CV median: ~450.",
        },
        RadarAxis {
            key: "completion_rate",
            label: "Completion",
            trial: 88,
            benchmark: 85,
            description: "This trial: ~88% completion. Peer CV avg: ~85%.",
        },
    ],
    active_biases: &[ActiveBias {
        stage_id: "enrollment",
        bias_type: "Selection Bias",
        severity: Level::High,
        description: "Female enrollment 21% vs 43% disease prevalence",
    }],
    interactions: &[
        BiasInteraction {
            from: "Selection Bias",
            to: "Generalizability Risk",
            description: "Underrepresentation limits external validity",
            strength: Strength::Strong,
        },
        BiasInteraction {
            from: "Generalizability Risk",
            to: "Regulatory Delay",
            description: "FDA/EMA may require post-hoc subgroup analysis",
            strength: Strength::Moderate,
        },
        BiasInteraction {
            from: "Regulatory Delay",
            to: "Market Limitation",
            description: "Label restrictions may limit approved population",
            strength: Strength::Moderate,
        },
    ],
    prospective: &[
        ProspectiveMilestone {
            id: "enrollment-start",
            label: "Enrollment Begins",
            timepoint: "Week 0",
            description: "First patients screened and randomized",
            detected: false,
            traditional: false,
        },
        ProspectiveMilestone {
            id: "monitoring-detection",
            label: "Monitoring Flags Imbalance",
            timepoint: "Week 4",
            description: "Automated monitoring detects sex ratio deviation from epidemiological \
                          baseline",
            detected: true,
            traditional: false,
        },
        ProspectiveMilestone {
            id: "enrollment-complete",
            label: "Enrollment Complete",
            timepoint: "Month 18",
            description: "920 patients enrolled across 4 sites",
            detected: false,
            traditional: false,
        },
        ProspectiveMilestone {
            id: "analysis",
            label: "Statistical Analysis",
            timepoint: "Month 24",
            description: "Primary endpoint analysis completed",
            detected: false,
            traditional: false,
        },
        ProspectiveMilestone {
            id: "traditional-discovery",
            label: "Bias Discovered at Submission",
            timepoint: "NDA/MAA Filing",
            description: "Reviewer flags inadequate female representation during regulatory \
                          review",
            detected: false,
            traditional: true,
        },
    ],
};
