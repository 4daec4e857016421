//! Shared DTOs for JSON requests and responses.

use serde::{Deserialize, Serialize};

use crate::{
    datasets::{
        depression,
        heart_disease::{self, AgeDistribution},
        metadata_example::EXAMPLE_ANALYSIS,
        profile::{DatasetProfile, OutcomeRate},
    },
    metrics::{
        attrition::{
            self, attrition_by, describe_attrition, dropout_timeline, effectiveness_inflation,
            has_differential_attrition, hidden_population, sensitivity_analysis,
        },
        demographic::{describe_bias, representativeness_score},
        percent, AttritionBiasResult, BiasSeverity, DemographicBiasResult, DropoutPoint,
        EffectivenessInflation, HiddenPopulation, SensitivityBounds, TrafficLight, TrialPatient,
    },
    registry::{BiasDimension, FlagSummary, MetadataAnalysisResult},
};

/// Body of `POST /api/pilot-request`. Fields are optional here so that a
/// missing field is a 400, not a deserialisation failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PilotRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
}

impl PilotRequest {
    pub fn has_required_fields(&self) -> bool {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
        present(&self.name) && present(&self.email)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PilotResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicRow {
    #[serde(flatten)]
    pub result: DemographicBiasResult,
    pub severity: BiasSeverity,
    pub traffic_light: TrafficLight,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicReport {
    pub primary_benchmark: String,
    pub rows: Vec<DemographicRow>,
    pub representativeness_score: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub outcomes: Vec<OutcomeRate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_distribution: Option<AgeDistribution>,
    /// Representation recomputed from the drill-down extract.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub patient_sample: Vec<DemographicBiasResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<DatasetProfile>,
}

impl DemographicReport {
    pub fn from_results(primary_benchmark: &str, results: Vec<DemographicBiasResult>) -> Self {
        let representativeness_score = representativeness_score(&results);
        let rows = results
            .into_iter()
            .map(|result| {
                let severity = result.severity();
                DemographicRow {
                    description: describe_bias(&result),
                    traffic_light: severity.traffic_light(),
                    severity,
                    result,
                }
            })
            .collect();
        Self {
            primary_benchmark: primary_benchmark.to_string(),
            rows,
            representativeness_score,
            outcomes: Vec::new(),
            age_distribution: None,
            patient_sample: Vec::new(),
            profile: None,
        }
    }

    /// Report over the cardiovascular sample.
    pub fn sample() -> Self {
        Self {
            outcomes: heart_disease::outcomes_by_sex(),
            age_distribution: Some(heart_disease::AGE_DISTRIBUTION),
            patient_sample: heart_disease::sample_representation(),
            profile: Some(heart_disease::PROFILE),
            ..Self::from_results(heart_disease::PRIMARY_BENCHMARK, heart_disease::demographic_bias())
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttritionRow {
    #[serde(flatten)]
    pub result: AttritionBiasResult,
    pub inflation: EffectivenessInflation,
}

/// Dropout-only view of a stratification that lacks outcome data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropoutRow {
    pub group: String,
    pub total_patients: u32,
    pub dropped_patients: u32,
    pub dropout_rate: f64,
}

impl From<&AttritionBiasResult> for DropoutRow {
    fn from(result: &AttritionBiasResult) -> Self {
        Self {
            group: result.group.clone(),
            total_patients: result.total_patients,
            dropped_patients: result.dropped_patients,
            dropout_rate: result.dropout_rate,
        }
    }
}

/// Dropout comparison along a second dimension (race, sex, ...).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropoutStratum {
    pub dimension: String,
    pub groups: Vec<DropoutRow>,
    pub differential_attrition: bool,
    pub description: String,
}

impl DropoutStratum {
    pub fn new(dimension: impl Into<String>, results: &[AttritionBiasResult]) -> Self {
        Self {
            dimension: dimension.into(),
            groups: results.iter().map(DropoutRow::from).collect(),
            differential_attrition: has_differential_attrition(
                results,
                attrition::DEFAULT_DIFFERENTIAL_THRESHOLD,
            ),
            description: describe_attrition(results),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttritionReport {
    pub groups: Vec<AttritionRow>,
    pub differential_attrition: bool,
    pub description: String,
    pub hidden_population: HiddenPopulation,
    pub overall_inflation: EffectivenessInflation,
    pub sensitivity: SensitivityBounds,
    pub dropout_timeline: Vec<DropoutPoint>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub strata: Vec<DropoutStratum>,
    /// Income-tier attrition recomputed from the drill-down extract.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub patient_sample: Vec<AttritionBiasResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<DatasetProfile>,
}

impl AttritionReport {
    fn assemble(
        results: Vec<AttritionBiasResult>,
        overall_inflation: EffectivenessInflation,
        sensitivity: SensitivityBounds,
        dropout_timeline: Vec<DropoutPoint>,
    ) -> Self {
        Self {
            differential_attrition: has_differential_attrition(
                &results,
                attrition::DEFAULT_DIFFERENTIAL_THRESHOLD,
            ),
            description: describe_attrition(&results),
            hidden_population: hidden_population(&results),
            overall_inflation,
            sensitivity,
            dropout_timeline,
            groups: results
                .into_iter()
                .map(|result| AttritionRow {
                    inflation: result.inflation(),
                    result,
                })
                .collect(),
            strata: Vec::new(),
            patient_sample: Vec::new(),
            profile: None,
        }
    }

    /// Report over the depression sample.
    pub fn sample() -> Self {
        Self {
            strata: vec![DropoutStratum::new("race", &depression::attrition_by_race())],
            patient_sample: depression::sample_attrition(),
            profile: Some(depression::PROFILE),
            ..Self::assemble(
                depression::attrition_bias(),
                depression::overall_inflation(),
                depression::sensitivity(),
                depression::DROPOUT_TIMELINE.to_vec(),
            )
        }
    }

    /// Report over raw patient records, stratified by income with race and
    /// gender as secondary dimensions. `weeks` bounds the dropout timeline.
    pub fn from_patients(patients: &[TrialPatient], weeks: u32) -> Self {
        let total = patients.len() as u32;
        let completed = patients.iter().filter(|p| p.completed).count() as u32;
        let remitted = patients.iter().filter(|p| p.completed && p.remission).count() as u32;

        let overall_inflation = effectiveness_inflation(
            percent(f64::from(remitted), f64::from(completed)),
            percent(f64::from(remitted), f64::from(total)),
        );
        let sensitivity = sensitivity_analysis(remitted, completed, total - completed);

        let mut strata = Vec::new();
        if patients.iter().any(|p| p.race.is_some()) {
            let by_race = attrition_by(patients, |p| {
                p.race.clone().unwrap_or_else(|| "Unknown".to_string())
            });
            strata.push(DropoutStratum::new("race", &by_race));
        }
        strata.push(DropoutStratum::new(
            "gender",
            &attrition_by(patients, |p| p.gender.clone()),
        ));

        Self {
            strata,
            ..Self::assemble(
                attrition_by(patients, |p| p.income_level.clone()),
                overall_inflation,
                sensitivity,
                dropout_timeline(patients, weeks),
            )
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionSummary {
    pub title: &'static str,
    pub summary: FlagSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataReport {
    pub analysis: MetadataAnalysisResult,
    pub summary: FlagSummary,
    pub dimensions: Vec<DimensionSummary>,
}

impl MetadataReport {
    pub fn from_analysis(analysis: MetadataAnalysisResult) -> Self {
        let dimensions = BiasDimension::ALL
            .into_iter()
            .map(|dimension| DimensionSummary {
                title: dimension.title(),
                summary: FlagSummary::tally(analysis.dimension(dimension)),
            })
            .collect();
        Self {
            summary: analysis.summary(),
            dimensions,
            analysis,
        }
    }

    pub fn sample() -> Self {
        Self::from_analysis(EXAMPLE_ANALYSIS.clone())
    }
}
