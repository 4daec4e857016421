//! Immutable sample datasets rendered by the demo.
//!
//! Tables are built once and only ever read afterwards.

pub mod depression;
pub mod heart_disease;
pub mod metadata_example;
pub mod profile;
pub mod stages;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasKind {
    Demographic,
    Attrition,
    Selection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataSource {
    PatientLevel,
    Metadata,
}

/// Entry in the demo's dataset selector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub bias_type: BiasKind,
    pub short_description: &'static str,
    pub phase: &'static str,
    pub patients: Option<u32>,
    pub data_source: DataSource,
}

pub const DATASETS: [DatasetInfo; 3] = [
    DatasetInfo {
        id: "heart-disease-uci",
        name: "Cardiovascular Phase III",
        bias_type: BiasKind::Demographic,
        short_description: "Demographic imbalance in multi-center RCT",
        phase: "Phase III",
        patients: Some(heart_disease::TOTAL_PATIENTS),
        data_source: DataSource::PatientLevel,
    },
    DatasetInfo {
        id: "depression-trial-synthetic",
        name: "CNS Phase II/III - MDD",
        bias_type: BiasKind::Attrition,
        short_description: "Differential attrition masking efficacy",
        phase: "Phase II/III",
        patients: Some(depression::TOTAL_PATIENTS),
        data_source: DataSource::PatientLevel,
    },
    DatasetInfo {
        id: "metadata-ctgov-example",
        name: "ClinicalTrials.gov Registry Lookup",
        bias_type: BiasKind::Selection,
        short_description: "Publication & selection bias from trial design metadata",
        phase: "Phase III",
        patients: None,
        data_source: DataSource::Metadata,
    },
];
