//! Wire types of the trial search and bias-analysis contract.
//!
//! Optional registry fields stay `Option` so that "absent" and "empty" remain
//! distinguishable; fallback text is applied only when rendering.

use serde::{Deserialize, Serialize};

/// Placeholder rendered for registry fields the trial never reported.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Render an optional field, falling back to [`NOT_SPECIFIED`].
pub fn or_not_specified(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_SPECIFIED)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialSummary {
    pub nct_id: String,
    pub title: String,
    pub status: Option<String>,
    pub phase: Option<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub interventions: Vec<String>,
    pub enrollment: Option<u32>,
    pub start_date: Option<String>,
    pub completion_date: Option<String>,
}

/// One page of search results. `page` is 1-indexed and `total_count` counts
/// every match regardless of pagination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub total_count: u32,
    pub page: u32,
    pub page_size: u32,
    #[serde(default)]
    pub trials: Vec<TrialSummary>,
}

impl SearchResponse {
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size)
    }

    pub fn has_next_page(&self) -> bool {
        u64::from(self.page) * u64::from(self.page_size) < u64::from(self.total_count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagStatus {
    Concern,
    Note,
    Ok,
}

impl FlagStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Concern => "CONCERN",
            Self::Note => "NOTE",
            Self::Ok => "OK",
        }
    }
}

/// A single finding about a trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasFlag {
    pub name: String,
    pub status: FlagStatus,
    pub explanation: String,
    pub details: Option<String>,
}

/// Counts of flags by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FlagSummary {
    pub concerns: usize,
    pub notes: usize,
    pub ok: usize,
}

impl FlagSummary {
    pub fn tally<'a, I>(flags: I) -> Self
    where
        I: IntoIterator<Item = &'a BiasFlag>,
    {
        flags
            .into_iter()
            .fold(Self::default(), |mut summary, flag| {
                match flag.status {
                    FlagStatus::Concern => summary.concerns += 1,
                    FlagStatus::Note => summary.notes += 1,
                    FlagStatus::Ok => summary.ok += 1,
                }
                summary
            })
    }

    pub fn total(&self) -> usize {
        self.concerns + self.notes + self.ok
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BiasDimension {
    Publication,
    Methodological,
    Generalizability,
}

impl BiasDimension {
    pub const ALL: [BiasDimension; 3] = [
        BiasDimension::Publication,
        BiasDimension::Methodological,
        BiasDimension::Generalizability,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Publication => "Publication concerns",
            Self::Methodological => "Methodological limitations",
            Self::Generalizability => "Generalizability notes",
        }
    }
}

/// Bias analysis of one registry trial as returned by the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataAnalysisResult {
    pub trial: RegistryTrial,
    #[serde(default)]
    pub publication_concerns: Vec<BiasFlag>,
    #[serde(default)]
    pub methodological_limitations: Vec<BiasFlag>,
    #[serde(default)]
    pub generalizability_notes: Vec<BiasFlag>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl MetadataAnalysisResult {
    pub fn dimension(&self, dimension: BiasDimension) -> &[BiasFlag] {
        match dimension {
            BiasDimension::Publication => &self.publication_concerns,
            BiasDimension::Methodological => &self.methodological_limitations,
            BiasDimension::Generalizability => &self.generalizability_notes,
        }
    }

    /// Counts across every dimension.
    pub fn summary(&self) -> FlagSummary {
        FlagSummary::tally(
            BiasDimension::ALL
                .into_iter()
                .flat_map(|dimension| self.dimension(dimension)),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryTrial {
    pub identification: Identification,
    #[serde(default)]
    pub status: StudyStatus,
    #[serde(default)]
    pub design: StudyDesign,
    #[serde(default)]
    pub eligibility: Eligibility,
    #[serde(default)]
    pub interventions: Vec<Intervention>,
    #[serde(default)]
    pub outcomes: Outcomes,
    #[serde(default)]
    pub locations: Locations,
    #[serde(default)]
    pub sponsor: Sponsor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identification {
    pub nct_id: String,
    pub title: String,
    pub official_title: Option<String>,
    pub acronym: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStatus {
    pub overall_status: Option<String>,
    pub start_date: Option<String>,
    pub completion_date: Option<String>,
    #[serde(default)]
    pub has_results: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyDesign {
    pub study_type: Option<String>,
    pub phase: Option<String>,
    pub allocation: Option<String>,
    pub masking: Option<String>,
    pub primary_purpose: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eligibility {
    pub enrollment: Option<u32>,
    pub criteria: Option<String>,
    pub sex: Option<String>,
    pub minimum_age: Option<String>,
    pub maximum_age: Option<String>,
    pub healthy_volunteers: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intervention {
    pub name: String,
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub measure: String,
    pub time_frame: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outcomes {
    #[serde(default)]
    pub primary: Vec<Outcome>,
    #[serde(default)]
    pub secondary: Vec<Outcome>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Locations {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub countries: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sponsor {
    pub lead: Option<String>,
    #[serde(default)]
    pub collaborators: Vec<String>,
}
