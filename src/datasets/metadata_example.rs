//! Pre-computed registry analysis shown when no live service is reachable.

use once_cell::sync::Lazy;

use crate::registry::types::{
    BiasFlag, Eligibility, FlagStatus, Identification, Intervention, Locations,
    MetadataAnalysisResult, Outcome, Outcomes, RegistryTrial, Sponsor, StudyDesign, StudyStatus,
};

pub static EXAMPLE_ANALYSIS: Lazy<MetadataAnalysisResult> = Lazy::new(|| MetadataAnalysisResult {
    trial: example_trial(),
    publication_concerns: vec![
        flag(
            "Results Not Posted",
            FlagStatus::Concern,
            "Study completed but results not posted to ClinicalTrials.gov",
            Some("Study completed 3+ year(s) ago without posting results."),
        ),
        flag(
            "Terminated Without Results",
            FlagStatus::Ok,
            "Study was not terminated or results were posted",
            None,
        ),
        flag(
            "Delayed Results Posting",
            FlagStatus::Ok,
            "Results were posted within acceptable timeframe",
            None,
        ),
        flag(
            "Missing Secondary Outcomes",
            FlagStatus::Ok,
            "Outcome reporting appears complete",
            None,
        ),
    ],
    methodological_limitations: vec![
        flag(
            "No Randomization",
            FlagStatus::Ok,
            "Study uses randomized allocation",
            None,
        ),
        flag(
            "No Blinding",
            FlagStatus::Concern,
            "Study is open-label with no blinding/masking",
            Some("Open-label studies may be subject to performance and detection bias."),
        ),
        flag(
            "Small Sample Size",
            FlagStatus::Ok,
            "Adequate sample size (n=412)",
            None,
        ),
    ],
    generalizability_notes: vec![
        flag(
            "Restrictive Eligibility Criteria",
            FlagStatus::Ok,
            "Eligibility criteria appear reasonable",
            None,
        ),
        flag(
            "Single-Center Study",
            FlagStatus::Note,
            "Study conducted at a single site",
            Some("Single-center studies may have limited generalizability."),
        ),
        flag(
            "Narrow Demographics",
            FlagStatus::Ok,
            "Demographic criteria appear inclusive",
            None,
        ),
    ],
    recommendations: vec![
        "Consider searching for published papers that may contain the study results.".to_string(),
        "Open-label design may introduce performance bias. Consider results in context of blinding limitations.".to_string(),
        "Look for multi-center replication studies to confirm generalizability.".to_string(),
    ],
});

fn example_trial() -> RegistryTrial {
    RegistryTrial {
        identification: Identification {
            nct_id: "NCT00000000".to_string(),
            title: "A Phase III, Randomized, Open-Label Study of Drug X vs Standard of Care in \
                    Advanced Non-Small Cell Lung Cancer"
                .to_string(),
            official_title: None,
            acronym: None,
        },
        status: StudyStatus {
            overall_status: Some("COMPLETED".to_string()),
            start_date: Some("2018-03".to_string()),
            completion_date: Some("2021-06".to_string()),
            has_results: false,
        },
        design: StudyDesign {
            study_type: Some("INTERVENTIONAL".to_string()),
            phase: Some("PHASE3".to_string()),
            allocation: Some("RANDOMIZED".to_string()),
            masking: Some("NONE".to_string()),
            primary_purpose: Some("TREATMENT".to_string()),
        },
        eligibility: Eligibility {
            enrollment: Some(412),
            criteria: None,
            sex: Some("ALL".to_string()),
            minimum_age: Some("18 Years".to_string()),
            maximum_age: None,
            healthy_volunteers: Some(false),
        },
        interventions: vec![
            Intervention {
                name: "Drug X".to_string(),
                kind: Some("DRUG".to_string()),
            },
            Intervention {
                name: "Standard of Care".to_string(),
                kind: Some("OTHER".to_string()),
            },
        ],
        outcomes: Outcomes {
            primary: vec![Outcome {
                measure: "Overall survival".to_string(),
                time_frame: Some("Up to 36 months".to_string()),
            }],
            secondary: vec![Outcome {
                measure: "Progression-free survival".to_string(),
                time_frame: Some("Up to 36 months".to_string()),
            }],
        },
        locations: Locations {
            count: 1,
            countries: vec!["United States".to_string()],
        },
        sponsor: Sponsor {
            lead: Some("Example Pharma Inc.".to_string()),
            collaborators: Vec::new(),
        },
    }
}

fn flag(name: &str, status: FlagStatus, explanation: &str, details: Option<&str>) -> BiasFlag {
    BiasFlag {
        name: name.to_string(),
        status,
        explanation: explanation.to_string(),
        details: details.map(str::to_string),
    }
}
