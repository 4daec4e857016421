//! Attrition (dropout) bias: completers vs intention-to-treat outcomes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::percent;

/// Percentage-point spread in dropout rates above which attrition is
/// considered differential.
pub const DEFAULT_DIFFERENTIAL_THRESHOLD: f64 = 15.0;

/// Patient-level record from a longitudinal trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialPatient {
    pub patient_id: String,
    pub age: u32,
    pub gender: String,
    #[serde(default)]
    pub race: Option<String>,
    pub income_level: String,
    #[serde(default)]
    pub treatment_arm: Option<String>,
    /// Last week observed; `None` when the export only records completion.
    #[serde(default)]
    pub weeks_in_study: Option<u32>,
    pub completed: bool,
    pub remission: bool,
}

/// Dropout and outcome figures for one stratification group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttritionBiasResult {
    pub group: String,
    pub total_patients: u32,
    pub completed_patients: u32,
    pub dropped_patients: u32,
    pub dropout_rate: f64,
    pub remission_rate_completers: f64,
    #[serde(rename = "remissionRateITT")]
    pub remission_rate_itt: f64,
}

impl AttritionBiasResult {
    /// Derive rates from raw counts. Dropouts count as non-responders in
    /// the ITT rate, so `remitted` is shared by both denominators.
    pub fn from_counts(group: impl Into<String>, total: u32, completed: u32, remitted: u32) -> Self {
        let dropped = total.saturating_sub(completed);
        Self {
            group: group.into(),
            total_patients: total,
            completed_patients: completed,
            dropped_patients: dropped,
            dropout_rate: percent(f64::from(dropped), f64::from(total)),
            remission_rate_completers: percent(f64::from(remitted), f64::from(completed)),
            remission_rate_itt: percent(f64::from(remitted), f64::from(total)),
        }
    }

    pub fn inflation(&self) -> EffectivenessInflation {
        effectiveness_inflation(self.remission_rate_completers, self.remission_rate_itt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectivenessInflation {
    /// Percentage points.
    pub absolute_difference: f64,
    /// Percent of the ITT rate.
    pub relative_difference: f64,
    pub inflation_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiddenPopulation {
    pub total_dropped: u64,
    pub total_patients: u64,
    pub percentage_hidden: f64,
    /// `None` when there are no groups at all.
    pub most_affected_group: Option<String>,
}

/// Outcome rate under best, worst and proportional assumptions about the
/// unobserved dropouts. Always `worst_case <= mid_case <= best_case`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityBounds {
    pub best_case: f64,
    pub worst_case: f64,
    pub mid_case: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropoutPoint {
    pub week: u32,
    pub cumulative: u32,
    pub new_dropouts: u32,
}

/// How much a completers-only analysis overstates the ITT outcome.
///
/// With no ITT baseline the relative difference is `0` and the factor `1`.
pub fn effectiveness_inflation(completers_rate: f64, itt_rate: f64) -> EffectivenessInflation {
    let absolute_difference = completers_rate - itt_rate;
    if itt_rate == 0.0 {
        return EffectivenessInflation {
            absolute_difference,
            relative_difference: 0.0,
            inflation_factor: 1.0,
        };
    }
    EffectivenessInflation {
        absolute_difference,
        relative_difference: absolute_difference / itt_rate * 100.0,
        inflation_factor: completers_rate / itt_rate,
    }
}

/// True when the dropout spread across groups exceeds `threshold_points`.
/// Needs at least two groups to compare.
pub fn has_differential_attrition(results: &[AttritionBiasResult], threshold_points: f64) -> bool {
    if results.len() < 2 {
        return false;
    }
    let (min, max) = results.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
        (lo.min(r.dropout_rate), hi.max(r.dropout_rate))
    });
    max - min > threshold_points
}

pub fn describe_attrition(results: &[AttritionBiasResult]) -> String {
    if !has_differential_attrition(results, DEFAULT_DIFFERENTIAL_THRESHOLD) {
        return "Dropout rates are similar across groups. Attrition bias is minimal.".to_string();
    }

    let ranked = ranked_by_dropout(results);
    // at least two groups, otherwise attrition could not be differential
    let (highest, lowest) = (ranked[0], ranked[ranked.len() - 1]);

    let comparison = if lowest.dropout_rate > 0.0 {
        format!(
            "at {:.1}x the rate of",
            highest.dropout_rate / lowest.dropout_rate
        )
    } else {
        "at a significantly higher rate than".to_string()
    };

    format!(
        "{} patients dropped out {comparison} {} patients ({:.1}% vs {:.1}%). This differential attrition may bias study conclusions.",
        highest.group, lowest.group, highest.dropout_rate, lowest.dropout_rate
    )
}

/// Patients whose outcomes are unknown because they left the study.
pub fn hidden_population(results: &[AttritionBiasResult]) -> HiddenPopulation {
    let total_patients: u64 = results.iter().map(|r| u64::from(r.total_patients)).sum();
    let total_dropped: u64 = results.iter().map(|r| u64::from(r.dropped_patients)).sum();

    HiddenPopulation {
        total_dropped,
        total_patients,
        percentage_hidden: percent(total_dropped as f64, total_patients as f64),
        most_affected_group: ranked_by_dropout(results)
            .first()
            .map(|r| r.group.clone()),
    }
}

pub fn sensitivity_analysis(
    completers_remitted: u32,
    completers_total: u32,
    dropped: u32,
) -> SensitivityBounds {
    let remitted = f64::from(completers_remitted);
    let dropped = f64::from(dropped);
    let total = f64::from(completers_total) + dropped;
    let completers_rate = if completers_total == 0 {
        0.0
    } else {
        remitted / f64::from(completers_total)
    };

    SensitivityBounds {
        best_case: percent(remitted + dropped, total),
        worst_case: percent(remitted, total),
        mid_case: percent(remitted + dropped * completers_rate, total),
    }
}

/// Group patients by `key` and compute per-group attrition figures.
///
/// Only completers can be observed in remission; a `remission` flag on a
/// dropout is ignored.
pub fn attrition_by<F>(patients: &[TrialPatient], key: F) -> Vec<AttritionBiasResult>
where
    F: Fn(&TrialPatient) -> String,
{
    let mut groups: IndexMap<String, (u32, u32, u32)> = IndexMap::new();
    for patient in patients {
        let entry = groups.entry(key(patient)).or_insert((0, 0, 0));
        entry.0 += 1;
        if patient.completed {
            entry.1 += 1;
            if patient.remission {
                entry.2 += 1;
            }
        }
    }
    groups
        .into_iter()
        .map(|(group, (total, completed, remitted))| {
            AttritionBiasResult::from_counts(group, total, completed, remitted)
        })
        .collect()
}

/// Weekly dropout counts, treating each non-completer's last week in the
/// study as the week they left. Dropouts without a recorded week are not
/// placed on the timeline.
pub fn dropout_timeline(patients: &[TrialPatient], weeks: u32) -> Vec<DropoutPoint> {
    let mut cumulative = 0;
    (1..=weeks)
        .map(|week| {
            let new_dropouts = patients
                .iter()
                .filter(|p| !p.completed && p.weeks_in_study == Some(week))
                .count() as u32;
            cumulative += new_dropouts;
            DropoutPoint {
                week,
                cumulative,
                new_dropouts,
            }
        })
        .collect()
}

/// Highest dropout first; ties keep input order.
fn ranked_by_dropout(results: &[AttritionBiasResult]) -> Vec<&AttritionBiasResult> {
    let mut ranked: Vec<&AttritionBiasResult> = results.iter().collect();
    ranked.sort_by(|a, b| b.dropout_rate.total_cmp(&a.dropout_rate));
    ranked
}
