//! Narrative tables attached to a sample dataset: trial context, headline
//! insight, peer comparison axes, where each bias sits on the trial
//! pipeline, how biases cascade, and when monitoring would have caught it.

use serde::Serialize;

use super::stages::{stage, TrialStage};
use crate::metrics::percent;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialContext {
    pub phase: &'static str,
    pub therapeutic_area: &'static str,
    pub indication: &'static str,
    pub sites: u32,
    pub countries: &'static [&'static str],
    pub enrollment_period: &'static str,
    pub sponsor: &'static str,
    pub regulatory_target: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_endpoint: Option<&'static str>,
}

/// Headline text. The numbers behind it live in the computed report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub headline: &'static str,
    pub detail: &'static str,
    pub implication: &'static str,
}

/// One axis of the trial-vs-peer comparison, both values on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RadarAxis {
    pub key: &'static str,
    pub label: &'static str,
    pub trial: u8,
    pub benchmark: u8,
    pub description: &'static str,
}

impl RadarAxis {
    /// Positive when the trial scores above its peers.
    pub fn gap(&self) -> i16 {
        i16::from(self.trial) - i16::from(self.benchmark)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

/// A bias pinned to the pipeline stage where it arises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveBias {
    pub stage_id: &'static str,
    pub bias_type: &'static str,
    pub severity: Level,
    pub description: &'static str,
}

impl ActiveBias {
    pub fn stage(&self) -> Option<&'static TrialStage> {
        stage(self.stage_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
}

/// Edge of the bias cascade: `from` feeds into `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BiasInteraction {
    pub from: &'static str,
    pub to: &'static str,
    pub description: &'static str,
    pub strength: Strength,
}

/// Point on the trial timeline. `detected` marks when continuous monitoring
/// flags the bias; `traditional` marks when a conventional review would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProspectiveMilestone {
    pub id: &'static str,
    pub label: &'static str,
    pub timepoint: &'static str,
    pub description: &'static str,
    pub detected: bool,
    pub traditional: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetProfile {
    pub context: TrialContext,
    pub insight: Insight,
    pub radar_axes: &'static [RadarAxis],
    pub active_biases: &'static [ActiveBias],
    pub interactions: &'static [BiasInteraction],
    pub prospective: &'static [ProspectiveMilestone],
}

impl DatasetProfile {
    /// Milestones between automated detection and conventional discovery,
    /// exclusive at both ends. `None` when either marker is missing or
    /// they are out of order.
    pub fn lead_time(&self) -> Option<&'static [ProspectiveMilestone]> {
        let milestones = self.prospective;
        let detected = milestones.iter().position(|m| m.detected)?;
        let traditional = milestones.iter().position(|m| m.traditional)?;
        (detected < traditional).then(|| &milestones[detected + 1..traditional])
    }
}

/// Share of a group with the primary outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeRate {
    pub group: String,
    pub total: u32,
    pub with_outcome: u32,
    pub rate: f64,
}

impl OutcomeRate {
    pub fn new(group: impl Into<String>, total: u32, with_outcome: u32) -> Self {
        Self {
            group: group.into(),
            total,
            with_outcome,
            rate: percent(f64::from(with_outcome), f64::from(total)),
        }
    }
}
