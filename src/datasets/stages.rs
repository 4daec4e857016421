//! The trial lifecycle; each dataset profile pins its biases to one of these stages.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrialStage {
    pub id: &'static str,
    pub label: &'static str,
    pub order: u8,
}

impl TrialStage {
    const fn new(id: &'static str, label: &'static str, order: u8) -> Self {
        Self { id, label, order }
    }
}

pub static TRIAL_STAGES: [TrialStage; 6] = [
    TrialStage::new("design", "Protocol Design", 0),
    TrialStage::new("screening", "Screening", 1),
    TrialStage::new("enrollment", "Enrollment", 2),
    TrialStage::new("treatment", "Treatment", 3),
    TrialStage::new("analysis", "Analysis", 4),
    TrialStage::new("submission", "Submission", 5),
];

pub fn stage(id: &str) -> Option<&'static TrialStage> {
    TRIAL_STAGES.iter().find(|s| s.id == id)
}
