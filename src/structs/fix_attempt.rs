use serde::{Deserialize, Serialize};

/// Result of attempting a single remediation target within a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixAttempt {
    pub target_id: String,
    pub action: String,
    pub outcome: FixAttemptOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum FixAttemptOutcome {
    Fixed { records: u64, message: String },
    Failed { reason: String },
}

impl FixAttempt {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, FixAttemptOutcome::Fixed { .. })
    }
}
