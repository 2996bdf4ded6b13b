use serde::{Deserialize, Serialize};

/// Backend response for one named fix action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixOutcome {
    pub fixed: u64,
    pub message: String,
}
