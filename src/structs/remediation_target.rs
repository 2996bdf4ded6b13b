use serde::{Deserialize, Serialize};
use crate::enums::severity::Severity;

/// One diagnosed, independently correctable data issue reported by the
/// backend diagnostic scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemediationTarget {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub severity: Severity,
    /// Named backend action that corrects this issue, when one exists.
    pub fix_action: Option<String>,
    #[serde(default)]
    pub affected_records: u64,
}

impl RemediationTarget {
    pub fn has_fix(&self) -> bool {
        self.fix_action.is_some()
    }
}
