use serde::{Deserialize, Serialize};
use crate::enums::severity::Severity;
use crate::structs::remediation_target::RemediationTarget;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemediationConfig {
    /// Issues at or below this severity are eligible for automatic fixes.
    #[serde(default)]
    pub max_auto_severity: Severity,
    #[serde(default = "default_refresh_after_batch")]
    pub refresh_after_batch: bool,
}

fn default_refresh_after_batch() -> bool {
    true
}

impl Default for RemediationConfig {
    fn default() -> Self {
        Self {
            max_auto_severity: Severity::default(),
            refresh_after_batch: default_refresh_after_batch(),
        }
    }
}

impl RemediationConfig {
    /// Stock eligibility rule: the target must carry a fix action and
    /// sit at or below the configured severity ceiling.
    pub fn eligibility(&self) -> impl Fn(&RemediationTarget) -> bool + '_ {
        move |target| target.has_fix() && target.severity <= self.max_auto_severity
    }
}
