use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::structs::fix_attempt::FixAttempt;

/// Outcome of one batch remediation pass. Built fresh per invocation
/// by reducing the per-target attempts; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemediationReport {
    pub batch_id: Uuid,
    pub attempted: usize,
    pub succeeded: usize,
    pub summary: String,
    pub attempts: Vec<FixAttempt>,
    pub generated_at: DateTime<Utc>,
}

impl RemediationReport {
    pub fn from_attempts(attempts: Vec<FixAttempt>) -> Self {
        let attempted = attempts.len();
        let succeeded = attempts.iter().filter(|a| a.succeeded()).count();
        let summary = if attempted == 0 {
            "No eligible issues to remediate".to_string()
        } else {
            format!("Applied {} of {} fixes", succeeded, attempted)
        };
        Self {
            batch_id: Uuid::new_v4(),
            attempted,
            succeeded,
            summary,
            attempts,
            generated_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::from_attempts(Vec::new())
    }

    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::fix_attempt::FixAttemptOutcome;

    fn attempt(id: &str, ok: bool) -> FixAttempt {
        FixAttempt {
            target_id: id.to_string(),
            action: format!("fix-{}", id),
            outcome: if ok {
                FixAttemptOutcome::Fixed { records: 1, message: "done".to_string() }
            } else {
                FixAttemptOutcome::Failed { reason: "backend rejected".to_string() }
            },
        }
    }

    #[test]
    fn counts_reduce_from_attempts() {
        let report = RemediationReport::from_attempts(vec![
            attempt("a", true),
            attempt("b", false),
            attempt("c", true),
        ]);
        assert_eq!(report.attempted, 3);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed(), 1);
        assert!(report.summary.contains("2 of 3"));
    }

    #[test]
    fn empty_report_is_informational() {
        let report = RemediationReport::empty();
        assert_eq!(report.attempted, 0);
        assert!(report.summary.contains("No eligible"));
    }
}
