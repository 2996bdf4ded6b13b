use std::sync::{Arc, Mutex};
use crate::errors::HerovaultResult;
use crate::structs::fix_attempt::{FixAttempt, FixAttemptOutcome};
use crate::structs::remediation_report::RemediationReport;
use crate::structs::remediation_target::RemediationTarget;
use crate::traits::record_store::RecordStore;

/// Applies a filtered set of fix actions sequentially, continuing past
/// individual failures and tallying the outcome.
///
/// Fixes run strictly in input order, each awaited before the next,
/// because backend actions may have order-sensitive side effects on
/// shared state. A non-empty batch always triggers a diagnostic
/// re-scan afterwards so callers observe post-remediation truth.
pub struct BatchRemediator {
    store: Arc<dyn RecordStore>,
    refresh_after_batch: bool,
    targets: Mutex<Vec<RemediationTarget>>,
    last_report: Mutex<Option<RemediationReport>>,
}

impl BatchRemediator {

    pub fn new(store: Arc<dyn RecordStore>, refresh_after_batch: bool) -> Self {
        Self {
            store,
            refresh_after_batch,
            targets: Mutex::new(Vec::new()),
            last_report: Mutex::new(None),
        }
    }

    /// Pure filter over scanned targets; no side effects.
    pub fn select_eligible<P>(targets: &[RemediationTarget], predicate: P) -> Vec<RemediationTarget>
    where
        P: Fn(&RemediationTarget) -> bool,
    {
        targets.iter().filter(|t| predicate(t)).cloned().collect()
    }

    /// Run the diagnostic scan and cache the result.
    pub async fn scan(&self) -> HerovaultResult<Vec<RemediationTarget>> {
        let targets = self.store.scan_targets().await?;
        *self.targets.lock().unwrap() = targets.clone();
        Ok(targets)
    }

    pub fn targets(&self) -> Vec<RemediationTarget> {
        self.targets.lock().unwrap().clone()
    }

    pub fn last_report(&self) -> Option<RemediationReport> {
        self.last_report.lock().unwrap().clone()
    }

    /// Apply each target's fix in order. One failure never stops the
    /// batch; it is recorded and the loop moves on. An empty input
    /// short-circuits to a zero-count report without touching the
    /// network at all.
    pub async fn run_batch(&self, targets: &[RemediationTarget]) -> RemediationReport {
        if targets.is_empty() {
            let report = RemediationReport::empty();
            *self.last_report.lock().unwrap() = Some(report.clone());
            return report;
        }

        let mut attempts = Vec::with_capacity(targets.len());
        for target in targets {
            let attempt = self.attempt_fix(target).await;
            match &attempt.outcome {
                FixAttemptOutcome::Fixed { records, message } => {
                    log::info!("✅ {} fixed {} records: {}", target.id, records, message);
                }
                FixAttemptOutcome::Failed { reason } => {
                    log::error!("❌ {} failed: {}", target.id, reason);
                    log::error!("   Continuing with next issue...");
                }
            }
            attempts.push(attempt);
        }

        if self.refresh_after_batch {
            if let Err(e) = self.scan().await {
                log::warn!("⚠️ Post-remediation scan failed, keeping stale issue list: {}", e);
            }
        }

        let report = RemediationReport::from_attempts(attempts);
        *self.last_report.lock().unwrap() = Some(report.clone());
        report
    }

    async fn attempt_fix(&self, target: &RemediationTarget) -> FixAttempt {
        let action = match &target.fix_action {
            Some(action) => action.clone(),
            None => {
                return FixAttempt {
                    target_id: target.id.clone(),
                    action: String::new(),
                    outcome: FixAttemptOutcome::Failed {
                        reason: "no fix action defined for this issue".to_string(),
                    },
                };
            }
        };

        let outcome = match self.store.apply_fix(&action).await {
            Ok(result) => FixAttemptOutcome::Fixed {
                records: result.fixed,
                message: result.message,
            },
            Err(e) => FixAttemptOutcome::Failed {
                reason: e.to_string(),
            },
        };

        FixAttempt {
            target_id: target.id.clone(),
            action,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use serde_json::Value;
    use crate::enums::severity::Severity;
    use crate::errors::HerovaultError;
    use crate::structs::config::remediation_config::RemediationConfig;
    use crate::structs::fix_outcome::FixOutcome;
    use crate::structs::hero_record::HeroRecord;
    use async_trait::async_trait;

    struct ScriptedStore {
        fix_calls: Mutex<Vec<String>>,
        scan_calls: Mutex<usize>,
        failing_actions: Vec<String>,
        scan_result: Vec<RemediationTarget>,
    }

    impl ScriptedStore {
        fn new(failing_actions: &[&str]) -> Self {
            Self {
                fix_calls: Mutex::new(Vec::new()),
                scan_calls: Mutex::new(0),
                failing_actions: failing_actions.iter().map(|s| s.to_string()).collect(),
                scan_result: Vec::new(),
            }
        }

        fn fix_calls(&self) -> Vec<String> {
            self.fix_calls.lock().unwrap().clone()
        }

        fn scan_calls(&self) -> usize {
            *self.scan_calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl RecordStore for ScriptedStore {
        async fn update_record(&self, _key: &str, _fields: HashMap<String, Value>) -> HerovaultResult<HeroRecord> {
            unreachable!("remediator never updates records")
        }

        async fn apply_fix(&self, action_id: &str) -> HerovaultResult<FixOutcome> {
            self.fix_calls.lock().unwrap().push(action_id.to_string());
            if self.failing_actions.iter().any(|a| a == action_id) {
                return Err(HerovaultError::remediation_error(action_id, "scripted failure"));
            }
            Ok(FixOutcome { fixed: 1, message: format!("{} done", action_id) })
        }

        async fn scan_targets(&self) -> HerovaultResult<Vec<RemediationTarget>> {
            *self.scan_calls.lock().unwrap() += 1;
            Ok(self.scan_result.clone())
        }
    }

    fn target(id: &str, severity: Severity, action: Option<&str>) -> RemediationTarget {
        RemediationTarget {
            id: id.to_string(),
            description: format!("issue {}", id),
            severity,
            fix_action: action.map(|s| s.to_string()),
            affected_records: 3,
        }
    }

    #[tokio::test]
    async fn empty_batch_reports_zero_without_network_calls() {
        let store = Arc::new(ScriptedStore::new(&[]));
        let remediator = BatchRemediator::new(store.clone(), true);

        let report = remediator.run_batch(&[]).await;
        assert_eq!(report.attempted, 0);
        assert_eq!(report.succeeded, 0);
        assert!(store.fix_calls().is_empty());
        assert_eq!(store.scan_calls(), 0);
        assert!(remediator.last_report().is_some());
    }

    #[tokio::test]
    async fn one_failure_never_stops_the_batch() {
        let store = Arc::new(ScriptedStore::new(&["fix-b"]));
        let remediator = BatchRemediator::new(store.clone(), true);
        let targets = vec![
            target("a", Severity::Low, Some("fix-a")),
            target("b", Severity::Low, Some("fix-b")),
            target("c", Severity::Low, Some("fix-c")),
        ];

        let report = remediator.run_batch(&targets).await;
        assert_eq!(report.attempted, 3);
        assert_eq!(report.succeeded, 2);
        assert_eq!(store.fix_calls(), vec!["fix-a", "fix-b", "fix-c"]);
        assert!(!report.attempts[1].succeeded());
    }

    #[tokio::test]
    async fn batch_runs_fixes_in_input_order_and_rescans_once() {
        let store = Arc::new(ScriptedStore::new(&[]));
        let remediator = BatchRemediator::new(store.clone(), true);
        let targets = vec![
            target("orphans", Severity::Medium, Some("remove-orphans")),
            target("index", Severity::Medium, Some("rebuild-index")),
        ];

        remediator.run_batch(&targets).await;
        assert_eq!(store.fix_calls(), vec!["remove-orphans", "rebuild-index"]);
        assert_eq!(store.scan_calls(), 1);
    }

    #[tokio::test]
    async fn refresh_can_be_disabled() {
        let store = Arc::new(ScriptedStore::new(&[]));
        let remediator = BatchRemediator::new(store.clone(), false);

        remediator.run_batch(&[target("a", Severity::Low, Some("fix-a"))]).await;
        assert_eq!(store.scan_calls(), 0);
    }

    #[tokio::test]
    async fn target_without_action_counts_as_failed_without_network() {
        let store = Arc::new(ScriptedStore::new(&[]));
        let remediator = BatchRemediator::new(store.clone(), false);

        let report = remediator.run_batch(&[target("a", Severity::Low, None)]).await;
        assert_eq!(report.attempted, 1);
        assert_eq!(report.succeeded, 0);
        assert!(store.fix_calls().is_empty());
    }

    #[test]
    fn eligibility_needs_a_fix_and_a_low_enough_severity() {
        let config = RemediationConfig { max_auto_severity: Severity::Medium, refresh_after_batch: true };
        let targets = vec![
            target("fixable", Severity::Low, Some("fix-a")),
            target("too-severe", Severity::Critical, Some("fix-b")),
            target("unfixable", Severity::Low, None),
        ];

        let eligible = BatchRemediator::select_eligible(&targets, config.eligibility());
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, "fixable");
    }
}
