use async_trait::async_trait;
use std::collections::HashMap;
use serde_json::Value;
use crate::errors::HerovaultResult;
use crate::structs::fix_outcome::FixOutcome;
use crate::structs::hero_record::HeroRecord;
use crate::structs::remediation_target::RemediationTarget;

/// Remote store collaborator. Transport, authentication, and any retry
/// policy live behind this seam, never in the sync core.
#[async_trait]
pub trait RecordStore: Send + Sync {

    /// Partial update of one record. Must be idempotent-safe for
    /// repeated identical payloads.
    async fn update_record(&self, key: &str, fields: HashMap<String, Value>) -> HerovaultResult<HeroRecord>;

    /// Run one named remediation action on the backend.
    async fn apply_fix(&self, action_id: &str) -> HerovaultResult<FixOutcome>;

    /// Diagnostic scan for correctable issues.
    async fn scan_targets(&self) -> HerovaultResult<Vec<RemediationTarget>>;
}
