use std::collections::HashMap;
use serde_json::Value;

/// Unflushed field edits for one record. Last write per field wins;
/// the whole set is snapshotted and cleared at the start of a flush.
#[derive(Debug, Clone, Default)]
pub struct PendingChangeSet {
    fields: HashMap<String, Value>,
}

impl PendingChangeSet {
    pub fn new() -> Self {
        Self { fields: HashMap::new() }
    }

    pub fn merge_field(&mut self, field: &str, value: Value) {
        self.fields.insert(field.to_string(), value);
    }

    pub fn merge_fields(&mut self, fields: HashMap<String, Value>) {
        for (field, value) in fields {
            self.fields.insert(field, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Snapshot-and-clear: returns everything accumulated so far and
    /// leaves the set empty so new edits land in a fresh set.
    pub fn take(&mut self) -> HashMap<String, Value> {
        std::mem::take(&mut self.fields)
    }

    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }
}
