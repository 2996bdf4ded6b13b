use std::collections::HashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroRecord {
    pub id: String,
    pub name: Option<String>,
    pub level: Option<u32>,
    pub stars: Option<u32>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Gear, chief equipment, inventory and any other tracked fields.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}
