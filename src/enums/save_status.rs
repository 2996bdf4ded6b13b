use serde::{Deserialize, Serialize};

/// Persistence state of one editable record, as shown to the user.
/// Transitions are driven only by the flush lifecycle; `Saved` and
/// `Error` are transient and revert to `Idle` after a display window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    Idle,
    Saving,
    Saved,
    Error,
}

impl Default for SaveStatus {
    fn default() -> Self {
        SaveStatus::Idle
    }
}

impl SaveStatus {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Idle => "💤",
            Self::Saving => "💾",
            Self::Saved => "✅",
            Self::Error => "❌",
        }
    }
}
