use serde::{Deserialize, Serialize};
use std::time::Duration;
use crate::config::constants::{duration_millis, DEFAULT_DEBOUNCE_MS, DEFAULT_ERROR_STATUS_MS, DEFAULT_SAVED_STATUS_MS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Quiet period after the last edit before a flush fires.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// How long the Saved indicator stays up before reverting to Idle.
    #[serde(default = "default_saved_status_ms")]
    pub saved_status_ms: u64,
    /// How long the Error indicator stays up before reverting to Idle.
    #[serde(default = "default_error_status_ms")]
    pub error_status_ms: u64,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_saved_status_ms() -> u64 {
    DEFAULT_SAVED_STATUS_MS
}

fn default_error_status_ms() -> u64 {
    DEFAULT_ERROR_STATUS_MS
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            saved_status_ms: default_saved_status_ms(),
            error_status_ms: default_error_status_ms(),
        }
    }
}

impl SyncConfig {
    pub fn debounce(&self) -> Duration {
        duration_millis(self.debounce_ms)
    }

    pub fn saved_window(&self) -> Duration {
        duration_millis(self.saved_status_ms)
    }

    pub fn error_window(&self) -> Duration {
        duration_millis(self.error_status_ms)
    }
}
