use std::time::Duration;

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_SAVED_STATUS_MS: u64 = 2000;
pub const DEFAULT_ERROR_STATUS_MS: u64 = 3000;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const API_TOKEN_ENV: &str = "HEROVAULT_API_TOKEN";

pub const CONFIG_DIR_NAME: &str = "herovault";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub fn duration_millis(milliseconds: u64) -> Duration {
    Duration::from_millis(milliseconds)
}

pub fn duration_secs(seconds: u64) -> Duration {
    Duration::from_secs(seconds)
}
