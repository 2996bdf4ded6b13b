use std::fs;
use std::path::{Path, PathBuf};
use crate::config::constants::{API_TOKEN_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::errors::{HerovaultError, HerovaultResult};
use crate::structs::config::config::Config;

pub struct ConfigManager;

impl ConfigManager {

    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .unwrap_or_default()
    }

    pub fn load() -> HerovaultResult<Config> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> HerovaultResult<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        log::info!("📋 Loading config from: {}", path.display());
        let content = fs::read_to_string(path)
            .map_err(|e| HerovaultError::config_file_error(&path.display().to_string(), &e.to_string()))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| HerovaultError::config_file_error(&path.display().to_string(), &e.to_string()))?;
        Ok(config)
    }

    pub fn create_sample_config() -> HerovaultResult<()> {
        let sample_config = r#"# Herovault Configuration

[api]
# Base URL of the tracker backend
base_url = "https://tracker.example.com/api"

# Bearer token; the HEROVAULT_API_TOKEN environment variable overrides this
# token = "..."

# Per-request timeout in seconds
request_timeout_secs = 30

[sync]
# Quiet period after the last edit before changes are flushed (milliseconds)
debounce_ms = 300

# How long the Saved / Error indicators stay visible (milliseconds)
saved_status_ms = 2000
error_status_ms = 3000

[remediation]
# Issues at or below this severity are eligible for automatic fixes:
# "low", "medium", "high", "critical"
max_auto_severity = "medium"

# Re-run the diagnostic scan after every batch so reported issues are current
refresh_after_batch = true
"#;

        let path = Self::config_path();
        if path.exists() {
            return Err(HerovaultError::config_error(
                "Configuration file already exists",
                None,
                Some(&format!("Edit {} directly or remove it first", path.display())),
            ));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| HerovaultError::config_file_error(&path.display().to_string(), &e.to_string()))?;
        }
        fs::write(&path, sample_config)
            .map_err(|e| HerovaultError::config_file_error(&path.display().to_string(), &e.to_string()))?;

        log::info!("📝 Sample configuration written to: {}", path.display());
        Ok(())
    }

    pub fn validate_config(config: &Config) -> HerovaultResult<()> {
        if config.api.base_url.is_empty() {
            return Err(HerovaultError::config_error(
                "API base URL is not set",
                Some("api.base_url"),
                Some("Run 'herovault init' and edit the generated config"),
            ));
        }

        if config.api.token.is_none() && std::env::var(API_TOKEN_ENV).is_err() {
            return Err(HerovaultError::config_error(
                "No API token configured",
                Some("api.token"),
                Some(&format!("Set api.token in the config or export {}", API_TOKEN_ENV)),
            ));
        }

        if config.sync.debounce_ms == 0 {
            return Err(HerovaultError::validation_error(
                "sync.debounce_ms",
                "0",
                "must be greater than zero",
                Some("300 is a sensible default"),
            ));
        }

        Ok(())
    }

    pub fn resolve_token(config: &Config) -> Option<String> {
        std::env::var(API_TOKEN_ENV).ok().or_else(|| config.api.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigManager::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.sync.debounce_ms, 300);
        assert_eq!(config.remediation.max_auto_severity, crate::enums::severity::Severity::Medium);
    }

    #[test]
    fn parses_partial_config_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[api]\nbase_url = \"https://t.example.com/api\"\n\n[sync]\ndebounce_ms = 150").unwrap();

        let config = ConfigManager::load_from(&path).unwrap();
        assert_eq!(config.api.base_url, "https://t.example.com/api");
        assert_eq!(config.sync.debounce_ms, 150);
        assert_eq!(config.sync.saved_status_ms, 2000);
        assert!(config.remediation.refresh_after_batch);
    }

    #[test]
    fn invalid_toml_is_a_config_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        let err = ConfigManager::load_from(&path).unwrap_err();
        assert!(matches!(err, HerovaultError::ConfigurationFileError { .. }));
    }

    #[test]
    fn validation_rejects_zero_debounce() {
        let mut config = Config::default();
        config.api.base_url = "https://t.example.com".to_string();
        config.api.token = Some("tok".to_string());
        config.sync.debounce_ms = 0;
        assert!(ConfigManager::validate_config(&config).is_err());
    }
}
