use std::sync::Arc;
use std::time::Instant;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use crate::adapters::http_record_store::HttpRecordStore;
use crate::config::config_manager::ConfigManager;
use crate::enums::commands::Commands;
use crate::enums::severity::Severity;
use crate::errors::{HerovaultError, HerovaultResult};
use crate::logger::save_status_logger::SaveStatusLogger;
use crate::services::batch_remediator::BatchRemediator;
use crate::services::mutation_coalescer::MutationCoalescer;
use crate::structs::config::config::Config;
use crate::structs::config::remediation_config::RemediationConfig;
use crate::traits::record_store::RecordStore;

pub struct CommandRunner {
    start_time: Option<Instant>,
}

impl CommandRunner {

    pub fn new() -> Self {
        Self {
            start_time: None,
        }
    }

    pub async fn run_command(&mut self, command: Commands) -> HerovaultResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command().await,
            Commands::Validate => self.validate_command().await,
            Commands::Edit { hero, set } => self.edit_command(&hero, set).await,
            Commands::Diagnose => self.diagnose_command().await,
            Commands::Remediate { max_severity, dry_run } => self.remediate_command(max_severity.as_deref(), dry_run).await,
        };

        if let Some(start) = self.start_time {
            let duration = start.elapsed();
            log::info!("⏱️  Command completed in {:.2}s", duration.as_secs_f64());
        }

        result
    }

    async fn init_command(&self) -> HerovaultResult<()> {
        log::info!("🚀 Initializing herovault configuration...");

        match ConfigManager::create_sample_config() {
            Ok(_) => {
                log::info!("✅ Configuration file created successfully!");
                log::info!("📝 Edit the configuration file to point at your tracker backend.");
                log::info!("🔧 Run 'herovault validate' to check your configuration.");
                Ok(())
            }
            Err(e) => {
                log::error!("❌ Failed to create configuration: {}", e);
                Err(e)
            }
        }
    }

    async fn validate_command(&self) -> HerovaultResult<()> {
        let config = ConfigManager::load()?;
        ConfigManager::validate_config(&config)?;
        log::info!("✅ Configuration is valid");
        log::info!("   API: {}", config.api.base_url);
        log::info!("   Debounce: {}ms", config.sync.debounce_ms);
        log::info!("   Max auto-fix severity: {}", config.remediation.max_auto_severity);
        Ok(())
    }

    async fn edit_command(&self, hero: &str, set: Vec<String>) -> HerovaultResult<()> {
        let (config, store) = self.connect()?;
        let coalescer = MutationCoalescer::for_record(store, hero, config.sync.clone());
        let status_logger = SaveStatusLogger::spawn(coalescer.subscribe());

        log::info!("✏️  Editing hero '{}'", hero);
        for assignment in &set {
            let (field, value) = Self::parse_assignment(assignment)?;
            coalescer.record_field_change(&field, value);
        }

        if set.is_empty() {
            log::info!("💬 Enter edits as 'field=value', one per line (Ctrl-D to finish):");
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await
                .map_err(|e| HerovaultError::system_error("reading edits", &e.to_string()))?
            {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match Self::parse_assignment(line) {
                    Ok((field, value)) => coalescer.record_field_change(&field, value),
                    Err(e) => log::error!("❌ {}", e),
                }
            }
        }

        coalescer.flush_now().await;
        if coalescer.has_pending() {
            log::warn!("⚠️ Some edits could not be flushed (no record identity resolved)");
        }
        status_logger.abort();
        log::info!("👋 Edit session closed");
        Ok(())
    }

    async fn diagnose_command(&self) -> HerovaultResult<()> {
        let (config, store) = self.connect()?;
        let remediator = BatchRemediator::new(store, config.remediation.refresh_after_batch);

        log::info!("🔍 Scanning for data issues...");
        let targets = remediator.scan().await?;
        if targets.is_empty() {
            log::info!("✅ No issues found");
            return Ok(());
        }

        let eligible = BatchRemediator::select_eligible(&targets, config.remediation.eligibility());
        log::info!("📋 {} issues found, {} auto-fixable:", targets.len(), eligible.len());
        for target in &targets {
            let fix = match &target.fix_action {
                Some(action) => format!("fix: {}", action),
                None => "no automatic fix".to_string(),
            };
            log::info!(
                "   {} [{}] {} ({} records, {})",
                target.severity.emoji(),
                target.id,
                target.description,
                target.affected_records,
                fix
            );
        }
        Ok(())
    }

    async fn remediate_command(&self, max_severity: Option<&str>, dry_run: bool) -> HerovaultResult<()> {
        let (config, store) = self.connect()?;
        let max_severity = Self::resolve_max_severity(max_severity, &config.remediation)?;
        let remediator = BatchRemediator::new(store, config.remediation.refresh_after_batch);

        log::info!("🔍 Scanning for data issues...");
        let targets = remediator.scan().await?;
        let eligible = BatchRemediator::select_eligible(
            &targets,
            |t| t.has_fix() && t.severity <= max_severity,
        );

        if dry_run {
            log::info!("🧪 Dry run: {} of {} issues would be remediated", eligible.len(), targets.len());
            for target in &eligible {
                log::info!("   {} [{}] {}", target.severity.emoji(), target.id, target.description);
            }
            return Ok(());
        }

        log::info!("🔧 Remediating {} of {} issues...", eligible.len(), targets.len());
        let report = remediator.run_batch(&eligible).await;
        log::info!("📊 {} (batch {})", report.summary, report.batch_id);
        if report.failed() > 0 {
            log::warn!("⚠️ {} fixes failed; run 'herovault diagnose' for current state", report.failed());
        }
        Ok(())
    }

    fn connect(&self) -> HerovaultResult<(Config, Arc<dyn RecordStore>)> {
        let config = ConfigManager::load()?;
        ConfigManager::validate_config(&config)?;
        let token = ConfigManager::resolve_token(&config).unwrap_or_default();
        let store = HttpRecordStore::new(&config.api, token)?;
        Ok((config, Arc::new(store)))
    }

    /// The CLI flag overrides the configured severity ceiling; without
    /// it the `[remediation] max_auto_severity` setting applies.
    fn resolve_max_severity(flag: Option<&str>, config: &RemediationConfig) -> HerovaultResult<Severity> {
        match flag {
            Some(raw) => raw.parse(),
            None => Ok(config.max_auto_severity),
        }
    }

    /// Parse one 'field=value' edit. The value is taken as JSON when it
    /// parses as such ('42', 'true', '[1,2]'), otherwise as a string.
    fn parse_assignment(input: &str) -> HerovaultResult<(String, Value)> {
        let (field, raw_value) = input.split_once('=').ok_or_else(|| {
            HerovaultError::user_input_error(input, "field=value", "Example: level=42 or name=\"Molly\"")
        })?;

        let field = field.trim();
        if field.is_empty() {
            return Err(HerovaultError::user_input_error(input, "a non-empty field name", "Example: level=42"));
        }

        let raw_value = raw_value.trim();
        let value = serde_json::from_str(raw_value)
            .unwrap_or_else(|_| Value::String(raw_value.to_string()));
        Ok((field.to_string(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assignments_parse_json_values() {
        assert_eq!(CommandRunner::parse_assignment("level=42").unwrap(), ("level".to_string(), json!(42)));
        assert_eq!(CommandRunner::parse_assignment("ascended=true").unwrap(), ("ascended".to_string(), json!(true)));
        assert_eq!(
            CommandRunner::parse_assignment("gear=[1,2,3]").unwrap(),
            ("gear".to_string(), json!([1, 2, 3]))
        );
    }

    #[test]
    fn bare_words_fall_back_to_strings() {
        assert_eq!(
            CommandRunner::parse_assignment("name=Molly Rogers").unwrap(),
            ("name".to_string(), json!("Molly Rogers"))
        );
    }

    #[test]
    fn missing_equals_is_rejected() {
        assert!(CommandRunner::parse_assignment("level").is_err());
        assert!(CommandRunner::parse_assignment("=42").is_err());
    }

    #[test]
    fn severity_flag_overrides_the_configured_ceiling() {
        let config = RemediationConfig { max_auto_severity: Severity::Low, refresh_after_batch: true };
        let resolved = CommandRunner::resolve_max_severity(Some("critical"), &config).unwrap();
        assert_eq!(resolved, Severity::Critical);
    }

    #[test]
    fn severity_falls_back_to_the_config_without_a_flag() {
        let config = RemediationConfig { max_auto_severity: Severity::Low, refresh_after_batch: true };
        let resolved = CommandRunner::resolve_max_severity(None, &config).unwrap();
        assert_eq!(resolved, Severity::Low);
    }

    #[test]
    fn unknown_severity_flag_is_rejected() {
        let config = RemediationConfig::default();
        assert!(CommandRunner::resolve_max_severity(Some("urgent"), &config).is_err());
    }
}
