pub mod api_config;
pub mod config;
pub mod remediation_config;
pub mod sync_config;
