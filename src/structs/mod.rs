pub mod cli;
pub mod config;
pub mod fix_attempt;
pub mod fix_outcome;
pub mod hero_record;
pub mod pending_change_set;
pub mod remediation_report;
pub mod remediation_target;
