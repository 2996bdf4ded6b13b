pub mod commands;
pub mod save_status;
pub mod severity;
