pub mod save_status_logger;
