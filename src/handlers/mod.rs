pub mod health;
pub mod ingest_log;
pub mod list_logs;

pub use health::health_handler;
pub use ingest_log::ingest_log_handler;
pub use list_logs::list_logs_handler;
