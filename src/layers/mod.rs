pub mod log_repo;
pub mod log_sink;
