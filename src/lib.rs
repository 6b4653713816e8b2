pub mod app;
pub mod config;
pub mod handlers;
pub mod layers;
pub mod models;
pub mod repositories;
pub mod sinks;
pub mod utils;
