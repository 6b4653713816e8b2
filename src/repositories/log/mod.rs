use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;

pub mod file;
pub use file::FileLogRepo;

#[automock]
#[async_trait]
pub trait LogRepository: Send + Sync {
    /// Every parseable record, in the order it was written.
    ///
    /// Errors from the underlying store keep their `std::io::Error` so
    /// callers can tell a missing store from an unreadable one.
    async fn read_all(&self) -> anyhow::Result<Vec<Value>>;
}

pub type LogRepo = std::sync::Arc<dyn LogRepository + Send + Sync>;
