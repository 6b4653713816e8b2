use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::models::LogMetadata;

pub mod fan_out;
pub mod file;
pub mod tracing_sink;

pub use fan_out::FanOutSink;
pub use file::JsonFileSink;
pub use tracing_sink::TracingSink;

#[automock]
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Record a client event at the severity named by `level`
    async fn log_at_level(
        &self,
        level: &str,
        message: &str,
        metadata: &LogMetadata,
    ) -> anyhow::Result<()>;

    /// Record a failure together with its full cause chain
    async fn log_error(&self, message: &str, error: &anyhow::Error);
}

pub type SinkRef = Arc<dyn LogSink + Send + Sync>;
