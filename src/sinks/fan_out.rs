use async_trait::async_trait;
use tracing::warn;

use crate::models::LogMetadata;

use super::{LogSink, SinkRef};

/// Records every event in a primary sink and, once that has succeeded,
/// copies it to the mirrors. Only the primary decides whether an event was
/// recorded: a primary failure reaches no mirror, and a mirror failure is
/// warned about and otherwise ignored.
pub struct FanOutSink {
    primary: SinkRef,
    mirrors: Vec<SinkRef>,
}

impl FanOutSink {
    pub fn new(primary: SinkRef, mirrors: Vec<SinkRef>) -> Self {
        Self { primary, mirrors }
    }
}

#[async_trait]
impl LogSink for FanOutSink {
    async fn log_at_level(
        &self,
        level: &str,
        message: &str,
        metadata: &LogMetadata,
    ) -> anyhow::Result<()> {
        self.primary.log_at_level(level, message, metadata).await?;

        for mirror in &self.mirrors {
            if let Err(err) = mirror.log_at_level(level, message, metadata).await {
                warn!(msg = "Failed to mirror log event", error = ?err);
            }
        }

        Ok(())
    }

    async fn log_error(&self, message: &str, err: &anyhow::Error) {
        self.primary.log_error(message, err).await;

        for mirror in &self.mirrors {
            mirror.log_error(message, err).await;
        }
    }
}
