use async_trait::async_trait;
use tracing::{debug, error, info, trace, warn};

use crate::models::{LogMetadata, Severity};

use super::LogSink;

/// Forwards client events into the service's own `tracing` output.
#[derive(Debug, Default, Clone)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

macro_rules! emit {
    ($mac:ident, $level:expr, $message:expr, $details:expr, $timestamp:expr) => {
        $mac!(
            msg = %$message,
            source = "client",
            client_level = %$level,
            details = %$details,
            timestamp = %$timestamp
        )
    };
}

#[async_trait]
impl LogSink for TracingSink {
    async fn log_at_level(
        &self,
        level: &str,
        message: &str,
        metadata: &LogMetadata,
    ) -> anyhow::Result<()> {
        let details = metadata
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "null".to_string());
        let timestamp = &metadata.timestamp;

        match Severity::from_label(level).unwrap_or(Severity::Info) {
            Severity::Trace => emit!(trace, level, message, details, timestamp),
            Severity::Debug => emit!(debug, level, message, details, timestamp),
            Severity::Info => emit!(info, level, message, details, timestamp),
            Severity::Warn => emit!(warn, level, message, details, timestamp),
            Severity::Error => emit!(error, level, message, details, timestamp),
        }

        Ok(())
    }

    async fn log_error(&self, message: &str, err: &anyhow::Error) {
        error!(msg = %message, error = ?err);
    }
}
