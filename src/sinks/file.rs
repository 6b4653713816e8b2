use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tokio::{
    fs::{self, File, OpenOptions},
    io::AsyncWriteExt,
    sync::Mutex,
};
use tracing::{instrument, warn};

use crate::models::{LogMetadata, StoredRecord};

use super::LogSink;

/// Appends events to a JSON-lines file, one record per line.
pub struct JsonFileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonFileSink {
    pub async fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating log directory {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .with_context(|| format!("opening log file {}", path.display()))?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn append(&self, record: &StoredRecord<'_>) -> anyhow::Result<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let mut file = self.file.lock().await;
        file.write_all(&line)
            .await
            .with_context(|| format!("writing to {}", self.path.display()))?;
        file.flush().await?;

        Ok(())
    }
}

#[async_trait]
impl LogSink for JsonFileSink {
    #[instrument(name = "json_file_sink.log_at_level", skip(self, metadata))]
    async fn log_at_level(
        &self,
        level: &str,
        message: &str,
        metadata: &LogMetadata,
    ) -> anyhow::Result<()> {
        self.append(&StoredRecord {
            level,
            message,
            details: &metadata.details,
            timestamp: &metadata.timestamp,
        })
        .await
    }

    #[instrument(name = "json_file_sink.log_error", skip(self, err))]
    async fn log_error(&self, message: &str, err: &anyhow::Error) {
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();
        let details = Some(serde_json::Value::String(format!("{err:#}")));

        let result = self
            .append(&StoredRecord {
                level: "error",
                message,
                details: &details,
                timestamp: &timestamp,
            })
            .await;

        if let Err(write_err) = result {
            warn!(
                msg = "Failed to write error record",
                path = %self.path.display(),
                error = ?write_err
            );
        }
    }
}
