use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{instrument, warn};

use super::LogRepository;

pub struct FileLogRepo(PathBuf);

impl FileLogRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

#[async_trait]
impl LogRepository for FileLogRepo {
    #[instrument(name = "file_log_repo.read_all", skip(self))]
    async fn read_all(&self) -> anyhow::Result<Vec<Value>> {
        // Invalid UTF-8 only spoils the line it appears on
        let bytes = tokio::fs::read(&self.0).await?;
        let content = String::from_utf8_lossy(&bytes);

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| match serde_json::from_str::<Value>(line) {
                Ok(record) => Some(record),
                Err(_) => {
                    warn!(msg = "Failed to parse log line", %line);
                    None
                }
            })
            .collect())
    }
}
