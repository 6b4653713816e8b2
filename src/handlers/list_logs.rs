use std::io::{self, ErrorKind};

use axum::{Extension, Json, extract::Query, http::StatusCode};
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::{
    models::{ErrorBody, LogQuery},
    repositories::log::LogRepo,
};

type ListError = (StatusCode, Json<ErrorBody>);

#[instrument(name = "handlers.list_logs", skip_all)]
pub async fn list_logs_handler(
    Extension(log_repo): Extension<LogRepo>,
    Query(query): Query<LogQuery>,
) -> Result<Json<Vec<Value>>, ListError> {
    let records = log_repo.read_all().await.map_err(read_failure)?;
    let total = records.len();

    let logs: Vec<Value> = records
        .into_iter()
        .filter(|record| query.matches(record))
        .collect();

    info!(
        msg = "Listed logs",
        level = ?query.level,
        start_date = ?query.start_date,
        end_date = ?query.end_date,
        total,
        returned = logs.len()
    );

    Ok(Json(logs))
}

fn read_failure(err: anyhow::Error) -> ListError {
    match err.downcast_ref::<io::Error>().map(io::Error::kind) {
        Some(ErrorKind::NotFound) => {
            error!(msg = "Log file not found", error = %err);
            (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: "Log file not found",
                    details: None,
                }),
            )
        }
        Some(ErrorKind::PermissionDenied) => {
            error!(msg = "No permission to read log file", error = %err);
            (
                StatusCode::FORBIDDEN,
                Json(ErrorBody {
                    error: "No permission to read log file",
                    details: None,
                }),
            )
        }
        _ => {
            error!(msg = "Error fetching logs", error = ?err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Failed to fetch logs",
                    details: Some(format!("{err:#}")),
                }),
            )
        }
    }
}
