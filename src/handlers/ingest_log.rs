use anyhow::{Context, anyhow, bail};
use axum::{
    Extension, Json,
    body::Bytes,
    extract::rejection::BytesRejection,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use time::OffsetDateTime;
use tracing::instrument;

use crate::{
    models::{ErrorBody, IngestAck, LogEvent, LogEventPayload},
    sinks::{LogSink, SinkRef},
    utils::get_optional_header,
};

pub const RECORDED_MESSAGE: &str = "Log recorded successfully";
pub const FAILURE_MESSAGE: &str = "Failed to record log";

/// Any failure while ingesting an event. Malformed input and sink errors
/// share this one category and the same response.
#[derive(Debug)]
pub struct IngestFailure(pub anyhow::Error);

impl IntoResponse for IngestFailure {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: FAILURE_MESSAGE,
                details: Some(format!("{:#}", self.0)),
            }),
        )
            .into_response()
    }
}

#[instrument(name = "handlers.ingest_log", skip_all)]
pub async fn ingest_log_handler(
    Extension(sink): Extension<SinkRef>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<IngestAck>, IngestFailure> {
    let result = match body {
        Ok(body) => ingest(sink.as_ref(), &headers, &body).await,
        Err(rejection) => Err(anyhow!("reading request body: {rejection}")),
    };

    match result {
        Ok(()) => Ok(Json(IngestAck {
            message: RECORDED_MESSAGE,
        })),
        Err(err) => {
            sink.log_error(FAILURE_MESSAGE, &err).await;
            Err(IngestFailure(err))
        }
    }
}

async fn ingest(sink: &dyn LogSink, headers: &HeaderMap, body: &[u8]) -> anyhow::Result<()> {
    let content_type = get_optional_header(headers, &CONTENT_TYPE).unwrap_or_default();
    if !is_json_content_type(&content_type) {
        bail!("unsupported content type {content_type:?}, expected application/json");
    }

    let value: Value = serde_json::from_slice(body).context("parsing request body")?;
    if !value.is_object() {
        bail!("request body must be a JSON object");
    }

    let payload: LogEventPayload =
        serde_json::from_value(value).context("reading log event fields")?;
    let event = LogEvent::from_payload(payload, OffsetDateTime::now_utc())?;

    sink.log_at_level(&event.level, &event.message, &event.metadata)
        .await
        .context("writing to log sink")
}

fn is_json_content_type(value: &str) -> bool {
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}
