use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime,
    format_description::well_known::{Iso8601, Rfc3339},
    macros::format_description,
};

pub const DEFAULT_LEVEL: &str = "info";

/// Body of `POST /api/logs`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct LogEventPayload {
    pub level: Option<String>,
    pub message: Option<String>,
    pub details: Option<Value>,
    pub timestamp: Option<String>,
}

/// A client event with defaults applied, ready for a sink.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    pub level: String,
    pub message: String,
    pub metadata: LogMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogMetadata {
    pub details: Option<Value>,
    pub timestamp: String,
}

impl LogEvent {
    pub fn from_payload(payload: LogEventPayload, now: OffsetDateTime) -> anyhow::Result<Self> {
        let timestamp = match payload.timestamp {
            Some(ts) => ts,
            None => now.format(&Rfc3339)?,
        };

        Ok(Self {
            level: payload.level.unwrap_or_else(|| DEFAULT_LEVEL.to_string()),
            message: payload.message.unwrap_or_default(),
            metadata: LogMetadata {
                details: payload.details,
                timestamp,
            },
        })
    }
}

/// One line of the combined log file.
#[derive(Debug, Serialize)]
pub struct StoredRecord<'a> {
    pub level: &'a str,
    pub message: &'a str,
    pub details: &'a Option<Value>,
    pub timestamp: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Case-insensitive. `None` for labels that name no known severity.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" | "fatal" | "critical" => Some(Self::Error),
            _ => None,
        }
    }
}

#[derive(Serialize)]
pub struct IngestAck {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Query string of `GET /api/logs`.
#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    pub level: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

impl LogQuery {
    pub fn matches(&self, record: &Value) -> bool {
        if let Some(level) = &self.level {
            if record.get("level").and_then(Value::as_str) != Some(level.as_str()) {
                return false;
            }
        }

        if let (Some(start), Some(end)) = (&self.start_date, &self.end_date) {
            let bounds = parse_instant(start).zip(parse_instant(end));
            let at = record
                .get("timestamp")
                .and_then(Value::as_str)
                .and_then(parse_instant);

            // Unparseable bounds or timestamps never exclude a record.
            if let (Some((start, end)), Some(at)) = (bounds, at) {
                if at < start || at > end {
                    return false;
                }
            }
        }

        true
    }
}

/// Accepts RFC 3339, ISO 8601 without an offset (read as UTC) and plain
/// `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_instant(value: &str) -> Option<OffsetDateTime> {
    if let Ok(at) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(at);
    }
    if let Ok(at) = PrimitiveDateTime::parse(value, &Iso8601::DEFAULT) {
        return Some(at.assume_utc());
    }
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}
