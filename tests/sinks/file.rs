use anyhow::anyhow;
use log_ingest_server::{
    models::LogMetadata,
    sinks::{JsonFileSink, LogSink},
};
use serde_json::{Value, json};

fn read_lines(path: &std::path::Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn success_appends_one_line_per_event() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("combined.log");
    let sink = JsonFileSink::open(&path).await.unwrap();

    sink.log_at_level(
        "warn",
        "disk low",
        &LogMetadata {
            details: Some(json!({ "pct": 5 })),
            timestamp: "2024-01-01T00:00:00".to_string(),
        },
    )
    .await
    .unwrap();
    sink.log_at_level(
        "info",
        "",
        &LogMetadata {
            details: None,
            timestamp: "2024-01-01T00:00:01Z".to_string(),
        },
    )
    .await
    .unwrap();

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        json!({
            "level": "warn",
            "message": "disk low",
            "details": { "pct": 5 },
            "timestamp": "2024-01-01T00:00:00"
        })
    );
    assert!(lines[1]["details"].is_null());
}

#[tokio::test]
async fn success_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("logs").join("combined.log");

    let sink = JsonFileSink::open(&path).await.unwrap();

    assert!(path.exists());
    assert_eq!(sink.path(), path.as_path());
}

#[tokio::test]
async fn success_reopen_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("combined.log");
    let metadata = LogMetadata {
        details: None,
        timestamp: "2024-01-01T00:00:00Z".to_string(),
    };

    JsonFileSink::open(&path)
        .await
        .unwrap()
        .log_at_level("info", "first", &metadata)
        .await
        .unwrap();
    JsonFileSink::open(&path)
        .await
        .unwrap()
        .log_at_level("info", "second", &metadata)
        .await
        .unwrap();

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["message"], "second");
}

#[tokio::test]
async fn success_log_error_records_cause_chain() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("combined.log");
    let sink = JsonFileSink::open(&path).await.unwrap();

    let err = anyhow!("connection reset").context("writing to log sink");
    sink.log_error("Failed to record log", &err).await;

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["level"], "error");
    assert_eq!(lines[0]["message"], "Failed to record log");
    assert_eq!(
        lines[0]["details"],
        "writing to log sink: connection reset"
    );
    assert!(lines[0]["timestamp"].as_str().unwrap().ends_with('Z'));
}
