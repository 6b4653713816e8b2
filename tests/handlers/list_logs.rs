use std::{
    io::{self, ErrorKind},
    sync::Arc,
};

use anyhow::anyhow;
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use log_ingest_server::{
    app::App, layers::log_repo::LogRepoLayer, repositories::log::MockLogRepository,
};
use serde_json::{Value, json};
use tower::ServiceExt;

fn records() -> Vec<Value> {
    vec![
        json!({ "level": "info", "message": "Test log 1", "timestamp": "2024-01-01T10:00:00.000Z" }),
        json!({ "level": "error", "message": "Test error", "timestamp": "2024-01-01T11:00:00.000Z" }),
        json!({ "level": "debug", "message": "Test debug", "timestamp": "2024-02-05T12:00:00.000Z" }),
    ]
}

fn repo_with_records() -> MockLogRepository {
    let mut mock_repo = MockLogRepository::new();
    mock_repo
        .expect_read_all()
        .times(1)
        .returning(|| Ok(records()));
    mock_repo
}

async fn get(mock_repo: MockLogRepository, uri: &str) -> (StatusCode, Value) {
    let response = App::new()
        .router()
        .layer(LogRepoLayer(Arc::new(mock_repo)))
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    (status, json)
}

fn messages(json: &Value) -> Vec<&str> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|record| record["message"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn success_all() {
    let (status, json) = get(repo_with_records(), "/api/logs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        messages(&json),
        vec!["Test log 1", "Test error", "Test debug"]
    );
}

#[tokio::test]
async fn success_filter_by_level() {
    let (status, json) = get(repo_with_records(), "/api/logs?level=error").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(messages(&json), vec!["Test error"]);
}

#[tokio::test]
async fn success_filter_by_date_range() {
    let (status, json) = get(
        repo_with_records(),
        "/api/logs?startDate=2024-01-01&endDate=2024-01-31",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(messages(&json), vec!["Test log 1", "Test error"]);
}

#[tokio::test]
async fn success_start_date_alone_does_not_filter() {
    let (status, json) = get(repo_with_records(), "/api/logs?startDate=2024-02-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn success_level_and_date_range_combined() {
    let (status, json) = get(
        repo_with_records(),
        "/api/logs?level=debug&startDate=2024-01-01&endDate=2024-01-31",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn error_not_found() {
    let mut mock_repo = MockLogRepository::new();
    mock_repo
        .expect_read_all()
        .times(1)
        .returning(|| Err(io::Error::from(ErrorKind::NotFound).into()));

    let (status, json) = get(mock_repo, "/api/logs").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "error": "Log file not found" }));
}

#[tokio::test]
async fn error_permission_denied() {
    let mut mock_repo = MockLogRepository::new();
    mock_repo
        .expect_read_all()
        .times(1)
        .returning(|| Err(io::Error::from(ErrorKind::PermissionDenied).into()));

    let (status, json) = get(mock_repo, "/api/logs").await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], "No permission to read log file");
}

#[tokio::test]
async fn error_other() {
    let mut mock_repo = MockLogRepository::new();
    mock_repo
        .expect_read_all()
        .times(1)
        .returning(|| Err(anyhow!("disk on fire")));

    let (status, json) = get(mock_repo, "/api/logs").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to fetch logs");
    assert_eq!(json["details"], "disk on fire");
}
