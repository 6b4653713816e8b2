use axum::{http::StatusCode, response::IntoResponse};

/// GET /health
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
