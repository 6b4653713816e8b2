use std::time::Duration;

use axum::{
    Router,
    body::Body,
    extract::{DefaultBodyLimit, Request},
    http::{Response, header},
    routing::get,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
    trace::TraceLayer,
};
use tracing::{Span, info};

use crate::{
    handlers::{health_handler, ingest_log_handler, list_logs_handler},
    utils::{describe_headers, get_request_id},
};

pub struct App;

impl App {
    pub fn new() -> Self {
        Self
    }

    /// All routes with request-id, tracing and CORS middleware. The sink and
    /// repository are supplied by the caller through `LogSinkLayer` and
    /// `LogRepoLayer`.
    pub fn router(self) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route(
                "/api/logs",
                get(list_logs_handler)
                    .post(ingest_log_handler)
                    // Client events have no size cap
                    .layer(DefaultBodyLimit::disable()),
            )
            .layer(CorsLayer::permissive())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(
                TraceLayer::new_for_http()
                    .on_request(|req: &Request<Body>, _span: &Span| {
                        info!(
                            msg = "Request initiated",
                            req_id = %get_request_id(req.extensions()),
                            method = %req.method(),
                            uri = %req.uri(),
                            headers = %describe_headers(req.headers())
                        )
                    })
                    .on_response(|res: &Response<Body>, latency: Duration, _span: &Span| {
                        info!(
                            msg = "Request processed",
                            req_id = %get_request_id(res.extensions()),
                            status = %res.status().as_u16(),
                            latency = ?latency
                        )
                    }),
            )
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(SetSensitiveRequestHeadersLayer::new([
                header::AUTHORIZATION,
                header::COOKIE,
            ]))
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
