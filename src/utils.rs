use axum::http::{Extensions, HeaderMap, HeaderName};
use tower_http::request_id::RequestId;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The request id set by `SetRequestIdLayer`, or an empty string.
pub fn get_request_id(extensions: &Extensions) -> String {
    extensions
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub fn get_optional_header(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}

/// `name: value` pairs joined by `; `, sensitive values masked and the
/// request id left out (it is logged separately).
pub fn describe_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .filter(|(k, _)| k.as_str() != REQUEST_ID_HEADER)
        .map(|(k, v)| {
            let val = if v.is_sensitive() {
                "******"
            } else {
                v.to_str().unwrap_or("<non-utf8>")
            };
            format!("{}: {}", k.as_str(), val)
        })
        .collect::<Vec<_>>()
        .join("; ")
}
