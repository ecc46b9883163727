use std::time::Instant;

use axum::body::HttpBody;
use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

/// Emits one `api_request` event per request with what was served and how
/// long it took. The query string carries user text and stays out of the
/// log.
pub async fn request_log(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        content_type = %content_type,
        bytes = response.body().size_hint().exact(),
        latency_ms = started.elapsed().as_millis() as u64,
        "api_request"
    );

    response
}
