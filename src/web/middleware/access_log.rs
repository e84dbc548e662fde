//! Access logging middleware.
//!
//! Tags each request with a fresh id (echoed as `X-Request-Id`) and logs
//! method, path, status and latency once the handler has answered.
//! Query strings are left out of the log.

use std::time::Instant;

use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn log_access(req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let request_id = Uuid::new_v4();
    let started = Instant::now();

    let mut response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    if status >= 500 {
        tracing::warn!(%request_id, %method, path = %path, status, elapsed_ms, "Request failed");
    } else {
        tracing::info!(%request_id, %method, path = %path, status, elapsed_ms, "Request served");
    }

    if let Ok(val) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, val);
    }
    response
}
