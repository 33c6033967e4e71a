//! services/api/src/web/middleware.rs
//!
//! Request logging middleware.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, warn};

/// Emits one log event per request with its method, route, status and latency.
/// Client errors log at WARN and server errors at ERROR.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let response = next.run(req).await;
    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis();

    match status {
        500..=599 => error!(%method, %path, status, latency_ms, "Server error"),
        400..=499 => warn!(%method, %path, status, latency_ms, "Client error"),
        _ => info!(%method, %path, status, latency_ms, "Request completed"),
    }
    response
}
