//! Logging middleware
//!
//! Provides request logging functionality.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use log::{info, warn};
use std::time::Instant;

/// Logs method, URI, status and latency of every request.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed = started.elapsed();
    if status.is_server_error() || status.is_client_error() {
        warn!("{} {} -> {} ({:?})", method, uri, status.as_u16(), elapsed);
    } else {
        info!("{} {} -> {} ({:?})", method, uri, status.as_u16(), elapsed);
    }
    response
}

/// Log the logical path an API operation was asked to touch
pub fn log_operation(operation: &str, path: &str) {
    info!("{} requested for {:?}", operation, path);
}
