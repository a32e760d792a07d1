//! HTTP routes
//!
//! Axum handlers for the list, read and write endpoints. Each handler parses
//! its JSON body, runs the blocking filesystem work off the async runtime and
//! converts any `ApiError` into a status code plus `{ "message": ... }` body.

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use std::io;
use std::sync::Arc;

use crate::error::ApiError;
use crate::error::handlers::{handle_error, status_code};
use crate::middleware::{log_operation, log_requests};
use crate::protocol::{
    ErrorBody, ListFilesRequest, ReadFileRequest, WriteFileRequest, parse_request,
};
use crate::storage::{DiskReader, Sandbox, list_files, read_file, write_file};

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub sandbox: Arc<Sandbox>,
}

/// Builds the API router over `sandbox`.
pub fn router(sandbox: Arc<Sandbox>) -> Router {
    Router::new()
        .route("/api/health", get(|| async { "ok" }))
        .route("/api/list-files", post(list_files_handler))
        .route("/api/read-file", post(read_file_handler))
        .route("/api/write-file", post(write_file_handler))
        .fallback(unknown_route)
        .method_not_allowed_fallback(method_not_allowed)
        // data URL writes routinely exceed axum's 2 MB default
        .layer(DefaultBodyLimit::disable())
        .layer(middleware::from_fn(log_requests))
        .with_state(AppState { sandbox })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(status_code(&self)).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        error_body(status, &self.public_message())
    }
}

async fn unknown_route() -> Response {
    error_body(StatusCode::NOT_FOUND, "Unknown API route")
}

async fn method_not_allowed() -> Response {
    error_body(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

fn error_body(status: StatusCode, message: &str) -> Response {
    let body = ErrorBody {
        message: message.to_string(),
    };
    (status, Json(body)).into_response()
}

async fn list_files_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let result = async {
        let request: ListFilesRequest = parse_request(&body)?;
        log_operation("list-files", &request.path);
        run_blocking(move || list_files(&state.sandbox, &DiskReader, &request)).await
    }
    .await;

    respond("list-files", result, |listing| Json(listing).into_response())
}

async fn read_file_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let result = async {
        let request: ReadFileRequest = parse_request(&body)?;
        log_operation("read-file", &request.path);
        run_blocking(move || read_file(&state.sandbox, &request)).await
    }
    .await;

    respond("read-file", result, |file| {
        ([(header::CONTENT_TYPE, file.content_type)], file.body).into_response()
    })
}

async fn write_file_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let result = async {
        let request: WriteFileRequest = parse_request(&body)?;
        log_operation("write-file", &request.path);
        run_blocking(move || write_file(&state.sandbox, &request)).await
    }
    .await;

    respond("write-file", result, |saved| Json(saved).into_response())
}

/// Runs filesystem work on the blocking pool.
async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Io(io::Error::other(e)))?
}

fn respond<T>(operation: &str, result: Result<T, ApiError>, ok: impl FnOnce(T) -> Response) -> Response {
    match result {
        Ok(value) => ok(value),
        Err(err) => {
            handle_error(operation, &err);
            err.into_response()
        }
    }
}
