//! Error handlers
//!
//! Maps API errors to HTTP status codes and writes them to the server log.

use crate::error::types::ApiError;
use log::{error, warn};
use std::io;

pub const BAD_REQUEST: u16 = 400;
pub const NOT_FOUND: u16 = 404;
pub const INTERNAL_ERROR: u16 = 500;

/// Log an API error. Path rejections go to their own target since they
/// indicate either a caller bug or a hostile request.
pub fn handle_error(operation: &str, err: &ApiError) {
    match err {
        ApiError::PathRejected { path, reason } => {
            warn!(target: "path_rejected", "{} rejected {}: {}", operation, path, reason);
        }
        ApiError::Io(_) | ApiError::Codec(_) if status_code(err) >= INTERNAL_ERROR => {
            error!("{} failed: {}", operation, err);
        }
        _ => warn!("{} failed: {}", operation, err),
    }
}

/// Convert error to HTTP status code
pub fn status_code(err: &ApiError) -> u16 {
    match err {
        ApiError::InvalidInput(_) => BAD_REQUEST,
        ApiError::PathRejected { .. } => BAD_REQUEST,
        ApiError::NotFound(_) => NOT_FOUND,
        ApiError::NotADirectory(_) => BAD_REQUEST,
        ApiError::NotAFile(_) => BAD_REQUEST,
        ApiError::LimitExceeded(_) => BAD_REQUEST,
        ApiError::Codec(e) if e.is_client_fault() => BAD_REQUEST,
        ApiError::Codec(_) => INTERNAL_ERROR,
        ApiError::Io(e) if e.kind() == io::ErrorKind::NotFound => NOT_FOUND,
        ApiError::Io(_) => INTERNAL_ERROR,
    }
}
