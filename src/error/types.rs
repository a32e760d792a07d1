//! Error types
//!
//! Defines the error taxonomy shared by the list, read and write handlers.

use std::fmt;
use std::io;

/// Codec errors, split by the direction the content was travelling.
#[derive(Debug)]
pub enum CodecError {
    /// On-disk content did not parse as the requested format.
    Decode { format: &'static str, detail: String },
    /// Caller-supplied content could not be encoded for disk.
    Encode { format: &'static str, detail: String },
}

impl CodecError {
    pub fn decode(format: &'static str, detail: impl fmt::Display) -> Self {
        CodecError::Decode {
            format,
            detail: detail.to_string(),
        }
    }

    pub fn encode(format: &'static str, detail: impl fmt::Display) -> Self {
        CodecError::Encode {
            format,
            detail: detail.to_string(),
        }
    }

    /// True when the caller sent content that does not match its declared format.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, CodecError::Encode { .. })
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Decode { format, detail } => {
                write!(f, "Failed to parse file as {}: {}", format, detail)
            }
            CodecError::Encode { format, detail } => {
                write!(f, "Invalid {} content: {}", format, detail)
            }
        }
    }
}

impl std::error::Error for CodecError {}

/// Errors returned by the filesystem API handlers
#[derive(Debug)]
pub enum ApiError {
    InvalidInput(String),
    PathRejected { path: String, reason: String },
    NotFound(String),
    NotADirectory(String),
    NotAFile(String),
    LimitExceeded(String),
    Codec(CodecError),
    Io(io::Error),
}

impl ApiError {
    pub fn path_rejected(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ApiError::PathRejected {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Short message safe to hand back to the caller.
    ///
    /// I/O failures are reduced to a generic message; the detail stays in the server log.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Io(e) if e.kind() == io::ErrorKind::NotFound => "File not found".to_string(),
            ApiError::Io(_) => "Internal filesystem error".to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidInput(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::PathRejected { reason, .. } => write!(f, "{}", reason),
            ApiError::NotFound(p) => write!(f, "Not found: {}", p),
            ApiError::NotADirectory(p) => write!(f, "Path is not a directory: {}", p),
            ApiError::NotAFile(p) => write!(f, "Path is not a file: {}", p),
            ApiError::LimitExceeded(msg) => write!(f, "Limit exceeded: {}", msg),
            ApiError::Codec(e) => write!(f, "{}", e),
            ApiError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Codec(e) => Some(e),
            ApiError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ApiError {
    fn from(error: io::Error) -> Self {
        ApiError::Io(error)
    }
}

impl From<CodecError> for ApiError {
    fn from(error: CodecError) -> Self {
        ApiError::Codec(error)
    }
}
