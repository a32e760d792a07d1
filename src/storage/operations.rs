//! Storage operations
//!
//! Reads and writes single files under the sandbox, passing content through
//! the codec for the requested format.

use log::info;
use std::fs;
use std::io;

use crate::codec::{decode_for_read, encode_for_write};
use crate::error::{ApiError, CodecError};
use crate::protocol::responses::FILE_SAVED;
use crate::protocol::{ReadFileRequest, WriteFileRequest};
use crate::storage::results::{ReadFileResponse, WriteFileResponse};
use crate::storage::sandbox::Sandbox;
use crate::storage::validation::validate_write_path;

/// Loads a file as text and transforms it per the requested format.
///
/// Files that are not valid UTF-8 fail the read instead of being decoded
/// lossily, so a body never carries replacement characters.
pub fn read_file(sandbox: &Sandbox, request: &ReadFileRequest) -> Result<ReadFileResponse, ApiError> {
    let file_path = sandbox.resolve(&request.path)?;

    let metadata = match fs::metadata(&file_path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ApiError::NotFound(request.path.clone()));
        }
        Err(e) => return Err(e.into()),
    };
    if !metadata.is_file() {
        return Err(ApiError::NotAFile(request.path.clone()));
    }

    let content = match fs::read_to_string(&file_path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            return Err(CodecError::decode(request.format.as_str(), "file is not valid UTF-8").into());
        }
        Err(e) => return Err(e.into()),
    };
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let body = decode_for_read(request.format, content)?;

    info!(
        "Read {} (real: {}) as {}",
        request.path,
        file_path.display(),
        request.format.as_str()
    );

    Ok(ReadFileResponse {
        body,
        content_type: request.format.content_type(),
    })
}

/// Validates, encodes and writes a file, creating missing parent directories.
///
/// Existing files are overwritten. A failure part-way through the write is
/// not rolled back.
pub fn write_file(sandbox: &Sandbox, request: &WriteFileRequest) -> Result<WriteFileResponse, ApiError> {
    info!("Writing {}", request.path);

    let Some(content) = &request.content else {
        return Err(ApiError::InvalidInput("No content provided".into()));
    };

    let file_path = sandbox.resolve(&request.path)?;
    validate_write_path(&file_path)?;

    let encoded = encode_for_write(request.format, content)?;

    if file_path.is_dir() {
        return Err(ApiError::NotAFile(request.path.clone()));
    }
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, encoded.as_bytes())?;

    info!(
        "Saved {} (real: {}) - {} bytes as {}",
        request.path,
        file_path.display(),
        encoded.as_bytes().len(),
        request.format.as_str()
    );

    Ok(WriteFileResponse {
        message: FILE_SAVED.to_string(),
    })
}
