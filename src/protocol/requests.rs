//! Request bodies
//!
//! JSON request shapes accepted by the list, read and write endpoints.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::codec::{ReadFormat, WriteFormat};
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct ListFilesRequest {
    pub path: String,
    #[serde(default)]
    pub recursive: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadFileRequest {
    pub path: String,
    #[serde(default)]
    pub format: ReadFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WriteFileRequest {
    pub path: String,
    /// `None` only when the field is absent; an explicit `null` is `Some(Value::Null)`.
    #[serde(default, deserialize_with = "present")]
    pub content: Option<Value>,
    #[serde(default)]
    pub format: WriteFormat,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Parses a JSON request body, reporting malformed input as `InvalidInput`.
pub fn parse_request<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidInput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_request_defaults_to_non_recursive() {
        let req: ListFilesRequest = parse_request(br#"{"path": "assets"}"#).unwrap();
        assert_eq!(req.path, "assets");
        assert_eq!(req.recursive, None);

        let req: ListFilesRequest = parse_request(br#"{"path": "", "recursive": true}"#).unwrap();
        assert_eq!(req.recursive, Some(true));
    }

    #[test]
    fn path_must_be_a_string() {
        assert!(matches!(
            parse_request::<ListFilesRequest>(br#"{"path": 3}"#),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_request::<ReadFileRequest>(br#"{}"#),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_request::<ReadFileRequest>(b"not json"),
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[test]
    fn read_format_defaults_to_text() {
        let req: ReadFileRequest = parse_request(br#"{"path": "a.txt"}"#).unwrap();
        assert_eq!(req.format, ReadFormat::Text);
    }

    #[test]
    fn write_content_distinguishes_absent_from_null_and_empty() {
        let absent: WriteFileRequest = parse_request(br#"{"path": "a.txt"}"#).unwrap();
        assert_eq!(absent.content, None);

        let null: WriteFileRequest = parse_request(br#"{"path": "a.txt", "content": null}"#).unwrap();
        assert_eq!(null.content, Some(Value::Null));

        let empty: WriteFileRequest = parse_request(br#"{"path": "a.txt", "content": ""}"#).unwrap();
        assert_eq!(empty.content, Some(Value::String(String::new())));
    }

    #[test]
    fn unknown_format_is_invalid_input() {
        assert!(matches!(
            parse_request::<WriteFileRequest>(br#"{"path": "a", "content": "", "format": "xml"}"#),
            Err(ApiError::InvalidInput(_))
        ));
    }
}
