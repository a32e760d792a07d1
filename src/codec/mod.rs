//! Content codecs
//!
//! Converts between what callers send or receive and what is stored on disk,
//! according to the per-request format tag.

pub mod data_url;
pub mod yaml;

use serde::Deserialize;
use serde_json::Value;

use crate::error::CodecError;
use crate::protocol::responses::{CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT};

pub use yaml::YamlStyle;

/// How a read request wants the file content interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// How a write request's content should be turned into file bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteFormat {
    #[default]
    Text,
    Json,
    Yaml,
    #[serde(rename = "dataURL")]
    DataUrl,
}

impl ReadFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadFormat::Text => "text",
            ReadFormat::Json => "json",
            ReadFormat::Yaml => "yaml",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ReadFormat::Text => CONTENT_TYPE_TEXT,
            ReadFormat::Json | ReadFormat::Yaml => CONTENT_TYPE_JSON,
        }
    }
}

impl WriteFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteFormat::Text => "text",
            WriteFormat::Json => "json",
            WriteFormat::Yaml => "yaml",
            WriteFormat::DataUrl => "dataURL",
        }
    }
}

/// File content ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoded {
    Text(String),
    Binary(Vec<u8>),
}

impl Encoded {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Encoded::Text(text) => text.as_bytes(),
            Encoded::Binary(bytes) => bytes,
        }
    }
}

/// Transforms on-disk text into the response body for `format`.
pub fn decode_for_read(format: ReadFormat, content: &str) -> Result<String, CodecError> {
    match format {
        ReadFormat::Text => Ok(content.to_string()),
        ReadFormat::Json => {
            let value: Value =
                serde_json::from_str(content).map_err(|e| CodecError::decode("json", e))?;
            serde_json::to_string(&value).map_err(|e| CodecError::decode("json", e))
        }
        ReadFormat::Yaml => {
            let value = yaml::parse_to_json(content)?;
            serde_json::to_string(&value).map_err(|e| CodecError::decode("yaml", e))
        }
    }
}

/// Transforms caller content into the bytes persisted for `format`.
pub fn encode_for_write(format: WriteFormat, content: &Value) -> Result<Encoded, CodecError> {
    match (format, content) {
        (WriteFormat::Text, Value::String(text)) => Ok(Encoded::Text(text.clone())),
        (WriteFormat::Text, _) => Err(CodecError::encode("text", "content must be a string")),
        (WriteFormat::Json, Value::String(text)) => Ok(Encoded::Text(text.clone())),
        (WriteFormat::Json, value) => serde_json::to_string_pretty(value)
            .map(Encoded::Text)
            .map_err(|e| CodecError::encode("json", e)),
        (WriteFormat::Yaml, value) => {
            yaml::to_yaml_string(value, &YamlStyle::default()).map(Encoded::Text)
        }
        (WriteFormat::DataUrl, Value::String(url)) => data_url::decode(url).map(Encoded::Binary),
        (WriteFormat::DataUrl, _) => Err(CodecError::encode(
            "dataURL",
            "content must be a data URL string",
        )),
    }
}
