//! Data URL payloads
//!
//! Decodes `<header>,<base64>` strings as produced by `canvas.toDataURL()`.

use base64::Engine;
use base64::alphabet;
use base64::engine::DecodePaddingMode;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};

use crate::error::CodecError;

/// Standard alphabet, padding optional, matching what browsers' `atob` accepts.
const PAYLOAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Discards the header and base64-decodes the payload.
///
/// ASCII whitespace inside the payload is ignored and padding is optional.
/// Fails without producing partial output when the separator is missing or
/// the payload contains symbols outside the base64 alphabet.
pub fn decode(content: &str) -> Result<Vec<u8>, CodecError> {
    let Some((_header, payload)) = content.split_once(',') else {
        return Err(CodecError::encode("dataURL", "missing ',' after data URL header"));
    };
    let payload: Vec<u8> = payload
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    PAYLOAD
        .decode(&payload)
        .map_err(|e| CodecError::encode("dataURL", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_png_header_payload() {
        let bytes = decode("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(bytes, vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[test]
    fn empty_payload_is_empty_file() {
        assert_eq!(decode("data:application/octet-stream;base64,").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn padding_is_optional() {
        assert_eq!(decode("data:text/plain;base64,aGVsbG8").unwrap(), b"hello");
        assert_eq!(decode("data:text/plain;base64,aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn whitespace_in_payload_is_ignored() {
        assert_eq!(decode("data:text/plain;base64,aGVs\nbG8=").unwrap(), b"hello");
        assert_eq!(decode("data:text/plain;base64, aGVs\r\n\tbG8 ").unwrap(), b"hello");
    }

    #[test]
    fn rejects_missing_separator() {
        let err = decode("aGVsbG8=").unwrap_err();
        assert!(err.is_client_fault());
    }

    #[test]
    fn rejects_malformed_base64() {
        assert!(decode("data:image/png;base64,@@notbase64@@").is_err());
        assert!(decode("data:image/png;base64,aGVsb").is_err());
    }
}
