//! Response body decoder port

use serde_json::Value as Json;
use thiserror::Error;

/// A body could not be decoded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct DecodeError(pub String);

/// Port for decoding response bodies into structured data for `Data.*`
/// assertions.
pub trait BodyDecoder: Send + Sync {
    /// Decodes a body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not in the expected format.
    fn decode(&self, body: &[u8]) -> Result<Json, DecodeError>;
}

/// Decodes bodies as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBodyDecoder;

impl BodyDecoder for JsonBodyDecoder {
    fn decode(&self, body: &[u8]) -> Result<Json, DecodeError> {
        serde_json::from_slice(body).map_err(|e| DecodeError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decode_json() {
        let decoded = JsonBodyDecoder.decode(br#"{"id": 1}"#);
        assert_eq!(decoded, Ok(json!({"id": 1})));
    }

    #[test]
    fn test_decode_error() {
        assert!(JsonBodyDecoder.decode(b"Hello silk.").is_err());
    }
}
