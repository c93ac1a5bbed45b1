//! Error types for protocol encoding and decoding.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while encoding or decoding wire payloads.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The payload could not be serialized or did not match the schema.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field was absent or had the wrong type.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A hex string could not be parsed.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

impl ProtocolError {
    /// Returns true if the error came from a missing payload field.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, ProtocolError::MissingField(_))
    }
}
