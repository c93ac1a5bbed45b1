//! Error types for the sync engine.

use pushlink_protocol::ProtocolError;
use pushlink_store::StoreError;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Reasons an operation was abandoned without a usable exchange.
///
/// Transport failures and remote rejections are not errors at this layer;
/// they surface as a completed exchange whose status is not successful.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Registration was attempted with an empty device token.
    #[error("device token is empty")]
    EmptyToken,

    /// The request payload could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(#[source] ProtocolError),

    /// The success payload did not match the expected schema.
    #[error("failed to decode response: {0}")]
    Decode(#[source] ProtocolError),

    /// The inbound notification carried no publish identifier.
    #[error("notification payload has no publish id")]
    MissingPublishId,

    /// The metadata store could not be read or written.
    #[error("metadata store error: {0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_conversion() {
        let err: SyncError = StoreError::Corrupted("bad".into()).into();
        assert!(matches!(err, SyncError::Store(_)));
        assert_eq!(err.to_string(), "metadata store error: store corrupted: bad");
    }

    #[test]
    fn error_display() {
        let err = SyncError::MissingPublishId;
        assert_eq!(err.to_string(), "notification payload has no publish id");

        let err = SyncError::Decode(ProtocolError::MissingField("id"));
        assert_eq!(err.to_string(), "failed to decode response: missing field: id");
    }
}
