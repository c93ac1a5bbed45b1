//! Publish identifier extraction from inbound notifications.

use crate::error::{ProtocolError, ProtocolResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Identifier of the publish that produced an inbound notification.
///
/// Inbound payloads carry it at `data.pusher.publishId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublishId(String);

impl PublishId {
    /// Wraps an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Extracts the publish identifier from an inbound notification payload.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MissingField`] if the path is absent, the
    /// value is not a string, or the string is empty.
    pub fn from_payload(payload: &Value) -> ProtocolResult<Self> {
        payload
            .get("data")
            .and_then(|data| data.get("pusher"))
            .and_then(|pusher| pusher.get("publishId"))
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(Self::new)
            .ok_or(ProtocolError::MissingField("publishId"))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
