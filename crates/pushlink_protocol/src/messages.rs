//! Request and response payloads exchanged with the notification service.

use crate::error::ProtocolResult;
use crate::identity::{DeviceId, DeviceToken};
use crate::metadata::MetadataSnapshot;
use crate::publish::PublishId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// JSON encoding shared by every wire payload.
pub trait WirePayload: Serialize + DeserializeOwned {
    /// Encodes self to JSON bytes.
    fn encode(&self) -> ProtocolResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decodes self from JSON bytes.
    fn decode(bytes: &[u8]) -> ProtocolResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Device registration body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Hex-encoded device token.
    pub token: String,
    /// Application instance the device belongs to.
    pub instance_id: String,
    /// Host application's bundle/package identifier, empty if unknown.
    pub bundle_identifier: String,
    /// Metadata snapshot computed at registration time.
    pub metadata: MetadataSnapshot,
}

impl RegisterRequest {
    /// Creates a registration body, hex-encoding the token.
    pub fn new(
        token: &DeviceToken,
        instance_id: impl Into<String>,
        bundle_identifier: impl Into<String>,
        metadata: MetadataSnapshot,
    ) -> Self {
        Self {
            token: token.to_hex(),
            instance_id: instance_id.into(),
            bundle_identifier: bundle_identifier.into(),
            metadata,
        }
    }
}

impl WirePayload for RegisterRequest {}

/// Successful registration response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceResponse {
    /// Identity assigned to the device.
    pub id: DeviceId,
}

impl WirePayload for DeviceResponse {}

/// Rejection reason returned with a non-200 status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reason {
    /// Short machine-oriented error name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Human readable description.
    pub description: String,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            Some(error) => write!(f, "{}: {}", error, self.description),
            None => f.write_str(&self.description),
        }
    }
}

impl WirePayload for Reason {}

/// Full replacement of the device's interest set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterestsRequest {
    /// Topic names; empty clears every interest.
    pub interests: Vec<String>,
}

impl InterestsRequest {
    /// Creates a request replacing the interest set with `interests`.
    pub fn new(interests: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            interests: interests.into_iter().map(Into::into).collect(),
        }
    }
}

impl WirePayload for InterestsRequest {}

/// Analytics event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// The notification reached the device.
    Delivery,
    /// The user opened the notification.
    Open,
}

impl EventType {
    /// Returns the wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Delivery => "Delivery",
            EventType::Open => "Open",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analytics event body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    /// Publish the event refers to.
    pub publish_id: PublishId,
    /// Seconds since the Unix epoch at send time.
    pub timestamp_secs: u64,
    /// Event kind.
    pub event_type: EventType,
    /// Device that observed the event.
    pub device_id: String,
}

impl WirePayload for TrackRequest {}
