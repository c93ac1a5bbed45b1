//! # Pushlink Protocol
//!
//! Wire payloads and the JSON codec used to talk to the remote
//! notification service.
//!
//! This crate provides:
//! - `DeviceToken` and `DeviceId` identity types
//! - `MetadataSnapshot`, the descriptive attributes compared across syncs
//! - Request/response payloads (Register, Device, Reason, Interests, Track)
//! - `PublishId` extraction from inbound notification payloads
//!
//! This is a pure protocol crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod identity;
mod messages;
mod metadata;
mod publish;

pub use error::{ProtocolError, ProtocolResult};
pub use identity::{DeviceId, DeviceToken};
pub use messages::{
    DeviceResponse, EventType, InterestsRequest, Reason, RegisterRequest, TrackRequest,
    WirePayload,
};
pub use metadata::MetadataSnapshot;
pub use publish::PublishId;
