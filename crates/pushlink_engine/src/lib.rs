//! # Pushlink Engine
//!
//! Keeps a device's push registration, interest set and descriptive
//! metadata consistent with a remote notification service.
//!
//! This crate provides:
//! - Device registration
//! - Interest management (subscribe, full replacement, unsubscribe)
//! - Delivery/open event tracking
//! - Change-triggered metadata resynchronization
//! - HTTP transport abstraction with mock, loopback and `reqwest` clients
//!
//! ## Architecture
//!
//! Every public operation issues at most one HTTP exchange:
//! 1. Build and encode the request payload
//! 2. Execute it through an [`HttpTransport`]
//! 3. Classify the exchange (status 200 and no transport error is success)
//! 4. Invoke the caller's completion exactly once
//!
//! ## Key Invariants
//!
//! - Success means status 200 exactly, never the wider 2xx range
//! - Interest sets are replaced whole, never patched
//! - Metadata is sent iff the current snapshot differs from the last synced one
//! - The persisted snapshot only changes after the service accepts it

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod engine;
mod environment;
mod error;
mod http;
mod metadata;
mod outcome;
mod transport;

pub use config::ServiceConfig;
pub use engine::{InterestManager, SyncEngine};
pub use environment::{Environment, StaticEnvironment, SystemEnvironment, BUNDLE_ID_ENV};
pub use error::{SyncError, SyncResult};
#[cfg(feature = "reqwest")]
pub use http::ReqwestTransport;
pub use http::{LoopbackService, LoopbackTransport};
pub use metadata::{plan_metadata_sync, MetadataPlan};
pub use outcome::{
    Completion, NetworkOutcome, StatusCompletion, TransportStatus, SUCCESS_STATUS,
};
pub use transport::{
    HttpExchange, HttpMethod, HttpRequest, HttpTransport, MockTransport, TransportError,
};
