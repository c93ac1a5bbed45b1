//! # Pushlink Store
//!
//! Persistence for the last-synchronized metadata snapshot.
//!
//! The store is the only durable state owned by the sync client. It has a
//! single writer (the engine) and needs no transaction semantics: a snapshot
//! is loaded, compared, and overwritten whole.
//!
//! # Implementors
//!
//! - [`InMemoryMetadataStore`] - For testing
//! - [`FileMetadataStore`] - JSON file on disk

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod memory;
mod store;

pub use error::{StoreError, StoreResult};
pub use file::FileMetadataStore;
pub use memory::InMemoryMetadataStore;
pub use store::MetadataStore;
