//! Metadata store trait definition.

use crate::error::StoreResult;
use pushlink_protocol::MetadataSnapshot;
use std::sync::Arc;

/// Durable home of the last-synced metadata snapshot.
///
/// # Invariants
///
/// - `load` returns exactly the snapshot passed to the last successful `save`
/// - `load` returns `None` if nothing was ever saved
/// - There is a single writer; no compare-and-swap is offered
pub trait MetadataStore: Send + Sync {
    /// Loads the persisted snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read or parsed.
    fn load(&self) -> StoreResult<Option<MetadataSnapshot>>;

    /// Overwrites the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written durably.
    fn save(&self, snapshot: &MetadataSnapshot) -> StoreResult<()>;
}

impl<S: MetadataStore + ?Sized> MetadataStore for Arc<S> {
    fn load(&self) -> StoreResult<Option<MetadataSnapshot>> {
        (**self).load()
    }

    fn save(&self, snapshot: &MetadataSnapshot) -> StoreResult<()> {
        (**self).save(snapshot)
    }
}
