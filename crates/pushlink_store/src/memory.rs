//! In-memory metadata store for testing.

use crate::error::StoreResult;
use crate::store::MetadataStore;
use parking_lot::RwLock;
use pushlink_protocol::MetadataSnapshot;

/// An in-memory metadata store.
///
/// Suitable for unit tests and for embedders that do not need the snapshot
/// to survive a restart.
///
/// # Example
///
/// ```rust
/// use pushlink_protocol::MetadataSnapshot;
/// use pushlink_store::{InMemoryMetadataStore, MetadataStore};
///
/// let store = InMemoryMetadataStore::new();
/// assert!(store.load().unwrap().is_none());
///
/// let snapshot = MetadataSnapshot::new().with("osVersion", "2.0");
/// store.save(&snapshot).unwrap();
/// assert_eq!(store.load().unwrap(), Some(snapshot));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryMetadataStore {
    snapshot: RwLock<Option<MetadataSnapshot>>,
    saves: RwLock<u64>,
}

impl InMemoryMetadataStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with a previously synced snapshot.
    #[must_use]
    pub fn with_snapshot(snapshot: MetadataSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(Some(snapshot)),
            saves: RwLock::new(0),
        }
    }

    /// Returns a copy of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Option<MetadataSnapshot> {
        self.snapshot.read().clone()
    }

    /// Returns how many times `save` was called.
    #[must_use]
    pub fn save_count(&self) -> u64 {
        *self.saves.read()
    }
}

impl MetadataStore for InMemoryMetadataStore {
    fn load(&self) -> StoreResult<Option<MetadataSnapshot>> {
        Ok(self.snapshot.read().clone())
    }

    fn save(&self, snapshot: &MetadataSnapshot) -> StoreResult<()> {
        *self.snapshot.write() = Some(snapshot.clone());
        *self.saves.write() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn empty_store_loads_none() {
        let store = InMemoryMetadataStore::new();
        assert!(store.load().unwrap().is_none());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn save_overwrites() {
        let store = InMemoryMetadataStore::with_snapshot(
            MetadataSnapshot::new().with("osVersion", "1.0"),
        );
        store
            .save(&MetadataSnapshot::new().with("osVersion", "2.0"))
            .unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.get("osVersion"), Some("2.0"));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn shared_handle_sees_writes() {
        let store = Arc::new(InMemoryMetadataStore::new());
        let handle = Arc::clone(&store);
        handle
            .save(&MetadataSnapshot::new().with("sdkVersion", "0.1.0"))
            .unwrap();
        assert_eq!(
            store.snapshot().unwrap().get("sdkVersion"),
            Some("0.1.0")
        );
    }
}
