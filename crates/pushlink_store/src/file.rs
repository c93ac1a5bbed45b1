//! File-based metadata store.

use crate::error::{StoreError, StoreResult};
use crate::store::MetadataStore;
use parking_lot::Mutex;
use pushlink_protocol::MetadataSnapshot;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A metadata store backed by a single JSON file.
///
/// The file holds the snapshot as a flat JSON object. A missing file means
/// nothing has been synced yet.
///
/// # Durability
///
/// `save` writes the snapshot to `<path>.tmp`, syncs it, then renames it
/// over the real file, so the file always holds either the previous or the
/// new snapshot. A leftover temp file from an interrupted save is ignored by
/// `load` and overwritten by the next `save`.
///
/// # Example
///
/// ```no_run
/// use pushlink_protocol::MetadataSnapshot;
/// use pushlink_store::{FileMetadataStore, MetadataStore};
/// use std::path::Path;
///
/// let store = FileMetadataStore::open_with_create_dirs(Path::new("state/metadata.json")).unwrap();
/// store.save(&MetadataSnapshot::new().with("osVersion", "2.0")).unwrap();
/// ```
#[derive(Debug)]
pub struct FileMetadataStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileMetadataStore {
    /// Creates a store for the given path. The file need not exist yet.
    pub fn open(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Creates a store, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created.
    pub fn open_with_create_dirs(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self::open(path))
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    #[cfg(unix)]
    fn sync_parent_dir(&self) -> StoreResult<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        File::open(parent)?.sync_all()?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn sync_parent_dir(&self) -> StoreResult<()> {
        // Directory fsync is not supported on Windows
        Ok(())
    }
}

impl MetadataStore for FileMetadataStore {
    fn load(&self) -> StoreResult<Option<MetadataSnapshot>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StoreError::Corrupted(format!("{}: {}", self.path.display(), e)))
    }

    fn save(&self, snapshot: &MetadataSnapshot) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| StoreError::Corrupted(e.to_string()))?;

        let _guard = self.write_lock.lock();
        let temp_path = self.temp_path();
        let mut file = File::create(&temp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &self.path)?;
        self.sync_parent_dir()?;

        tracing::debug!(path = %self.path.display(), "metadata snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_none() {
        let dir = tempdir().unwrap();
        let store = FileMetadataStore::open(&dir.path().join("metadata.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("metadata.json");
        let snapshot = MetadataSnapshot::new()
            .with("osVersion", "2.0")
            .with("sdkVersion", "0.1.0");

        {
            let store = FileMetadataStore::open_with_create_dirs(&path).unwrap();
            store.save(&snapshot).unwrap();
        }

        let store = FileMetadataStore::open(&path);
        assert_eq!(store.load().unwrap(), Some(snapshot));
        assert_eq!(store.path(), path.as_path());
    }

    #[test]
    fn save_replaces_previous_snapshot() {
        let dir = tempdir().unwrap();
        let store = FileMetadataStore::open(&dir.path().join("metadata.json"));

        store
            .save(&MetadataSnapshot::new().with("osVersion", "1.0").with("extra", "x"))
            .unwrap();
        store
            .save(&MetadataSnapshot::new().with("osVersion", "2.0"))
            .unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, MetadataSnapshot::new().with("osVersion", "2.0"));
    }

    #[test]
    fn interrupted_save_leaves_previous_snapshot_readable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metadata.json");
        let store = FileMetadataStore::open(&path);
        store.save(&MetadataSnapshot::new().with("osVersion", "1.0")).unwrap();

        // A save that died mid-write leaves only a torn temp file behind.
        fs::write(store.temp_path(), b"{\n  \"osVer").unwrap();

        assert_eq!(
            store.load().unwrap(),
            Some(MetadataSnapshot::new().with("osVersion", "1.0"))
        );
    }

    #[test]
    fn save_replaces_leftover_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metadata.json");
        let store = FileMetadataStore::open(&path);
        fs::write(store.temp_path(), b"garbage").unwrap();

        store.save(&MetadataSnapshot::new().with("osVersion", "2.0")).unwrap();

        assert!(!store.temp_path().exists());
        assert_eq!(
            store.load().unwrap(),
            Some(MetadataSnapshot::new().with("osVersion", "2.0"))
        );
    }

    #[test]
    fn temp_path_sits_next_to_snapshot() {
        let store = FileMetadataStore::open(Path::new("state/metadata.json"));
        assert_eq!(store.temp_path(), PathBuf::from("state/metadata.json.tmp"));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metadata.json");
        fs::write(&path, b"not json").unwrap();

        let store = FileMetadataStore::open(&path);
        assert!(matches!(store.load(), Err(StoreError::Corrupted(_))));
    }
}
