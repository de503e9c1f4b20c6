//! Library: the set of collections sharing one backing store

use super::model::{normalize_name, ModelVolume};
use crate::concurrency::NodeLockManager;
use crate::config::{StorageBackend, StorageConfig};
use crate::error::{ApiError, StorageError, VolumeError};
use crate::store::memory::MemoryNodeRecordStore;
use crate::store::persistence::SledNodeRecordStore;
use crate::store::{CollectionRecord, NodeRecord, NodeRecordStore};
use crate::types::CollectionID;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

/// Shared entry point for opening volumes.
///
/// Cheap to share across request handlers; each request opens its own
/// `ModelVolume`, and all of them coordinate through one lock manager.
pub struct Library {
    store: Arc<dyn NodeRecordStore>,
    locks: Arc<NodeLockManager>,
    creating: Mutex<()>,
}

impl Library {
    pub fn new(store: Arc<dyn NodeRecordStore>) -> Self {
        Self {
            store,
            locks: Arc::new(NodeLockManager::new()),
            creating: Mutex::new(()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryNodeRecordStore::new()))
    }

    /// Open the backend named by the storage configuration.
    pub fn from_config(config: &StorageConfig) -> Result<Self, ApiError> {
        match config.backend {
            StorageBackend::Memory => Ok(Self::in_memory()),
            StorageBackend::Sled => {
                let path = config.path.as_ref().ok_or_else(|| {
                    ApiError::ConfigError("storage.path is required for the sled backend".to_string())
                })?;
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        ApiError::ConfigError(format!("Failed to create store directory: {}", e))
                    })?;
                }
                let store = SledNodeRecordStore::open(path)?;
                info!(path = %path.display(), "Opened sled store");
                Ok(Self::new(Arc::new(store)))
            }
        }
    }

    /// Create a collection together with its root directory.
    pub fn create_collection(&self, name: &str) -> Result<CollectionRecord, VolumeError> {
        let name = normalize_name(name)?;
        let _guard = self.creating.lock();

        if self
            .store
            .list_collections()?
            .iter()
            .any(|collection| collection.name == name)
        {
            return Err(VolumeError::DuplicateCollection(name));
        }

        let collection_id = self.store.next_collection_id()?;
        let root_id = self.store.next_node_id()?;
        self.store
            .put(&NodeRecord::directory(root_id, collection_id, name.clone(), None))?;
        let record = CollectionRecord {
            collection_id,
            name,
            root: root_id,
        };
        self.store.put_collection(&record)?;

        info!(collection_id, name = %record.name, "Created collection");
        Ok(record)
    }

    pub fn collections(&self) -> Result<Vec<CollectionRecord>, VolumeError> {
        Ok(self.store.list_collections()?)
    }

    /// Open the volume of one collection.
    pub fn open(&self, collection_id: CollectionID) -> Result<ModelVolume, VolumeError> {
        let collection = self
            .store
            .get_collection(collection_id)?
            .ok_or(StorageError::CollectionNotFound(collection_id))?;
        Ok(ModelVolume::new(
            self.store.clone(),
            self.locks.clone(),
            collection,
        ))
    }

    pub fn flush(&self) -> Result<(), StorageError> {
        self.store.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::hash::ObjectKind;
    use crate::volume::Volume;
    use std::thread;

    #[test]
    fn test_create_and_open_collection() {
        let library = Library::in_memory();
        let collection = library.create_collection("home").unwrap();
        assert_eq!(collection.collection_id, 1);

        let volume = library.open(1).unwrap();
        assert_eq!(volume.volume_id(), "fc1");
        assert_eq!(volume.name(), "home");
        assert_eq!(volume.root().unwrap().name, "home");
        assert!(volume.root().unwrap().is_root());
    }

    #[test]
    fn test_duplicate_collection_name() {
        let library = Library::in_memory();
        library.create_collection("home").unwrap();
        assert!(matches!(
            library.create_collection("home"),
            Err(VolumeError::DuplicateCollection(_))
        ));
        assert_eq!(library.collections().unwrap().len(), 1);
    }

    #[test]
    fn test_open_unknown_collection() {
        let library = Library::in_memory();
        assert!(matches!(
            library.open(4),
            Err(VolumeError::Storage(StorageError::CollectionNotFound(4)))
        ));
    }

    #[test]
    fn test_concurrent_mkdir_same_name_creates_one() {
        let library = Arc::new(Library::in_memory());
        library.create_collection("home").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let library = library.clone();
                thread::spawn(move || {
                    let volume = library.open(1).unwrap();
                    volume.create(ObjectKind::Directory, "same", "fc1_").is_ok()
                })
            })
            .collect();

        let created = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(created, 1);

        let volume = library.open(1).unwrap();
        assert_eq!(volume.list("fc1_").unwrap(), vec!["same".to_string()]);
    }

    #[test]
    fn test_concurrent_rename_and_create_keep_children() {
        let library = Arc::new(Library::in_memory());
        library.create_collection("home").unwrap();

        for round in 0..20 {
            let volume = library.open(1).unwrap();
            let dir = volume
                .create(ObjectKind::Directory, &format!("dir{}", round), "fc1_")
                .unwrap()
                .hash()
                .to_string();

            let renamer = {
                let library = library.clone();
                let dir = dir.clone();
                thread::spawn(move || {
                    let volume = library.open(1).unwrap();
                    for i in 0..50 {
                        volume.rename(&dir, &format!("r{}-{}", round, i)).unwrap();
                    }
                })
            };
            let creator = {
                let library = library.clone();
                let dir = dir.clone();
                thread::spawn(move || {
                    let volume = library.open(1).unwrap();
                    for i in 0..50 {
                        volume
                            .create(ObjectKind::File, &format!("f{}", i), &dir)
                            .unwrap();
                    }
                })
            };
            renamer.join().unwrap();
            creator.join().unwrap();

            assert_eq!(volume.list(&dir).unwrap().len(), 50);
            assert_eq!(volume.resolve(&dir).unwrap().name, format!("r{}-49", round));
            // no orphan lets a duplicate name slip past the uniqueness check
            assert!(matches!(
                volume.create(ObjectKind::File, "f0", &dir),
                Err(VolumeError::DuplicateName { .. })
            ));
        }
    }
}
