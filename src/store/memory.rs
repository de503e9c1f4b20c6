//! In-memory NodeRecord store

use super::{CollectionRecord, NodeRecord, NodeRecordStore};
use crate::error::StorageError;
use crate::types::{CollectionID, NodeID};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-local store, used for tests and the `memory` backend
#[derive(Default)]
pub struct MemoryNodeRecordStore {
    nodes: RwLock<HashMap<NodeID, NodeRecord>>,
    collections: RwLock<BTreeMap<CollectionID, CollectionRecord>>,
    last_node_id: AtomicU64,
    last_collection_id: AtomicU64,
}

impl MemoryNodeRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NodeRecordStore for MemoryNodeRecordStore {
    fn get(&self, node_id: NodeID) -> Result<Option<NodeRecord>, StorageError> {
        Ok(self.nodes.read().get(&node_id).cloned())
    }

    fn put(&self, record: &NodeRecord) -> Result<(), StorageError> {
        record.validate()?;
        self.nodes.write().insert(record.node_id, record.clone());
        Ok(())
    }

    fn next_node_id(&self) -> Result<NodeID, StorageError> {
        Ok(self.last_node_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn get_collection(
        &self,
        collection_id: CollectionID,
    ) -> Result<Option<CollectionRecord>, StorageError> {
        Ok(self.collections.read().get(&collection_id).cloned())
    }

    fn put_collection(&self, record: &CollectionRecord) -> Result<(), StorageError> {
        self.collections
            .write()
            .insert(record.collection_id, record.clone());
        Ok(())
    }

    fn next_collection_id(&self) -> Result<CollectionID, StorageError> {
        Ok(self.last_collection_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn list_collections(&self) -> Result<Vec<CollectionRecord>, StorageError> {
        Ok(self.collections.read().values().cloned().collect())
    }

    fn put_with_parent(&self, child: &NodeRecord, parent: &NodeRecord) -> Result<(), StorageError> {
        child.validate()?;
        let mut nodes = self.nodes.write();
        nodes.insert(child.node_id, child.clone());
        nodes.insert(parent.node_id, parent.clone());
        Ok(())
    }
}
