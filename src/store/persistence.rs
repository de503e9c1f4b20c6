//! Sled-backed NodeRecord store
//!
//! Records are bincode-encoded under big-endian id keys, so iteration over the
//! `collections` tree yields collections in id order.

use super::{CollectionRecord, NodeRecord, NodeRecordStore};
use crate::error::StorageError;
use crate::types::{CollectionID, NodeID};
use sled::transaction::{ConflictableTransactionError, TransactionError};
use std::path::Path;

const NODES_TREE: &str = "nodes";
const COLLECTIONS_TREE: &str = "collections";

pub struct SledNodeRecordStore {
    db: sled::Db,
    nodes: sled::Tree,
    collections: sled::Tree,
}

fn key(id: u64) -> [u8; 8] {
    id.to_be_bytes()
}

impl SledNodeRecordStore {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    /// Temporary store removed on drop
    pub fn temporary() -> Result<Self, StorageError> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db)
    }

    fn from_db(db: sled::Db) -> Result<Self, StorageError> {
        let nodes = db.open_tree(NODES_TREE)?;
        let collections = db.open_tree(COLLECTIONS_TREE)?;
        Ok(Self {
            db,
            nodes,
            collections,
        })
    }
}

impl NodeRecordStore for SledNodeRecordStore {
    fn get(&self, node_id: NodeID) -> Result<Option<NodeRecord>, StorageError> {
        match self.nodes.get(key(node_id))? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put(&self, record: &NodeRecord) -> Result<(), StorageError> {
        record.validate()?;
        let bytes = bincode::serialize(record)?;
        self.nodes.insert(key(record.node_id), bytes)?;
        Ok(())
    }

    fn next_node_id(&self) -> Result<NodeID, StorageError> {
        Ok(self.db.generate_id()? + 1)
    }

    fn get_collection(
        &self,
        collection_id: CollectionID,
    ) -> Result<Option<CollectionRecord>, StorageError> {
        match self.collections.get(key(collection_id))? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put_collection(&self, record: &CollectionRecord) -> Result<(), StorageError> {
        let bytes = bincode::serialize(record)?;
        self.collections.insert(key(record.collection_id), bytes)?;
        Ok(())
    }

    fn next_collection_id(&self) -> Result<CollectionID, StorageError> {
        let last = match self.collections.last()? {
            Some((k, _)) => {
                let bytes: [u8; 8] = k
                    .as_ref()
                    .try_into()
                    .map_err(|_| StorageError::Corrupt("collection key".to_string()))?;
                u64::from_be_bytes(bytes)
            }
            None => 0,
        };
        Ok(last + 1)
    }

    fn list_collections(&self) -> Result<Vec<CollectionRecord>, StorageError> {
        let mut out = Vec::new();
        for entry in self.collections.iter() {
            let (_, bytes) = entry?;
            out.push(bincode::deserialize(&bytes)?);
        }
        Ok(out)
    }

    fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }

    fn put_with_parent(&self, child: &NodeRecord, parent: &NodeRecord) -> Result<(), StorageError> {
        child.validate()?;
        let child_bytes = bincode::serialize(child)?;
        let parent_bytes = bincode::serialize(parent)?;
        self.nodes
            .transaction(|tx| {
                tx.insert(&key(child.node_id)[..], child_bytes.as_slice())?;
                tx.insert(&key(parent.node_id)[..], parent_bytes.as_slice())?;
                Ok::<(), ConflictableTransactionError<()>>(())
            })
            .map_err(|e| match e {
                TransactionError::Storage(e) => StorageError::Io(e),
                TransactionError::Abort(()) => {
                    StorageError::Corrupt("node write transaction aborted".to_string())
                }
            })
    }
}
