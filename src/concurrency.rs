//! Per-node locking for volume mutations
//!
//! Reads never lock. A mutation under a directory takes that directory's write
//! lock so the sibling-name uniqueness check and the write form one unit.

use crate::types::{CollectionID, NodeID};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

type LockKey = (CollectionID, NodeID);

/// Per-node lock manager shared by every volume opened from one library
#[derive(Default)]
pub struct NodeLockManager {
    locks: Mutex<HashMap<LockKey, Arc<RwLock<()>>>>,
}

impl NodeLockManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the lock for a node
    pub fn get_lock(&self, collection: CollectionID, node_id: NodeID) -> Arc<RwLock<()>> {
        self.locks
            .lock()
            .entry((collection, node_id))
            .or_insert_with(|| Arc::new(RwLock::new(())))
            .clone()
    }

    /// Run `f` while holding the node's write lock.
    ///
    /// The entry is dropped again once no other caller holds or waits on it,
    /// so the map only holds nodes with a mutation in flight.
    pub fn with_write<R>(&self, collection: CollectionID, node_id: NodeID, f: impl FnOnce() -> R) -> R {
        let lock = self.get_lock(collection, node_id);
        let result = {
            let _guard = lock.write();
            f()
        };
        self.release(collection, node_id, &lock);
        result
    }

    /// Remove the entry if the map and `lock` are its only holders.
    fn release(&self, collection: CollectionID, node_id: NodeID, lock: &Arc<RwLock<()>>) {
        // get_lock needs the map mutex, so the count cannot grow while it is held
        let mut locks = self.locks.lock();
        if Arc::strong_count(lock) == 2 {
            locks.remove(&(collection, node_id));
        }
    }

    /// Number of nodes with a live lock entry
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
