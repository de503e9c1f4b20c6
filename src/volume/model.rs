//! Store-backed volume driver

use super::Volume;
use crate::concurrency::NodeLockManager;
use crate::error::VolumeError;
use crate::store::{CollectionRecord, NodeRecord, NodeRecordStore, NodeType};
use crate::tree::hash::{NodeHash, ObjectKind, Target};
use crate::tree::node::{DirectoryInfo, FileInfo, NodeInfo, DIRECTORY_MIME, TEXT_MIME};
use crate::types::{volume_id_for, NodeID};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;

const MAX_NAME_LEN: usize = 255;
const DATE_FORMAT: &str = "%d %b %Y %H:%M";

/// Volume over one collection of a `NodeRecordStore`
///
/// Holds no node state of its own: every call reads the store.
pub struct ModelVolume {
    store: Arc<dyn NodeRecordStore>,
    locks: Arc<NodeLockManager>,
    collection: CollectionRecord,
    volume_id: String,
}

impl ModelVolume {
    pub(crate) fn new(
        store: Arc<dyn NodeRecordStore>,
        locks: Arc<NodeLockManager>,
        collection: CollectionRecord,
    ) -> Self {
        let volume_id = volume_id_for(collection.collection_id);
        Self {
            store,
            locks,
            collection,
            volume_id,
        }
    }

    pub fn collection(&self) -> &CollectionRecord {
        &self.collection
    }

    fn hash_of(&self, kind: ObjectKind, node_id: NodeID) -> String {
        NodeHash::new(self.volume_id.as_str(), kind, node_id).to_string()
    }

    fn load(&self, node_id: NodeID) -> Result<Option<NodeRecord>, VolumeError> {
        Ok(self
            .store
            .get(node_id)?
            .filter(|record| record.collection == self.collection.collection_id))
    }

    fn has_child_directory(&self, node: &NodeRecord) -> Result<bool, VolumeError> {
        for child_id in node.children() {
            if let Some(child) = self.load(*child_id)? {
                if child.kind() == ObjectKind::Directory {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Resolve `target` as a directory that can receive children.
    fn resolve_parent(&self, target: &str) -> Result<NodeRecord, VolumeError> {
        match self.resolve(target) {
            Ok(node) if node.kind() == ObjectKind::Directory => Ok(node),
            Ok(_) => Err(VolumeError::ParentNotFound(target.to_string())),
            Err(VolumeError::Storage(e)) => Err(VolumeError::Storage(e)),
            Err(_) => Err(VolumeError::ParentNotFound(target.to_string())),
        }
    }

    fn ensure_unique(
        &self,
        parent: &NodeRecord,
        name: &str,
        kind: ObjectKind,
        except: Option<NodeID>,
    ) -> Result<(), VolumeError> {
        for child_id in parent.children() {
            if Some(*child_id) == except {
                continue;
            }
            if let Some(child) = self.load(*child_id)? {
                if child.name == name {
                    return Err(VolumeError::DuplicateName {
                        kind,
                        name: name.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// NFC-normalize and validate a client supplied name.
pub(crate) fn normalize_name(name: &str) -> Result<String, VolumeError> {
    let normalized: String = name.nfc().collect();
    if normalized.trim().is_empty()
        || normalized.contains('/')
        || normalized.contains('\0')
        || normalized.len() > MAX_NAME_LEN
    {
        return Err(VolumeError::InvalidName(name.to_string()));
    }
    Ok(normalized)
}

impl Volume for ModelVolume {
    fn volume_id(&self) -> &str {
        &self.volume_id
    }

    fn name(&self) -> &str {
        &self.collection.name
    }

    fn root(&self) -> Result<NodeRecord, VolumeError> {
        self.load(self.collection.root)?
            .ok_or_else(|| VolumeError::ObjectNotFound(format!("{}_", self.volume_id)))
    }

    fn resolve(&self, target: &str) -> Result<NodeRecord, VolumeError> {
        let hash = match Target::decode(target)? {
            Target::Root { .. } => return self.root(),
            Target::Node(hash) => hash,
        };

        if hash.volume != self.volume_id {
            debug!(hash = %target, volume = %self.volume_id, "Rejecting hash from another volume");
            return Err(VolumeError::ObjectNotFound(target.to_string()));
        }

        match self.load(hash.id)? {
            Some(record) if record.kind() == hash.kind => Ok(record),
            _ => Err(VolumeError::ObjectNotFound(target.to_string())),
        }
    }

    fn parent(&self, node: &NodeRecord) -> Result<Option<NodeRecord>, VolumeError> {
        match node.parent {
            Some(parent_id) => self.load(parent_id)?.map(Some).ok_or_else(|| {
                VolumeError::ObjectNotFound(self.hash_of(ObjectKind::Directory, parent_id))
            }),
            None => Ok(None),
        }
    }

    fn children(&self, node: &NodeRecord) -> Result<Vec<NodeRecord>, VolumeError> {
        let mut directories = Vec::new();
        let mut files = Vec::new();
        for child_id in node.children() {
            match self.load(*child_id)? {
                Some(child) if child.kind() == ObjectKind::Directory => directories.push(child),
                Some(child) => files.push(child),
                None => {}
            }
        }
        directories.extend(files);
        Ok(directories)
    }

    fn describe(&self, node: &NodeRecord) -> Result<NodeInfo, VolumeError> {
        let hash = self.hash_of(node.kind(), node.node_id);
        let phash = node
            .parent
            .map(|parent_id| self.hash_of(ObjectKind::Directory, parent_id))
            .unwrap_or_default();

        let info = match &node.node_type {
            NodeType::Directory { .. } => {
                let root = node.is_root();
                NodeInfo::Directory(DirectoryInfo {
                    name: node.name.clone(),
                    hash,
                    phash,
                    mime: DIRECTORY_MIME.to_string(),
                    read: 1,
                    write: 1,
                    size: 0,
                    date: node.modified.format(DATE_FORMAT).to_string(),
                    dirs: u8::from(self.has_child_directory(node)?),
                    volume_id: root.then(|| self.volume_id.clone()),
                    locked: root.then_some(1),
                })
            }
            NodeType::File { content } => NodeInfo::File(FileInfo {
                name: node.name.clone(),
                hash,
                phash,
                mime: TEXT_MIME.to_string(),
                size: content.len() as u64,
                read: true,
                write: true,
                rm: true,
            }),
        };
        Ok(info)
    }

    fn create(&self, kind: ObjectKind, name: &str, parent: &str) -> Result<NodeInfo, VolumeError> {
        let parent = self.resolve_parent(parent)?;
        let name = normalize_name(name)?;
        let collection = self.collection.collection_id;

        let record = self.locks.with_write(collection, parent.node_id, || {
            // re-read under the lock; another writer may have added children
            let mut parent = self
                .load(parent.node_id)?
                .ok_or_else(|| VolumeError::ParentNotFound(self.hash_of(ObjectKind::Directory, parent.node_id)))?;
            self.ensure_unique(&parent, &name, kind, None)?;

            let node_id = self.store.next_node_id()?;
            let record = match kind {
                ObjectKind::Directory => {
                    NodeRecord::directory(node_id, collection, name.clone(), Some(parent.node_id))
                }
                ObjectKind::File => NodeRecord::file(node_id, collection, name.clone(), parent.node_id),
            };
            if let NodeType::Directory { children } = &mut parent.node_type {
                children.push(node_id);
            }
            self.store.put_with_parent(&record, &parent)?;
            Ok::<_, VolumeError>(record)
        })?;

        info!(
            volume = %self.volume_id,
            node_id = record.node_id,
            kind = %kind,
            name = %record.name,
            "Created node"
        );
        self.describe(&record)
    }

    fn rename(&self, target: &str, name: &str) -> Result<NodeInfo, VolumeError> {
        let node = self.resolve(target)?;
        let name = normalize_name(name)?;
        // the root carries the collection name and is reported as locked
        let parent_id = node.parent.ok_or(VolumeError::RootLocked)?;
        let collection = self.collection.collection_id;

        // parent then node: the node's own lock orders this write after any
        // create that is appending to its children
        let record = self.locks.with_write(collection, parent_id, || {
            self.locks.with_write(collection, node.node_id, || {
                let parent = self.load(parent_id)?.ok_or_else(|| {
                    VolumeError::ObjectNotFound(self.hash_of(ObjectKind::Directory, parent_id))
                })?;
                self.ensure_unique(&parent, &name, node.kind(), Some(node.node_id))?;

                let mut record = self
                    .load(node.node_id)?
                    .ok_or_else(|| VolumeError::ObjectNotFound(target.to_string()))?;
                record.name = name.clone();
                record.modified = Utc::now();
                self.store.put(&record)?;
                Ok::<_, VolumeError>(record)
            })
        })?;

        info!(volume = %self.volume_id, node_id = record.node_id, name = %record.name, "Renamed node");
        self.describe(&record)
    }
}
