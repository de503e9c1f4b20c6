//! NodeRecord Store
//!
//! Arena storage for node records and collections. Nodes are keyed by a stable
//! integer id; the parent is stored as an optional id and each directory keeps
//! the ordered list of its child ids.

pub mod memory;
pub mod persistence;

use crate::error::StorageError;
use crate::tree::hash::ObjectKind;
use crate::types::{CollectionID, NodeID, MAX_FILE_CONTENT};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Node type enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    File { content: String },
    Directory { children: Vec<NodeID> },
}

/// NodeRecord: metadata and relationships for one directory or file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub node_id: NodeID,
    pub collection: CollectionID,
    pub name: String,
    pub parent: Option<NodeID>,
    pub node_type: NodeType,
    pub modified: DateTime<Utc>,
}

impl NodeRecord {
    pub fn directory(
        node_id: NodeID,
        collection: CollectionID,
        name: String,
        parent: Option<NodeID>,
    ) -> Self {
        Self {
            node_id,
            collection,
            name,
            parent,
            node_type: NodeType::Directory {
                children: Vec::new(),
            },
            modified: Utc::now(),
        }
    }

    pub fn file(node_id: NodeID, collection: CollectionID, name: String, parent: NodeID) -> Self {
        Self {
            node_id,
            collection,
            name,
            parent: Some(parent),
            node_type: NodeType::File {
                content: String::new(),
            },
            modified: Utc::now(),
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self.node_type {
            NodeType::File { .. } => ObjectKind::File,
            NodeType::Directory { .. } => ObjectKind::Directory,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Child ids in insertion order; empty for files
    pub fn children(&self) -> &[NodeID] {
        match &self.node_type {
            NodeType::Directory { children } => children,
            NodeType::File { .. } => &[],
        }
    }

    pub fn content(&self) -> Option<&str> {
        match &self.node_type {
            NodeType::File { content } => Some(content),
            NodeType::Directory { .. } => None,
        }
    }

    /// Check record-level limits before a write.
    pub fn validate(&self) -> Result<(), StorageError> {
        match self.content() {
            Some(content) if content.len() > MAX_FILE_CONTENT => Err(StorageError::ContentTooLarge {
                node_id: self.node_id,
                len: content.len(),
                limit: MAX_FILE_CONTENT,
            }),
            _ => Ok(()),
        }
    }
}

/// CollectionRecord: one volume and its root directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRecord {
    pub collection_id: CollectionID,
    pub name: String,
    pub root: NodeID,
}

/// NodeRecord Store interface
pub trait NodeRecordStore: Send + Sync {
    fn get(&self, node_id: NodeID) -> Result<Option<NodeRecord>, StorageError>;
    fn put(&self, record: &NodeRecord) -> Result<(), StorageError>;
    fn next_node_id(&self) -> Result<NodeID, StorageError>;

    fn get_collection(
        &self,
        collection_id: CollectionID,
    ) -> Result<Option<CollectionRecord>, StorageError>;
    fn put_collection(&self, record: &CollectionRecord) -> Result<(), StorageError>;
    fn next_collection_id(&self) -> Result<CollectionID, StorageError>;
    fn list_collections(&self) -> Result<Vec<CollectionRecord>, StorageError>;

    /// Persist buffered writes; a no-op for stores without buffering.
    fn flush(&self) -> Result<(), StorageError> {
        Ok(())
    }

    /// Write a new child and its updated parent as one unit.
    fn put_with_parent(&self, child: &NodeRecord, parent: &NodeRecord) -> Result<(), StorageError> {
        self.put(child)?;
        self.put(parent)
    }
}
