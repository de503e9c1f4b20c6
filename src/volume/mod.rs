//! Volumes
//!
//! A volume is one self-contained tree of directories and files with a single
//! root. `Volume` is the capability seam between the command connector and a
//! storage backend: the connector only ever talks to `dyn Volume`.

mod library;
mod model;

pub use library::Library;
pub use model::ModelVolume;

use crate::error::VolumeError;
use crate::store::NodeRecord;
use crate::tree::flatten::{self, TreeScope};
use crate::tree::hash::ObjectKind;
use crate::tree::node::NodeInfo;

/// Storage driver contract
pub trait Volume: Send + Sync {
    /// Hash prefix of this volume, e.g. `fc1`
    fn volume_id(&self) -> &str;

    /// Human readable name of the volume
    fn name(&self) -> &str;

    fn root(&self) -> Result<NodeRecord, VolumeError>;

    /// Resolve a client hash to a node of this volume.
    ///
    /// The root marker (`fc1_` or the empty string) always resolves to this
    /// volume's root. Hashes naming a node of another volume are rejected with
    /// `ObjectNotFound`, never redirected.
    fn resolve(&self, target: &str) -> Result<NodeRecord, VolumeError>;

    fn parent(&self, node: &NodeRecord) -> Result<Option<NodeRecord>, VolumeError>;

    /// Child directories in creation order, then child files in creation order
    fn children(&self, node: &NodeRecord) -> Result<Vec<NodeRecord>, VolumeError>;

    /// Nodes sharing `node`'s parent, excluding `node`; empty for the root
    fn siblings(&self, node: &NodeRecord) -> Result<Vec<NodeRecord>, VolumeError> {
        match self.parent(node)? {
            Some(parent) => Ok(self
                .children(&parent)?
                .into_iter()
                .filter(|sibling| sibling.node_id != node.node_id)
                .collect()),
            None => Ok(Vec::new()),
        }
    }

    /// Resolve `target` for reading; `None` when it names a directory
    fn read(&self, target: &str) -> Result<Option<NodeRecord>, VolumeError> {
        let node = self.resolve(target)?;
        Ok((node.kind() == ObjectKind::File).then_some(node))
    }

    fn describe(&self, node: &NodeRecord) -> Result<NodeInfo, VolumeError>;

    fn flatten(&self, node: &NodeRecord, scope: TreeScope) -> Result<Vec<NodeInfo>, VolumeError> {
        flatten::flatten(self, node, scope)
    }

    /// Create a directory or file named `name` under the directory `parent`.
    fn create(&self, kind: ObjectKind, name: &str, parent: &str) -> Result<NodeInfo, VolumeError>;

    fn rename(&self, target: &str, name: &str) -> Result<NodeInfo, VolumeError>;

    /// Names of the target's children
    fn list(&self, target: &str) -> Result<Vec<String>, VolumeError> {
        let node = self.resolve(target)?;
        Ok(self
            .children(&node)?
            .into_iter()
            .map(|child| child.name)
            .collect())
    }
}
