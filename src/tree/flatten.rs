//! Tree flattening
//!
//! Produces the flat, hash-linked list of node descriptions the client needs to
//! rebuild the visible part of a tree. Output order is fixed:
//!
//! 1. ancestors, root first down to the node itself, each followed by its siblings
//! 2. siblings of the node (never for the root)
//! 3. child directories, then child files
//!
//! Duplicates are allowed; the client deduplicates by hash.

use crate::error::VolumeError;
use crate::store::NodeRecord;
use crate::tree::node::NodeInfo;
use crate::volume::Volume;
use serde::{Deserialize, Serialize};

/// Which relatives of a node to include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TreeScope {
    pub ancestors: bool,
    pub siblings: bool,
    pub children: bool,
}

impl TreeScope {
    pub const NONE: TreeScope = TreeScope::new(false, false, false);
    pub const CHILDREN: TreeScope = TreeScope::new(false, false, true);
    pub const PARENTS: TreeScope = TreeScope::new(true, true, false);
    pub const FULL: TreeScope = TreeScope::new(true, true, true);

    pub const fn new(ancestors: bool, siblings: bool, children: bool) -> Self {
        Self {
            ancestors,
            siblings,
            children,
        }
    }
}

/// Flatten the neighbourhood of `node` according to `scope`.
pub fn flatten<V: Volume + ?Sized>(
    volume: &V,
    node: &NodeRecord,
    scope: TreeScope,
) -> Result<Vec<NodeInfo>, VolumeError> {
    let mut tree = Vec::new();

    if scope.ancestors {
        for ancestor in ancestors_inclusive(volume, node)? {
            tree.push(volume.describe(&ancestor)?);
            for sibling in volume.siblings(&ancestor)? {
                tree.push(volume.describe(&sibling)?);
            }
        }
    }

    if scope.siblings && !node.is_root() {
        for sibling in volume.siblings(node)? {
            tree.push(volume.describe(&sibling)?);
        }
    }

    if scope.children {
        for child in volume.children(node)? {
            tree.push(volume.describe(&child)?);
        }
    }

    Ok(tree)
}

/// Root first, ending with `node`.
fn ancestors_inclusive<V: Volume + ?Sized>(
    volume: &V,
    node: &NodeRecord,
) -> Result<Vec<NodeRecord>, VolumeError> {
    let mut chain = vec![node.clone()];
    let mut current = node.clone();
    while let Some(parent) = volume.parent(&current)? {
        chain.push(parent.clone());
        current = parent;
    }
    chain.reverse();
    Ok(chain)
}
