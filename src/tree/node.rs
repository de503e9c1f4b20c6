//! Wire descriptions of nodes
//!
//! `NodeInfo` is what the client sees for one node: metadata only, no content.
//! The client rebuilds the tree from `hash`/`phash` pairs.

use serde::{Deserialize, Serialize};

pub const DIRECTORY_MIME: &str = "directory";
pub const TEXT_MIME: &str = "text/plain";

/// Directory description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryInfo {
    pub name: String,
    pub hash: String,
    /// Parent hash, empty for the volume root
    pub phash: String,
    pub mime: String,
    pub read: u8,
    pub write: u8,
    pub size: u64,
    pub date: String,
    /// 1 if the directory has at least one child directory
    pub dirs: u8,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub volume_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub locked: Option<u8>,
}

/// File description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    pub hash: String,
    pub phash: String,
    pub mime: String,
    pub size: u64,
    pub read: bool,
    pub write: bool,
    pub rm: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeInfo {
    Directory(DirectoryInfo),
    File(FileInfo),
}

impl NodeInfo {
    pub fn name(&self) -> &str {
        match self {
            NodeInfo::Directory(d) => &d.name,
            NodeInfo::File(f) => &f.name,
        }
    }

    pub fn hash(&self) -> &str {
        match self {
            NodeInfo::Directory(d) => &d.hash,
            NodeInfo::File(f) => &f.hash,
        }
    }

    pub fn phash(&self) -> &str {
        match self {
            NodeInfo::Directory(d) => &d.phash,
            NodeInfo::File(f) => &f.phash,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, NodeInfo::Directory(_))
    }
}
