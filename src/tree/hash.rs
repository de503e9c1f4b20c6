//! Client identifier ("hash") codec
//!
//! A hash has the form `<volume_id>_<kind><id>`, e.g. `fc3_d17`. The kind letter
//! is `d` for directories and `f` for files. A hash with an empty node segment
//! (`fc3_`), or the empty string, addresses the root of the volume being queried.

use crate::error::HashError;
use crate::types::NodeID;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SEPARATOR: char = '_';

/// Node kind as encoded in a hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Directory,
    File,
}

impl ObjectKind {
    pub fn letter(self) -> char {
        match self {
            ObjectKind::Directory => 'd',
            ObjectKind::File => 'f',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'd' => Some(ObjectKind::Directory),
            'f' => Some(ObjectKind::File),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Directory => f.write_str("Directory"),
            ObjectKind::File => f.write_str("File"),
        }
    }
}

/// A fully qualified node address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeHash {
    pub volume: String,
    pub kind: ObjectKind,
    pub id: NodeID,
}

impl NodeHash {
    pub fn new(volume: impl Into<String>, kind: ObjectKind, id: NodeID) -> Self {
        Self {
            volume: volume.into(),
            kind,
            id,
        }
    }
}

impl fmt::Display for NodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", self.volume, SEPARATOR, self.kind.letter(), self.id)
    }
}

/// Decoded client target
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// Root of the queried volume. `volume` is `None` for the empty hash.
    Root { volume: Option<String> },
    Node(NodeHash),
}

impl Target {
    /// Decode a client hash.
    pub fn decode(hash: &str) -> Result<Self, HashError> {
        if hash.is_empty() {
            return Ok(Target::Root { volume: None });
        }

        let (volume, object) = hash
            .split_once(SEPARATOR)
            .ok_or_else(|| HashError::Malformed(hash.to_string()))?;

        let mut chars = object.chars();
        let letter = match chars.next() {
            None => {
                return Ok(Target::Root {
                    volume: Some(volume.to_string()),
                })
            }
            Some(letter) => letter,
        };

        let kind =
            ObjectKind::from_letter(letter).ok_or_else(|| HashError::Malformed(hash.to_string()))?;

        let digits = chars.as_str();
        // only canonical ids: u64::from_str would accept '+7' and '007', neither re-encodes
        if digits.is_empty()
            || !digits.bytes().all(|b| b.is_ascii_digit())
            || (digits.len() > 1 && digits.starts_with('0'))
        {
            return Err(HashError::Malformed(hash.to_string()));
        }
        let id = digits
            .parse::<NodeID>()
            .map_err(|_| HashError::Malformed(hash.to_string()))?;

        Ok(Target::Node(NodeHash::new(volume, kind, id)))
    }

    /// Encode back to the client form; inverse of [`Target::decode`].
    pub fn encode(&self) -> String {
        self.to_string()
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Target::Root { .. })
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Root { volume: None } => Ok(()),
            Target::Root {
                volume: Some(volume),
            } => write!(f, "{}{}", volume, SEPARATOR),
            Target::Node(hash) => hash.fmt(f),
        }
    }
}

impl FromStr for Target {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::decode(s)
    }
}
