//! Error types for every layer of the connector.
//!
//! Each layer has a closed enum. The dispatcher turns a `CommandError` into an
//! error envelope in exactly one place (`connector::Connector::run`).

use crate::tree::hash::ObjectKind;
use thiserror::Error;

/// Identifier codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    #[error("Invalid target hash: {0}")]
    Malformed(String),
}

/// Backing store errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] sled::Error),

    #[error("Record encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("Collection not found: {0}")]
    CollectionNotFound(u64),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error("File content of node {node_id} is {len} bytes, limit is {limit}")]
    ContentTooLarge { node_id: u64, len: usize, limit: usize },
}

/// Volume (storage driver) errors
#[derive(Debug, Error)]
pub enum VolumeError {
    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("Could not open target {0}")]
    ObjectNotFound(String),

    #[error("Invalid parent directory")]
    ParentNotFound(String),

    #[error("{kind} with this Name and Parent already exists.")]
    DuplicateName { kind: ObjectKind, name: String },

    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    #[error("Root directory cannot be renamed")]
    RootLocked,

    #[error("File collection with this Name already exists.")]
    DuplicateCollection(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Dispatcher errors; the `Display` text is what the client sees
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No command specified")]
    MissingCommand,

    #[error("Unknown command")]
    UnknownCommand(String),

    #[error("Invalid arguments")]
    InvalidArguments,

    #[error("Could not open target")]
    CouldNotOpenTarget,

    #[error(transparent)]
    Volume(#[from] VolumeError),

    #[error("{0}")]
    Unhandled(#[from] anyhow::Error),
}

/// Configuration and tooling errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Volume error: {0}")]
    VolumeError(#[from] VolumeError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
