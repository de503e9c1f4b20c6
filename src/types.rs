//! Core types shared by the store, volume and connector layers.

/// NodeID: store-allocated identifier of a directory or file
pub type NodeID = u64;

/// CollectionID: identifier of one collection (one volume, one tree)
pub type CollectionID = u64;

/// Maximum size of a file's text content, in bytes
pub const MAX_FILE_CONTENT: usize = 2048;

/// Volume id prefix for a collection, e.g. `fc3`
pub fn volume_id_for(collection: CollectionID) -> String {
    format!("fc{}", collection)
}
