//! Tree model
//!
//! Client-facing identifiers, node descriptors and the flattening rules used to
//! ship a neighbourhood of the tree in one response.

pub mod flatten;
pub mod hash;
pub mod node;
