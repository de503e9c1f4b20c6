//! Finder: command connector for browser-based file managers
//!
//! Serves the command protocol spoken by elFinder-style clients over a tree of
//! directories and text files. Nodes live in a pluggable record store; every
//! request is answered through a `Volume`, which owns hash resolution, tree
//! traversal and mutation for one collection.

pub mod concurrency;
pub mod config;
pub mod connector;
pub mod error;
pub mod logging;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod views;
pub mod volume;
