//! Tooling
//!
//! Command-line access to collections and the connector.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
