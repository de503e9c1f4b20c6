//! Integration tests for the finder connector

mod cli_contracts;
mod connector_protocol;
mod store_persistence;
mod support;
mod tree_flattening;
