//! MergeService: orchestrates sources, applies merge policy, deserializes to FinderConfig.

use crate::config::sources::{environment, file};
use crate::config::FinderConfig;
use config::ConfigError;
use std::path::Path;

use super::builder_with_defaults;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> config file -> environment (highest).
    pub fn load(path: Option<&Path>) -> Result<FinderConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = match path {
            Some(path) => file::add_to_builder(builder, path)?,
            None => builder,
        };
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
