//! Merge policy and service.

pub mod service;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

/// Builder seeded with the defaults every layer may override.
pub(crate) fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("client.dot_files", false)?
        .set_default("client.upload_max_size", "128M")?
        .set_default("client.url", "none")?
        .set_default("storage.backend", "memory")
}
