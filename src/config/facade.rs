//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::FinderConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from defaults and environment.
    pub fn load() -> Result<FinderConfig, ConfigError> {
        MergeService::load(None)
    }

    /// Load configuration from a specific file, with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<FinderConfig, ConfigError> {
        MergeService::load(Some(path))
    }
}
