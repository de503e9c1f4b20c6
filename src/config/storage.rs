//! StorageConfig: which backing store the library opens.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Sled,
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Sled database directory; None means the platform data directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Sled backend at `path`
    pub fn sled(path: PathBuf) -> Self {
        Self {
            backend: StorageBackend::Sled,
            path: Some(path),
        }
    }

    /// Fill in the default store location for the sled backend.
    pub fn resolved(mut self) -> Result<Self, ApiError> {
        if self.backend == StorageBackend::Sled && self.path.is_none() {
            let dirs = directories::ProjectDirs::from("", "finder", "finder").ok_or_else(|| {
                ApiError::ConfigError("Could not determine platform data directory".to_string())
            })?;
            self.path = Some(dirs.data_dir().join("store"));
        }
        Ok(self)
    }
}
