//! Configuration
//!
//! Layered configuration: built-in defaults, then an optional TOML file, then
//! `FINDER__*` environment variables (`__` separates nested keys, e.g.
//! `FINDER__STORAGE__BACKEND=sled`).

mod facade;
mod merge;
mod sources;
mod storage;

pub use facade::ConfigLoader;
pub use storage::{StorageBackend, StorageConfig};

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinderConfig {
    #[serde(default)]
    pub client: ClientOptions,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Options announced to the client in the `open` init block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientOptions {
    /// Show dot files
    #[serde(default)]
    pub dot_files: bool,

    #[serde(default = "default_upload_max_size")]
    pub upload_max_size: String,

    /// Archive mime types the client may create
    #[serde(default)]
    pub archives: Vec<String>,

    /// Archive mime types the client may extract
    #[serde(default)]
    pub extract: Vec<String>,

    /// Base url for direct file links; "none" disables them
    #[serde(default = "default_url")]
    pub url: String,

    /// Commands the client should hide
    #[serde(default)]
    pub disabled: Vec<String>,
}

fn default_upload_max_size() -> String {
    "128M".to_string()
}

fn default_url() -> String {
    "none".to_string()
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            dot_files: false,
            upload_max_size: default_upload_max_size(),
            archives: Vec::new(),
            extract: Vec::new(),
            url: default_url(),
            disabled: Vec::new(),
        }
    }
}
