//! CLI Tooling
//!
//! Command-line interface for managing collections and sending raw connector
//! requests against a store.

use crate::config::{ConfigLoader, FinderConfig, StorageBackend, StorageConfig};
use crate::connector::{Connector, Request};
use crate::error::ApiError;
use crate::logging::init_logging;
use crate::store::CollectionRecord;
use crate::types::CollectionID;
use crate::volume::Library;
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::json;
use std::path::PathBuf;
use tracing::{info, warn};

/// Finder CLI - file manager connector
#[derive(Parser)]
#[command(name = "finder")]
#[command(about = "Command connector for browser-based hierarchical file managers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Sled store directory (implies the sled backend)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply logging flags on top of the loaded configuration.
    pub fn apply_logging_overrides(&self, config: &mut FinderConfig) {
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage collections
    Collection {
        #[command(subcommand)]
        command: CollectionCommands,
    },
    /// Send one connector request, given as key=value pairs
    Request {
        /// Collection to open
        collection: CollectionID,
        /// Request parameters, e.g. cmd=open target=fc1_ tree=1
        #[arg(required = true)]
        pairs: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum CollectionCommands {
    /// Create a collection with an empty root directory
    Create { name: String },
    /// List collections
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// CLI context owning the loaded configuration and library
pub struct CliContext {
    config: FinderConfig,
    library: Library,
}

impl CliContext {
    /// Load configuration, install logging and open the store.
    pub fn new(cli: &Cli) -> Result<Self, ApiError> {
        let mut config = match &cli.config {
            Some(path) => ConfigLoader::load_from_file(path),
            None => ConfigLoader::load(),
        }
        .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        cli.apply_logging_overrides(&mut config);
        init_logging(Some(&config.logging))?;
        Self::with_config(config, cli.store.clone())
    }

    pub fn with_config(mut config: FinderConfig, store: Option<PathBuf>) -> Result<Self, ApiError> {
        if let Some(path) = store {
            config.storage = StorageConfig::sled(path);
        }
        config.storage = config.storage.clone().resolved()?;
        if config.storage.backend == StorageBackend::Memory {
            warn!("Using the in-memory store; changes are discarded on exit");
        }
        let library = Library::from_config(&config.storage)?;
        Ok(Self { config, library })
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let output = match command {
            Commands::Collection { command } => self.handle_collection_command(command)?,
            Commands::Request { collection, pairs } => self.handle_request(*collection, pairs)?,
        };
        self.library.flush()?;
        Ok(output)
    }

    fn handle_collection_command(&self, command: &CollectionCommands) -> Result<String, ApiError> {
        match command {
            CollectionCommands::Create { name } => {
                let collection = self.library.create_collection(name)?;
                Ok(format!(
                    "Created collection {} ({})",
                    collection.name, collection.collection_id
                ))
            }
            CollectionCommands::List { format } => {
                let collections = self.library.collections()?;
                match format.as_str() {
                    "json" => Ok(format_collections_json(&collections)),
                    "text" => Ok(format_collections_text(&collections)),
                    other => Err(ApiError::InvalidRequest(format!(
                        "Unknown format: {}",
                        other
                    ))),
                }
            }
        }
    }

    fn handle_request(&self, collection: CollectionID, pairs: &[String]) -> Result<String, ApiError> {
        let request = Request::from_pairs(parse_pairs(pairs)?);
        let volume = self.library.open(collection)?;
        info!(collection, command = ?request.command(), "Running connector request");
        let response = Connector::new(&volume, &self.config.client).run(&request);
        Ok(response.body_string())
    }
}

/// Split `key=value` arguments.
fn parse_pairs(pairs: &[String]) -> Result<Vec<(String, String)>, ApiError> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| {
                    ApiError::InvalidRequest(format!("Expected key=value, got '{}'", pair))
                })
        })
        .collect()
}

fn format_collections_text(collections: &[CollectionRecord]) -> String {
    if collections.is_empty() {
        return "No collections found.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["ID", "Name", "Volume", "Root"]);
    for collection in collections {
        table.add_row(vec![
            collection.collection_id.to_string(),
            collection.name.clone(),
            crate::types::volume_id_for(collection.collection_id),
            format!("{}_", crate::types::volume_id_for(collection.collection_id)),
        ]);
    }
    format!("{}\n\nTotal: {} collection(s)", table, collections.len())
}

fn format_collections_json(collections: &[CollectionRecord]) -> String {
    let list: Vec<_> = collections
        .iter()
        .map(|collection| {
            json!({
                "id": collection.collection_id,
                "name": collection.name,
                "volume": crate::types::volume_id_for(collection.collection_id),
            })
        })
        .collect();
    let out = json!({ "collections": list, "total": collections.len() });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}
