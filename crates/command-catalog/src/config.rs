//! Configuration for the command catalog

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::ingestion::{CategoryPolicy, DEFAULT_EXTENSIONS};

/// Environment variable naming the TOML config file
pub const CONFIG_ENV: &str = "COMMAND_CATALOG_CONFIG";

/// Main catalog configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Document store configuration
    pub storage: StorageConfig,
    /// Category policy
    pub categories: CategoryConfig,
    /// Ingestion configuration
    pub ingest: IngestConfig,
}

impl CatalogConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `COMMAND_CATALOG_CONFIG`, or defaults
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                tracing::info!("Loading configuration from {}", PathBuf::from(&path).display());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Category policy described by this configuration
    pub fn category_policy(&self) -> CategoryPolicy {
        match self.categories.mode {
            CategoryMode::Open => CategoryPolicy::Open,
            CategoryMode::Restricted => CategoryPolicy::restricted(self.categories.allowed.iter()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.categories.mode == CategoryMode::Restricted && self.categories.allowed.is_empty() {
            return Err(Error::config("Restricted category mode needs at least one allowed category"));
        }
        if self.ingest.accepted_extensions.is_empty() {
            return Err(Error::config("ingest.accepted_extensions must not be empty"));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 1MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
            max_upload_size: 1024 * 1024,
        }
    }
}

/// Which document store backs the catalog
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// SQLite file (ignored by the memory backend)
    pub database_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let database_path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("command-catalog")
            .join("commands.db");

        Self {
            backend: StorageBackend::default(),
            database_path,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CategoryMode {
    /// Any non-empty category is accepted
    #[default]
    Open,
    /// Only `allowed` categories are accepted
    Restricted,
}

/// Category configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    pub mode: CategoryMode,
    pub allowed: Vec<String>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            mode: CategoryMode::default(),
            allowed: [
                "Deployment",
                "Database",
                "Server Setup",
                "Security",
                "Tools",
                "Configuration",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// File extensions accepted for upload, without the dot
    pub accepted_extensions: Vec<String>,
    /// Directory of guides ingested at startup
    pub seed_dir: Option<PathBuf>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            accepted_extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            seed_dir: None,
        }
    }
}
