//! Session configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOP_STORAGE` - Storage backend, `file` or `memory` (default: file)
//! - `SHOP_STATE_DIR` - Directory for file storage (default: .shop-state)
//! - `SHOP_LOG_FORMAT` - Log output, `text` or `json` (default: text)

use std::path::PathBuf;

use thiserror::Error;

/// Default directory for file-backed session state.
pub const DEFAULT_STATE_DIR: &str = ".shop-state";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where session state is mirrored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Nothing survives the process.
    Memory,
    /// One JSON file per store under `dir`.
    File { dir: PathBuf },
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    /// Storage backend for the stores
    pub storage: StorageBackend,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::File {
                dir: PathBuf::from(DEFAULT_STATE_DIR),
            },
            log_format: LogFormat::default(),
        }
    }
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable holds an unknown value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from a variable lookup function.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable holds an unknown value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let dir = get("SHOP_STATE_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_STATE_DIR), PathBuf::from);

        let storage = match get("SHOP_STORAGE").as_deref().map(str::trim) {
            None | Some("file") => StorageBackend::File { dir },
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "SHOP_STORAGE".to_string(),
                    format!("expected `file` or `memory`, got `{other}`"),
                ));
            }
        };

        let log_format = match get("SHOP_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "SHOP_LOG_FORMAT".to_string(),
                    format!("expected `text` or `json`, got `{other}`"),
                ));
            }
        };

        Ok(Self {
            storage,
            log_format,
        })
    }

    /// Replace the state directory, switching to file storage.
    #[must_use]
    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage = StorageBackend::File { dir: dir.into() };
        self
    }
}
