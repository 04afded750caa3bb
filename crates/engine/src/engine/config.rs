//! Engine configuration via `cart.toml`
//!
//! On first open, a default `cart.toml` is created in the data directory.
//! To change settings, edit the file and reopen the engine.

use std::path::{Path, PathBuf};

use cartdb_core::Error;
use cartdb_durability::{DurabilityMode, JsonCodec};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// Config file name placed in the data directory.
pub const CONFIG_FILE_NAME: &str = "cart.toml";

/// Default name of the persisted document inside the data directory.
pub const DEFAULT_DOCUMENT_NAME: &str = "cart_data.json";

/// Failure to read, parse or validate `cart.toml`
#[derive(Debug, ThisError)]
pub enum ConfigError {
    /// The file exists but could not be read or written
    #[error("config file '{path}': {source}")]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("failed to parse config file '{path}': {reason}")]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// A value parsed but is not acceptable
    #[error("invalid {key} '{value}' in cart.toml: {expected}")]
    InvalidValue {
        /// Offending key
        key: &'static str,
        /// Offending value
        value: String,
        /// What would have been accepted
        expected: &'static str,
    },
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Io { path, source } => Error::storage_io(
                format!("config file '{}' is not accessible", path.display()),
                source,
            ),
            other => Error::storage(other.to_string()),
        }
    }
}

/// Engine configuration loaded from `cart.toml`.
///
/// # Example
///
/// ```toml
/// durability = "standard"
/// document = "cart_data.json"
/// pretty = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartConfig {
    /// Durability mode: `"standard"` or `"always"`.
    #[serde(default = "default_durability_str")]
    pub durability: String,
    /// File name of the persisted document.
    #[serde(default = "default_document")]
    pub document: String,
    /// Indent the persisted JSON.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_durability_str() -> String {
    "standard".to_string()
}

fn default_document() -> String {
    DEFAULT_DOCUMENT_NAME.to_string()
}

fn default_pretty() -> bool {
    true
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            durability: default_durability_str(),
            document: default_document(),
            pretty: default_pretty(),
        }
    }
}

impl CartConfig {
    /// Parse the durability string into a `DurabilityMode`.
    ///
    /// `cache` is not accepted here; in-memory engines come from
    /// `CartEngine::ephemeral`.
    pub fn durability_mode(&self) -> Result<DurabilityMode, ConfigError> {
        match self.durability.as_str() {
            "standard" => Ok(DurabilityMode::Standard),
            "always" => Ok(DurabilityMode::Always),
            other => Err(ConfigError::InvalidValue {
                key: "durability",
                value: other.to_string(),
                expected: "expected \"standard\" or \"always\"",
            }),
        }
    }

    /// Codec matching the `pretty` setting
    pub fn codec(&self) -> JsonCodec {
        if self.pretty {
            JsonCodec::pretty()
        } else {
            JsonCodec::compact()
        }
    }

    /// Path of the document inside `data_dir`
    pub fn document_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.document)
    }

    /// Check every value, not just the ones parsing enforces
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.durability_mode()?;

        let doc = self.document.as_str();
        let is_plain_name = !doc.trim().is_empty()
            && doc != "."
            && doc != ".."
            && !doc.contains('/')
            && !doc.contains('\\')
            && doc != CONFIG_FILE_NAME;
        if !is_plain_name {
            return Err(ConfigError::InvalidValue {
                key: "document",
                value: self.document.clone(),
                expected: "expected a plain file name inside the data directory",
            });
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Cart store configuration
#
# Durability mode: "standard" (default) or "always"
#   "standard" = atomic replace on every write, no fsync
#   "always"   = atomic replace plus fsync of file and directory
durability = "standard"

# File name of the persisted cart document inside this directory
document = "cart_data.json"

# Indent the persisted JSON for human readers
pretty = true
"#
    }

    /// Read, parse and validate config from a file path.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: CartConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns true if the file was created.
    pub fn write_default_if_missing(path: &Path) -> Result<bool, ConfigError> {
        if path.exists() {
            return Ok(false);
        }
        std::fs::write(path, Self::default_toml()).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(true)
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
