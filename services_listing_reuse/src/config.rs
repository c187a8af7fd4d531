//! Reuse configuration
//!
//! Read once at startup and injected into the controller. Nothing in the
//! core mutates it afterwards.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default persistent listing name
pub const DEFAULT_MAGIC_BUFFER_NAME: &str = "*dired*";

/// Errors that can occur while loading configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

/// Listing reuse configuration
///
/// Missing fields take their defaults, so `{}` is a valid document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReuseConfig {
    /// Version of the config format
    pub version: u32,
    /// Enables persistent-name retention
    pub use_magic_buffer: bool,
    /// The reserved persistent listing name
    pub magic_buffer_name: String,
}

impl ReuseConfig {
    /// Current version of the config format
    pub const CURRENT_VERSION: u32 = 1;

    /// Creates the default configuration
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            use_magic_buffer: true,
            magic_buffer_name: DEFAULT_MAGIC_BUFFER_NAME.to_string(),
        }
    }

    /// Sets whether the persistent name is retained
    pub fn with_magic(mut self, enabled: bool) -> Self {
        self.use_magic_buffer = enabled;
        self
    }

    /// Sets the persistent listing name
    pub fn with_magic_name(mut self, name: impl Into<String>) -> Self {
        self.magic_buffer_name = name.into();
        self
    }

    /// Parses and validates a JSON document
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: ReuseConfig =
            serde_json::from_slice(bytes).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let bytes = fs::read(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json(&bytes)
    }

    /// Serializes to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Checks invariants the core relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version > Self::CURRENT_VERSION {
            return Err(ConfigError::UnsupportedVersion(self.version));
        }
        if self.magic_buffer_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "magic_buffer_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns true if `name` is the persistent name and retention is on
    pub fn is_magic(&self, name: &str) -> bool {
        self.use_magic_buffer && self.magic_buffer_name == name
    }
}

impl Default for ReuseConfig {
    fn default() -> Self {
        Self::new()
    }
}
