//! Error types for loading story content and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for story content loading.
pub type ContentResult<T> = Result<T, ContentError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Defects in the story graph. All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The story file could not be read.
    #[error("failed to read story file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The story file is not a valid scene map.
    #[error("failed to parse story: {0}")]
    Parse(#[from] serde_json::Error),

    /// The story contains no scenes.
    #[error("story contains no scenes")]
    Empty,

    /// A scene declares an id different from the key it is stored under.
    #[error("scene stored under key '{key}' declares id '{id}'")]
    IdMismatch {
        /// Map key.
        key: String,
        /// Declared id.
        id: String,
    },
}

/// Problems with the engine configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config parsed but is unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
}
