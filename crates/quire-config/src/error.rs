//! Error types for quire configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use toml::de;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// A numeric setting is outside its valid range.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Dotted setting name, e.g. `cache.retain_ratio`.
        key: String,
        /// What is wrong with the value.
        message: String,
    },

    /// A color is not written as `#rrggbb`.
    #[error("invalid color '{color}' for {key}: expected #rrggbb")]
    InvalidColor {
        /// Dotted setting name.
        key: String,
        /// The offending color.
        color: String,
    },
}
