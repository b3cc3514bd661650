//! Configuration file parsing.
//!
//! Parses individual `.quire.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{collections::HashMap, fs, path::Path};

use quire_query::QueryMode;
use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Query compilation section.
    pub query: Option<RawQuerySettings>,
    /// Concordance section.
    pub concordance: Option<RawConcordanceSettings>,
    /// Annotation cache section.
    pub cache: Option<RawCacheSettings>,
    /// Entity label section.
    pub entities: Option<RawEntitySettings>,
}

/// Raw query settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawQuerySettings {
    /// Field targeted by the date range clause.
    pub date_field: Option<String>,
    /// Default compilation mode: `simple`, `advanced` or `raw`.
    pub mode: Option<QueryMode>,
    /// Keep entries in typed order.
    pub custom_grouping: Option<bool>,
}

/// Raw concordance settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConcordanceSettings {
    /// Characters of context on each side of a match.
    pub context_chars: Option<usize>,
    /// Maximum number of terms searched for.
    pub max_terms: Option<usize>,
    /// Windows closer than this are fused.
    pub fuse_gap: Option<usize>,
}

/// Raw cache settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCacheSettings {
    /// Maximum number of cached cells.
    pub capacity: Option<usize>,
    /// Share of entries kept on eviction (0.0-1.0].
    pub retain_ratio: Option<f64>,
    /// Characters of cell text included in the cache key.
    pub prefix_chars: Option<usize>,
}

/// Raw entity settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEntitySettings {
    /// Color for labels without a style.
    pub default_color: Option<String>,
    /// Label styles: raw label -> style.
    pub labels: Option<HashMap<String, RawLabel>>,
}

/// Raw label style from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLabel {
    /// Display name (defaults to the raw label).
    pub name: Option<String>,
    /// Base color, `#rrggbb` (defaults to `entities.default_color`).
    pub color: Option<String>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
