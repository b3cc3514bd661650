//! Configuration system for quire.
//!
//! quire uses TOML configuration files named `.quire.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.quire.toml` files found, then loading `~/.quire.toml` as the global config with lowest
//! precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
mod validate;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub use discovery::{
    CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config,
};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawCacheSettings, RawConcordanceSettings, RawConfig, RawEntitySettings, RawLabel,
    RawQuerySettings, parse_config_file, parse_config_str,
};
use quire_query::{DEFAULT_DATE_FIELD, QueryMode};
use serde::{Deserialize, Serialize};
pub use templates::local_template;
use validate::validate_config;

/// Top-level merged configuration for quire.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.quire.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Query compilation settings.
    pub query: QuerySettings,
    /// Concordance view settings.
    pub concordance: ConcordanceSettings,
    /// Annotation cache settings.
    pub cache: CacheSettings,
    /// Entity label display settings.
    pub entities: EntitySettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.quire.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Discovers all `.quire.toml` files from `cwd` up to the filesystem root
    /// 2. Appends `~/.quire.toml` if it exists
    /// 3. Parses each file
    /// 4. Merges them according to precedence rules (closest to `cwd` wins)
    /// 5. Validates the merged result
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let config = merge_configs(&parsed);
        config.validate()?;
        Ok(config)
    }

    /// Checks that every setting is usable.
    ///
    /// Rejects empty field names, zero sizes, retain ratios outside `(0, 1]` and
    /// colors not written as `#rrggbb`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            query: &self.query,
            concordance: &self.concordance,
            cache: &self.cache,
            entities: &self.entities,
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// Query compilation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QuerySettings {
    /// Field targeted by the date range clause.
    pub date_field: String,
    /// Default compilation mode.
    pub mode: QueryMode,
    /// Keep entries in typed order instead of bucketing by operator.
    pub custom_grouping: bool,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            date_field: DEFAULT_DATE_FIELD.to_string(),
            mode: QueryMode::Advanced,
            custom_grouping: false,
        }
    }
}

/// Concordance view settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConcordanceSettings {
    /// Characters of context on each side of a match.
    pub context_chars: usize,
    /// Maximum number of terms searched for.
    pub max_terms: usize,
    /// Windows closer than this many characters are fused.
    pub fuse_gap: usize,
}

impl Default for ConcordanceSettings {
    fn default() -> Self {
        Self {
            context_chars: 100,
            max_terms: 5,
            fuse_gap: 20,
        }
    }
}

/// Annotation cache settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Maximum number of cached cells.
    pub capacity: usize,
    /// Share of the newest entries kept when the cache is full.
    pub retain_ratio: f64,
    /// Characters of cell text included in the cache key.
    pub prefix_chars: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            capacity: 1000,
            retain_ratio: 0.6,
            prefix_chars: 100,
        }
    }
}

/// Entity label display settings.
///
/// Labels listed here extend or override the built-in label table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EntitySettings {
    /// Color for labels without a style.
    pub default_color: String,
    /// Label styles keyed by raw label.
    pub labels: BTreeMap<String, LabelSettings>,
}

impl Default for EntitySettings {
    fn default() -> Self {
        Self {
            default_color: String::from("#9e9e9e"),
            labels: BTreeMap::new(),
        }
    }
}

/// Display style of one entity label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LabelSettings {
    /// Display name.
    pub name: String,
    /// Base color, `#rrggbb`.
    pub color: String,
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Query compilation settings.
    query: &'a QuerySettings,
    /// Concordance view settings.
    concordance: &'a ConcordanceSettings,
    /// Annotation cache settings.
    cache: &'a CacheSettings,
    /// Entity label display settings.
    entities: &'a EntitySettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_settings_defaults() {
        let query = QuerySettings::default();
        assert_eq!(query.date_field, "date");
        assert_eq!(query.mode, QueryMode::Advanced);
        assert!(!query.custom_grouping);
    }

    #[test]
    fn test_concordance_settings_defaults() {
        let concordance = ConcordanceSettings::default();
        assert_eq!(concordance.context_chars, 100);
        assert_eq!(concordance.max_terms, 5);
        assert_eq!(concordance.fuse_gap, 20);
    }

    #[test]
    fn test_cache_settings_defaults() {
        let cache = CacheSettings::default();
        assert_eq!(cache.capacity, 1000);
        assert!((cache.retain_ratio - 0.6).abs() < f64::EPSILON);
        assert_eq!(cache.prefix_chars, 100);
    }

    #[test]
    fn test_config_default_is_valid() {
        let config = Config::default();
        assert!(config.config_root.is_none());
        assert!(config.entities.labels.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn test_load_from_no_files() {
        let config = Config::load_from_files(&[]).unwrap();
        assert_eq!(config.cache.capacity, 1000);
    }

    #[test]
    fn test_settings_to_toml() {
        let mut config = Config::default();
        config.entities.labels.insert(
            "WORK".into(),
            LabelSettings {
                name: "Work of art".into(),
                color: "#aabbcc".into(),
            },
        );
        let toml = config.settings_to_toml();

        assert!(toml.contains("[query]"));
        assert!(toml.contains("[concordance]"));
        assert!(toml.contains("[cache]"));
        assert!(toml.contains("[entities]"));

        assert!(toml.contains("date_field = \"date\""));
        assert!(toml.contains("mode = \"advanced\""));
        assert!(toml.contains("context_chars = 100"));
        assert!(toml.contains("capacity = 1000"));

        let parsed: toml::Value =
            toml::from_str(&toml).expect("settings_to_toml should produce valid TOML");
        assert_eq!(
            parsed["entities"]["labels"]["WORK"]["name"].as_str(),
            Some("Work of art")
        );
    }
}
