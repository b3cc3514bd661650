//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules.

use std::path::{Path, PathBuf};

use crate::{
    CacheSettings, ConcordanceSettings, Config, EntitySettings, LabelSettings, QuerySettings,
    parse::{
        RawCacheSettings, RawConcordanceSettings, RawConfig, RawEntitySettings, RawQuerySettings,
    },
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings: first defined value wins (highest precedence)
/// - Entity labels: merged by label, first definition wins completely
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    if configs.is_empty() {
        return Config::default();
    }

    let mut query = QuerySettings::default();
    let mut concordance = ConcordanceSettings::default();
    let mut cache = CacheSettings::default();
    let mut entities = EntitySettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        let raw = &parsed.config;
        if let Some(ref v) = raw.query {
            apply_raw_query(&mut query, v);
        }
        if let Some(ref v) = raw.concordance {
            apply_raw_concordance(&mut concordance, v);
        }
        if let Some(ref v) = raw.cache {
            apply_raw_cache(&mut cache, v);
        }
        if let Some(ref v) = raw.entities {
            apply_raw_entities(&mut entities, v);
        }
    }

    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(Path::to_path_buf);

    Config {
        query,
        concordance,
        cache,
        entities,
        config_root,
    }
}

/// Applies raw query settings to result.
fn apply_raw_query(result: &mut QuerySettings, raw: &RawQuerySettings) {
    if let Some(ref v) = raw.date_field {
        result.date_field = v.clone();
    }
    if let Some(v) = raw.mode {
        result.mode = v;
    }
    if let Some(v) = raw.custom_grouping {
        result.custom_grouping = v;
    }
}

/// Applies raw concordance settings to result.
fn apply_raw_concordance(result: &mut ConcordanceSettings, raw: &RawConcordanceSettings) {
    if let Some(v) = raw.context_chars {
        result.context_chars = v;
    }
    if let Some(v) = raw.max_terms {
        result.max_terms = v;
    }
    if let Some(v) = raw.fuse_gap {
        result.fuse_gap = v;
    }
}

/// Applies raw cache settings to result.
fn apply_raw_cache(result: &mut CacheSettings, raw: &RawCacheSettings) {
    if let Some(v) = raw.capacity {
        result.capacity = v;
    }
    if let Some(v) = raw.retain_ratio {
        result.retain_ratio = v;
    }
    if let Some(v) = raw.prefix_chars {
        result.prefix_chars = v;
    }
}

/// Applies raw entity settings to result.
///
/// A label defined here replaces any lower-precedence definition of the same
/// label as a whole; missing fields fall back to the label itself and the
/// default color in effect at this level.
fn apply_raw_entities(result: &mut EntitySettings, raw: &RawEntitySettings) {
    if let Some(ref v) = raw.default_color {
        result.default_color = v.clone();
    }
    let Some(ref labels) = raw.labels else {
        return;
    };
    for (label, style) in labels {
        let settings = LabelSettings {
            name: style.name.clone().unwrap_or_else(|| label.clone()),
            color: style
                .color
                .clone()
                .unwrap_or_else(|| result.default_color.clone()),
        };
        result.labels.insert(label.clone(), settings);
    }
}

#[cfg(test)]
mod tests {
    use quire_query::QueryMode;

    use super::*;
    use crate::parse::parse_config;

    /// Builds a parsed config from TOML with a fake path.
    fn parsed(path: &str, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config(toml).unwrap(),
        }
    }

    #[test]
    fn test_merge_empty_configs() {
        let config = merge_configs(&[]);
        assert!(config.config_root.is_none());
        assert_eq!(config.cache.capacity, 1000);
    }

    #[test]
    fn test_merge_single_config() {
        let config = merge_configs(&[parsed(
            "/project/.quire.toml",
            "[query]\ndate_field = \"published\"\n",
        )]);
        assert_eq!(config.query.date_field, "published");
        assert_eq!(config.query.mode, QueryMode::Advanced);
        assert_eq!(config.config_root, Some(PathBuf::from("/project")));
    }

    #[test]
    fn test_merge_scalar_override() {
        let local = parsed(
            "/project/.quire.toml",
            "[cache]\ncapacity = 10\n[query]\nmode = \"simple\"\n",
        );
        let global = parsed(
            "/home/user/.quire.toml",
            "[cache]\ncapacity = 500\nprefix_chars = 40\n[query]\nmode = \"raw\"\n",
        );
        let config = merge_configs(&[local, global]);

        assert_eq!(config.cache.capacity, 10);
        assert_eq!(config.cache.prefix_chars, 40);
        assert_eq!(config.query.mode, QueryMode::Simple);
        assert_eq!(config.config_root, Some(PathBuf::from("/project")));
    }

    #[test]
    fn test_merge_three_way() {
        let closest = parsed("/a/b/c/.quire.toml", "[concordance]\ncontext_chars = 30\n");
        let middle = parsed(
            "/a/b/.quire.toml",
            "[concordance]\ncontext_chars = 60\nmax_terms = 2\n",
        );
        let global = parsed(
            "/home/.quire.toml",
            "[concordance]\nmax_terms = 9\nfuse_gap = 5\n",
        );
        let config = merge_configs(&[closest, middle, global]);

        assert_eq!(config.concordance.context_chars, 30);
        assert_eq!(config.concordance.max_terms, 2);
        assert_eq!(config.concordance.fuse_gap, 5);
    }

    #[test]
    fn test_merge_labels_first_wins() {
        let local = parsed(
            "/project/.quire.toml",
            "[entities.labels.PER]\nname = \"Human\"\n",
        );
        let global = parsed(
            "/home/.quire.toml",
            "[entities.labels.PER]\nname = \"Person\"\ncolor = \"#111111\"\n\n[entities.labels.LAW]\ncolor = \"#222222\"\n",
        );
        let config = merge_configs(&[local, global]);

        let per = &config.entities.labels["PER"];
        assert_eq!(per.name, "Human");
        assert_eq!(per.color, "#9e9e9e");

        let law = &config.entities.labels["LAW"];
        assert_eq!(law.name, "LAW");
        assert_eq!(law.color, "#222222");
    }

    #[test]
    fn test_merge_label_uses_level_default_color() {
        let config = merge_configs(&[parsed(
            "/project/.quire.toml",
            "[entities]\ndefault_color = \"#abcdef\"\n\n[entities.labels.NORP]\nname = \"Group\"\n",
        )]);
        assert_eq!(config.entities.default_color, "#abcdef");
        assert_eq!(config.entities.labels["NORP"].color, "#abcdef");
    }
}
