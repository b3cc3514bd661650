//! Validation of merged settings.

use crate::{Config, ConfigError};

/// Checks every setting of a merged config.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.query.date_field.trim().is_empty() {
        return Err(invalid("query.date_field", "must not be empty"));
    }
    positive("concordance.context_chars", config.concordance.context_chars)?;
    positive("concordance.max_terms", config.concordance.max_terms)?;
    positive("cache.capacity", config.cache.capacity)?;
    positive("cache.prefix_chars", config.cache.prefix_chars)?;

    let ratio = config.cache.retain_ratio;
    if !(ratio > 0.0 && ratio <= 1.0) {
        return Err(invalid(
            "cache.retain_ratio",
            &format!("{ratio} is not in (0, 1]"),
        ));
    }

    check_color("entities.default_color", &config.entities.default_color)?;
    for (label, style) in &config.entities.labels {
        check_color(&format!("entities.labels.{label}.color"), &style.color)?;
    }
    Ok(())
}

/// Rejects zero for a size setting.
fn positive(key: &str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(invalid(key, "must be greater than 0"));
    }
    Ok(())
}

/// Builds an [`ConfigError::InvalidValue`].
fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}

/// Accepts only `#rrggbb`.
fn check_color(key: &str, color: &str) -> Result<(), ConfigError> {
    let valid = color
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidColor {
            key: key.to_string(),
            color: color.to_string(),
        })
    }
}
