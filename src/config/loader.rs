// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and merging.

use crate::error::{ConfigError, Result, ValkitError};
use std::path::{Path, PathBuf};

use super::schema::ValidatorConfig;

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["valkit.toml", ".valkit.toml", ".config/valkit.toml"];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    if let Some(home) = dirs::home_dir() {
        for config_name in CONFIG_FILES {
            let config_path = home.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }
    }

    // XDG config directory
    let config_dir = dirs::config_dir()?;
    let xdg_config = config_dir.join("valkit").join("config.toml");
    xdg_config.exists().then_some(xdg_config)
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<ValidatorConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            Ok(ValidatorConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<ValidatorConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(ValkitError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path)?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<ValidatorConfig> {
    let config: ValidatorConfig = toml::from_str(content).map_err(|e| {
        ValkitError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })?;

    for (key, rule) in &config.rules {
        if key.trim().is_empty() {
            return Err(ValkitError::Config(ConfigError::InvalidValue {
                key: "rules".to_string(),
                message: "rule keys cannot be blank".to_string(),
            }));
        }
        if rule.rule.as_deref().is_some_and(|r| r.trim().is_empty()) {
            return Err(ValkitError::Config(ConfigError::InvalidValue {
                key: format!("rules.{}.rule", key),
                message: "rule name cannot be blank".to_string(),
            }));
        }
    }

    Ok(config)
}

/// Merge two configurations, with the overlay taking precedence.
///
/// Flags enabled in either configuration stay enabled, except
/// `include_builtin`, which the overlay may turn off. Rule tables are merged
/// by key with overlay entries replacing base entries.
pub fn merge_configs(base: ValidatorConfig, overlay: ValidatorConfig) -> ValidatorConfig {
    let mut rules = base.rules;
    rules.extend(overlay.rules);

    ValidatorConfig {
        throw_on_failure: overlay.throw_on_failure || base.throw_on_failure,
        treat_warnings_as_errors: overlay.treat_warnings_as_errors
            || base.treat_warnings_as_errors,
        formatter: if overlay.formatter != Default::default() {
            overlay.formatter
        } else {
            base.formatter
        },
        include_builtin: overlay.include_builtin && base.include_builtin,
        rules,
    }
}
