//! Configuration loading utilities
//!
//! This module handles loading configuration from various sources with proper
//! precedence and validation.

use super::*;
use crate::core::error::{Error, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Load configuration from environment variables over the defaults
pub fn load_from_env() -> Result<TidyConfig> {
    let mut config = TidyConfig::default();
    apply_env(&mut config)?;
    Ok(config)
}

/// Override `config` with any `TIDYSERIES_*` variables that are set
pub fn apply_env(config: &mut TidyConfig) -> Result<()> {
    // CSV configuration
    if let Ok(format) = env::var("TIDYSERIES_DATE_FORMAT") {
        config.csv.date_format = format;
    }

    if let Ok(delimiter) = env::var("TIDYSERIES_DELIMITER") {
        config.csv.delimiter = delimiter;
    }

    // Compute configuration
    if let Ok(parallel) = env::var("TIDYSERIES_PARALLEL") {
        config.compute.parallel_enabled = parallel.parse().map_err(|e| {
            Error::ConfigurationError(format!("Invalid TIDYSERIES_PARALLEL: {}", e))
        })?;
    }

    if let Ok(threshold) = env::var("TIDYSERIES_PARALLEL_THRESHOLD") {
        config.compute.parallel_threshold = threshold.parse().map_err(|e| {
            Error::ConfigurationError(format!("Invalid TIDYSERIES_PARALLEL_THRESHOLD: {}", e))
        })?;
    }

    // Logging configuration
    if let Ok(log_level) = env::var("TIDYSERIES_LOG_LEVEL") {
        config.logging.level = log_level;
    }

    Ok(())
}

/// Load configuration from a file (YAML or TOML based on extension)
pub fn load_from_file(path: &Path) -> Result<TidyConfig> {
    if !path.exists() {
        return Err(Error::ConfigurationError(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        Error::ConfigurationError(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => load_from_yaml(&contents),
        Some("toml") => load_from_toml(&contents),
        Some(ext) => Err(Error::ConfigurationError(format!(
            "Unsupported config file format: {}",
            ext
        ))),
        None => load_from_yaml(&contents).or_else(|_| load_from_toml(&contents)),
    }
}

/// Load configuration from YAML string
pub fn load_from_yaml(yaml: &str) -> Result<TidyConfig> {
    serde_yaml::from_str(yaml)
        .map_err(|e| Error::ConfigurationError(format!("Failed to parse YAML config: {}", e)))
}

/// Load configuration from TOML string
pub fn load_from_toml(toml: &str) -> Result<TidyConfig> {
    toml::from_str(toml)
        .map_err(|e| Error::ConfigurationError(format!("Failed to parse TOML config: {}", e)))
}

/// Load configuration with precedence: defaults -> file -> environment
pub fn load_with_precedence<P: AsRef<Path>>(config_file: Option<P>) -> Result<TidyConfig> {
    let mut config = match config_file {
        Some(file_path) => load_from_file(file_path.as_ref())?,
        None => TidyConfig::default(),
    };

    // Environment has the highest precedence
    apply_env(&mut config)?;

    config.validate()?;
    Ok(config)
}

/// Save configuration to a file
pub fn save_to_file(config: &TidyConfig, path: &Path) -> Result<()> {
    let contents = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") | None => config.to_yaml()?,
        Some("toml") => config.to_toml()?,
        Some(ext) => {
            return Err(Error::ConfigurationError(format!(
                "Unsupported config file format: {}",
                ext
            )))
        }
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::ConfigurationError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    fs::write(path, contents).map_err(|e| {
        Error::ConfigurationError(format!(
            "Failed to write config file {}: {}",
            path.display(),
            e
        ))
    })
}

/// Get configuration file paths in order of precedence
pub fn get_config_file_paths() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = Vec::new();

    if let Ok(explicit) = env::var("TIDYSERIES_CONFIG") {
        paths.push(explicit.into());
    }

    // Current directory
    paths.push("tidyseries.yml".into());
    paths.push("tidyseries.yaml".into());
    paths.push("tidyseries.toml".into());

    paths
}

/// First configuration file on the search path that exists
pub fn find_config_file() -> Option<PathBuf> {
    get_config_file_paths().into_iter().find(|p| p.exists())
}
