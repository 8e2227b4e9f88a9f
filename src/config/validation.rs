//! Configuration validation utilities

use super::*;
use crate::core::error::{Error, Result};
use chrono::NaiveDate;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Validate the entire configuration
pub fn validate_config(config: &TidyConfig) -> Result<()> {
    validate_csv_config(&config.csv)?;
    validate_compute_config(&config.compute)?;
    validate_logging_config(&config.logging)?;

    Ok(())
}

/// Validate CSV configuration
pub fn validate_csv_config(config: &CsvConfig) -> Result<()> {
    if config.date_format.trim().is_empty() {
        return Err(Error::ConfigurationError(
            "date_format cannot be empty".to_string(),
        ));
    }

    // A format chrono cannot render is rejected up front
    let sample = NaiveDate::from_ymd_opt(2000, 1, 31)
        .ok_or_else(|| Error::ConfigurationError("invalid sample date".to_string()))?;
    let mut rendered = String::new();
    if std::fmt::write(&mut rendered, format_args!("{}", sample.format(&config.date_format))).is_err() {
        return Err(Error::ConfigurationError(format!(
            "invalid date_format '{}'",
            config.date_format
        )));
    }

    config.delimiter_byte()?;

    Ok(())
}

/// Validate compute configuration
pub fn validate_compute_config(config: &ComputeConfig) -> Result<()> {
    if config.parallel_threshold == 0 {
        return Err(Error::ConfigurationError(
            "parallel_threshold must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
///
/// Accepts any `env_logger` filter: a bare level, a module path, or a list
/// such as `warn,tidyseries=debug`, optionally followed by `/regex`. Only
/// the level after `=` is checked.
pub fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    let directives = config.level.split('/').next().unwrap_or_default();
    for directive in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        let Some((_, level)) = directive.split_once('=') else {
            continue;
        };
        if !LOG_LEVELS.contains(&level.trim().to_ascii_lowercase().as_str()) {
            return Err(Error::ConfigurationError(format!(
                "Invalid log level: {}",
                level
            )));
        }
    }

    Ok(())
}
