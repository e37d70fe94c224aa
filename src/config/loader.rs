//! Configuration loading utilities
//!
//! This module handles loading configuration from various sources with proper
//! precedence and validation.

use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use super::*;
use crate::core::error::{Error, Result};

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::ConfigurationError(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(None),
    }
}

/// Load configuration from environment variables
pub fn load_from_env() -> Result<GeoframeConfig> {
    let mut config = GeoframeConfig::default();
    apply_env(&mut config)?;
    Ok(config)
}

/// Overwrite every field whose environment variable is set.
///
/// A variable set to the default value still replaces what the file said.
pub fn apply_env(config: &mut GeoframeConfig) -> Result<()> {
    // Display configuration
    if let Some(rows) = parse_var("GEOFRAME_MAX_ROWS")? {
        config.display.max_rows = rows;
    }
    if let Some(columns) = parse_var("GEOFRAME_MAX_COLUMNS")? {
        config.display.max_columns = columns;
    }
    if let Some(width) = parse_var("GEOFRAME_MAX_COLWIDTH")? {
        config.display.max_colwidth = width;
    }
    if let Some(precision) = parse_var("GEOFRAME_FLOAT_PRECISION")? {
        config.display.float_precision = precision;
    }

    // Compute configuration
    if let Some(parallel) = parse_var("GEOFRAME_PARALLEL_ENABLED")? {
        config.compute.parallel_enabled = parallel;
    }
    if let Some(threshold) = parse_var("GEOFRAME_PARALLEL_THRESHOLD")? {
        config.compute.parallel_threshold = threshold;
    }

    // Logging configuration
    if let Ok(level) = env::var("GEOFRAME_LOG_LEVEL") {
        config.logging.level = level;
    } else if let Ok(directives) = env::var("RUST_LOG") {
        // Only a bare level applies; filter directives belong to the logger
        match directives.trim().parse::<log::LevelFilter>() {
            Ok(_) => config.logging.level = directives.trim().to_string(),
            Err(_) => log::debug!("ignoring RUST_LOG directives {:?}", directives),
        }
    }

    Ok(())
}

/// Load configuration from a file (YAML or TOML based on extension)
pub fn load_from_file(path: &Path) -> Result<GeoframeConfig> {
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

    log::debug!("loading configuration from {}", path.display());

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => load_from_yaml(&contents),
        Some("toml") => load_from_toml(&contents),
        Some(ext) => Err(Error::ConfigurationError(format!(
            "Unsupported config file format: {}",
            ext
        ))),
        None => {
            // Try to parse as YAML first, then TOML
            load_from_yaml(&contents).or_else(|_| load_from_toml(&contents))
        }
    }
}

/// Load configuration from YAML string
pub fn load_from_yaml(yaml: &str) -> Result<GeoframeConfig> {
    serde_yaml::from_str(yaml)
        .map_err(|e| Error::ConfigurationError(format!("Failed to parse YAML config: {}", e)))
}

/// Load configuration from TOML string
pub fn load_from_toml(toml: &str) -> Result<GeoframeConfig> {
    toml::from_str(toml)
        .map_err(|e| Error::ConfigurationError(format!("Failed to parse TOML config: {}", e)))
}

/// Load configuration with precedence: defaults -> file -> environment
pub fn load_with_precedence<P: AsRef<Path>>(config_file: Option<P>) -> Result<GeoframeConfig> {
    // Sections missing from the file keep their defaults
    let mut config = match config_file {
        Some(file_path) => load_from_file(file_path.as_ref())?,
        None => GeoframeConfig::default(),
    };

    // Environment has the highest precedence
    apply_env(&mut config)?;

    config.validate()?;

    Ok(config)
}

/// Save configuration to a file
pub fn save_to_file(config: &GeoframeConfig, path: &Path) -> Result<()> {
    let contents = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => config.to_yaml()?,
        Some("toml") => config.to_toml()?,
        Some(ext) => {
            return Err(Error::ConfigurationError(format!(
                "Unsupported config file format: {}",
                ext
            )))
        }
        None => config.to_yaml()?,
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
