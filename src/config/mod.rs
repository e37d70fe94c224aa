//! Configuration management for geoframe
//!
//! Settings can come from defaults, YAML/TOML files and environment
//! variables. A process-wide copy is read by frame rendering and grid
//! reductions.

use std::path::Path;
use std::sync::RwLock;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

pub mod loader;
pub mod validation;

lazy_static! {
    static ref CURRENT: RwLock<GeoframeConfig> = RwLock::new(GeoframeConfig::default());
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoframeConfig {
    /// Text rendering of frames
    pub display: DisplayConfig,
    /// Grid computation settings
    pub compute: ComputeConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Display configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rows shown before the remainder is summarized
    pub max_rows: usize,
    /// Columns shown before the remainder is elided
    pub max_columns: usize,
    /// Longest cell text, in characters
    pub max_colwidth: usize,
    /// Digits after the decimal point for floats
    pub float_precision: usize,
}

/// Computation configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputeConfig {
    /// Allow scans to run on the rayon pool
    pub parallel_enabled: bool,
    /// Element count from which scans go parallel
    pub parallel_threshold: usize,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (off, error, warn, info, debug, trace)
    pub level: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_rows: 10,
            max_columns: 10,
            max_colwidth: 35,
            float_precision: 3,
        }
    }
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self {
            parallel_enabled: true,
            parallel_threshold: 50_000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parses the configured level
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level.parse::<log::LevelFilter>().map_err(|_| {
            Error::ConfigurationError(format!("Invalid log level: {}", self.level))
        })
    }

    /// Applies the level to the `log` facade
    pub fn apply(&self) -> Result<()> {
        log::set_max_level(self.level_filter()?);
        Ok(())
    }
}

impl ComputeConfig {
    /// Whether a scan over `len` elements should use the thread pool
    pub fn use_parallel(&self, len: usize) -> bool {
        self.parallel_enabled && len >= self.parallel_threshold
    }
}

impl GeoframeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        loader::load_from_env()
    }

    /// Load configuration from a file (YAML or TOML)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        loader::load_from_file(path.as_ref())
    }

    /// Load configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        loader::load_from_yaml(yaml)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml: &str) -> Result<Self> {
        loader::load_from_toml(toml)
    }

    /// Load configuration with precedence: defaults -> file -> environment
    pub fn load_with_precedence<P: AsRef<Path>>(config_file: Option<P>) -> Result<Self> {
        loader::load_with_precedence(config_file)
    }

    /// Validate configuration and return errors if invalid
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        loader::save_to_file(self, path.as_ref())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            Error::ConfigurationError(format!("Failed to serialize config to YAML: {}", e))
        })
    }

    /// Convert to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| {
            Error::ConfigurationError(format!("Failed to serialize config to TOML: {}", e))
        })
    }

    /// Merge another configuration into this one.
    ///
    /// Fields of `other` that differ from the defaults win.
    pub fn merge(&mut self, other: &GeoframeConfig) {
        let display = DisplayConfig::default();
        if other.display.max_rows != display.max_rows {
            self.display.max_rows = other.display.max_rows;
        }
        if other.display.max_columns != display.max_columns {
            self.display.max_columns = other.display.max_columns;
        }
        if other.display.max_colwidth != display.max_colwidth {
            self.display.max_colwidth = other.display.max_colwidth;
        }
        if other.display.float_precision != display.float_precision {
            self.display.float_precision = other.display.float_precision;
        }

        let compute = ComputeConfig::default();
        if other.compute.parallel_enabled != compute.parallel_enabled {
            self.compute.parallel_enabled = other.compute.parallel_enabled;
        }
        if other.compute.parallel_threshold != compute.parallel_threshold {
            self.compute.parallel_threshold = other.compute.parallel_threshold;
        }

        if other.logging.level != LoggingConfig::default().level {
            self.logging.level = other.logging.level.clone();
        }
    }
}

/// Snapshot of the process-wide configuration
pub fn get() -> GeoframeConfig {
    match CURRENT.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Replaces the process-wide configuration after validating it
pub fn set(config: GeoframeConfig) -> Result<()> {
    config.validate()?;
    log::debug!("installing configuration: {:?}", config);
    match CURRENT.write() {
        Ok(mut guard) => *guard = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
    Ok(())
}
