//! Configuration validation utilities

use super::*;
use crate::core::error::{Error, Result};

/// Validate the entire configuration
pub fn validate_config(config: &GeoframeConfig) -> Result<()> {
    validate_display_config(&config.display)?;
    validate_compute_config(&config.compute)?;
    validate_logging_config(&config.logging)?;

    Ok(())
}

/// Validate display configuration
pub fn validate_display_config(config: &DisplayConfig) -> Result<()> {
    if config.max_rows == 0 {
        return Err(Error::ConfigurationError(
            "max_rows must be greater than 0".to_string(),
        ));
    }
    if config.max_columns == 0 {
        return Err(Error::ConfigurationError(
            "max_columns must be greater than 0".to_string(),
        ));
    }
    if config.max_colwidth == 0 {
        return Err(Error::ConfigurationError(
            "max_colwidth must be greater than 0".to_string(),
        ));
    }
    // f64 carries at most 17 significant decimal digits
    if config.float_precision > 17 {
        return Err(Error::ConfigurationError(format!(
            "float_precision must be at most 17, got {}",
            config.float_precision
        )));
    }
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
pub fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    config.level_filter().map(|_| ())
}
