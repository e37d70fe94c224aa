//! Configuration files, environment overrides and validation

use std::env;
use std::fs;

use geoframe::config::GeoframeConfig;
use geoframe::error::{ErrorKind, Result};
use tempfile::tempdir;

#[test]
fn test_yaml_file_round_trip() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("geoframe.yaml");

    let mut config = GeoframeConfig::default();
    config.display.max_rows = 25;
    config.compute.parallel_enabled = false;
    config.save_to_file(&path)?;

    let loaded = GeoframeConfig::from_file(&path)?;
    assert_eq!(loaded, config);
    Ok(())
}

#[test]
fn test_toml_file_round_trip_in_new_directory() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("nested").join("geoframe.toml");

    let mut config = GeoframeConfig::default();
    config.display.float_precision = 6;
    config.logging.level = "debug".to_string();
    config.save_to_file(&path)?;

    assert!(path.exists());
    assert_eq!(GeoframeConfig::from_file(&path)?, config);
    Ok(())
}

#[test]
fn test_partial_files_fill_defaults() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("partial.yml");
    fs::write(&path, "display:\n  max_columns: 4\n")?;

    let loaded = GeoframeConfig::from_file(&path)?;
    assert_eq!(loaded.display.max_columns, 4);
    assert_eq!(loaded.display.max_rows, 10);
    assert_eq!(loaded.compute, GeoframeConfig::default().compute);
    Ok(())
}

#[test]
fn test_bad_files_are_configuration_errors() -> Result<()> {
    let dir = tempdir()?;

    let missing = dir.path().join("absent.yaml");
    let err = GeoframeConfig::from_file(&missing).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    let json = dir.path().join("geoframe.json");
    fs::write(&json, "{}")?;
    let err = GeoframeConfig::from_file(&json).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    let err = GeoframeConfig::from_toml("display = 3").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    Ok(())
}

#[test]
fn test_validation() {
    let mut config = GeoframeConfig::default();
    assert!(config.validate().is_ok());

    config.compute.parallel_threshold = 0;
    assert!(config.validate().is_err());

    let mut config = GeoframeConfig::default();
    config.logging.level = "chatty".to_string();
    assert!(config.validate().is_err());
    assert!(geoframe::config::set(config).is_err());
}

// Environment variables are process-wide, so every env-dependent check
// lives in this one test.
#[test]
fn test_environment_overrides_file() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("geoframe.toml");
    fs::write(
        &path,
        "[display]\nmax_rows = 40\nmax_colwidth = 12\n\n[compute]\nparallel_enabled = false\n",
    )?;

    env::remove_var("GEOFRAME_LOG_LEVEL");
    env::set_var("GEOFRAME_PARALLEL_THRESHOLD", "1000");
    let loaded = GeoframeConfig::load_with_precedence(Some(&path));
    env::remove_var("GEOFRAME_PARALLEL_THRESHOLD");
    let loaded = loaded?;
    assert_eq!(loaded.display.max_rows, 40);
    assert_eq!(loaded.display.max_colwidth, 12);
    assert_eq!(loaded.compute.parallel_threshold, 1000);
    assert!(!loaded.compute.parallel_enabled);

    // Values equal to the defaults still beat the file
    env::set_var("GEOFRAME_MAX_ROWS", "10");
    env::set_var("GEOFRAME_PARALLEL_ENABLED", "true");
    let loaded = GeoframeConfig::load_with_precedence(Some(&path));
    env::remove_var("GEOFRAME_MAX_ROWS");
    env::remove_var("GEOFRAME_PARALLEL_ENABLED");
    let loaded = loaded?;
    assert_eq!(loaded.display.max_rows, 10);
    assert!(loaded.compute.parallel_enabled);
    assert_eq!(loaded.display.max_colwidth, 12);

    // RUST_LOG filter directives are left to the logger
    env::set_var("RUST_LOG", "geoframe=debug");
    let filtered = GeoframeConfig::load_with_precedence(None::<&str>);
    env::set_var("RUST_LOG", "warn");
    let bare = GeoframeConfig::load_with_precedence(None::<&str>);
    env::remove_var("RUST_LOG");
    assert_eq!(filtered?.logging.level, "info");
    assert_eq!(bare?.logging.level, "warn");

    env::set_var("GEOFRAME_MAX_COLUMNS", "many");
    let err = GeoframeConfig::from_env().unwrap_err();
    env::remove_var("GEOFRAME_MAX_COLUMNS");
    assert_eq!(err.kind(), ErrorKind::Configuration);
    Ok(())
}
