//! Configuration file loading and parsing.
//!
//! Two YAML documents drive every run:
//!
//! 1. The global style document (line widths, courtyard grid, naming
//!    templates), merged first.
//! 2. The series document, merged second. Its top-level keys replace the
//!    global ones.
//!
//! The merged mapping is deserialised into a typed [`Config`] and validated
//! once, so a missing key or malformed template stops the run before any
//! footprint is generated.

mod settings;

pub use settings::{
    Config, CourtyardOffset, LoggingConfig, Orientation, OrientationStrings, TextFieldConfig,
    TextPosition,
};

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::ConfigError;

/// Default location of the global style document.
pub const DEFAULT_GLOBAL_CONFIG: &str = "config/global_config.yaml";

/// Default location of the connector series document.
pub const DEFAULT_SERIES_CONFIG: &str = "config/conn_config.yaml";

/// Loads, merges and validates the two configuration documents.
///
/// # Errors
///
/// Returns an error if:
/// - Either file cannot be found or read
/// - Either document is malformed YAML or not a mapping
/// - Required keys are missing or templates are invalid
/// - Values fail validation
pub fn load_config(global: &Path, series: &Path) -> Result<Config, ConfigError> {
    let mut merged = read_mapping(global)?;
    merge_into(&mut merged, read_mapping(series)?);

    let config = from_mapping(merged)?;
    tracing::debug!(
        global = %global.display(),
        series = %series.display(),
        "Loaded configuration"
    );
    Ok(config)
}

/// Parses, merges and validates configuration held in memory.
///
/// # Errors
///
/// Returns the same errors as [`load_config`], with `<global>` and
/// `<series>` standing in for file paths.
pub fn parse_config(global: &str, series: &str) -> Result<Config, ConfigError> {
    let mut merged = parse_mapping(global, Path::new("<global>"))?;
    merge_into(&mut merged, parse_mapping(series, Path::new("<series>"))?);
    from_mapping(merged)
}

fn from_mapping(merged: Mapping) -> Result<Config, ConfigError> {
    let config: Config = serde_yaml::from_value(Value::Mapping(merged))
        .map_err(|source| ConfigError::SchemaError { source })?;
    config.validate()?;
    Ok(config)
}

/// Overlays `overrides` onto `base`, replacing whole top-level values.
fn merge_into(base: &mut Mapping, overrides: Mapping) {
    for (key, value) in overrides {
        base.insert(key, value);
    }
}

fn read_mapping(path: &Path) -> Result<Mapping, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_mapping(&contents, path)
}

fn parse_mapping(contents: &str, path: &Path) -> Result<Mapping, ConfigError> {
    let value: Value = serde_yaml::from_str(contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    match value {
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(ConfigError::NotAMapping {
            path: PathBuf::from(path),
        }),
    }
}
