//! Error types for connector-footprints.
//!
//! Geometry code is total and never fails. Errors only arise while loading
//! configuration, writing footprint files, or writing the run manifest.

use std::path::PathBuf;

use thiserror::Error;

use crate::kicad::KicadError;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// A configuration document was valid YAML but not a key/value mapping.
    #[error("configuration file is not a mapping: {path}")]
    NotAMapping {
        /// Path to the offending file.
        path: PathBuf,
    },

    /// The merged configuration is missing keys or has wrongly typed values.
    #[error("invalid configuration")]
    SchemaError {
        /// The underlying YAML deserialisation error.
        #[source]
        source: serde_yaml::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// Errors raised while parsing a naming template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The placeholder names a field the template kind does not provide.
    #[error("unknown field '{field}' in template '{template}'")]
    UnknownField {
        /// The unknown field name.
        field: String,
        /// The template text.
        template: String,
    },

    /// The format spec after the colon could not be parsed.
    #[error("invalid format spec '{spec}' for field '{field}'")]
    InvalidSpec {
        /// The field name.
        field: String,
        /// The offending spec.
        spec: String,
    },

    /// The format spec does not apply to the field's type.
    #[error("format spec '{spec}' cannot be applied to {kind} field '{field}'")]
    TypeMismatch {
        /// The field name.
        field: String,
        /// The offending spec.
        spec: String,
        /// Human readable field kind.
        kind: &'static str,
    },

    /// A `{` or `}` without its partner.
    #[error("unbalanced brace in template '{template}'")]
    UnbalancedBrace {
        /// The template text.
        template: String,
    },
}

/// Top-level error for a generation run.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A footprint file could not be written.
    #[error(transparent)]
    Kicad(#[from] KicadError),

    /// The run manifest could not be written.
    #[error("failed to write manifest: {path}")]
    ManifestWrite {
        /// Manifest path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The run manifest could not be encoded.
    #[error("failed to encode manifest")]
    ManifestEncode(#[from] serde_json::Error),
}

/// Result type for generation runs.
pub type Result<T> = std::result::Result<T, Error>;
