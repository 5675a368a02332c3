//! connector-footprints: parametric KiCad footprint generator for connector
//! series
//!
//! Every footprint is a pure function of a part's pin count, its series
//! constants and the style configuration. A run walks each series' part
//! range or part table and writes one `.kicad_mod` file per part.
//!
//! # Architecture
//!
//! - **Configuration**: two YAML documents (global style + series naming)
//!   merged and validated into a typed [`config::Config`]
//! - **Series generators**: derive dimensions and emit pads, outlines,
//!   courtyard and text for each part
//! - **KiCad output**: serialise footprints into `{library}.pretty/`
//!
//! # Modules
//!
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Error types
//! - [`generate`] - Generation runs and the output manifest
//! - [`kicad`] - Footprint model and `.kicad_mod` writer
//! - [`naming`] - Typed name and keyword templates
//! - [`series`] - Connector series generators

pub mod config;
pub mod error;
pub mod generate;
pub mod kicad;
pub mod naming;
pub mod series;

pub use error::{Error, Result};
