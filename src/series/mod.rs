//! Connector series generators.
//!
//! Each series module derives per-part dimensions from fixed series
//! constants and emits the footprint primitives for every part variant.
//!
//! # Supported Series
//!
//! - [`molex_ffc`] - Molex 52207 1.00 mm pitch FFC/FPC, 3 to 30 circuits
//! - [`phoenix_contact`] - Phoenix Contact PC 10.16 mm pitch terminal blocks
//!
//! # Example
//!
//! ```no_run
//! use connector_footprints::config::parse_config;
//! use connector_footprints::series::molex_ffc::Molex52207;
//!
//! # let (global, series) = ("", "");
//! let config = parse_config(global, series)?;
//! let fp = Molex52207::new().footprint(10, &config);
//! println!("{}", fp.to_kicad_mod());
//! # Ok::<(), connector_footprints::error::ConfigError>(())
//! ```

pub mod geometry;
pub mod molex_ffc;
pub mod phoenix_contact;
pub mod text_fields;

use crate::config::Config;
use crate::kicad::{Footprint, Model3d};

/// A family of parts sharing one set of series constants.
pub trait SeriesGenerator {
    /// Short identifier used in logs and on the command line.
    fn id(&self) -> &'static str;

    /// Name of the library the series is written to.
    fn library_name(&self, config: &Config) -> String;

    /// Yields every footprint in the series, in part order.
    ///
    /// Footprints are built as the iterator is advanced, so a caller can
    /// write each one out before the next is computed.
    fn footprints<'a>(&'a self, config: &'a Config) -> Box<dyn Iterator<Item = Footprint> + 'a>;
}

/// Returns every supported series generator.
#[must_use]
pub fn all() -> Vec<Box<dyn SeriesGenerator>> {
    vec![
        Box::new(molex_ffc::Molex52207::new()),
        Box::new(phoenix_contact::PhoenixContactPc::new()),
    ]
}

/// Returns the 3D model reference for a footprint in `lib_name`.
#[must_use]
pub fn model_for(config: &Config, lib_name: &str, fp_name: &str) -> Model3d {
    Model3d {
        path: format!(
            "{prefix}{lib_name}.3dshapes/{fp_name}.wrl",
            prefix = config.model_prefix
        ),
    }
}

/// Joins keyword text, dropping the gaps left by empty fields.
#[must_use]
pub fn normalise_tags(tags: &str) -> String {
    tags.split_whitespace().collect::<Vec<_>>().join(" ")
}
