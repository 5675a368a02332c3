//! Generation runs: build every footprint of a series and write it out.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::kicad::FootprintLibrary;
use crate::series::SeriesGenerator;

/// Record of one written footprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFootprint {
    /// Series identifier.
    pub series: String,
    /// Footprint name.
    pub name: String,
    /// Library the footprint was written to.
    pub library: String,
    /// Path of the `.kicad_mod` file.
    pub path: PathBuf,
    /// Number of pads, mounting pads included.
    pub pad_count: usize,
}

/// Generates every footprint of `series` into `library`.
///
/// Parts are processed in order and each file is written before the next
/// part is built.
///
/// # Errors
///
/// Returns an error if a library directory or footprint file cannot be
/// written. Files written before the failure are left in place.
pub fn generate(
    series: &dyn SeriesGenerator,
    config: &Config,
    library: &FootprintLibrary,
) -> Result<Vec<GeneratedFootprint>> {
    let lib_name = series.library_name(config);
    let mut generated = Vec::new();

    for footprint in series.footprints(config) {
        let path = library.write(&lib_name, &footprint)?;
        tracing::info!(
            series = series.id(),
            footprint = %footprint.name,
            path = %path.display(),
            "Generated footprint"
        );
        generated.push(GeneratedFootprint {
            series: series.id().to_string(),
            name: footprint.name.clone(),
            library: lib_name.clone(),
            path,
            pad_count: footprint.pads().count(),
        });
    }

    Ok(generated)
}

/// Writes a JSON manifest listing every generated footprint.
///
/// # Errors
///
/// Returns an error if the manifest cannot be encoded or written.
pub fn write_manifest(path: &Path, generated: &[GeneratedFootprint]) -> Result<()> {
    let json = serde_json::to_string_pretty(generated)?;
    std::fs::write(path, json + "\n").map_err(|source| Error::ManifestWrite {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), entries = generated.len(), "Wrote manifest");
    Ok(())
}
