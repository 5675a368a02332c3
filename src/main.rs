//! connector-footprints: parametric KiCad footprint generator for connector
//! series
//!
//! Loads the global and series configuration, then writes one `.kicad_mod`
//! file per part into `{library}.pretty/` directories under the output root.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use connector_footprints::config::{self, DEFAULT_GLOBAL_CONFIG, DEFAULT_SERIES_CONFIG};
use connector_footprints::generate::{generate, write_manifest, GeneratedFootprint};
use connector_footprints::kicad::FootprintLibrary;
use connector_footprints::series::{self, SeriesGenerator};

/// Which series to generate.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SeriesChoice {
    /// Molex 52207 FFC/FPC connectors
    #[value(name = "molex-52207")]
    Molex52207,
    /// Phoenix Contact PC terminal blocks
    #[value(name = "phoenix-contact")]
    PhoenixContact,
    /// Every supported series
    All,
}

impl SeriesChoice {
    fn matches(self, generator: &dyn SeriesGenerator) -> bool {
        match self {
            Self::All => true,
            Self::Molex52207 => generator.id() == "molex-52207",
            Self::PhoenixContact => generator.id() == "phoenix-contact",
        }
    }
}

/// Parametric KiCad footprint generator for connector series.
///
/// Writes one footprint file per part variant, named and styled by the
/// global and series configuration files.
#[derive(Parser, Debug)]
#[command(name = "connector-footprints")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file defining how the footprints look (line widths, text, courtyard)
    #[arg(long = "global_config", alias = "global-config", value_name = "PATH", default_value = DEFAULT_GLOBAL_CONFIG)]
    global_config: PathBuf,

    /// Config file defining series naming parameters
    #[arg(long = "series_config", alias = "series-config", value_name = "PATH", default_value = DEFAULT_SERIES_CONFIG)]
    series_config: PathBuf,

    /// Directory the `.pretty` libraries are written into
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Series to generate
    #[arg(short, long, value_enum, default_value_t = SeriesChoice::All)]
    series: SeriesChoice,

    /// Write a JSON manifest of the generated files
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Entry point for the connector-footprints generator.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let cfg = match config::load_config(&args.global_config, &args.series_config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            if let Some(source) = std::error::Error::source(&e) {
                eprintln!("  caused by: {source}");
            }
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        output_dir = %args.output_dir.display(),
        "Starting footprint generation"
    );

    let library = FootprintLibrary::new(&args.output_dir);
    let mut generated: Vec<GeneratedFootprint> = Vec::new();

    for generator in series::all() {
        if !args.series.matches(generator.as_ref()) {
            continue;
        }
        match generate(generator.as_ref(), &cfg, &library) {
            Ok(mut written) => {
                info!(series = generator.id(), count = written.len(), "Series done");
                generated.append(&mut written);
            }
            Err(e) => {
                error!(series = generator.id(), error = %e, "Generation failed");
                return ExitCode::FAILURE;
            }
        }
    }

    if let Some(path) = &args.manifest {
        if let Err(e) = write_manifest(path, &generated) {
            error!(error = %e, "Manifest failed");
            return ExitCode::FAILURE;
        }
    }

    info!(count = generated.len(), "Generation complete");
    ExitCode::SUCCESS
}
