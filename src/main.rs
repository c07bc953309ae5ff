//! harwin-footprints: KiCad footprint generator for Harwin connectors
//!
//! Writes one `.kicad_mod` file per connector variant into a `.pretty`
//! library directory and prints each written path.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use harwin_footprints::config;
use harwin_footprints::connectors::{self, FamilySelection};
use harwin_footprints::kicad::WriteOptions;

/// Connector family to generate.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum FamilyArg {
    /// Harwin M80 dual row horizontal
    M80,
    /// Harwin LTek male vertical
    Ltek,
    /// All families
    All,
}

impl From<FamilyArg> for FamilySelection {
    fn from(arg: FamilyArg) -> Self {
        match arg {
            FamilyArg::M80 => Self::M80,
            FamilyArg::Ltek => Self::Ltek,
            FamilyArg::All => Self::All,
        }
    }
}

/// KiCad footprint generator for Harwin connectors.
///
/// Generates M80 dual row horizontal and LTek male vertical footprints
/// following the configured library conventions.
#[derive(Parser, Debug)]
#[command(name = "harwin-footprints")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output root; libraries are written as `<lib>.pretty` below it
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Global style configuration (JSON)
    #[arg(long, value_name = "FILE")]
    global_config: Option<PathBuf>,

    /// Series configuration (JSON), overrides global keys
    #[arg(long, value_name = "FILE")]
    series_config: Option<PathBuf>,

    /// Connector family to generate
    #[arg(short, long, value_enum, default_value_t = FamilyArg::All)]
    family: FamilyArg,

    /// Include semi-custom pin counts
    #[arg(long)]
    extended: bool,

    /// Write KiCad 4 compatible files
    #[arg(long)]
    kicad4_compatible: bool,

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
            _ => Level::WARN,
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

fn main() -> ExitCode {
    let args = Args::parse();

    let cfg = match config::load_config(
        args.global_config.as_deref(),
        args.series_config.as_deref(),
    ) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        output_dir = %args.output_dir.display(),
        family = ?args.family,
        "Starting footprint generation"
    );

    let options = WriteOptions {
        kicad4_compatible: args.kicad4_compatible || cfg.kicad4_compatible,
    };
    let families = connectors::select_families(args.family.into(), args.extended);

    match connectors::generate(&families, &cfg, &args.output_dir, options) {
        Ok(paths) => {
            for path in &paths {
                println!("{}", path.display());
            }
            info!(count = paths.len(), "Generation finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Generation failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn log_level_precedence() {
        assert_eq!(get_log_level(0, true, "trace"), Level::ERROR);
        assert_eq!(get_log_level(0, false, "debug"), Level::DEBUG);
        assert_eq!(get_log_level(0, false, "bogus"), Level::WARN);
        assert_eq!(get_log_level(2, false, "error"), Level::DEBUG);
    }

    #[test]
    fn defaults() {
        let args = Args::parse_from(["harwin-footprints"]);
        assert_eq!(args.family, FamilyArg::All);
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert!(!args.extended);
    }
}
