use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod setup;

pub use setup::{init_logging, verbosity_filter};

#[derive(Parser, Debug)]
#[command(name = "nativestub")]
#[command(about = "Stub generator for native extension modules", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate .pyi stubs from module snapshots
    Generate {
        /// Module snapshot files (JSON)
        #[arg(required = true)]
        snapshots: Vec<PathBuf>,

        /// Output directory (defaults to `out`, or `[output] directory` from config)
        #[arg(short = 'o', long = "output-dir")]
        output_dir: Option<PathBuf>,

        /// Omit the provenance header
        #[arg(long = "no-header")]
        no_header: bool,

        /// Print stubs to stdout instead of writing files
        #[arg(long, conflicts_with = "output_dir")]
        stdout: bool,

        /// Configuration file (defaults to discovering .nativestub.toml)
        #[arg(short = 'c', long = "config", env = "NATIVESTUB_CONFIG")]
        config: Option<PathBuf>,

        /// Increase verbosity level (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Show how each symbol of a snapshot is classified
    Inspect {
        /// Module snapshot file (JSON)
        snapshot: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Increase verbosity level (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Commands::Generate { verbosity, .. } | Commands::Inspect { verbosity, .. } => {
                *verbosity
            }
        }
    }
}
