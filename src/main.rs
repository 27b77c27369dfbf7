use anyhow::Result;
use clap::Parser;
use nativestub::cli::{init_logging, Cli, Commands};
use nativestub::commands::{handle_generate, handle_inspect, GenerateConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.verbosity());

    match cli.command {
        Commands::Generate {
            snapshots,
            output_dir,
            no_header,
            stdout,
            config,
            verbosity: _,
        } => handle_generate(GenerateConfig {
            snapshots,
            output_dir,
            no_header,
            stdout,
            config,
        }),
        Commands::Inspect {
            snapshot,
            format,
            verbosity: _,
        } => handle_inspect(&snapshot, format),
    }
}
