//! Main entry point for the neural-field CLI

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logger at the requested verbosity; RUST_LOG still wins
    let default_level = match (cli.verbose, cli.quiet) {
        (0, true) => "error",
        (0, false) => "warn",
        (1, _) => "info",
        (2, _) => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match cli.command {
        Commands::Render {
            field,
            frames,
            out,
            every,
            fps,
            realtime,
        } => commands::render(&field, frames, &out, every, fps, realtime),
        Commands::Simulate { field, frames } => commands::simulate(&field, frames),
        Commands::Config => commands::print_default_config(),
    }
}
