//! Root CLI structure for neural-field

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use neural_field::particles::NeighborSearch;

#[derive(Parser)]
#[command(name = "neural-field")]
#[command(about = "Render and inspect the animated particle mesh", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render frames with the software rasterizer and write them as PNG
    Render {
        #[command(flatten)]
        field: FieldArgs,

        /// Number of frames to advance after the first
        #[arg(short, long, default_value_t = 120)]
        frames: u64,

        /// Output PNG path
        #[arg(short, long, default_value = "neural-field.png")]
        out: PathBuf,

        /// Also write every Nth frame, numbered after the output name
        #[arg(long)]
        every: Option<u64>,

        /// Frame rate of the fixed-rate host
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// Pace frames in real time instead of running flat out
        #[arg(long)]
        realtime: bool,
    },

    /// Step the simulation without drawing and report link statistics
    Simulate {
        #[command(flatten)]
        field: FieldArgs,

        /// Number of frames to simulate
        #[arg(short, long, default_value_t = 600)]
        frames: u64,
    },

    /// Print the default configuration as JSON
    Config,
}

/// Options shared by every command that builds a field.
#[derive(Args)]
pub struct FieldArgs {
    /// Surface width in pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Surface height in pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// RNG seed, overriding the configuration
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Particle count, overriding the configuration
    #[arg(short, long)]
    pub particles: Option<usize>,

    /// Link search strategy, overriding the configuration
    #[arg(long)]
    pub search: Option<SearchArg>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SearchArg {
    /// Test every pair
    AllPairs,
    /// Spatial grid
    Grid,
    /// Pick by particle count
    Auto,
}

impl From<SearchArg> for NeighborSearch {
    fn from(arg: SearchArg) -> Self {
        match arg {
            SearchArg::AllPairs => NeighborSearch::AllPairs,
            SearchArg::Grid => NeighborSearch::Grid,
            SearchArg::Auto => NeighborSearch::Auto,
        }
    }
}
