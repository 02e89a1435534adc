//! Command-line argument parsing for the voxwrite generators.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, Pattern};

/// voxwrite command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "voxwrite", about = "Generate a voxel model and write it as a .vox file")]
pub struct CliArgs {
    /// Output `.vox` file path.
    pub output: PathBuf,

    /// Pattern to generate.
    #[arg(long, value_enum)]
    pub pattern: Option<Pattern>,

    /// RNG seed for the random walk.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of random-walk steps.
    #[arg(long)]
    pub steps: Option<u32>,

    /// Inclusive maximum x coordinate.
    #[arg(long)]
    pub max_x: Option<u8>,

    /// Inclusive maximum y coordinate.
    #[arg(long)]
    pub max_y: Option<u8>,

    /// Inclusive maximum z coordinate.
    #[arg(long)]
    pub max_z: Option<u8>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(pattern) = args.pattern {
            self.pattern = pattern;
        }
        if let Some(seed) = args.seed {
            self.random_walk.seed = seed;
        }
        if let Some(steps) = args.steps {
            self.random_walk.steps = steps;
        }
        if let Some(x) = args.max_x {
            self.grid.max_x = x;
        }
        if let Some(y) = args.max_y {
            self.grid.max_y = y;
        }
        if let Some(z) = args.max_z {
            self.grid.max_z = z;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
