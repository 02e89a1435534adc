//! Generates a procedural voxel model and writes it as a `.vox` file.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p voxwrite-demo -- wave.vox` for the default wave.
//! Run with `cargo run -p voxwrite-demo -- walk.vox --pattern random-walk --max-x 255 --max-y 255 --max-z 255`
//! for the mirrored random walk.

mod patterns;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use tracing::{error, info};
use voxwrite_config::{CliArgs, Config, Pattern, default_config_dir};
use voxwrite_voxel::{ExportError, PaletteError, VoxelGrid};

/// Color index used by the line pattern.
const LINE_INDEX: u8 = 2;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("palette override rejected: {0}")]
    Palette(#[from] PaletteError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Builds the grid described by `config`: runs the selected pattern, then
/// applies palette overrides.
fn build_grid(config: &Config) -> Result<VoxelGrid, DemoError> {
    let bounds = &config.grid;
    let mut grid = VoxelGrid::new(bounds.max_x, bounds.max_y, bounds.max_z);

    match config.pattern {
        Pattern::RandomWalk => {
            let mut rng = Xoshiro256StarStar::seed_from_u64(config.random_walk.seed);
            patterns::random_walk(&mut grid, &config.random_walk, &mut rng);
        }
        Pattern::Wave => patterns::wave(&mut grid, &config.wave),
        Pattern::Line => patterns::line(&mut grid, LINE_INDEX),
    }

    for entry in &config.palette.overrides {
        grid.set_palette_color(entry.index, entry.color)?;
    }

    Ok(grid)
}

fn run(config: &Config, output: &Path) -> Result<u32, DemoError> {
    info!("Generating {:?} in a {:?} grid", config.pattern, config.grid);
    let grid = build_grid(config)?;
    grid.export_to_path(output)?;
    Ok(grid.voxel_count())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args
        .config
        .clone()
        .or_else(default_config_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    if let Err(e) =
        voxwrite_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config))
    {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(&config, &args.output) {
        Ok(count) => {
            info!("Wrote {} voxels to {}", count, args.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Export to {} failed: {e}", args.output.display());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use voxwrite_config::PaletteOverride;
    use voxwrite_voxel::{Rgba, VoxEncoder};

    use super::*;

    #[test]
    fn test_build_grid_applies_palette_overrides() {
        let mut config = Config::default();
        config.pattern = Pattern::Line;
        config.grid.max_x = 9;
        let grid = build_grid(&config).unwrap();
        assert_eq!(grid.voxel_count(), 10);
        assert_eq!(grid.palette_color(2).unwrap(), Rgba::new(0xff, 0x80, 0x00, 0xff));
        // Other slots keep the grayscale default.
        assert_eq!(grid.palette_color(1).unwrap(), Rgba::WHITE);
    }

    #[test]
    fn test_build_grid_rejects_index_zero_override() {
        let mut config = Config::default();
        config.pattern = Pattern::Line;
        config.palette.overrides.push(PaletteOverride {
            index: 0,
            color: Rgba::BLACK,
        });
        assert!(matches!(
            build_grid(&config),
            Err(DemoError::Palette(PaletteError::InvalidIndex(0)))
        ));
    }

    #[test]
    fn test_run_writes_vox_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("wave.vox");
        let mut config = Config::default();
        config.grid.max_x = 31;
        config.grid.max_y = 31;
        config.grid.max_z = 31;

        let count = run(&config, &output).unwrap();
        assert!(count > 0);

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[0..4], b"VOX ");
        let expected = VoxEncoder::encoded_len(&build_grid(&config).unwrap());
        assert_eq!(bytes.len(), expected);
    }

    #[test]
    fn test_run_reports_export_failure() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("no-such-dir").join("out.vox");
        let mut config = Config::default();
        config.pattern = Pattern::Line;
        assert!(matches!(run(&config, &output), Err(DemoError::Export(_))));
    }
}
