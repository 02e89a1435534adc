//! Procedural generators that fill a [`VoxelGrid`] through its public API.
//!
//! Generators may produce coordinates outside the grid; the grid drops those.

use std::f64::consts::PI;

use rand::Rng;
use voxwrite_config::{RandomWalkConfig, WaveConfig};
use voxwrite_voxel::VoxelGrid;

/// Step table for the random walk. Horizontal moves appear twice so the walk
/// spreads in x/y faster than it climbs.
const WALK_STEPS: [(i32, i32, i32); 10] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// Walks from `(128, 128, 0)`, placing four voxels mirrored across the
/// `x = 127.5` and `y = 127.5` planes at each step.
///
/// x and y wrap around at 256; z never goes below 0.
pub fn random_walk(grid: &mut VoxelGrid, cfg: &RandomWalkConfig, rng: &mut impl Rng) {
    let (mut x, mut y, mut z) = (128i32, 128i32, 0i32);

    for _ in 0..cfg.steps {
        let index = if rng.gen_bool(cfg.accent_chance) {
            cfg.accent_index
        } else {
            cfg.base_index
        };

        // x and y are always in 0..256 here.
        let (wx, wy) = (x as u8, y as u8);
        if let Ok(wz) = u8::try_from(z) {
            grid.set_voxel(wx, wy, wz, index);
            grid.set_voxel(255 - wx, wy, wz, index);
            grid.set_voxel(wx, 255 - wy, wz, index);
            grid.set_voxel(255 - wx, 255 - wy, wz, index);
        }

        let (dx, dy, dz) = WALK_STEPS[rng.gen_range(0..WALK_STEPS.len())];
        x = (x + dx).rem_euclid(256);
        y = (y + dy).rem_euclid(256);
        z = (z + dz).max(0);
    }

    tracing::debug!(steps = cfg.steps, voxels = grid.voxel_count(), "random walk done");
}

/// Fills a radial cosine surface centred on the grid.
///
/// The surface height at horizontal distance `t` from the centre is
/// `cz * (cos(t * π * frequency) * amplitude + 1)`; every cell within
/// `thickness` of that height is filled.
pub fn wave(grid: &mut VoxelGrid, cfg: &WaveConfig) {
    let [size_x, size_y, size_z] = grid.extents();
    let bounds = grid.bounds();
    let (cx, cy, cz) = (
        f64::from(size_x / 2),
        f64::from(size_y / 2),
        f64::from(size_z / 2),
    );

    for x in 0..=bounds.x {
        for y in 0..=bounds.y {
            let t = (f64::from(x) - cx).hypot(f64::from(y) - cy);
            let surface = wave_height(t, cz, cfg);
            for z in 0..=bounds.z {
                if (f64::from(z) - surface).abs() <= cfg.thickness {
                    grid.set_voxel(x, y, z, cfg.color_index);
                }
            }
        }
    }

    tracing::debug!(voxels = grid.voxel_count(), "wave done");
}

fn wave_height(t: f64, cz: f64, cfg: &WaveConfig) -> f64 {
    cz * ((t * PI * cfg.frequency).cos() * cfg.amplitude + 1.0)
}

/// Places a full-length row along x at `y = 0, z = 0`.
///
/// The row always spans 256 cells, so grids narrower than that keep only the
/// part that fits.
pub fn line(grid: &mut VoxelGrid, index: u8) {
    for x in 0..=u8::MAX {
        grid.set_voxel(x, 0, 0, index);
    }
}
