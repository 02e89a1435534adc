//! Sparse voxel grid with a fixed inclusive bounding box and a 256-color palette.
//!
//! Only non-empty voxels are stored. Writing color index 0 clears a cell, and
//! writes outside the bounds are dropped without error so procedural callers
//! can overshoot freely.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{PALETTE_LEN, Rgba, default_palette};

/// Color index reserved for "no voxel here".
pub const EMPTY_INDEX: u8 = 0;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A cell position inside a grid, one byte per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    /// X component.
    pub x: u8,
    /// Y component.
    pub y: u8,
    /// Z component.
    pub z: u8,
}

impl Coordinate {
    /// Creates a coordinate from its components.
    pub const fn new(x: u8, y: u8, z: u8) -> Self {
        Self { x, y, z }
    }
}

/// A placed voxel: its position plus a logical color index.
///
/// Index 0 means "empty" and is never stored in a grid; 1..=255 select a
/// palette color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Voxel {
    /// Cell position.
    pub coord: Coordinate,
    /// Logical color index.
    pub index: u8,
}

impl Voxel {
    /// Creates a voxel at `(x, y, z)` with color `index`.
    pub const fn new(x: u8, y: u8, z: u8, index: u8) -> Self {
        Self {
            coord: Coordinate::new(x, y, z),
            index,
        }
    }

    /// Returns the on-disk `XYZI` record: `x, y, z, index`.
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.coord.x, self.coord.y, self.coord.z, self.index]
    }
}

/// Errors raised by palette access.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    /// Logical color indices run from 1 to 255; 0 is the empty sentinel.
    #[error("invalid logical palette index {0}: expected 1..=255")]
    InvalidIndex(u8),
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A bounded, sparse voxel volume plus its color palette.
///
/// The grid spans `[0, max]` inclusive on each axis, so a grid built with
/// `new(1, 1, 1)` holds 2×2×2 cells. `voxel_count()` always equals the number
/// of stored voxels.
#[derive(Clone, Debug)]
pub struct VoxelGrid {
    /// Inclusive maximum coordinate on each axis.
    bounds: Coordinate,
    /// Non-empty voxels keyed by position.
    voxels: FxHashMap<Coordinate, u8>,
    /// Number of entries in `voxels`.
    live_count: u32,
    /// Palette slot `i` holds the color of logical index `i + 1`.
    palette: [Rgba; PALETTE_LEN],
}

impl VoxelGrid {
    /// Creates an empty grid spanning `[0, max_x] × [0, max_y] × [0, max_z]`
    /// with the default grayscale palette.
    pub fn new(max_x: u8, max_y: u8, max_z: u8) -> Self {
        Self {
            bounds: Coordinate::new(max_x, max_y, max_z),
            voxels: FxHashMap::default(),
            live_count: 0,
            palette: default_palette(),
        }
    }

    /// Sets or clears the voxel at `(x, y, z)`.
    ///
    /// A non-zero `index` inserts or overwrites the voxel; index 0 removes it.
    /// Coordinates outside the grid bounds are ignored.
    pub fn set_voxel(&mut self, x: u8, y: u8, z: u8, index: u8) {
        if !self.contains(x, y, z) {
            tracing::trace!("VoxelGrid::set_voxel out of bounds: ({}, {}, {})", x, y, z);
            return;
        }
        let coord = Coordinate::new(x, y, z);
        if index == EMPTY_INDEX {
            if self.voxels.remove(&coord).is_some() {
                self.live_count -= 1;
            }
        } else if self.voxels.insert(coord, index).is_none() {
            self.live_count += 1;
        }
    }

    /// Sets or clears a voxel given as a record. Same rules as [`Self::set_voxel`].
    pub fn place(&mut self, voxel: Voxel) {
        let Coordinate { x, y, z } = voxel.coord;
        self.set_voxel(x, y, z, voxel.index);
    }

    /// Removes every voxel. The palette is left untouched.
    pub fn clear(&mut self) {
        self.voxels.clear();
        self.live_count = 0;
    }

    /// Assigns the color of a logical palette index (1..=255).
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidIndex`] for index 0.
    pub fn set_palette_color(&mut self, logical_index: u8, color: Rgba) -> Result<(), PaletteError> {
        let slot = Self::palette_slot(logical_index)?;
        self.palette[slot] = color;
        Ok(())
    }

    /// Returns the color of a logical palette index (1..=255).
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidIndex`] for index 0.
    pub fn palette_color(&self, logical_index: u8) -> Result<Rgba, PaletteError> {
        Ok(self.palette[Self::palette_slot(logical_index)?])
    }

    /// Returns all 256 palette slots in on-disk order.
    pub fn palette(&self) -> &[Rgba; PALETTE_LEN] {
        &self.palette
    }

    /// Returns the number of placed voxels.
    pub fn voxel_count(&self) -> u32 {
        debug_assert_eq!(self.live_count as usize, self.voxels.len());
        self.live_count
    }

    /// Returns `true` if no voxels are placed.
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Returns the color index at `(x, y, z)`, or `None` if the cell is empty
    /// or out of bounds.
    pub fn voxel(&self, x: u8, y: u8, z: u8) -> Option<u8> {
        self.voxels.get(&Coordinate::new(x, y, z)).copied()
    }

    /// Iterates over all placed voxels.
    ///
    /// Order is unspecified but stable while the grid is not modified.
    pub fn iter_voxels(&self) -> impl Iterator<Item = Voxel> + '_ {
        self.voxels.iter().map(|(&coord, &index)| Voxel { coord, index })
    }

    /// Returns the inclusive maximum coordinate on each axis.
    pub fn bounds(&self) -> Coordinate {
        self.bounds
    }

    /// Returns the number of cells along each axis (`max + 1`).
    pub fn extents(&self) -> [u32; 3] {
        [
            self.bounds.x as u32 + 1,
            self.bounds.y as u32 + 1,
            self.bounds.z as u32 + 1,
        ]
    }

    /// Checks whether `(x, y, z)` lies inside the grid bounds.
    pub fn contains(&self, x: u8, y: u8, z: u8) -> bool {
        x <= self.bounds.x && y <= self.bounds.y && z <= self.bounds.z
    }

    fn palette_slot(logical_index: u8) -> Result<usize, PaletteError> {
        if logical_index == EMPTY_INDEX {
            return Err(PaletteError::InvalidIndex(logical_index));
        }
        Ok(logical_index as usize - 1)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
