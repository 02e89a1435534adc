//! Sparse voxel grids with a 256-color palette and a byte-exact `.vox` chunk encoder.

pub mod color;
pub mod grid;
pub mod vox_encoder;

pub use color::{PALETTE_LEN, Rgba, default_palette};
pub use grid::{Coordinate, EMPTY_INDEX, PaletteError, Voxel, VoxelGrid};
pub use vox_encoder::{ExportError, FORMAT_VERSION, MAGIC, MAIN_CHILDREN_OVERHEAD, VoxEncoder};
