//! Chunk-based `.vox` encoder for [`VoxelGrid`].
//!
//! Every chunk is a 4-byte ASCII id, a little-endian `u32` content length, a
//! little-endian `u32` children length, then the content bytes. The file holds
//! exactly one model.
//!
//! ## Binary Layout
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 4 | Magic `"VOX "` |
//! | 4 | 4 | Format version (`u32`, 150) |
//! | 8 | 12 | `MAIN` header: content 0, children `n × 4 + 0x434` |
//! | 20 | 24 | `SIZE` chunk: extents `max_x + 1`, `max_y + 1`, `max_z + 1` |
//! | 44 | 16 + n×4 | `XYZI` chunk: `n`, then `n` records of `x, y, z, index` |
//! | 60 + n×4 | 1036 | `RGBA` chunk: 256 palette colors as `r, g, b, a` |

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::color::PALETTE_LEN;
use crate::grid::VoxelGrid;

/// Magic bytes identifying the format.
pub const MAGIC: [u8; 4] = *b"VOX ";

/// Format version written after the magic.
pub const FORMAT_VERSION: u32 = 150;

const MAIN_ID: [u8; 4] = *b"MAIN";
const SIZE_ID: [u8; 4] = *b"SIZE";
const XYZI_ID: [u8; 4] = *b"XYZI";
const RGBA_ID: [u8; 4] = *b"RGBA";

/// Id plus content length plus children length.
const CHUNK_HEADER_LEN: u32 = 12;
const SIZE_CONTENT_LEN: u32 = 12;
const RGBA_CONTENT_LEN: u32 = 4 * PALETTE_LEN as u32;

/// Bytes under `MAIN` that do not depend on the voxel count: the whole `SIZE`
/// chunk, the `XYZI` header and count, and the whole `RGBA` chunk.
pub const MAIN_CHILDREN_OVERHEAD: u32 = 0x434;

static_assertions::const_assert_eq!(
    MAIN_CHILDREN_OVERHEAD,
    (CHUNK_HEADER_LEN + SIZE_CONTENT_LEN) + (CHUNK_HEADER_LEN + 4) + (CHUNK_HEADER_LEN + RGBA_CONTENT_LEN)
);

/// Errors that can occur while exporting a grid.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The output sink rejected a write or flush. The partial output is not a
    /// valid file.
    #[error("failed to write vox data: {0}")]
    Io(#[from] io::Error),
}

/// Stateless encoder from a [`VoxelGrid`] snapshot to the `.vox` byte layout.
pub struct VoxEncoder;

impl VoxEncoder {
    /// Writes `grid` to `sink` in the `.vox` format.
    ///
    /// Writes are buffered internally and flushed before returning.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] if the sink fails. The grid itself cannot
    /// produce an error.
    pub fn export(grid: &VoxelGrid, sink: impl Write) -> Result<(), ExportError> {
        let count = grid.voxel_count();
        let [size_x, size_y, size_z] = grid.extents();
        tracing::debug!(voxels = count, size_x, size_y, size_z, "encoding vox grid");

        let mut out = BufWriter::new(sink);

        out.write_all(&MAGIC)?;
        write_u32(&mut out, FORMAT_VERSION)?;
        write_chunk_header(&mut out, MAIN_ID, 0, main_children_len(count))?;

        write_chunk_header(&mut out, SIZE_ID, SIZE_CONTENT_LEN, 0)?;
        write_u32(&mut out, size_x)?;
        write_u32(&mut out, size_y)?;
        write_u32(&mut out, size_z)?;

        write_chunk_header(&mut out, XYZI_ID, 4 + count * 4, 0)?;
        write_u32(&mut out, count)?;
        let mut written = 0u32;
        for voxel in grid.iter_voxels() {
            out.write_all(&voxel.to_bytes())?;
            written += 1;
        }
        debug_assert_eq!(written, count, "XYZI record count must match header");

        write_chunk_header(&mut out, RGBA_ID, RGBA_CONTENT_LEN, 0)?;
        for color in grid.palette() {
            out.write_all(&color.to_bytes())?;
        }

        out.flush()?;
        Ok(())
    }

    /// Returns the exact number of bytes [`Self::export`] writes for `grid`.
    pub fn encoded_len(grid: &VoxelGrid) -> usize {
        // Magic, version and the MAIN header precede MAIN's children.
        (4 + 4 + CHUNK_HEADER_LEN) as usize + main_children_len(grid.voxel_count()) as usize
    }
}

impl VoxelGrid {
    /// Exports this grid to a file at `path`, creating or truncating it.
    ///
    /// The file handle is closed on every return path. If an error is
    /// returned, the file contents are invalid and should be discarded.
    pub fn export_to_path(&self, path: &Path) -> Result<(), ExportError> {
        let file = File::create(path)?;
        VoxEncoder::export(self, file)?;
        tracing::info!(
            "Exported {} voxels ({} bytes) to {}",
            self.voxel_count(),
            VoxEncoder::encoded_len(self),
            path.display()
        );
        Ok(())
    }
}

fn main_children_len(voxel_count: u32) -> u32 {
    voxel_count * 4 + MAIN_CHILDREN_OVERHEAD
}

fn write_u32(out: &mut impl Write, value: u32) -> io::Result<()> {
    out.write_all(&value.to_le_bytes())
}

fn write_chunk_header(
    out: &mut impl Write,
    id: [u8; 4],
    content_len: u32,
    children_len: u32,
) -> io::Result<()> {
    out.write_all(&id)?;
    write_u32(out, content_len)?;
    write_u32(out, children_len)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
