//! Walks the exported chunk tree and checks it against the grid it came from.

use std::collections::HashSet;

use voxwrite_voxel::{Rgba, VoxEncoder, Voxel, VoxelGrid};

struct Chunk<'a> {
    id: [u8; 4],
    content: &'a [u8],
    children: &'a [u8],
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

/// Splits `bytes` into consecutive chunks, panicking on any length mismatch.
fn parse_chunks(mut bytes: &[u8]) -> Vec<Chunk<'_>> {
    let mut chunks = Vec::new();
    while !bytes.is_empty() {
        assert!(bytes.len() >= 12, "truncated chunk header");
        let id: [u8; 4] = bytes[0..4].try_into().unwrap();
        let content_len = read_u32(bytes, 4) as usize;
        let children_len = read_u32(bytes, 8) as usize;
        let end = 12 + content_len + children_len;
        assert!(bytes.len() >= end, "chunk {:?} overruns input", id);
        chunks.push(Chunk {
            id,
            content: &bytes[12..12 + content_len],
            children: &bytes[12 + content_len..end],
        });
        bytes = &bytes[end..];
    }
    chunks
}

fn export(grid: &VoxelGrid) -> Vec<u8> {
    let mut buf = Vec::new();
    VoxEncoder::export(grid, &mut buf).unwrap();
    buf
}

/// Returns the MAIN chunk's children in file order.
fn model_chunks(bytes: &[u8]) -> Vec<Chunk<'_>> {
    assert_eq!(&bytes[0..4], b"VOX ");
    assert_eq!(read_u32(bytes, 4), 150);
    let top = parse_chunks(&bytes[8..]);
    assert_eq!(top.len(), 1, "exactly one top-level chunk");
    assert_eq!(&top[0].id, b"MAIN");
    assert!(top[0].content.is_empty());
    let children = parse_chunks(top[0].children);
    let ids: Vec<&[u8; 4]> = children.iter().map(|c| &c.id).collect();
    assert_eq!(ids, vec![b"SIZE", b"XYZI", b"RGBA"]);
    for child in &children {
        assert!(child.children.is_empty());
    }
    children
}

fn decode_voxels(xyzi: &[u8]) -> Vec<Voxel> {
    let count = read_u32(xyzi, 0) as usize;
    assert_eq!(xyzi.len(), 4 + count * 4);
    xyzi[4..]
        .chunks_exact(4)
        .map(|r| Voxel::new(r[0], r[1], r[2], r[3]))
        .collect()
}

#[test]
fn test_two_voxel_scenario() {
    let mut grid = VoxelGrid::new(1, 1, 1);
    grid.set_voxel(0, 0, 0, 5);
    grid.set_voxel(1, 1, 1, 7);
    assert_eq!(grid.voxel_count(), 2);

    let bytes = export(&grid);
    let chunks = model_chunks(&bytes);

    let size = chunks[0].content;
    assert_eq!(
        [read_u32(size, 0), read_u32(size, 4), read_u32(size, 8)],
        [2, 2, 2]
    );

    let mut voxels = decode_voxels(chunks[1].content);
    voxels.sort_by_key(|v| v.coord);
    assert_eq!(voxels, vec![Voxel::new(0, 0, 0, 5), Voxel::new(1, 1, 1, 7)]);

    let default = VoxelGrid::new(0, 0, 0);
    let expected: Vec<u8> = default.palette().iter().flat_map(|c| c.to_bytes()).collect();
    assert_eq!(chunks[2].content, expected.as_slice());
}

#[test]
fn test_empty_grid_scenario() {
    let grid = VoxelGrid::new(0, 0, 0);
    let bytes = export(&grid);
    assert_eq!(bytes.len(), 20 + 0x434);

    let chunks = model_chunks(&bytes);
    let size = chunks[0].content;
    assert_eq!(
        [read_u32(size, 0), read_u32(size, 4), read_u32(size, 8)],
        [1, 1, 1]
    );
    assert!(decode_voxels(chunks[1].content).is_empty());
    assert_eq!(chunks[2].content.len(), 1024);
}

#[test]
fn test_cleared_voxel_not_exported() {
    let mut grid = VoxelGrid::new(9, 9, 9);
    grid.set_voxel(4, 5, 6, 3);
    grid.set_voxel(4, 5, 6, 0);
    assert_eq!(grid.voxel_count(), 0);

    let bytes = export(&grid);
    let chunks = model_chunks(&bytes);
    assert!(decode_voxels(chunks[1].content).is_empty());
}

#[test]
fn test_size_reflects_asymmetric_bounds() {
    let grid = VoxelGrid::new(255, 0, 25);
    let bytes = export(&grid);
    let chunks = model_chunks(&bytes);
    let size = chunks[0].content;
    assert_eq!(
        [read_u32(size, 0), read_u32(size, 4), read_u32(size, 8)],
        [256, 1, 26]
    );
}

#[test]
fn test_records_match_grid_exactly_once() {
    let mut grid = VoxelGrid::new(255, 255, 25);
    // A full row, clipped on z by the bounds.
    for x in 0..=255u8 {
        grid.set_voxel(x, 0, 0, 2);
        grid.set_voxel(x, 1, 30, 2);
    }
    grid.set_palette_color(2, Rgba::new(0xff, 0x80, 0x00, 0xff)).unwrap();
    assert_eq!(grid.voxel_count(), 256);

    let bytes = export(&grid);
    assert_eq!(bytes.len(), 20 + 256 * 4 + 0x434);

    let chunks = model_chunks(&bytes);
    let voxels = decode_voxels(chunks[1].content);
    assert_eq!(voxels.len(), 256);
    let unique: HashSet<Voxel> = voxels.iter().copied().collect();
    assert_eq!(unique.len(), 256);
    let expected: HashSet<Voxel> = grid.iter_voxels().collect();
    assert_eq!(unique, expected);

    assert_eq!(&chunks[2].content[4..8], &[0xff, 0x80, 0x00, 0xff]);
}

#[test]
fn test_length_formula_holds_for_varied_counts() {
    let mut grid = VoxelGrid::new(63, 63, 63);
    for n in 0..64u8 {
        grid.set_voxel(n, n, 63 - n, n.max(1));
        let bytes = export(&grid);
        let count = grid.voxel_count() as usize;
        assert_eq!(bytes.len(), 20 + count * 4 + 0x434);
        assert_eq!(bytes.len(), VoxEncoder::encoded_len(&grid));
    }
}
