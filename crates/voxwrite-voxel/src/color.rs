//! RGBA colors and the fixed 256-entry palette written into the `RGBA` chunk.
//!
//! Palette slots are offset by one from logical color indices: slot 0 holds the
//! color of logical index 1, and slot 255 (logical 256) is never referenced by a
//! voxel because voxel indices are bytes.

use serde::{Deserialize, Serialize};

/// Number of entries in a palette.
pub const PALETTE_LEN: usize = 256;

/// A 32-bit color with one byte per channel, stored in `R, G, B, A` order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    /// Creates a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque gray with all color channels set to `level`.
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level, 255)
    }

    /// Unpacks a color from a `0xAARRGGBB` word.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Packs this color into a `0xAARRGGBB` word.
    pub const fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Returns the channels in on-disk order.
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

/// Builds the default palette: a grayscale ramp from white in slot 0 down to
/// black in slot 255, all fully opaque.
pub fn default_palette() -> [Rgba; PALETTE_LEN] {
    std::array::from_fn(|slot| Rgba::gray(255 - slot as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_is_grayscale_ramp() {
        let palette = default_palette();
        assert_eq!(palette.len(), 256);
        assert_eq!(palette[0], Rgba::WHITE);
        assert_eq!(palette[255], Rgba::BLACK);
        for (slot, color) in palette.iter().enumerate() {
            let level = 255 - slot as u8;
            assert_eq!(*color, Rgba::new(level, level, level, 255), "slot {slot}");
        }
    }

    #[test]
    fn test_argb_unpacks_channels() {
        let orange = Rgba::from_argb(0xffff_8000);
        assert_eq!(orange, Rgba::new(0xff, 0x80, 0x00, 0xff));
        assert_eq!(orange.to_argb(), 0xffff_8000);
    }

    #[test]
    fn test_bytes_are_rgba_order() {
        let c = Rgba::new(1, 2, 3, 4);
        assert_eq!(c.to_bytes(), [1, 2, 3, 4]);
        assert_eq!(Rgba::from([1, 2, 3, 4]), c);
    }
}
