//! Flat colors and the per-triangle palette
use serde::{Deserialize, Serialize};

/// Opaque 24-bit color handed to the drawing collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RAYWHITE: Rgb = Rgb::new(245, 245, 245);
    pub const BLUE: Rgb = Rgb::new(0, 121, 241);
    pub const RED: Rgb = Rgb::new(230, 41, 55);
    pub const GREEN: Rgb = Rgb::new(0, 228, 48);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as 0x00RRGGBB
    pub fn to_u32(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

/// Colors cycled over the triangle list, two triangles per entry
pub const PALETTE: [Rgb; 3] = [Rgb::BLUE, Rgb::RED, Rgb::GREEN];

/// Number of triangles the palette covers before falling back to black
pub const PALETTED_TRIANGLES: usize = 12;

/// Color for the triangle at `index` in list order.
///
/// Indices [0,2) take the first palette entry, [2,4) the second, [4,6) the
/// third, and the cycle repeats. Anything past the cube's twelve faces is
/// black.
pub fn triangle_color(index: usize) -> Rgb {
    if index >= PALETTED_TRIANGLES {
        return Rgb::BLACK;
    }
    PALETTE[(index / 2) % PALETTE.len()]
}
