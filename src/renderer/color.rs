//! RGBA colors used by the raster and the species table

/// 8-bit RGBA color
pub type Color = [u8; 4];

/// Build an opaque color
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r, g, b, 255]
}

/// Palette shared by the species table, legend and backdrop
pub mod colors {
    use super::{Color, rgb};

    pub const BLACK: Color = rgb(0, 0, 0);
    pub const WHITE: Color = rgb(255, 255, 255);
    pub const LT_GREY: Color = rgb(180, 180, 180);
    pub const GREY: Color = rgb(120, 120, 120);
    pub const DK_GREY: Color = rgb(80, 80, 80);

    // Procedural backdrop
    pub const TERRAIN: Color = rgb(96, 72, 40);
    pub const TERRAIN_DARK: Color = rgb(58, 42, 24);
    pub const PLUME_GLOW: Color = rgb(40, 30, 52);
    pub const STAR: Color = rgb(200, 200, 210);
}
