//! Tiny 5x7 bitmap font for the species legend
//!
//! Only covers the characters the legend labels use; anything else renders
//! as a blank cell.

use glam::IVec2;

use super::color::Color;
use super::raster::Raster;

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Blank columns between glyphs
const GLYPH_SPACING: u32 = 1;
/// Blank border around a rendered label
const PADDING: u32 = 1;

/// Rows of a glyph, top to bottom; bit 4 is the leftmost column
fn glyph(c: char) -> [u8; 7] {
    match c {
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '/' => [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        _ => [0; 7],
    }
}

/// Pixel size of `text` rendered at `scale`
pub fn measure(text: &str, scale: u32) -> (u32, u32) {
    let chars = text.chars().count() as u32;
    let advance = (GLYPH_WIDTH + GLYPH_SPACING) * scale;
    let width = (chars * advance).saturating_sub(GLYPH_SPACING * scale) + 2 * PADDING * scale;
    let height = GLYPH_HEIGHT * scale + 2 * PADDING * scale;
    (width, height)
}

/// Render `text` as an opaque label: `fg` glyphs on a `bg` box
pub fn render_label(text: &str, fg: Color, bg: Color, scale: u32) -> Raster {
    let scale = scale.max(1);
    let (width, height) = measure(text, scale);
    let mut raster = Raster::new(width, height, bg);

    let advance = ((GLYPH_WIDTH + GLYPH_SPACING) * scale) as i32;
    let pad = (PADDING * scale) as i32;
    for (i, c) in text.chars().enumerate() {
        let origin = IVec2::new(pad + i as i32 * advance, pad);
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                    let at = origin + IVec2::new((col * scale) as i32, row as i32 * scale as i32);
                    raster.fill_rect(at, scale, scale, fg);
                }
            }
        }
    }

    raster
}
