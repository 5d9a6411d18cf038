//! CPU pixel buffer
//!
//! Serves as both the persistent trail canvas (segments are drawn into it
//! and never erased) and the per-frame display surface that the trail,
//! legend and markers are composited onto.

use glam::{IVec2, Vec2};

use super::color::Color;

/// Drawing target for particle trails.
///
/// The trail canvas is persistent: implementations must keep every
/// segment drawn into them for the rest of the run.
pub trait Canvas {
    /// Draw a 1-pixel line segment from `a` to `b`
    fn draw_line(&mut self, color: Color, a: Vec2, b: Vec2);
}

/// RGBA8 raster, row-major, origin top-left, y down
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Raster {
    /// Create a raster filled with a single color
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Read a pixel (None outside the raster)
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Write a pixel; writes outside the raster are dropped
    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Fill an axis-aligned rectangle, clipped to the raster
    pub fn fill_rect(&mut self, origin: IVec2, width: u32, height: u32, color: Color) {
        let x0 = origin.x.max(0);
        let y0 = origin.y.max(0);
        let x1 = (origin.x + width as i32).min(self.width as i32);
        let y1 = (origin.y + height as i32).min(self.height as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                self.put_pixel(x, y, color);
            }
        }
    }

    /// Copy `src` onto this raster with its top-left corner at `offset`
    pub fn blit(&mut self, src: &Raster, offset: IVec2) {
        // Fast path: same size, no offset
        if offset == IVec2::ZERO && src.width == self.width && src.height == self.height {
            self.pixels.copy_from_slice(&src.pixels);
            return;
        }

        let x0 = offset.x.max(0);
        let x1 = (offset.x + src.width as i32).min(self.width as i32);
        if x0 >= x1 {
            return;
        }
        let y0 = offset.y.max(0);
        let y1 = (offset.y + src.height as i32).min(self.height as i32);
        for y in y0..y1 {
            let src_row = (y - offset.y) as usize * src.width as usize;
            let src_start = src_row + (x0 - offset.x) as usize;
            let src_end = src_row + (x1 - offset.x) as usize;
            let dst_row = y as usize * self.width as usize;
            self.pixels[dst_row + x0 as usize..dst_row + x1 as usize]
                .copy_from_slice(&src.pixels[src_start..src_end]);
        }
    }

    /// Raw RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_flattened()
    }

    /// Convert to an `image` buffer for encoding
    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(self.pixels[y as usize * self.width as usize + x as usize])
        })
    }

    /// Build a raster from a decoded image
    pub fn from_image(img: &image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.pixels().map(|p| p.0).collect(),
        }
    }

    /// Clip a segment to the raster bounds (Liang-Barsky).
    ///
    /// Returns None when the segment lies entirely outside.
    fn clip_segment(&self, a: Vec2, b: Vec2) -> Option<(Vec2, Vec2)> {
        let max = Vec2::new(self.width as f32 - 1.0, self.height as f32 - 1.0);
        if max.x < 0.0 || max.y < 0.0 {
            return None;
        }
        let d = b - a;
        let mut t0 = 0.0_f32;
        let mut t1 = 1.0_f32;

        let edges = [
            (-d.x, a.x),
            (d.x, max.x - a.x),
            (-d.y, a.y),
            (d.y, max.y - a.y),
        ];
        for (p, q) in edges {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        Some((a + d * t0, a + d * t1))
    }
}

impl Canvas for Raster {
    fn draw_line(&mut self, color: Color, a: Vec2, b: Vec2) {
        if !(a.is_finite() && b.is_finite()) {
            return;
        }
        let Some((a, b)) = self.clip_segment(a, b) else {
            return;
        };

        // Bresenham over the clipped, rounded endpoints
        let (mut x0, mut y0) = (a.x.round() as i32, a.y.round() as i32);
        let (x1, y1) = (b.x.round() as i32, b.y.round() as i32);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::colors;

    #[test]
    fn test_horizontal_line() {
        let mut raster = Raster::new(10, 10, colors::BLACK);
        raster.draw_line(colors::WHITE, Vec2::new(1.0, 5.0), Vec2::new(8.0, 5.0));
        for x in 1..=8 {
            assert_eq!(raster.pixel(x, 5), Some(colors::WHITE));
        }
        assert_eq!(raster.pixel(0, 5), Some(colors::BLACK));
        assert_eq!(raster.pixel(9, 5), Some(colors::BLACK));
    }

    #[test]
    fn test_diagonal_line_endpoints() {
        let mut raster = Raster::new(10, 10, colors::BLACK);
        raster.draw_line(colors::GREY, Vec2::new(0.0, 0.0), Vec2::new(9.0, 9.0));
        for i in 0..10 {
            assert_eq!(raster.pixel(i, i), Some(colors::GREY));
        }
    }

    #[test]
    fn test_line_clipped_to_bounds() {
        let mut raster = Raster::new(10, 10, colors::BLACK);
        // Crosses the whole raster and beyond on both sides
        raster.draw_line(
            colors::WHITE,
            Vec2::new(-1.0e6, 4.0),
            Vec2::new(1.0e6, 4.0),
        );
        for x in 0..10 {
            assert_eq!(raster.pixel(x, 4), Some(colors::WHITE));
        }
    }

    #[test]
    fn test_line_fully_outside_is_dropped() {
        let mut raster = Raster::new(10, 10, colors::BLACK);
        let before = raster.clone();
        raster.draw_line(colors::WHITE, Vec2::new(-5.0, -5.0), Vec2::new(-1.0, -20.0));
        raster.draw_line(colors::WHITE, Vec2::new(20.0, 0.0), Vec2::new(30.0, 9.0));
        assert_eq!(raster, before);
    }

    #[test]
    fn test_non_finite_line_is_dropped() {
        let mut raster = Raster::new(4, 4, colors::BLACK);
        let before = raster.clone();
        raster.draw_line(colors::WHITE, Vec2::new(f32::NAN, 0.0), Vec2::new(2.0, 2.0));
        assert_eq!(raster, before);
    }

    #[test]
    fn test_blit_with_offset_clips() {
        let mut dst = Raster::new(4, 4, colors::BLACK);
        let src = Raster::new(3, 3, colors::WHITE);
        dst.blit(&src, IVec2::new(2, -1));

        assert_eq!(dst.pixel(2, 0), Some(colors::WHITE));
        assert_eq!(dst.pixel(3, 1), Some(colors::WHITE));
        assert_eq!(dst.pixel(2, 2), Some(colors::BLACK));
        assert_eq!(dst.pixel(1, 0), Some(colors::BLACK));
    }

    #[test]
    fn test_blit_same_size_copies() {
        let mut dst = Raster::new(5, 3, colors::BLACK);
        let mut src = Raster::new(5, 3, colors::GREY);
        src.put_pixel(4, 2, colors::WHITE);
        dst.blit(&src, IVec2::ZERO);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_fill_rect_clipped() {
        let mut raster = Raster::new(4, 4, colors::BLACK);
        raster.fill_rect(IVec2::new(-2, 3), 4, 4, colors::WHITE);
        assert_eq!(raster.pixel(0, 3), Some(colors::WHITE));
        assert_eq!(raster.pixel(1, 3), Some(colors::WHITE));
        assert_eq!(raster.pixel(2, 3), Some(colors::BLACK));
        assert_eq!(raster.pixel(0, 2), Some(colors::BLACK));
    }

    #[test]
    fn test_image_conversion_preserves_pixels() {
        let mut raster = Raster::new(3, 2, colors::DK_GREY);
        raster.put_pixel(2, 1, colors::WHITE);
        let back = Raster::from_image(&raster.to_image());
        assert_eq!(back, raster);
        assert_eq!(back.as_bytes().len(), 3 * 2 * 4);
    }
}
