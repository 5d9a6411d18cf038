//! Frame composition: trail canvas, legend, particle markers

use glam::IVec2;

use super::color::colors;
use super::font::render_label;
use super::raster::Raster;
use crate::consts::*;
use crate::sim::{Particle, Species};

/// Glyph scale for the legend labels
const LEGEND_SCALE: u32 = 2;

/// Pre-rendered species legend, one label per species
#[derive(Debug, Clone)]
pub struct Legend {
    labels: Vec<(Raster, IVec2)>,
}

impl Default for Legend {
    fn default() -> Self {
        Self::new()
    }
}

impl Legend {
    /// Render the four labels once, stacked from the legend origin
    pub fn new() -> Self {
        let labels = Species::LEGEND
            .iter()
            .enumerate()
            .map(|(i, species)| {
                let label = render_label(species.label(), species.color(), colors::BLACK, LEGEND_SCALE);
                let offset = IVec2::new(LEGEND_X, LEGEND_Y + i as i32 * LEGEND_STEP);
                (label, offset)
            })
            .collect();
        Self { labels }
    }

    pub fn labels(&self) -> &[(Raster, IVec2)] {
        &self.labels
    }

    pub fn draw(&self, frame: &mut Raster) {
        for (label, offset) in &self.labels {
            frame.blit(label, *offset);
        }
    }
}

/// Marker drawn at a live particle, centered on its position
pub fn draw_marker(frame: &mut Raster, particle: &Particle) {
    let half = (MARKER_SIZE / 2) as i32;
    let center = particle.pos.round().as_ivec2();
    frame.fill_rect(
        center - IVec2::splat(half),
        MARKER_SIZE,
        MARKER_SIZE,
        particle.color(),
    );
}

/// Build one display frame: trail canvas, legend, then live markers
pub fn compose_frame(frame: &mut Raster, trail: &Raster, legend: &Legend, particles: &[Particle]) {
    frame.blit(trail, IVec2::ZERO);
    legend.draw(frame);
    for particle in particles {
        draw_marker(frame, particle);
    }
}
