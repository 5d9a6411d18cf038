//! Load-once assets: the background that doubles as the trail canvas

use std::path::Path;

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::error::{Error, Result};
use crate::renderer::{Canvas, Raster, colors};

/// Stars scattered over the procedural sky
const STAR_COUNT: usize = 120;

/// Decode a background image from disk.
///
/// The image must cover the whole screen; larger images are used as-is and
/// composited at the origin.
pub fn load_background(path: &Path) -> Result<Raster> {
    let img = image::open(path)
        .map_err(|source| Error::BackgroundLoad {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgba8();
    let raster = Raster::from_image(&img);
    check_size(&raster)?;
    log::info!(
        "Loaded background {} ({}x{})",
        path.display(),
        raster.width(),
        raster.height()
    );
    Ok(raster)
}

fn check_size(raster: &Raster) -> Result<()> {
    if raster.width() < SCREEN_WIDTH || raster.height() < SCREEN_HEIGHT {
        return Err(Error::BackgroundTooSmall {
            width: raster.width(),
            height: raster.height(),
            min_width: SCREEN_WIDTH,
            min_height: SCREEN_HEIGHT,
        });
    }
    Ok(())
}

/// Generate a stand-in backdrop when no image is supplied.
///
/// Black sky with a seeded starfield, a faint glow over the vent and the
/// ground below the surface line.
pub fn procedural_background(seed: u64) -> Raster {
    let mut raster = Raster::new(SCREEN_WIDTH, SCREEN_HEIGHT, colors::BLACK);
    let mut rng = Pcg32::seed_from_u64(seed);

    for _ in 0..STAR_COUNT {
        let x = rng.random_range(0..SCREEN_WIDTH as i32);
        let y = rng.random_range(0..SURFACE_Y as i32);
        raster.put_pixel(x, y, colors::STAR);
    }

    // Plume glow: concentric rings fanning up from the vent
    let vent = crate::vent();
    for radius in (40..=120).step_by(8) {
        let r = radius as f32;
        let steps = 64;
        for i in 0..steps {
            let a0 = (LAUNCH_ANGLE_MIN + (LAUNCH_ANGLE_MAX - LAUNCH_ANGLE_MIN) * i as f32 / steps as f32).to_radians();
            let a1 = (LAUNCH_ANGLE_MIN + (LAUNCH_ANGLE_MAX - LAUNCH_ANGLE_MIN) * (i + 1) as f32 / steps as f32).to_radians();
            let p0 = vent + Vec2::new(a0.cos(), -a0.sin()) * r;
            let p1 = vent + Vec2::new(a1.cos(), -a1.sin()) * r;
            raster.draw_line(colors::PLUME_GLOW, p0, p1);
        }
    }

    // Ground
    let surface = SURFACE_Y as i32 + 1;
    raster.fill_rect(
        IVec2::new(0, surface),
        SCREEN_WIDTH,
        SCREEN_HEIGHT - surface as u32,
        colors::TERRAIN,
    );
    for x in 0..SCREEN_WIDTH as i32 {
        let depth = rng.random_range(2..6);
        raster.fill_rect(IVec2::new(x, surface), 1, depth, colors::TERRAIN_DARK);
    }

    raster
}
