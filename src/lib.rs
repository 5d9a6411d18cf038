//! Io Volcano - ballistic plume simulation of a volcanic vent on Io
//!
//! Core modules:
//! - `sim`: Particle physics and the per-tick simulation step
//! - `renderer`: Software raster, bitmap legend font, frame compositing
//! - `platform`: Input, clock and display collaborators
//! - `app`: The frame loop tying the simulation to the platform
//! - `settings`: Run configuration (seed, pacing, assets, snapshots)

pub mod app;
pub mod assets;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{RunSummary, Simulation};
pub use error::{Error, Result};
pub use settings::Settings;

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Display dimensions in pixels
    pub const SCREEN_WIDTH: u32 = 639;
    pub const SCREEN_HEIGHT: u32 = 360;

    /// Vent location, all particles start here
    pub const VENT_X: f32 = 320.0;
    pub const VENT_Y: f32 = 300.0;

    /// Particles falling below this line hit the surface of Io
    pub const SURFACE_Y: f32 = 308.0;

    /// Added to dy every tick (pixels/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Launch speed of SO2 (pixels/tick); other species scale from it
    pub const BASE_SPEED: f32 = 8.0;

    /// Launch angle range in degrees (90 is straight up)
    pub const LAUNCH_ANGLE_MIN: f32 = 60.0;
    pub const LAUNCH_ANGLE_MAX: f32 = 120.0;

    /// Frame rate; one simulation tick per frame
    pub const TARGET_FPS: u32 = 25;

    /// Legend placement
    pub const LEGEND_X: i32 = 40;
    pub const LEGEND_Y: i32 = 20;
    pub const LEGEND_STEP: i32 = 20;

    /// Side of the square marker drawn at each live particle
    pub const MARKER_SIZE: u32 = 4;
}

/// Vent position as a vector
#[inline]
pub fn vent() -> Vec2 {
    Vec2::new(consts::VENT_X, consts::VENT_Y)
}

/// Launch vector for a speed and an angle in degrees.
///
/// Screen y grows downward, so "up" is negative dy.
#[inline]
pub fn launch_vector(speed: f32, degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(speed * radians.cos(), -speed * radians.sin())
}

/// Launch angle in degrees recovered from a velocity (inverse of [`launch_vector`])
#[inline]
pub fn launch_angle(vel: Vec2) -> f32 {
    (-vel.y).atan2(vel.x).to_degrees()
}
