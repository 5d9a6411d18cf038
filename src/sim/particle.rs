//! Ejecta particle: launch, ballistic update, retirement

use glam::Vec2;
use rand::Rng;

use super::species::Species;
use crate::consts::*;
use crate::renderer::{Canvas, Color};
use crate::{launch_angle, launch_vector};

/// Outcome of advancing a particle by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Alive,
    /// Left the screen or hit the surface; remove from the live set
    Retired,
}

/// Bounds and acceleration applied to every particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    /// Added to dy each tick
    pub gravity: f32,
    /// Particles with x beyond [0, screen_width] retire
    pub screen_width: f32,
    /// Particles below this line retire
    pub surface_y: f32,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            screen_width: SCREEN_WIDTH as f32,
            surface_y: SURFACE_Y,
        }
    }
}

impl Physics {
    /// Retirement predicate; the edges themselves are still in bounds
    #[inline]
    pub fn out_of_bounds(&self, pos: Vec2) -> bool {
        pos.x < 0.0 || pos.x > self.screen_width || pos.y < 0.0 || pos.y > self.surface_y
    }
}

/// One ejected particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    species: Species,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Particle {
    /// Launch a particle of a random species at a random angle from `vent`
    pub fn spawn<R: Rng + ?Sized>(vent: Vec2, rng: &mut R) -> Self {
        let species = Species::random(rng);
        let degrees = rng.random_range(LAUNCH_ANGLE_MIN..=LAUNCH_ANGLE_MAX);
        Self::launch(vent, species, degrees)
    }

    /// Launch a particle with a known species and angle (degrees, 90 = up)
    pub fn launch(vent: Vec2, species: Species, degrees: f32) -> Self {
        Self {
            species,
            pos: vent,
            vel: launch_vector(species.launch_speed(), degrees),
        }
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn color(&self) -> Color {
        self.species.color()
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Current heading in degrees, 90 = straight up
    pub fn heading(&self) -> f32 {
        launch_angle(self.vel)
    }

    /// Apply gravity, draw the trail segment, integrate, check bounds.
    ///
    /// The segment runs from the old position along the post-gravity
    /// velocity, so consecutive ticks form one continuous polyline.
    pub fn advance<C: Canvas + ?Sized>(&mut self, physics: &Physics, trail: &mut C) -> Fate {
        self.vel.y += physics.gravity;
        let next = self.pos + self.vel;
        trail.draw_line(self.color(), self.pos, next);
        self.pos = next;

        if physics.out_of_bounds(self.pos) {
            Fate::Retired
        } else {
            Fate::Alive
        }
    }
}
