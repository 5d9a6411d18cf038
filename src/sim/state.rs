//! Simulation state: live particles, RNG, lifecycle phase

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::particle::{Particle, Physics};

/// Lifecycle of the simulation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimPhase {
    Running,
    /// Quit was requested; absorbing
    Terminated,
}

/// Running totals, for the end-of-run summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimStats {
    pub spawned: u64,
    pub retired: u64,
    pub peak_live: usize,
}

/// Complete simulation state (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Emission point for new particles
    pub vent: Vec2,
    pub physics: Physics,
    /// Live particles (order is irrelevant)
    pub particles: Vec<Particle>,
    /// Completed ticks
    pub time_ticks: u64,
    pub phase: SimPhase,
    pub stats: SimStats,
}

impl SimState {
    /// Create a state at the reference vent with reference physics
    pub fn new(seed: u64) -> Self {
        Self::with_physics(seed, crate::vent(), Physics::default())
    }

    /// Create a state with an explicit vent and physics
    pub fn with_physics(seed: u64, vent: Vec2, physics: Physics) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            vent,
            physics,
            particles: Vec::new(),
            time_ticks: 0,
            phase: SimPhase::Running,
            stats: SimStats::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == SimPhase::Running
    }

    /// Launch one particle from the vent
    pub fn spawn_particle(&mut self) {
        let particle = Particle::spawn(self.vent, &mut self.rng);
        self.particles.push(particle);
        self.stats.spawned += 1;
    }

    /// Insert an already-built particle (scripted launches)
    pub fn push_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
        self.stats.spawned += 1;
    }

    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    pub fn terminate(&mut self) {
        if self.phase != SimPhase::Terminated {
            log::info!("Simulation terminated after {} ticks", self.time_ticks);
            self.phase = SimPhase::Terminated;
        }
    }
}
