//! Deterministic simulation module
//!
//! Particle physics and the per-tick step. This module must stay pure:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Rendering reached only through the `Canvas` trait

pub mod particle;
pub mod species;
pub mod state;
pub mod tick;

pub use particle::{Fate, Particle, Physics};
pub use species::Species;
pub use state::{SimPhase, SimState, SimStats};
pub use tick::{TickInput, TickReport, tick};
