//! Fixed-step simulation tick
//!
//! One call spawns a particle, honors a quit request, advances every live
//! particle (drawing its trail) and drops the ones that retired.

use super::particle::Fate;
use super::state::SimState;
use crate::renderer::Canvas;

/// Input gathered for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Close/quit requested
    pub quit: bool,
}

/// What a tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: usize,
    pub retired: usize,
    pub live: usize,
}

/// Advance the simulation by one tick.
///
/// A terminated state is left untouched. On quit the state terminates
/// before any particle is advanced.
pub fn tick<C: Canvas + ?Sized>(state: &mut SimState, input: &TickInput, trail: &mut C) -> TickReport {
    if !state.is_running() {
        return TickReport {
            live: state.live_count(),
            ..Default::default()
        };
    }

    state.spawn_particle();

    if input.quit {
        state.terminate();
        return TickReport {
            spawned: 1,
            retired: 0,
            live: state.live_count(),
        };
    }

    let physics = state.physics;
    let before = state.particles.len();
    state
        .particles
        .retain_mut(|p| p.advance(&physics, &mut *trail) == Fate::Alive);
    let retired = before - state.particles.len();

    state.time_ticks += 1;
    state.stats.retired += retired as u64;
    state.stats.peak_live = state.stats.peak_live.max(state.particles.len());

    log::trace!(
        "tick {}: live={} retired={}",
        state.time_ticks,
        state.particles.len(),
        retired
    );

    TickReport {
        spawned: 1,
        retired,
        live: state.particles.len(),
    }
}
