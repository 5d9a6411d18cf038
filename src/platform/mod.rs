//! Platform abstraction layer
//!
//! The simulation loop only talks to these collaborators:
//! - `EventSource`: non-blocking input poll (only quit matters)
//! - `Clock`: fixed-rate frame pacing, the loop's only blocking point
//! - `Display`: receives each composited frame

use std::time::Duration;

use crate::error::Result;
use crate::renderer::Raster;
use crate::sim::TickInput;

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

/// Input events the loop can receive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Window closed or the run was asked to stop
    Quit,
    /// Anything else; ignored by the simulation
    Other,
}

/// Non-blocking source of input events
pub trait EventSource {
    /// Drain pending events; never blocks
    fn poll(&mut self) -> Vec<Event>;
}

/// Frame pacing
pub trait Clock {
    /// Block until the next frame boundary at `target_fps`
    fn tick(&mut self, target_fps: u32);
}

/// Final destination of composited frames
pub trait Display {
    /// Push a finished frame to the screen (or wherever frames go)
    fn present(&mut self, frame: &Raster) -> Result<()>;
}

/// Time between frame boundaries at `target_fps` (0 is treated as 1)
pub fn frame_interval(target_fps: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / target_fps.max(1) as u64)
}

/// Fold a batch of events into tick input
pub fn collect_input(events: &[Event]) -> TickInput {
    TickInput {
        quit: events.contains(&Event::Quit),
    }
}

/// Events replayed from a script, one batch per poll; empty once exhausted
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    batches: std::collections::VecDeque<Vec<Event>>,
}

impl ScriptedEvents {
    pub fn new(batches: impl IntoIterator<Item = Vec<Event>>) -> Self {
        Self {
            batches: batches.into_iter().collect(),
        }
    }

    /// Quit on poll number `n + 1`, after `n` quiet polls
    pub fn quit_after(n: usize) -> Self {
        let mut batches: Vec<Vec<Event>> = vec![Vec::new(); n];
        batches.push(vec![Event::Quit]);
        Self::new(batches)
    }
}

impl EventSource for ScriptedEvents {
    fn poll(&mut self) -> Vec<Event> {
        self.batches.pop_front().unwrap_or_default()
    }
}

/// Clock that never waits (tests, offline rendering)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing {
    pub ticks: u64,
}

impl Clock for NoPacing {
    fn tick(&mut self, _target_fps: u32) {
        self.ticks += 1;
    }
}
