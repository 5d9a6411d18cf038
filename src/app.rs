//! Frame loop
//!
//! Owns the simulation state, the persistent trail canvas and the display
//! frame, and drives one tick per frame through the platform collaborators.

use crate::assets;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::Result;
use crate::platform::{Clock, Display, EventSource, collect_input};
use crate::renderer::{Legend, Raster, colors, compose_frame};
use crate::settings::Settings;
use crate::sim::{SimPhase, SimState, TickReport, tick};

/// Totals reported when a run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: u64,
    pub spawned: u64,
    pub retired: u64,
    pub live: usize,
    pub peak_live: usize,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "seed {}: {} ticks, {} spawned, {} retired, {} live (peak {})",
            self.seed, self.ticks, self.spawned, self.retired, self.live, self.peak_live
        )
    }
}

/// A running volcano simulation
pub struct Simulation {
    pub state: SimState,
    /// Background with every trail segment drawn so far; never cleared
    trail: Raster,
    /// Scratch surface the trail, legend and markers are composited into
    frame: Raster,
    legend: Legend,
}

impl Simulation {
    /// Start a simulation over the given background
    pub fn new(seed: u64, background: Raster) -> Self {
        let frame = Raster::new(SCREEN_WIDTH, SCREEN_HEIGHT, colors::BLACK);
        Self {
            state: SimState::new(seed),
            trail: background,
            frame,
            legend: Legend::new(),
        }
    }

    /// Resolve seed and background from settings.
    ///
    /// Fails when a configured background cannot be loaded; there is no
    /// fallback to the procedural backdrop in that case.
    pub fn from_settings(settings: &Settings, fallback_seed: u64) -> Result<Self> {
        let seed = settings.seed_or(fallback_seed);
        let background = match &settings.background {
            Some(path) => assets::load_background(path)?,
            None => {
                log::info!("No background configured, generating one");
                assets::procedural_background(seed)
            }
        };
        log::info!(
            "Simulation initialized: seed {}, screen {}x{}",
            seed,
            SCREEN_WIDTH,
            SCREEN_HEIGHT
        );
        Ok(Self::new(seed, background))
    }

    pub fn trail(&self) -> &Raster {
        &self.trail
    }

    /// Last composited frame
    pub fn frame(&self) -> &Raster {
        &self.frame
    }

    pub fn phase(&self) -> SimPhase {
        self.state.phase
    }

    /// One loop iteration minus pacing: poll, tick, composite, present.
    ///
    /// Once terminated nothing is drawn or presented.
    pub fn step<E, D>(&mut self, events: &mut E, display: &mut D) -> Result<TickReport>
    where
        E: EventSource + ?Sized,
        D: Display + ?Sized,
    {
        let input = collect_input(&events.poll());
        let report = tick(&mut self.state, &input, &mut self.trail);
        if !self.state.is_running() {
            return Ok(report);
        }

        compose_frame(&mut self.frame, &self.trail, &self.legend, &self.state.particles);
        display.present(&self.frame)?;
        Ok(report)
    }

    /// Run until quit, pacing each frame with `clock`
    pub fn run<E, C, D>(
        &mut self,
        events: &mut E,
        clock: &mut C,
        display: &mut D,
        target_fps: u32,
    ) -> Result<RunSummary>
    where
        E: EventSource + ?Sized,
        C: Clock + ?Sized,
        D: Display + ?Sized,
    {
        log::info!("Running at {} fps", target_fps);
        while self.state.is_running() {
            self.step(events, display)?;
            if !self.state.is_running() {
                break;
            }

            if self.state.time_ticks % target_fps.max(1) as u64 == 0 {
                let stats = self.state.stats;
                log::debug!(
                    "t={} live={} spawned={} retired={}",
                    self.state.time_ticks,
                    self.state.live_count(),
                    stats.spawned,
                    stats.retired
                );
            }

            clock.tick(target_fps);
        }

        let summary = self.summary();
        log::info!("Run finished: {}", summary);
        Ok(summary)
    }

    pub fn summary(&self) -> RunSummary {
        let stats = self.state.stats;
        RunSummary {
            seed: self.state.seed,
            ticks: self.state.time_ticks,
            spawned: stats.spawned,
            retired: stats.retired,
            live: self.state.live_count(),
            peak_live: stats.peak_live,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::platform::{Event, NoPacing, ScriptedEvents};

    /// Display double counting presented frames
    #[derive(Default)]
    struct CountingDisplay {
        frames: usize,
        fail_after: Option<usize>,
    }

    impl Display for CountingDisplay {
        fn present(&mut self, _frame: &Raster) -> Result<()> {
            if self.fail_after == Some(self.frames) {
                return Err(Error::Display("surface lost".into()));
            }
            self.frames += 1;
            Ok(())
        }
    }

    fn sim() -> Simulation {
        Simulation::new(11, Raster::new(SCREEN_WIDTH, SCREEN_HEIGHT, colors::BLACK))
    }

    #[test]
    fn test_run_until_quit() {
        let mut sim = sim();
        let mut events = ScriptedEvents::quit_after(30);
        let mut clock = NoPacing::default();
        let mut display = CountingDisplay::default();

        let summary = sim.run(&mut events, &mut clock, &mut display, 25).unwrap();

        assert_eq!(sim.phase(), SimPhase::Terminated);
        assert_eq!(display.frames, 30);
        assert_eq!(clock.ticks, 30);
        assert_eq!(summary.ticks, 30);
        assert_eq!(summary.spawned, summary.retired + summary.live as u64);
    }

    #[test]
    fn test_trail_accumulates() {
        let mut sim = sim();
        let blank = sim.trail().clone();
        let mut events = ScriptedEvents::default();
        let mut display = CountingDisplay::default();

        sim.step(&mut events, &mut display).unwrap();
        let after_one = sim.trail().clone();
        assert_ne!(after_one, blank);

        for _ in 0..10 {
            sim.step(&mut events, &mut display).unwrap();
        }
        // Every pixel drawn on the first tick is still there
        for y in 0..SCREEN_HEIGHT as i32 {
            for x in 0..SCREEN_WIDTH as i32 {
                if after_one.pixel(x, y) != blank.pixel(x, y) {
                    assert_ne!(sim.trail().pixel(x, y), blank.pixel(x, y));
                }
            }
        }
    }

    #[test]
    fn test_quit_step_presents_nothing() {
        let mut sim = sim();
        let mut events = ScriptedEvents::new([vec![Event::Quit]]);
        let mut display = CountingDisplay::default();

        sim.step(&mut events, &mut display).unwrap();
        assert_eq!(display.frames, 0);
        assert_eq!(sim.phase(), SimPhase::Terminated);
    }

    #[test]
    fn test_present_failure_is_fatal() {
        let mut sim = sim();
        let mut events = ScriptedEvents::default();
        let mut clock = NoPacing::default();
        let mut display = CountingDisplay {
            fail_after: Some(3),
            ..Default::default()
        };

        let err = sim.run(&mut events, &mut clock, &mut display, 25).unwrap_err();
        assert!(matches!(err, Error::Display(_)));
        assert_eq!(display.frames, 3);
    }

    #[test]
    fn test_from_settings_missing_background_fails() {
        let settings = Settings {
            background: Some("/missing/tvashtar_plume.gif".into()),
            ..Default::default()
        };
        assert!(matches!(
            Simulation::from_settings(&settings, 1),
            Err(Error::BackgroundLoad { .. })
        ));
    }

    #[test]
    fn test_from_settings_loads_configured_background() {
        let path = std::env::temp_dir().join(format!("io_volcano_plume_{}.png", std::process::id()));
        image::RgbaImage::from_pixel(SCREEN_WIDTH, SCREEN_HEIGHT, image::Rgba(colors::WHITE))
            .save(&path)
            .unwrap();
        let settings = Settings {
            background: Some(path.clone()),
            ..Default::default()
        };
        let sim = Simulation::from_settings(&settings, 1);
        let _ = std::fs::remove_file(&path);

        let sim = sim.unwrap();
        assert_eq!(sim.trail().pixel(0, 0), Some(colors::WHITE));
        assert_eq!(
            sim.trail().pixel(SCREEN_WIDTH as i32 - 1, SCREEN_HEIGHT as i32 - 1),
            Some(colors::WHITE)
        );
    }

    #[test]
    fn test_from_settings_uses_configured_seed() {
        let settings = Settings {
            seed: Some(77),
            ..Default::default()
        };
        let sim = Simulation::from_settings(&settings, 1).unwrap();
        assert_eq!(sim.state.seed, 77);
    }
}
