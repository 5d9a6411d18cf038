//! End-to-end runs of the frame loop with headless collaborators

use glam::Vec2;
use io_volcano::consts::*;
use io_volcano::platform::native::{FrameBudget, HeadlessDisplay};
use io_volcano::platform::{Event, NoPacing, ScriptedEvents};
use io_volcano::renderer::{Raster, colors};
use io_volcano::sim::{Particle, SimPhase, Species, TickInput, tick};
use io_volcano::{Settings, Simulation};

fn blank_sim(seed: u64) -> Simulation {
    Simulation::new(seed, Raster::new(SCREEN_WIDTH, SCREEN_HEIGHT, colors::BLACK))
}

#[test]
fn straight_up_h2o_after_one_tick() {
    let mut sim = blank_sim(1);
    let particle = Particle::launch(io_volcano::vent(), Species::H2O, 90.0);
    assert!(particle.vel.x.abs() < 1e-5);
    assert!((particle.vel.y + 28.8).abs() < 1e-4);
    sim.state.push_particle(particle);

    let mut trail = sim.trail().clone();
    tick(&mut sim.state, &TickInput::default(), &mut trail);

    // The scripted particle is the first in the live set
    let p = &sim.state.particles[0];
    assert_eq!(p.species(), Species::H2O);
    assert!((p.vel.y + 28.3).abs() < 1e-4);
    assert!((p.pos.x - 320.0).abs() < 1e-3);
    assert!((p.pos.y - 271.7).abs() < 1e-3);
}

#[test]
fn surface_crossing_removed_before_next_frame() {
    let mut sim = blank_sim(2);
    let mut lander = Particle::launch(io_volcano::vent(), Species::CO2, 90.0);
    lander.pos = Vec2::new(200.0, 307.0);
    lander.vel = Vec2::new(1.0, 1.0);
    sim.state.push_particle(lander);

    let mut events = ScriptedEvents::default();
    let mut display = HeadlessDisplay::new();
    let report = sim.step(&mut events, &mut display).unwrap();

    assert_eq!(report.retired, 1);
    assert!(sim.state.particles.iter().all(|p| p.pos.y <= SURFACE_Y));
    assert_eq!(display.presented(), 1);
}

#[test]
fn headless_run_stops_at_frame_budget() {
    let mut sim = blank_sim(3);
    let mut events = FrameBudget::new(Some(100));
    let mut clock = NoPacing::default();
    let mut display = HeadlessDisplay::new();

    let summary = sim.run(&mut events, &mut clock, &mut display, TARGET_FPS).unwrap();

    assert_eq!(sim.phase(), SimPhase::Terminated);
    assert_eq!(summary.ticks, 100);
    assert_eq!(display.presented(), 100);
    // The quit tick still spawned before terminating
    assert_eq!(summary.spawned, 101);
    assert_eq!(summary.spawned, summary.retired + summary.live as u64);
    assert!(summary.peak_live >= summary.live);
}

#[test]
fn presented_frame_shows_legend_and_trails() {
    let mut sim = blank_sim(4);
    let mut events = ScriptedEvents::quit_after(40);
    let mut clock = NoPacing::default();
    let mut display = HeadlessDisplay::new();
    sim.run(&mut events, &mut clock, &mut display, TARGET_FPS).unwrap();

    let frame = display.last_frame().expect("frames were presented");
    assert_eq!((frame.width(), frame.height()), (SCREEN_WIDTH, SCREEN_HEIGHT));

    // Something colored inside the first legend row (H2O, white)
    let legend_lit = (LEGEND_Y..LEGEND_Y + LEGEND_STEP)
        .flat_map(|y| (LEGEND_X..LEGEND_X + 60).map(move |x| (x, y)))
        .any(|(x, y)| frame.pixel(x, y) == Some(colors::WHITE));
    assert!(legend_lit);

    // Trails fan out above the vent
    let trail_lit = (0..VENT_Y as i32)
        .any(|y| sim.trail().pixel(VENT_X as i32, y) != Some(colors::BLACK));
    assert!(trail_lit);
}

#[test]
fn same_seed_same_run() {
    let run = |seed| {
        let mut sim = blank_sim(seed);
        let mut events = ScriptedEvents::quit_after(75);
        let mut clock = NoPacing::default();
        let mut display = HeadlessDisplay::new();
        let summary = sim.run(&mut events, &mut clock, &mut display, TARGET_FPS).unwrap();
        (summary, sim.trail().clone())
    };
    let (a, trail_a) = run(5150);
    let (b, trail_b) = run(5150);
    assert_eq!(a, b);
    assert_eq!(trail_a, trail_b);
}

#[test]
fn quit_event_mixed_with_others() {
    let mut sim = blank_sim(6);
    let mut events = ScriptedEvents::new([vec![Event::Other], vec![Event::Other, Event::Quit]]);
    let mut display = HeadlessDisplay::new();

    sim.step(&mut events, &mut display).unwrap();
    assert_eq!(sim.phase(), SimPhase::Running);
    sim.step(&mut events, &mut display).unwrap();
    assert_eq!(sim.phase(), SimPhase::Terminated);
    assert_eq!(display.presented(), 1);
}

#[test]
fn snapshot_written_as_png() {
    let settings = Settings {
        seed: Some(8),
        ..Default::default()
    };
    let mut sim = Simulation::from_settings(&settings, 0).unwrap();
    let mut events = ScriptedEvents::quit_after(10);
    let mut clock = NoPacing::default();
    let mut display = HeadlessDisplay::new();
    sim.run(&mut events, &mut clock, &mut display, TARGET_FPS).unwrap();

    let path = std::env::temp_dir().join(format!("io_volcano_snapshot_{}.png", std::process::id()));
    display.write_snapshot(&path).unwrap();

    let img = image::open(&path).unwrap().into_rgba8();
    assert_eq!(img.dimensions(), (SCREEN_WIDTH, SCREEN_HEIGHT));
    let _ = std::fs::remove_file(&path);
}
