//! Io Volcano entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use io_volcano::consts::*;
    use io_volcano::platform::frame_interval;
    use io_volcano::platform::web::{CanvasDisplay, PageLifecycle};
    use io_volcano::{Settings, Simulation};

    /// Maximum ticks per animation frame after a stall
    const MAX_SUBSTEPS: u32 = 4;

    /// App instance holding the simulation and its browser collaborators
    struct App {
        sim: Simulation,
        display: CanvasDisplay,
        lifecycle: PageLifecycle,
        accumulator: f64,
        last_time: f64,
        /// Seconds per tick
        step: f64,
    }

    impl App {
        /// Run as many fixed ticks as the elapsed time allows
        fn update(&mut self, dt: f64) -> bool {
            self.accumulator += dt.min(0.25);

            let mut substeps = 0;
            while self.accumulator >= self.step && substeps < MAX_SUBSTEPS {
                if let Err(e) = self.sim.step(&mut self.lifecycle, &mut self.display) {
                    log::error!("Frame failed: {}", e);
                    return false;
                }
                self.accumulator -= self.step;
                substeps += 1;
                if !self.sim.state.is_running() {
                    log::info!("Run finished: {}", self.sim.summary());
                    return false;
                }
            }
            if substeps == MAX_SUBSTEPS {
                // Drop the backlog instead of spiralling
                self.accumulator = 0.0;
            }
            true
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("IO Volcano Simulator starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        document.set_title("IO Volcano Simulator");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = match Settings::load() {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };
        if settings.background.is_some() {
            log::warn!("Background paths are not readable in the browser, using generated backdrop");
        }
        let settings = Settings {
            background: None,
            ..settings
        };

        let seed = js_sys::Date::now() as u64;
        let sim = match Simulation::from_settings(&settings, seed) {
            Ok(sim) => sim,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };
        let display = match CanvasDisplay::new(&canvas, SCREEN_WIDTH, SCREEN_HEIGHT) {
            Ok(display) => display,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };

        let app = Rc::new(RefCell::new(App {
            sim,
            display,
            lifecycle: PageLifecycle::install(),
            accumulator: 0.0,
            last_time: 0.0,
            step: frame_interval(TARGET_FPS).as_secs_f64(),
        }));

        request_animation_frame(app);
        log::info!("IO Volcano Simulator running!");
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        let keep_going = {
            let mut a = app.borrow_mut();
            let dt = if a.last_time > 0.0 {
                (time - a.last_time) / 1000.0
            } else {
                a.step
            };
            a.last_time = time;
            a.update(dt)
        };

        if keep_going {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("IO Volcano Simulator (native) starting...");

    if let Err(e) = run_native() {
        log::error!("{}", e);
        eprintln!("io-volcano: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn run_native() -> io_volcano::Result<()> {
    use io_volcano::Settings;
    use io_volcano::Simulation;
    use io_volcano::consts::TARGET_FPS;
    use io_volcano::platform::native::{FrameBudget, FrameClock, HeadlessDisplay};

    let settings = Settings::load()?;
    let fallback_seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();

    let mut sim = Simulation::from_settings(&settings, fallback_seed)?;

    let mut display = HeadlessDisplay::new();
    if let (Some(dir), Some(every)) = (settings.frame_dump_dir(), settings.snapshot_every) {
        log::info!("Dumping every {} frames into {}", every, dir.display());
        display = display.with_frame_dump(dir, every);
    }

    match settings.max_frames {
        Some(n) => log::info!("Headless run of {} frames", n),
        None => log::info!("Headless run until interrupted"),
    }
    let mut events = FrameBudget::new(settings.max_frames);
    let mut clock = FrameClock::new();

    let summary = sim.run(&mut events, &mut clock, &mut display, TARGET_FPS)?;
    println!("{summary}");

    if let Some(path) = &settings.snapshot {
        display.write_snapshot(path)?;
    }
    Ok(())
}
