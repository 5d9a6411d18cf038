//! Native collaborators: wall-clock pacing, frame budget, headless display

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::{Clock, Display, Event, EventSource, frame_interval};
use crate::error::{Error, Result};
use crate::renderer::Raster;

/// Sleeps so that consecutive `tick` calls are one frame interval apart
#[derive(Debug, Default)]
pub struct FrameClock {
    next: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for FrameClock {
    fn tick(&mut self, target_fps: u32) {
        let interval = frame_interval(target_fps);
        let now = Instant::now();
        let deadline = self.next.unwrap_or(now + interval);

        if deadline > now {
            std::thread::sleep(deadline - now);
            self.next = Some(deadline + interval);
        } else {
            // Running late: don't try to catch up, just restart the cadence
            self.next = Some(now + interval);
        }
    }
}

/// Raises `Quit` once a fixed number of frames has been polled
#[derive(Debug, Clone)]
pub struct FrameBudget {
    limit: Option<u64>,
    polled: u64,
}

impl FrameBudget {
    /// `None` runs until killed
    pub fn new(limit: Option<u64>) -> Self {
        Self { limit, polled: 0 }
    }
}

impl EventSource for FrameBudget {
    fn poll(&mut self) -> Vec<Event> {
        self.polled += 1;
        match self.limit {
            Some(limit) if self.polled > limit => vec![Event::Quit],
            _ => Vec::new(),
        }
    }
}

/// Keeps the last presented frame and optionally dumps frames as PNG
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    last_frame: Option<Raster>,
    presented: u64,
    every: Option<u64>,
    frame_dir: Option<PathBuf>,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write every `every`-th frame into `dir` as `frame_NNNNN.png`
    pub fn with_frame_dump(mut self, dir: impl Into<PathBuf>, every: u64) -> Self {
        self.frame_dir = Some(dir.into());
        self.every = Some(every.max(1));
        self
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn last_frame(&self) -> Option<&Raster> {
        self.last_frame.as_ref()
    }

    /// Encode the last presented frame to `path`
    pub fn write_snapshot(&self, path: &Path) -> Result<()> {
        match &self.last_frame {
            Some(frame) => write_png(frame, path),
            None => {
                log::warn!("No frame presented, skipping snapshot {}", path.display());
                Ok(())
            }
        }
    }
}

impl Display for HeadlessDisplay {
    fn present(&mut self, frame: &Raster) -> Result<()> {
        self.presented += 1;
        if let Some(last) = &mut self.last_frame {
            last.clone_from(frame);
        } else {
            self.last_frame = Some(frame.clone());
        }

        if let (Some(dir), Some(every)) = (&self.frame_dir, self.every) {
            if self.presented % every == 0 {
                let path = dir.join(format!("frame_{:05}.png", self.presented));
                write_png(frame, &path)?;
                log::debug!("Wrote {}", path.display());
            }
        }
        Ok(())
    }
}

/// Encode a raster as PNG
pub fn write_png(frame: &Raster, path: &Path) -> Result<()> {
    frame
        .to_image()
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|source| Error::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;
    log::info!("Snapshot written to {}", path.display());
    Ok(())
}
