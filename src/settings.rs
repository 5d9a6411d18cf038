//! Run settings
//!
//! Physics constants and the frame rate are fixed in [`crate::consts`];
//! settings only cover how a run is driven: seed, assets and frame output. Native
//! builds read JSON from the file named by `IO_VOLCANO_SETTINGS`, web
//! builds read it from LocalStorage.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default headless run length (10 seconds at the reference rate)
pub const DEFAULT_MAX_FRAMES: u64 = 250;

/// Simulation run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; time-derived when absent
    pub seed: Option<u64>,
    /// Background image; a procedural backdrop is used when absent.
    ///
    /// For the classic look point this at the Galileo/New Horizons
    /// Tvashtar plume picture (`tvashtar_plume.gif`). Any image format the
    /// `image` crate decodes works as long as it is at least 639x360.
    pub background: Option<PathBuf>,
    /// Stop after this many frames (native headless runs)
    pub max_frames: Option<u64>,
    /// Write the final frame here as PNG on shutdown
    pub snapshot: Option<PathBuf>,
    /// Also write numbered frames every N ticks, next to `snapshot` (or
    /// into the working directory when no snapshot path is set)
    pub snapshot_every: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            background: None,
            max_frames: Some(DEFAULT_MAX_FRAMES),
            snapshot: None,
            snapshot_every: None,
        }
    }
}

impl Settings {
    /// Environment variable naming the settings file
    pub const ENV_VAR: &'static str = "IO_VOLCANO_SETTINGS";

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "io_volcano_settings";

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Seed to use: the configured one or `fallback`
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }

    /// Directory for numbered frame dumps, if `snapshot_every` is set
    pub fn frame_dump_dir(&self) -> Option<PathBuf> {
        self.snapshot_every?;
        let dir = self
            .snapshot
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        Some(dir.to_path_buf())
    }

    fn sanitize(&mut self) {
        if self.snapshot_every == Some(0) {
            self.snapshot_every = None;
        }
    }

    /// Load settings named by `IO_VOLCANO_SETTINGS`, or defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self> {
        match std::env::var_os(Self::ENV_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                let settings = Self::from_file(&path)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from LocalStorage");
                return Ok(settings);
            }
        }

        log::info!("Using default settings");
        Ok(Self::default())
    }
}
