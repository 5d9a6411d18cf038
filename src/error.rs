//! Error types for the simulation glue.
//!
//! The physics core cannot fail; everything here comes from assets,
//! settings, or the display collaborator and is fatal to the run.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum Error {
    /// Background image could not be read or decoded.
    #[error("failed to load background '{}': {source}", .path.display())]
    BackgroundLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Background image does not cover the screen.
    #[error("background is {width}x{height}, needs at least {min_width}x{min_height}")]
    BackgroundTooSmall {
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },

    /// Settings file could not be read.
    #[error("failed to read settings '{}': {source}", .path.display())]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid JSON for [`crate::Settings`].
    #[error("invalid settings: {0}")]
    SettingsParse(#[from] serde_json::Error),

    /// Frame snapshot could not be encoded or written.
    #[error("failed to write snapshot '{}': {source}", .path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Display collaborator rejected a frame.
    #[error("display error: {0}")]
    Display(String),
}

pub type Result<T> = std::result::Result<T, Error>;
