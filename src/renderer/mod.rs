//! Software rendering module
//!
//! Everything is drawn into CPU rasters; platforms only upload the final frame.

pub mod color;
pub mod compose;
pub mod font;
pub mod raster;

pub use color::{Color, colors, rgb};
pub use compose::{Legend, compose_frame, draw_marker};
pub use raster::{Canvas, Raster};
