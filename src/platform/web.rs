//! Browser collaborators: 2D canvas display and page-lifecycle quit

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use super::{Display, Event, EventSource};
use crate::error::{Error, Result};
use crate::renderer::Raster;

/// Presents frames into a `<canvas>` through `putImageData`
pub struct CanvasDisplay {
    ctx: CanvasRenderingContext2d,
}

impl CanvasDisplay {
    /// Size the canvas to the frame and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement, width: u32, height: u32) -> Result<Self> {
        canvas.set_width(width);
        canvas.set_height(height);
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| Error::Display(format!("{e:?}")))?
            .ok_or_else(|| Error::Display("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| Error::Display("not a 2d context".into()))?;
        Ok(Self { ctx })
    }
}

impl Display for CanvasDisplay {
    fn present(&mut self, frame: &Raster) -> Result<()> {
        let data = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(frame.as_bytes()),
            frame.width(),
            frame.height(),
        )
        .map_err(|e| Error::Display(format!("{e:?}")))?;
        self.ctx
            .put_image_data(&data, 0.0, 0.0)
            .map_err(|e| Error::Display(format!("{e:?}")))
    }
}

/// Raises `Quit` once the page is being hidden for good
#[derive(Clone, Default)]
pub struct PageLifecycle {
    quit: Rc<Cell<bool>>,
}

impl PageLifecycle {
    /// Hook `pagehide` on the window
    pub fn install() -> Self {
        let lifecycle = Self::default();
        if let Some(window) = web_sys::window() {
            let quit = lifecycle.quit.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                log::info!("Page hidden, stopping simulation");
                quit.set(true);
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        lifecycle
    }
}

impl EventSource for PageLifecycle {
    fn poll(&mut self) -> Vec<Event> {
        if self.quit.get() {
            vec![Event::Quit]
        } else {
            Vec::new()
        }
    }
}
