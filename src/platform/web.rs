//! Canvas attachment and the animation-frame loop
//!
//! `FieldAnimator` is the JS-facing handle: construct one per canvas,
//! `start()` it, `stop()` it, `free()` it. The frame closure reschedules
//! itself through `requestAnimationFrame` and checks a stop flag before
//! every reschedule, so detaching an animator cannot leak a perpetual
//! callback against a dead canvas.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use super::FpsCounter;
use crate::config::FieldConfig;
use crate::field::{FieldState, advance};
use crate::render::{CanvasSurface, Surface, draw_field};

/// Frames between FPS debug lines
const FPS_LOG_EVERY: u64 = 600;

/// Per-instance state shared between the handle and the frame closure
struct App {
    state: FieldState,
    surface: CanvasSurface,
    fps: FpsCounter,
}

impl App {
    fn frame(&mut self, time_ms: f64) {
        self.fps.record(time_ms);
        // covers hosts that never call resize() on us
        if self.surface.sync_to_client() {
            let (width, height) = self.surface.logical_size();
            self.state.rebuild(width, height);
        }
        advance(&mut self.state);
        draw_field(&self.state, &mut self.surface);
        if self.state.frame % FPS_LOG_EVERY == 0 {
            log::debug!("frame {}: {:.1} fps", self.state.frame, self.fps.average());
        }
    }
}

fn request_frame(cb: &Closure<dyn FnMut(f64)>) -> Option<i32> {
    web_sys::window()?
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .ok()
}

/// One animated black-hole field bound to one canvas
#[wasm_bindgen]
pub struct FieldAnimator {
    app: Rc<RefCell<App>>,
    running: Rc<Cell<bool>>,
    // holds the frame closure so it can reschedule itself; emptied on drop
    // to break the Rc cycle through its own captures
    frame_cb: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
    raf_id: Rc<Cell<Option<i32>>>,
}

impl FieldAnimator {
    /// Attach to a canvas with an already-resolved configuration.
    pub fn with_config(
        canvas: HtmlCanvasElement,
        config: FieldConfig,
    ) -> Result<FieldAnimator, JsValue> {
        let surface = CanvasSurface::new(canvas)?;
        let (width, height) = surface.logical_size();
        let seed = config.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let state = FieldState::new(config, seed, width, height);

        Ok(FieldAnimator {
            app: Rc::new(RefCell::new(App {
                state,
                surface,
                fps: FpsCounter::new(),
            })),
            running: Rc::new(Cell::new(false)),
            frame_cb: Rc::new(RefCell::new(None)),
            raf_id: Rc::new(Cell::new(None)),
        })
    }

    fn ensure_frame_closure(&self) {
        if self.frame_cb.borrow().is_some() {
            return;
        }
        let app = self.app.clone();
        let running = self.running.clone();
        let cb_slot = self.frame_cb.clone();
        let raf_id = self.raf_id.clone();
        *self.frame_cb.borrow_mut() = Some(Closure::wrap(Box::new(move |time: f64| {
            if !running.get() {
                return;
            }
            app.borrow_mut().frame(time);
            // the frame may have stopped us; only then reschedule
            if !running.get() {
                return;
            }
            if let Some(cb) = cb_slot.borrow().as_ref() {
                raf_id.set(request_frame(cb));
            }
        }) as Box<dyn FnMut(f64)>));
    }

    fn cancel_pending_frame(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(window) = web_sys::window() {
                window.cancel_animation_frame(id).ok();
            }
        }
    }
}

#[wasm_bindgen]
impl FieldAnimator {
    /// Attach to a canvas. `config_json` is a JSON `FieldConfig`; missing
    /// fields (or `null`) fall back to the reference configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        config_json: Option<String>,
    ) -> Result<FieldAnimator, JsValue> {
        let config = match config_json.as_deref() {
            Some(json) => serde_json::from_str(json)
                .map_err(|e| JsValue::from_str(&format!("invalid field config: {e}")))?,
            None => FieldConfig::default(),
        };
        Self::with_config(canvas, config)
    }

    /// Begin the frame loop. Idempotent while running.
    pub fn start(&self) {
        if self.running.get() {
            return;
        }
        self.running.set(true);
        self.ensure_frame_closure();
        if let Some(cb) = self.frame_cb.borrow().as_ref() {
            self.raf_id.set(request_frame(cb));
        }
        log::info!("field animator started");
    }

    /// Stop the frame loop; `start()` resumes where it left off.
    pub fn stop(&self) {
        if !self.running.get() {
            return;
        }
        self.running.set(false);
        self.cancel_pending_frame();
        log::info!("field animator stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Re-run setup against the current canvas size.
    ///
    /// The frame loop also self-checks every frame, so this only matters
    /// for an immediate rebuild while stopped.
    pub fn resize(&self) {
        let mut app = self.app.borrow_mut();
        if app.surface.sync_to_client() {
            let (width, height) = app.surface.logical_size();
            app.state.rebuild(width, height);
        }
    }

    /// Rolling FPS over the last 60 frames
    pub fn fps(&self) -> f64 {
        self.app.borrow().fps.average()
    }

    /// Frames advanced since attach
    pub fn frame_count(&self) -> f64 {
        self.app.borrow().state.frame as f64
    }
}

impl Drop for FieldAnimator {
    fn drop(&mut self) {
        self.running.set(false);
        self.cancel_pending_frame();
        self.frame_cb.borrow_mut().take();
    }
}
