//! Canvas2D surface backend
//!
//! The backing store tracks the canvas client size times the device pixel
//! ratio; all drawing happens in logical (CSS pixel) coordinates behind a
//! per-frame scale transform.

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::field::Rgb;
use crate::render::surface::Surface;

fn device_pixel_ratio() -> f64 {
    web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
}

/// 2D-context surface over a host canvas
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
    dpr: f64,
}

impl CanvasSurface {
    /// Wrap a canvas, sizing the backing store to its current client size.
    ///
    /// Fails on a canvas with no layout size or no 2D context; attaching
    /// before the element is laid out is a host contract violation.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let width = canvas.client_width();
        let height = canvas.client_height();
        if width <= 0 || height <= 0 {
            return Err(JsValue::from_str("canvas has no layout size"));
        }

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let mut surface = Self {
            canvas,
            ctx,
            width: 0.0,
            height: 0.0,
            dpr: 0.0,
        };
        surface.resize_backing_store(width, height, device_pixel_ratio());
        Ok(surface)
    }

    fn resize_backing_store(&mut self, width: i32, height: i32, dpr: f64) {
        self.width = width as f32;
        self.height = height as f32;
        self.dpr = dpr;
        self.canvas.set_width((width as f64 * dpr) as u32);
        self.canvas.set_height((height as f64 * dpr) as u32);
        log::info!("canvas surface {width}x{height} @{dpr}x");
    }

    /// Re-check the canvas client size and pixel ratio.
    ///
    /// Returns true when the backing store was resized; callers should
    /// rebuild their field for the new logical size. A transiently
    /// zero-sized canvas (display: none) is left untouched.
    pub fn sync_to_client(&mut self) -> bool {
        let width = self.canvas.client_width();
        let height = self.canvas.client_height();
        let dpr = device_pixel_ratio();
        let changed =
            width as f32 != self.width || height as f32 != self.height || dpr != self.dpr;
        if changed && width > 0 && height > 0 {
            self.resize_backing_store(width, height, dpr);
            return true;
        }
        false
    }
}

impl Surface for CanvasSurface {
    fn logical_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        // one transform per frame; canvas resizes reset context state
        self.ctx
            .set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)
            .ok();
        self.ctx
            .clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, color: Rgb, width: f32, alpha: f32) {
        let Rgb { r, g, b } = color;
        self.ctx
            .set_stroke_style_str(&format!("rgba({r},{g},{b},{alpha:.3})"));
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx
            .ellipse(
                center.x as f64,
                center.y as f64,
                radii.x as f64,
                radii.y as f64,
                0.0,
                0.0,
                std::f64::consts::TAU,
            )
            .ok();
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32) {
        let Rgb { r, g, b } = color;
        self.ctx
            .set_fill_style_str(&format!("rgba({r},{g},{b},{alpha:.3})"));
        self.ctx.begin_path();
        self.ctx
            .arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            )
            .ok();
        self.ctx.fill();
    }
}
