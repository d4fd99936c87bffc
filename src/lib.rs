//! Voidfield - a spiraling black-hole particle background
//!
//! Core modules:
//! - `field`: Deterministic animation core (discs, dots, easing, per-frame update)
//! - `render`: Drawing-surface abstraction and the draw pass
//! - `platform`: Browser platform glue (canvas attach, frame loop, cancellation)
//! - `config`: Runtime configuration and quality presets

pub mod config;
pub mod field;
pub mod platform;
pub mod render;

pub use config::{FieldConfig, QualityPreset};
pub use field::{FieldState, Rgb};

use glam::Vec2;

/// Field configuration constants
pub mod consts {
    use crate::field::Rgb;

    /// Reference disc population
    pub const DISC_COUNT: usize = 150;
    /// Reference dot population
    pub const DOT_COUNT: usize = 20_000;

    /// Disc phase advance per frame; a full recession cycle is ~3333 frames
    pub const DISC_SPEED: f32 = 0.0003;
    /// Upper bound of the dot angular speed range (phase/frame)
    pub const DOT_MAX_SPEED: f32 = 0.001;

    /// Scale product below which disc alpha ramps in cubically
    pub const ALPHA_RAMP_IN: f32 = 0.01;
    /// Scale product above which disc alpha ramps out linearly
    pub const ALPHA_RAMP_OUT: f32 = 0.2;

    /// Base ellipse radii as fractions of the logical surface
    pub const RADIUS_X_RATIO: f32 = 0.45;
    pub const RADIUS_Y_RATIO: f32 = 0.38;
    /// Ellipse top edges sit on this line at spawn
    pub const HORIZON_RATIO: f32 = 0.5;
    /// Downward offset at full progress, as a fraction of surface height
    pub const DRIFT_RATIO: f32 = 0.2;

    /// Dot radius = DOT_BASE_RADIUS + DOT_RADIUS_GAIN * host scale product
    pub const DOT_BASE_RADIUS: f32 = 1.0;
    pub const DOT_RADIUS_GAIN: f32 = 0.5;

    /// Lower bound of the green/blue channels in the dot palette
    pub const DOT_CHANNEL_MIN: u8 = 150;

    /// Ring stroke style
    pub const RING_COLOR: Rgb = Rgb { r: 0, g: 110, b: 140 };
    pub const RING_WIDTH: f32 = 0.5;

    /// Combined alpha below which a draw call is skipped
    pub const MIN_VISIBLE_ALPHA: f32 = 1.0 / 255.0;
}

/// Wrap a cyclic phase to [0, 1)
#[inline]
pub fn wrap_unit(p: f32) -> f32 {
    let w = p - p.floor();
    if w >= 1.0 { 0.0 } else { w }
}

/// Point on an axis-aligned ellipse at `angle` radians
#[inline]
pub fn ellipse_point(center: Vec2, radii: Vec2, angle: f32) -> Vec2 {
    Vec2::new(
        center.x + radii.x * angle.cos(),
        center.y + radii.y * angle.sin(),
    )
}
