//! Deterministic animation core
//!
//! All field state and per-frame math lives here. This module must stay pure
//! and deterministic:
//! - Frame-based phase advance only (no wall-clock time)
//! - Seeded RNG only, drawn solely during (re)build
//! - Stable iteration order (build order)
//! - No rendering or platform dependencies

pub mod ease;
pub mod state;
pub mod step;

pub use ease::{Easing, tween};
pub use state::{Disc, Dot, FieldGeometry, FieldState, Rgb, ring_alpha};
pub use step::{advance, dot_speed};
