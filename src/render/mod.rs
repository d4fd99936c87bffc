//! Drawing-surface abstraction and the field draw pass
//!
//! The field core never touches a real canvas; everything it needs from a
//! backend is the `Surface` trait. `CanvasSurface` implements it over a
//! browser 2D context, `RecordingSurface` logs draw calls for tests and
//! the headless demo.

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;
pub mod scene;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::CanvasSurface;
pub use scene::draw_field;
pub use surface::{DrawOp, RecordingSurface, Surface};
