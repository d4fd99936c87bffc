//! The `Surface` trait and the recording backend

use glam::Vec2;

use crate::field::Rgb;

/// Minimal 2D drawing contract the draw pass needs from a backend.
///
/// All coordinates are logical pixels; backends own any device-pixel-ratio
/// scaling. `alpha` is per-call global opacity in `[0, 1]`.
pub trait Surface {
    /// Current logical size as (width, height)
    fn logical_size(&self) -> (f32, f32);

    /// Clear the whole surface; called first every frame
    fn clear(&mut self);

    /// Stroke an axis-aligned ellipse outline
    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, color: Rgb, width: f32, alpha: f32);

    /// Fill a circle
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    StrokeEllipse {
        center: Vec2,
        radii: Vec2,
        color: Rgb,
        width: f32,
        alpha: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Rgb,
        alpha: f32,
    },
}

/// Surface that records draw calls instead of rasterizing.
///
/// `clear` starts a fresh per-frame op log (with the clear itself as the
/// first entry), so `ops` always holds exactly the current frame. Running
/// totals survive across frames for headless statistics.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    /// Ops of the frame in progress, clear first
    pub ops: Vec<DrawOp>,
    /// Frames started (clear calls)
    pub frames: u64,
    pub total_ellipses: u64,
    pub total_circles: u64,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Ellipse strokes recorded in the current frame
    pub fn ellipses_this_frame(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::StrokeEllipse { .. }))
            .count()
    }

    /// Circle fills recorded in the current frame
    pub fn circles_this_frame(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillCircle { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn logical_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
        self.frames += 1;
    }

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, color: Rgb, width: f32, alpha: f32) {
        self.total_ellipses += 1;
        self.ops.push(DrawOp::StrokeEllipse {
            center,
            radii,
            color,
            width,
            alpha,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32) {
        self.total_circles += 1;
        self.ops.push(DrawOp::FillCircle {
            center,
            radius,
            color,
            alpha,
        });
    }
}
