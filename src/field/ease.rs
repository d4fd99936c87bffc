//! Easing curves and the shared tween helper
//!
//! Disc scale and dot speed are all driven through `tween` with a fixed
//! curve per axis, so the curves here are the whole motion vocabulary of
//! the field.

/// Easing curve selector.
///
/// `Linear` is the explicit default rather than a fallback case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    OutCubic,
    OutExpo,
    InExpo,
}

impl Easing {
    /// Evaluate the curve at `t`.
    ///
    /// The exponential curves are guarded at their asymptotic endpoint so
    /// `OutExpo` is exactly 1 at `t = 1` and `InExpo` exactly 0 at `t = 0`.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::OutCubic => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Easing::OutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - f32::exp2(-10.0 * t)
                }
            }
            Easing::InExpo => {
                if t <= 0.0 {
                    0.0
                } else {
                    f32::exp2(10.0 * (t - 1.0))
                }
            }
        }
    }
}

/// Interpolate from `start` to `end` with `t` shaped by `easing`
#[inline]
pub fn tween(start: f32, end: f32, t: f32, easing: Easing) -> f32 {
    start + (end - start) * easing.apply(t)
}
