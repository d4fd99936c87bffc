//! Field state and core animation types
//!
//! Discs and dots are built deterministically from a seed; per-frame
//! updates never draw randomness, so two fields built alike stay alike.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::FieldConfig;
use crate::consts::*;
use crate::field::ease::{Easing, tween};

/// Packed RGB color, formatted by surfaces at draw time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Layout of the field within a logical surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldGeometry {
    pub width: f32,
    pub height: f32,
    /// Shared x of every disc
    pub center_x: f32,
    /// Ellipse top edges sit on this line at spawn
    pub horizon_y: f32,
    /// Base radii at scale 1
    pub radius_x: f32,
    pub radius_y: f32,
    /// Downward offset at full progress
    pub drift_y: f32,
}

impl FieldGeometry {
    /// Derive the layout from a logical surface size.
    ///
    /// Sizes below one logical pixel are clamped.
    pub fn from_size(width: f32, height: f32) -> Self {
        let width = width.max(1.0);
        let height = height.max(1.0);
        Self {
            width,
            height,
            center_x: width / 2.0,
            horizon_y: height * HORIZON_RATIO,
            radius_x: width * RADIUS_X_RATIO,
            radius_y: height * RADIUS_Y_RATIO,
            drift_y: height * DRIFT_RATIO,
        }
    }
}

/// One receding ring, parameterized by cyclic progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    /// Cyclic phase in [0, 1); advances every frame and wraps
    pub progress: f32,
    /// Position; the ellipse is drawn centered at `(pos.x, pos.y + h)`
    pub pos: Vec2,
    /// Eased per-axis scale, 1 at spawn, 0 at full progress
    pub scale_x: f32,
    pub scale_y: f32,
    /// Current radii (base extent times scale)
    pub w: f32,
    pub h: f32,
    /// Opacity from the three-zone policy over the scale product
    pub alpha: f32,
}

impl Disc {
    /// Spawn disc `index` of `count`, phases spread evenly so the field
    /// looks fully populated from the first frame.
    pub fn spawn(index: usize, count: usize, geometry: &FieldGeometry) -> Self {
        let mut disc = Self {
            progress: index as f32 / count as f32,
            pos: Vec2::ZERO,
            scale_x: 0.0,
            scale_y: 0.0,
            w: 0.0,
            h: 0.0,
            alpha: 0.0,
        };
        disc.retween(geometry);
        disc
    }

    /// Recompute everything derived from `progress`
    pub fn retween(&mut self, geometry: &FieldGeometry) {
        self.scale_x = tween(1.0, 0.0, self.progress, Easing::OutCubic);
        self.scale_y = tween(1.0, 0.0, self.progress, Easing::OutExpo);
        self.w = geometry.radius_x * self.scale_x;
        self.h = geometry.radius_y * self.scale_y;
        self.pos = Vec2::new(
            geometry.center_x,
            geometry.horizon_y + self.progress * geometry.drift_y,
        );
        self.alpha = ring_alpha(self.scale_product());
    }

    /// `scale_x * scale_y`, the driver for alpha and dot speed
    #[inline]
    pub fn scale_product(&self) -> f32 {
        self.scale_x * self.scale_y
    }
}

/// Disc opacity as a function of the scale product `p`.
///
/// Cubic ramp below `ALPHA_RAMP_IN` so rings never pop in at the vanishing
/// point, linear ramp above `ALPHA_RAMP_OUT` so the largest rings fade out,
/// fully opaque plateau in between.
pub fn ring_alpha(p: f32) -> f32 {
    if p < ALPHA_RAMP_IN {
        let t = p / ALPHA_RAMP_IN;
        t * t * t
    } else if p > ALPHA_RAMP_OUT {
        1.0 - ((p - ALPHA_RAMP_OUT) / (1.0 - ALPHA_RAMP_OUT)).min(1.0)
    } else {
        1.0
    }
}

/// One particle orbiting a disc's ellipse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    /// Index of the host disc in `FieldState::discs`
    pub disc: usize,
    /// Own cyclic phase; the orbit angle is `2π * progress`
    pub progress: f32,
    /// Fixed cyan/teal color assigned at spawn
    pub color: Rgb,
    /// Fixed per-dot opacity factor
    pub opacity: f32,
}

impl Dot {
    /// Spawn a dot on a uniformly random disc.
    ///
    /// The random initial phase is what spreads dots around their ring;
    /// dots sharing a disc also share a speed, so the spread never
    /// collapses.
    pub fn spawn(rng: &mut impl Rng, disc_count: usize) -> Self {
        Self {
            disc: rng.random_range(0..disc_count),
            progress: rng.random::<f32>(),
            color: Rgb {
                r: 0,
                g: rng.random_range(DOT_CHANNEL_MIN..=u8::MAX),
                b: rng.random_range(DOT_CHANNEL_MIN..=u8::MAX),
            },
            opacity: rng.random::<f32>(),
        }
    }
}

/// Complete animation state owned by one animator instance
#[derive(Debug, Clone)]
pub struct FieldState {
    /// Active configuration (clamped at construction)
    pub config: FieldConfig,
    /// Seed behind every random draw, kept across rebuilds
    pub seed: u64,
    pub geometry: FieldGeometry,
    pub discs: Vec<Disc>,
    pub dots: Vec<Dot>,
    /// Frames advanced since creation
    pub frame: u64,
}

impl FieldState {
    /// Build a field for a logical surface size
    pub fn new(config: FieldConfig, seed: u64, width: f32, height: f32) -> Self {
        let mut state = Self {
            config: config.clamped(),
            seed,
            geometry: FieldGeometry::from_size(width, height),
            discs: Vec::new(),
            dots: Vec::new(),
            frame: 0,
        };
        state.rebuild(width, height);
        state
    }

    /// Rebuild the whole population for a (new) surface size.
    ///
    /// Discs are built first and dots are assigned against the finished
    /// disc set, then both vectors are installed; the next frame callback
    /// only ever sees the complete new population.
    pub fn rebuild(&mut self, width: f32, height: f32) {
        self.geometry = FieldGeometry::from_size(width, height);
        let mut rng = Pcg32::seed_from_u64(self.seed);

        let count = self.config.disc_count.max(1);
        let discs: Vec<Disc> = (0..count)
            .map(|i| Disc::spawn(i, count, &self.geometry))
            .collect();
        let dots: Vec<Dot> = (0..self.config.dot_count)
            .map(|_| Dot::spawn(&mut rng, discs.len()))
            .collect();

        self.discs = discs;
        self.dots = dots;
        log::info!(
            "field rebuilt: {} discs, {} dots, {}x{} logical px, seed {}",
            self.discs.len(),
            self.dots.len(),
            self.geometry.width,
            self.geometry.height,
            self.seed
        );
    }
}
