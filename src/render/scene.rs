//! The field draw pass
//!
//! Pure translation from field state to surface calls: rings first, dots
//! on top. Draws below the visibility floor are skipped; skipping never
//! touches state, so the field advances identically with or without them.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::consts::*;
use crate::ellipse_point;
use crate::field::FieldState;
use crate::render::surface::Surface;

/// Draw one frame of the field
pub fn draw_field<S: Surface>(state: &FieldState, surface: &mut S) {
    surface.clear();

    for disc in &state.discs {
        if disc.alpha < MIN_VISIBLE_ALPHA {
            continue;
        }
        // ellipse center sits h below the disc position
        let center = Vec2::new(disc.pos.x, disc.pos.y + disc.h);
        surface.stroke_ellipse(
            center,
            Vec2::new(disc.w, disc.h),
            RING_COLOR,
            RING_WIDTH,
            disc.alpha,
        );
    }

    for dot in &state.dots {
        let disc = &state.discs[dot.disc];
        let alpha = disc.alpha * dot.opacity;
        if alpha < MIN_VISIBLE_ALPHA {
            continue;
        }
        let p = disc.scale_product();
        let center = ellipse_point(
            Vec2::new(disc.pos.x, disc.pos.y + disc.h),
            Vec2::new(disc.w, disc.h),
            TAU * dot.progress,
        );
        surface.fill_circle(
            center,
            DOT_BASE_RADIUS + DOT_RADIUS_GAIN * p,
            dot.color,
            alpha,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::render::surface::{DrawOp, RecordingSurface};

    fn small_field(disc_count: usize, dot_count: usize, seed: u64) -> FieldState {
        let config = FieldConfig {
            disc_count,
            dot_count,
            ..FieldConfig::default()
        };
        FieldState::new(config, seed, 100.0, 100.0)
    }

    #[test]
    fn test_clear_happens_exactly_once_and_first() {
        let state = small_field(4, 16, 1);
        let mut surface = RecordingSurface::new(100.0, 100.0);
        draw_field(&state, &mut surface);

        assert_eq!(surface.ops[0], DrawOp::Clear);
        let clears = surface
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Clear))
            .count();
        assert_eq!(clears, 1);
    }

    #[test]
    fn test_one_stroke_per_visible_disc() {
        // phases 0, 0.25, 0.5, 0.75: the p=1 ring and the near-vanished
        // ring fall below the floor, the two midflight rings are visible
        let state = small_field(4, 0, 1);
        let mut surface = RecordingSurface::new(100.0, 100.0);
        draw_field(&state, &mut surface);

        let visible = state
            .discs
            .iter()
            .filter(|d| d.alpha >= MIN_VISIBLE_ALPHA)
            .count();
        assert_eq!(surface.ellipses_this_frame(), visible);
        assert_eq!(visible, 2);
    }

    #[test]
    fn test_dots_draw_only_when_combined_alpha_visible() {
        let state = small_field(2, 64, 3);
        let mut surface = RecordingSurface::new(100.0, 100.0);
        draw_field(&state, &mut surface);

        let expected = state
            .dots
            .iter()
            .filter(|dot| state.discs[dot.disc].alpha * dot.opacity >= MIN_VISIBLE_ALPHA)
            .count();
        assert_eq!(surface.circles_this_frame(), expected);
        assert!(expected > 0, "seeded field should have visible dots");
    }

    #[test]
    fn test_dot_radius_follows_host_scale_product() {
        // two discs at phases 0 and 0.5; only the 0.5 disc is visible, so
        // every drawn dot shares its radius
        let state = small_field(2, 64, 3);
        let expected_radius =
            DOT_BASE_RADIUS + DOT_RADIUS_GAIN * state.discs[1].scale_product();

        let mut surface = RecordingSurface::new(100.0, 100.0);
        draw_field(&state, &mut surface);

        let mut circles = 0;
        for op in &surface.ops {
            if let DrawOp::FillCircle { radius, .. } = op {
                assert!((radius - expected_radius).abs() < 1e-6);
                circles += 1;
            }
        }
        assert!(circles > 0);
    }

    #[test]
    fn test_dot_centers_lie_on_host_ellipse() {
        let state = small_field(2, 64, 3);
        let disc = state.discs[1];
        let (cx, cy) = (disc.pos.x, disc.pos.y + disc.h);

        let mut surface = RecordingSurface::new(100.0, 100.0);
        draw_field(&state, &mut surface);

        for op in &surface.ops {
            if let DrawOp::FillCircle { center, .. } = op {
                let nx = (center.x - cx) / disc.w;
                let ny = (center.y - cy) / disc.h;
                assert!(
                    (nx * nx + ny * ny - 1.0).abs() < 1e-3,
                    "dot off its ring: {center:?}"
                );
            }
        }
    }

    #[test]
    fn test_emitted_alphas_stay_in_unit_range() {
        let state = small_field(8, 256, 11);
        let mut surface = RecordingSurface::new(100.0, 100.0);
        draw_field(&state, &mut surface);

        for op in &surface.ops {
            let alpha = match op {
                DrawOp::Clear => continue,
                DrawOp::StrokeEllipse { alpha, .. } => *alpha,
                DrawOp::FillCircle { alpha, .. } => *alpha,
            };
            assert!((0.0..=1.0).contains(&alpha), "alpha out of range: {alpha}");
        }
    }
}
