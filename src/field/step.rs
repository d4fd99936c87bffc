//! Per-frame field update
//!
//! One call per display frame. Discs advance and retween first, then dots
//! read their host disc's fresh scale product, so a dot's speed always
//! reflects the ring it is currently riding.

use crate::field::ease::{Easing, tween};
use crate::field::state::FieldState;
use crate::wrap_unit;

/// Angular speed of a dot whose host disc has scale product `p`.
///
/// `InExpo` over `1 - p` makes dots on collapsing rings orbit fastest and
/// dots on full-size rings barely move.
#[inline]
pub fn dot_speed(p: f32, max_speed: f32) -> f32 {
    tween(0.0, max_speed, 1.0 - p, Easing::InExpo)
}

/// Advance the field by one display frame
pub fn advance(state: &mut FieldState) {
    let geometry = state.geometry;
    let disc_speed = state.config.disc_speed;
    let max_speed = state.config.dot_max_speed;

    for disc in &mut state.discs {
        disc.progress = wrap_unit(disc.progress + disc_speed);
        disc.retween(&geometry);
    }

    for dot in &mut state.dots {
        let p = state.discs[dot.disc].scale_product();
        dot.progress = wrap_unit(dot.progress + dot_speed(p, max_speed));
    }

    state.frame += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::consts::{DISC_SPEED, DOT_MAX_SPEED};
    use proptest::prelude::*;

    fn small_field(disc_count: usize, dot_count: usize, seed: u64) -> FieldState {
        let config = FieldConfig {
            disc_count,
            dot_count,
            ..FieldConfig::default()
        };
        FieldState::new(config, seed, 100.0, 100.0)
    }

    #[test]
    fn test_wrap_unit_basics() {
        assert_eq!(wrap_unit(0.0), 0.0);
        assert_eq!(wrap_unit(0.5), 0.5);
        assert_eq!(wrap_unit(1.0), 0.0);
        assert!((wrap_unit(1.25) - 0.25).abs() < 1e-6);
        assert!((wrap_unit(-0.25) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_single_frame_advances_by_disc_speed() {
        let mut state = small_field(4, 0, 1);
        advance(&mut state);
        assert!((state.discs[1].progress - (0.25 + DISC_SPEED)).abs() < 1e-6);
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_retween_applied_after_advance() {
        let mut state = small_field(1, 0, 1);
        advance(&mut state);
        let disc = &state.discs[0];
        // progress moved off 0, so scale must have left 1 on both axes
        assert!(disc.scale_x < 1.0);
        assert!(disc.scale_y < 1.0);
        assert!(disc.w < state.geometry.radius_x);
    }

    #[test]
    fn test_progress_wraps_within_cycle() {
        let mut state = small_field(4, 16, 1);
        let frames = (1.0_f32 / DISC_SPEED).ceil() as u32; // 3334
        let mut wraps = 0;
        let mut prev = state.discs[0].progress;
        for _ in 0..frames {
            advance(&mut state);
            for disc in &state.discs {
                assert!((0.0..1.0).contains(&disc.progress));
            }
            for dot in &state.dots {
                assert!((0.0..1.0).contains(&dot.progress));
            }
            let now = state.discs[0].progress;
            if now < prev {
                wraps += 1;
            }
            prev = now;
        }
        assert!(wraps >= 1, "disc 0 never wrapped in {frames} frames");
    }

    #[test]
    fn test_dot_speed_fastest_at_vanishing_point() {
        let fast = dot_speed(0.0, DOT_MAX_SPEED);
        let slow = dot_speed(0.99, DOT_MAX_SPEED);
        assert_eq!(fast, DOT_MAX_SPEED);
        assert!(slow < fast);
        assert!(slow < 1e-5, "speed at p=0.99 should be near zero, got {slow}");
        assert_eq!(dot_speed(1.0, DOT_MAX_SPEED), 0.0);
    }

    #[test]
    fn test_dot_speed_monotone_nonincreasing_in_p() {
        let mut prev = dot_speed(0.0, DOT_MAX_SPEED);
        for i in 1..=100 {
            let p = i as f32 / 100.0;
            let speed = dot_speed(p, DOT_MAX_SPEED);
            assert!(speed <= prev + 1e-9, "speed rose at p = {p}");
            prev = speed;
        }
    }

    #[test]
    fn test_host_indices_stay_valid_across_frames() {
        let mut state = small_field(3, 40, 5);
        for _ in 0..500 {
            advance(&mut state);
        }
        for dot in &state.dots {
            assert!(dot.disc < state.discs.len());
        }
    }

    /// Shortest distance between two phases on the unit circle.
    fn cyclic_distance(a: f32, b: f32) -> f32 {
        let d = (a - b).abs();
        d.min(1.0 - d)
    }

    #[test]
    fn test_discs_return_after_whole_cycles() {
        // 10_000 frames at 0.0003/frame is exactly three full cycles
        let mut state = small_field(4, 8, 42);
        let initial: Vec<f32> = state.discs.iter().map(|d| d.progress).collect();
        for _ in 0..10_000 {
            advance(&mut state);
            for disc in &state.discs {
                assert!((0.0..1.0).contains(&disc.progress));
            }
            for dot in &state.dots {
                assert!((0.0..1.0).contains(&dot.progress));
            }
        }
        for (disc, start) in state.discs.iter().zip(&initial) {
            let drift = cyclic_distance(disc.progress, *start);
            assert!(drift < 2e-3, "disc drifted {drift} after three cycles");
        }
        assert_eq!(state.frame, 10_000);
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let mut a = small_field(6, 32, 9);
        let mut b = small_field(6, 32, 9);
        for _ in 0..1_000 {
            advance(&mut a);
            advance(&mut b);
        }
        assert_eq!(a.discs, b.discs);
        assert_eq!(a.dots, b.dots);
    }

    proptest! {
        #[test]
        fn prop_wrap_unit_stays_in_unit_interval(p in -1.0e6f32..1.0e6) {
            let w = wrap_unit(p);
            prop_assert!((0.0..1.0).contains(&w), "wrap_unit({p}) = {w}");
        }

        #[test]
        fn prop_dot_speed_bounded(p in 0.0f32..=1.0) {
            let speed = dot_speed(p, DOT_MAX_SPEED);
            prop_assert!((0.0..=DOT_MAX_SPEED).contains(&speed));
        }
    }
}
