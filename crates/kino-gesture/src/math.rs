//! Geometry and math helpers
//!
//! Pure functions shared by the resolver, the tap classifier and the
//! controller. No state, no logging.

use crate::types::{Axis, DoubleTapAction};

/// Clamp `value` into `[min, max]`
///
/// Unlike `f64::clamp` this never panics; a NaN input yields `min`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() || value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Decide which axis a drag belongs to, if it has travelled far enough.
///
/// Ties go to horizontal.
pub fn resolve_direction(dx: f64, dy: f64, threshold: f64) -> Option<Axis> {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ax.max(ay) < threshold {
        return None;
    }
    if ax >= ay {
        Some(Axis::Horizontal)
    } else {
        Some(Axis::Vertical)
    }
}

/// Upper seek bound for a duration; live or unknown-length streams are unbounded
pub fn seek_upper_bound(duration: f64) -> f64 {
    if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        f64::INFINITY
    }
}

/// Seek target for a horizontal drag of `dx` pixels from `start_time`
pub fn compute_seek_preview(start_time: f64, dx: f64, duration: f64, seconds_per_100px: f64) -> f64 {
    let target = start_time + dx / 100.0 * seconds_per_100px;
    clamp(target, 0.0, seek_upper_bound(duration))
}

/// Seek target for a fixed skip of `delta` seconds from `current`
pub fn skip_target(current: f64, delta: f64, duration: f64) -> f64 {
    clamp(current + delta, 0.0, seek_upper_bound(duration))
}

/// Volume for a vertical drag of `dy` pixels; dragging up (negative dy) raises it
pub fn compute_volume_from_swipe(
    start_volume: f64,
    dy: f64,
    player_height: f64,
    full_range_ratio: f64,
) -> f64 {
    let effective_range = (player_height * full_range_ratio).max(1.0);
    clamp(start_volume - dy / effective_range, 0.0, 1.0)
}

/// Whether `x` lies in one of the edge bands where vertical drags control volume
pub fn is_in_volume_zone(x: f64, width: f64, side_zone_ratio: f64) -> bool {
    x <= width * side_zone_ratio || x >= width * (1.0 - side_zone_ratio)
}

/// Map the horizontal position of a double tap to its action
pub fn resolve_double_tap_action(x: f64, width: f64, side_zone_ratio: f64) -> DoubleTapAction {
    if x <= width * side_zone_ratio {
        DoubleTapAction::Backward
    } else if x >= width * (1.0 - side_zone_ratio) {
        DoubleTapAction::Forward
    } else {
        DoubleTapAction::Toggle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(f64::NAN, 0.0, 10.0), 0.0);
        assert_eq!(clamp(1e9, 0.0, f64::INFINITY), 1e9);
    }

    #[test]
    fn test_resolve_direction() {
        assert_eq!(resolve_direction(5.0, 5.0, 12.0), None);
        assert_eq!(resolve_direction(-11.9, 3.0, 12.0), None);
        assert_eq!(resolve_direction(12.0, 3.0, 12.0), Some(Axis::Horizontal));
        assert_eq!(resolve_direction(-3.0, -20.0, 12.0), Some(Axis::Vertical));
        // tie
        assert_eq!(resolve_direction(15.0, -15.0, 12.0), Some(Axis::Horizontal));
    }

    #[test]
    fn test_seek_preview_scenarios() {
        assert_eq!(compute_seek_preview(100.0, 200.0, 240.0, 12.0), 124.0);
        assert_eq!(compute_seek_preview(8.0, -300.0, 240.0, 12.0), 0.0);
        assert_eq!(compute_seek_preview(235.0, 200.0, 240.0, 12.0), 240.0);
    }

    #[test]
    fn test_seek_preview_unknown_duration() {
        assert_eq!(compute_seek_preview(100.0, 1000.0, f64::NAN, 12.0), 220.0);
        assert_eq!(compute_seek_preview(100.0, 1000.0, f64::INFINITY, 12.0), 220.0);
        assert_eq!(compute_seek_preview(100.0, 1000.0, 0.0, 12.0), 220.0);
        assert_eq!(compute_seek_preview(100.0, -2000.0, 0.0, 12.0), 0.0);
    }

    #[test]
    fn test_skip_target() {
        assert_eq!(skip_target(5.0, -10.0, 240.0), 0.0);
        assert_eq!(skip_target(235.0, 10.0, 240.0), 240.0);
        assert_eq!(skip_target(235.0, 10.0, f64::NAN), 245.0);
    }

    #[test]
    fn test_volume_scenarios() {
        assert!((compute_volume_from_swipe(0.5, -180.0, 360.0, 0.9) - 1.0).abs() < 1e-9);
        assert_eq!(compute_volume_from_swipe(0.05, 500.0, 360.0, 0.9), 0.0);
        assert!((compute_volume_from_swipe(0.5, 162.0, 360.0, 0.9) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_volume_degenerate_height() {
        // range floors at 1px
        assert_eq!(compute_volume_from_swipe(0.5, -0.25, 0.0, 0.9), 0.75);
    }

    #[test]
    fn test_double_tap_zones() {
        assert_eq!(resolve_double_tap_action(60.0, 360.0, 0.22), DoubleTapAction::Backward);
        assert_eq!(resolve_double_tap_action(180.0, 360.0, 0.22), DoubleTapAction::Toggle);
        assert_eq!(resolve_double_tap_action(320.0, 360.0, 0.22), DoubleTapAction::Forward);
    }

    #[test]
    fn test_volume_zone() {
        assert!(is_in_volume_zone(80.0, 360.0, 0.32));
        assert!(!is_in_volume_zone(180.0, 360.0, 0.32));
        assert!(is_in_volume_zone(300.0, 360.0, 0.32));
    }

    fn zone_rank(action: DoubleTapAction) -> u8 {
        match action {
            DoubleTapAction::Backward => 0,
            DoubleTapAction::Toggle => 1,
            DoubleTapAction::Forward => 2,
        }
    }

    proptest! {
        #[test]
        fn direction_is_none_below_threshold(
            threshold in 1.0f64..100.0,
            fx in -0.999f64..0.999,
            fy in -0.999f64..0.999,
        ) {
            prop_assert_eq!(resolve_direction(fx * threshold, fy * threshold, threshold), None);
        }

        #[test]
        fn seek_preview_stays_within_duration(
            start in 0.0f64..10_000.0,
            dx in -10_000.0f64..10_000.0,
            duration in 0.001f64..10_000.0,
            rate in 0.0f64..600.0,
        ) {
            let start = start.min(duration);
            let preview = compute_seek_preview(start, dx, duration, rate);
            prop_assert!((0.0..=duration).contains(&preview));
        }

        #[test]
        fn volume_stays_in_unit_range(
            start in 0.0f64..=1.0,
            dy in -5_000.0f64..5_000.0,
            height in 0.0f64..4_000.0,
            ratio in 0.05f64..4.0,
        ) {
            let volume = compute_volume_from_swipe(start, dy, height, ratio);
            prop_assert!((0.0..=1.0).contains(&volume));
        }

        #[test]
        fn upward_drag_never_lowers_volume(
            start in 0.0f64..=1.0,
            up in 0.0f64..5_000.0,
            height in 0.0f64..4_000.0,
            ratio in 0.05f64..4.0,
        ) {
            prop_assert!(compute_volume_from_swipe(start, -up, height, ratio) >= start);
        }

        #[test]
        fn double_tap_zones_are_contiguous_and_symmetric(
            width in 1.0f64..4_000.0,
            ratio in 0.0f64..0.5,
            steps in 2usize..200,
        ) {
            let mut last = 0u8;
            for i in 0..=steps {
                let x = width * i as f64 / steps as f64;
                let rank = zone_rank(resolve_double_tap_action(x, width, ratio));
                // zones only ever advance left to right, so no gaps or overlaps
                prop_assert!(rank >= last);
                last = rank;

                let edge = width * ratio;
                if (x - edge).abs() < 1e-6 || (width - x - edge).abs() < 1e-6 {
                    continue;
                }
                let mirrored = zone_rank(resolve_double_tap_action(width - x, width, ratio));
                match rank {
                    1 => prop_assert_eq!(mirrored, 1),
                    r => prop_assert_eq!(mirrored, 2 - r),
                }
            }
        }
    }
}
