use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Wrap an angle into [0, 2π)
///
/// Negative inputs wrap from the top: `normalize(-0.1) == 2π - 0.1`.
pub fn normalize(angle: f32) -> f32 {
    let mut wrapped = angle % TAU;
    if wrapped < 0.0 {
        wrapped += TAU;
    }
    // -tiny + 2π rounds up to exactly 2π in f32
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Check whether `angle` lies inside the interval from `min` to `max`, going clockwise.
///
/// All three are normalized first. Both ends are inclusive. When `min > max` the
/// interval wraps past 0. When `min == max` only that exact angle matches.
pub fn is_between(angle: f32, min: f32, max: f32) -> bool {
    let angle = normalize(angle);
    let min = normalize(min);
    let max = normalize(max);

    if min == max {
        return angle == min;
    }
    if min < max {
        return angle >= min && angle <= max;
    }

    angle >= min || angle <= max
}

/// Unit direction for an angle measured clockwise from up (+Y)
pub fn direction_from_angle(radians_clockwise_from_up: f32) -> Vec2 {
    Vec2::new(radians_clockwise_from_up.sin(), radians_clockwise_from_up.cos())
}

/// Clockwise angle from up (+Y) to `dir`, in (-π, π]
pub fn angle_from_up(dir: Vec2) -> f32 {
    dir.x.atan2(dir.y)
}

/// Signed clockwise difference from `facing` to `absolute`, wrapped into (-π, π]
pub fn relative_angle(absolute: f32, facing: f32) -> f32 {
    let diff = normalize(absolute - facing);
    if diff > PI {
        diff - TAU
    } else {
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_negative() {
        assert_relative_eq!(normalize(-0.1), TAU - 0.1, epsilon = 1e-6);
        assert_relative_eq!(normalize(-TAU - 1.0), TAU - 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_normalize_range() {
        for i in -200..200 {
            let x = i as f32 * 0.37;
            let n = normalize(x);
            assert!(n >= 0.0 && n < TAU, "normalize({}) = {}", x, n);
            // congruent mod 2π
            let turns = ((x - n) / TAU).round();
            assert_relative_eq!(x - n, turns * TAU, epsilon = 1e-3);
        }
        assert!(normalize(-1e-9) < TAU);
        assert_eq!(normalize(TAU), 0.0);
    }

    #[test]
    fn test_is_between_plain() {
        assert!(is_between(1.0, 0.5, 1.5));
        assert!(is_between(0.5, 0.5, 1.5));
        assert!(is_between(1.5, 0.5, 1.5));
        assert!(!is_between(2.0, 0.5, 1.5));
    }

    #[test]
    fn test_is_between_wraparound() {
        // interval from -π/4 to π/4 crosses the 0 seam
        let min = -PI / 4.0;
        let max = PI / 4.0;
        assert!(is_between(0.0, min, max));
        assert!(is_between(TAU - 0.1, min, max));
        assert!(is_between(0.1, min, max));
        assert!(!is_between(PI, min, max));
        assert!(!is_between(PI / 2.0, min, max));
    }

    #[test]
    fn test_is_between_degenerate() {
        assert!(is_between(0.0, 0.0, 0.0));
        assert!(is_between(-0.0, 0.0, 0.0));
        assert!(!is_between(1e-4, 0.0, 0.0));
        assert!(is_between(1.25, 1.25, 1.25));
    }

    #[test]
    fn test_is_between_rotation_symmetry() {
        let cases = [
            (0.3, -0.5, 0.5),
            (1.0, -0.5, 0.5),
            (3.0, 2.0, 4.0),
            (5.0, 2.0, 4.0),
            (0.1, 5.5, 0.7),
            (3.0, 5.5, 0.7),
        ];
        for &(a, min, max) in &cases {
            let expected = is_between(a, min, max);
            for k in [-7.0_f32, -1.3, 0.9, 2.2, 12.5] {
                assert_eq!(
                    is_between(a + k, min + k, max + k),
                    expected,
                    "rotation by {} changed is_between({}, {}, {})",
                    k, a, min, max
                );
            }
        }
    }

    #[test]
    fn test_direction_round_trip() {
        let up = direction_from_angle(0.0);
        assert_relative_eq!(up.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(up.y, 1.0, epsilon = 1e-6);

        // clockwise from up means +X at a quarter turn
        let right = direction_from_angle(PI / 2.0);
        assert_relative_eq!(right.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(angle_from_up(right), PI / 2.0, epsilon = 1e-6);
        assert_relative_eq!(angle_from_up(Vec2::new(-1.0, 0.0)), -PI / 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_relative_angle() {
        assert_relative_eq!(relative_angle(0.5, 0.0), 0.5, epsilon = 1e-6);
        assert_relative_eq!(relative_angle(TAU - 0.5, 0.0), -0.5, epsilon = 1e-5);
        assert_relative_eq!(relative_angle(0.2, 6.0), 0.2 + TAU - 6.0, epsilon = 1e-5);
        assert_relative_eq!(relative_angle(PI, 0.0), PI, epsilon = 1e-6);
    }
}
