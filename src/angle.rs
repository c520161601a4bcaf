//! Circular angle arithmetic in degrees.
//!
//! # Angle Convention
//! - Angles are in degrees, always normalized into `[0, 360)`
//! - 0° points to 3 o'clock, 90° to 12 o'clock
//! - 180° points to 9 o'clock, 270° to 6 o'clock
//!
//! "Forward" means increasing angle. Hands only ever sweep forward.

/// One full turn in degrees.
pub const FULL_TURN: f64 = 360.0;

/// Reduces any finite angle into `[0, 360)`.
///
/// Handles negative inputs and inputs many turns away from the origin.
/// Non-finite inputs produce NaN.
///
/// # Examples
/// ```
/// use clockface::angle::normalize;
/// assert_eq!(normalize(-90.0), 270.0);
/// assert_eq!(normalize(1080.0), 0.0);
/// ```
pub fn normalize(angle: f64) -> f64 {
    let reduced = angle.rem_euclid(FULL_TURN);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if reduced >= FULL_TURN { 0.0 } else { reduced }
}

/// Rotation needed to go from `from` to `to` moving only forward.
///
/// Returns 0 when the angles are exactly equal, otherwise a value in
/// `(0, 360]`. The shorter backward arc is never taken.
///
/// # Examples
/// ```
/// use clockface::angle::forward_distance;
/// assert_eq!(forward_distance(350.0, 10.0), 20.0);
/// assert_eq!(forward_distance(10.0, 350.0), 340.0);
/// assert_eq!(forward_distance(90.0, 90.0), 0.0);
/// ```
pub fn forward_distance(from: f64, to: f64) -> f64 {
    if from == to {
        return 0.0;
    }

    let distance = (to - from).rem_euclid(FULL_TURN);
    if distance <= 0.0 { FULL_TURN } else { distance }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [f64; 14] = [
        0.0, 0.5, 45.0, 90.0, 180.0, 225.0, 359.999, 360.0, 720.5, -0.0, -1.0, -360.0,
        -1e-17, 123_456.75,
    ];

    #[test]
    fn test_normalize_range() {
        for &x in SAMPLES.iter() {
            let n = normalize(x);
            assert!((0.0..FULL_TURN).contains(&n), "normalize({}) = {}", x, n);
        }
    }

    #[test]
    fn test_normalize_idempotent() {
        for &x in SAMPLES.iter() {
            assert_eq!(normalize(normalize(x)), normalize(x));
        }
    }

    #[test]
    fn test_normalize_values() {
        assert_eq!(normalize(0.0), 0.0);
        assert_eq!(normalize(360.0), 0.0);
        assert_eq!(normalize(450.0), 90.0);
        assert_eq!(normalize(-90.0), 270.0);
        assert_eq!(normalize(-720.0 - 45.0), 315.0);
        assert_eq!(normalize(-1e-17), 0.0);
    }

    #[test]
    fn test_forward_distance_same_angle_is_zero() {
        for &a in SAMPLES.iter() {
            assert_eq!(forward_distance(a, a), 0.0);
        }
    }

    #[test]
    fn test_forward_distance_range() {
        for &a in SAMPLES.iter() {
            for &b in SAMPLES.iter() {
                if normalize(a) == normalize(b) {
                    continue;
                }
                let d = forward_distance(normalize(a), normalize(b));
                assert!(d > 0.0 && d <= FULL_TURN, "distance({}, {}) = {}", a, b, d);
            }
        }
    }

    #[test]
    fn test_forward_distance_wraps_forward() {
        // 270 -> 0 goes forward through 359, not back through 180
        assert_eq!(forward_distance(270.0, 0.0), 90.0);
        // Backward-looking targets still rotate forward the long way
        assert_eq!(forward_distance(180.0, 90.0), 270.0);
        assert_eq!(forward_distance(0.0, 270.0), 270.0);
    }

    #[test]
    fn test_forward_distance_full_turn() {
        // Equivalent but not identical angles are a full turn apart
        assert_eq!(forward_distance(0.0, 360.0), FULL_TURN);
    }
}
