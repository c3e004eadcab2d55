//! Scalar helpers and the [`Vector2D`] value type
//!
//! Modelled on the Processing/p5.js helper set: remapping, constraining,
//! angle conversion. All computation is `f64`.

pub mod vector;

pub use vector::Vector2D;

use crate::error::DodgeError;

pub const HALF_PI: f64 = std::f64::consts::FRAC_PI_2;
pub const TWO_PI: f64 = std::f64::consts::TAU;

/// Radians to degrees
#[inline]
pub fn to_deg(angle: f64) -> f64 {
    (180.0 * angle) / std::f64::consts::PI
}

/// Degrees to radians
#[inline]
pub fn to_rad(angle: f64) -> f64 {
    (std::f64::consts::PI * angle) / 180.0
}

/// Distance between two cartesian points
#[inline]
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
}

/// Eased interpolation between `a` and `b` (smoothstep on `amt`).
///
/// `amt = 0` gives `a`, `amt = 1` gives `b`. This is not a linear lerp;
/// use [`Vector2D::lerp`] or [`crate::sim::particle::Rgba::lerp`] for that.
#[inline]
pub fn smooth_lerp(a: f64, b: f64, amt: f64) -> f64 {
    (b - a) * (3.0 - amt * 2.0) * amt * amt + a
}

/// Re-map `value` from the range `a1..a2` to `b1..b2`.
///
/// The endpoints map exactly: `remap(a1, ..) == b1` and `remap(a2, ..) == b2`.
/// Fails when the source range is empty (`a1 == a2`).
pub fn remap(value: f64, a1: f64, a2: f64, b1: f64, b2: f64) -> Result<f64, DodgeError> {
    if a1 == a2 {
        return Err(DodgeError::InvalidArgument(format!(
            "remap source range is empty ({a1} == {a2})"
        )));
    }
    let t = (value - a1) / (a2 - a1);
    Ok(b1 * (1.0 - t) + b2 * t)
}

/// Normalize `value` from `a..b` into `0..1`
#[inline]
pub fn normalize(value: f64, a: f64, b: f64) -> Result<f64, DodgeError> {
    remap(value, a, b, 0.0, 1.0)
}

/// Constrain `x` to `[lo, hi]`.
///
/// Unlike `f64::clamp` this never panics when `lo > hi`; the upper bound wins.
#[inline]
pub fn constrain(x: f64, lo: f64, hi: f64) -> f64 {
    x.max(lo).min(hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_remap_endpoints_exact() {
        assert_eq!(remap(16.0, 16.0, 32.0, 6.0, 12.0).unwrap(), 6.0);
        assert_eq!(remap(32.0, 16.0, 32.0, 6.0, 12.0).unwrap(), 12.0);
        assert_eq!(remap(24.0, 16.0, 32.0, 6.0, 12.0).unwrap(), 9.0);
        // Decreasing target range
        assert_eq!(remap(0.0, 0.0, 0.5, 2.0, 8.0).unwrap(), 2.0);
        assert_eq!(remap(0.5, 0.0, 0.5, 2.0, 8.0).unwrap(), 8.0);
    }

    #[test]
    fn test_remap_empty_range_fails() {
        let err = remap(1.0, 3.0, 3.0, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, DodgeError::InvalidArgument(_)));
        assert!(normalize(1.0, 2.0, 2.0).is_err());
    }

    #[test]
    fn test_constrain() {
        assert_eq!(constrain(500.0, -190.0, 200.0), 200.0);
        assert_eq!(constrain(-500.0, -190.0, 200.0), -190.0);
        assert_eq!(constrain(12.5, -190.0, 200.0), 12.5);
    }

    #[test]
    fn test_smooth_lerp_endpoints() {
        assert_eq!(smooth_lerp(10.0, -10.0, 0.0), 10.0);
        assert_eq!(smooth_lerp(10.0, -10.0, 1.0), -10.0);
        assert_eq!(smooth_lerp(0.0, 1.0, 0.5), 0.5);
    }

    #[test]
    fn test_angle_conversion() {
        assert!((to_deg(std::f64::consts::PI) - 180.0).abs() < 1e-12);
        assert!((to_rad(90.0) - HALF_PI).abs() < 1e-12);
        assert!((to_deg(to_rad(33.0)) - 33.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(0.0, 0.0, 3.0, 4.0), 5.0);
    }

    proptest! {
        #[test]
        fn remap_is_exact_at_both_ends(
            a1 in -1e6f64..1e6,
            span in 1e-3f64..1e6,
            b1 in -1e6f64..1e6,
            b2 in -1e6f64..1e6,
        ) {
            let a2 = a1 + span;
            prop_assume!(a1 != a2);
            prop_assert_eq!(remap(a1, a1, a2, b1, b2).unwrap(), b1);
            prop_assert_eq!(remap(a2, a1, a2, b1, b2).unwrap(), b2);
        }
    }
}
