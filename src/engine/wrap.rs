//! Cyclic world wraparound

use crate::core::types::Vec3;

/// Fold a coordinate back into `[-bound, bound]`, keeping its sign
///
/// Values whose magnitude is at most `bound` are returned unchanged.
#[inline]
pub fn wrap_axis(value: f32, bound: f32) -> f32 {
    if value.abs() > bound {
        value.signum() * (value.abs() % bound)
    } else {
        value
    }
}

/// Wrap the horizontal axes (x, z); altitude is left alone
///
/// Altitude has no wrap: flight keeps it at or above the configured
/// `min_altitude` instead.
pub fn wrap_position(position: Vec3, bound: f32) -> Vec3 {
    Vec3::new(
        wrap_axis(position.x, bound),
        position.y,
        wrap_axis(position.z, bound),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_bound_unchanged() {
        assert_eq!(wrap_axis(499.0, 500.0), 499.0);
        assert_eq!(wrap_axis(-500.0, 500.0), -500.0);
        assert_eq!(wrap_axis(0.0, 500.0), 0.0);
    }

    #[test]
    fn test_wrap_preserves_sign() {
        assert_eq!(wrap_axis(501.0, 500.0), 1.0);
        assert_eq!(wrap_axis(-501.0, 500.0), -1.0);
        assert_eq!(wrap_axis(1250.0, 500.0), 250.0);
    }

    #[test]
    fn test_altitude_not_wrapped() {
        let wrapped = wrap_position(Vec3::new(600.0, 900.0, -700.0), 500.0);
        assert_eq!(wrapped, Vec3::new(100.0, 900.0, -200.0));
    }
}
