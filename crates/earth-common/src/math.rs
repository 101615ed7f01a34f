//! Scalar math helpers for geographic coordinates.

/// Remainder of floored division, always in `[0, n)` for positive `n`.
///
/// Used to normalize longitude differences so that negative offsets wrap
/// around the globe instead of producing negative indices.
pub fn floor_mod(a: f64, n: f64) -> f64 {
    let f = a - n * (a / n).floor();
    // when `a` is within an ulp of `n` the subtraction can land exactly on `n`
    if f == n {
        0.0
    } else {
        f
    }
}

/// Clamp `x` to `[low, high]`.
pub fn clamp(x: f64, low: f64, high: f64) -> f64 {
    low.max(x.min(high))
}

/// Euclidean length of a 2-d vector.
pub fn length(x: f64, y: f64) -> f64 {
    (x * x + y * y).sqrt()
}

/// Direction of the vector `(u, v)` on the compass rose, in `[0, 360)`.
pub fn to_cardinal_degrees(u: f64, v: f64) -> f64 {
    let deg = u.atan2(v).to_degrees();
    (deg + 360.0) % 360.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_mod_negative() {
        assert_eq!(floor_mod(-1.0, 360.0), 359.0);
        assert_eq!(floor_mod(-360.0, 360.0), 0.0);
        assert_eq!(floor_mod(725.0, 360.0), 5.0);
    }

    #[test]
    fn test_floor_mod_ulp_edge() {
        let f = floor_mod(-1e-16, 10.0);
        assert!((0.0..10.0).contains(&f));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 3.0), 3.0);
        assert_eq!(clamp(-5.0, 0.0, 3.0), 0.0);
        assert_eq!(clamp(1.5, 0.0, 3.0), 1.5);
    }

    #[test]
    fn test_length() {
        assert_eq!(length(3.0, 4.0), 5.0);
    }

    #[test]
    fn test_cardinal_degrees() {
        assert!((to_cardinal_degrees(0.0, 1.0) - 0.0).abs() < 1e-9);
        assert!((to_cardinal_degrees(1.0, 0.0) - 90.0).abs() < 1e-9);
        assert!((to_cardinal_degrees(0.0, -1.0) - 180.0).abs() < 1e-9);
        assert!((to_cardinal_degrees(-1.0, 0.0) - 270.0).abs() < 1e-9);
    }
}
