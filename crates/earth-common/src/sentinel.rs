//! The "no data" sentinel.
//!
//! Missing samples are stored as a large finite `f32` rather than NaN so they
//! survive fixed-width storage and still order below every comparison a
//! consumer makes: a value is valid iff `value < SENTINEL`.

/// Reserved value standing in for "no data".
pub const SENTINEL: f32 = 7e37;

/// True if `value` holds real data. NaN and the sentinel are both invalid.
#[inline]
pub fn is_valid(value: f32) -> bool {
    value < SENTINEL
}

/// Maps a raw value to `Some` when valid.
#[inline]
pub fn to_option(value: f32) -> Option<f32> {
    if is_valid(value) {
        Some(value)
    } else {
        None
    }
}

/// Maps any non-finite value to the sentinel.
#[inline]
pub fn sanitize(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        SENTINEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_finite() {
        assert!(SENTINEL.is_finite());
        assert!(!is_valid(SENTINEL));
    }

    #[test]
    fn test_nan_is_not_valid() {
        assert!(!is_valid(f32::NAN));
        assert_eq!(to_option(f32::NAN), None);
    }

    #[test]
    fn test_ordinary_values_are_valid() {
        assert!(is_valid(0.0));
        assert!(is_valid(-1.0e30));
        assert!(is_valid(6.9e37));
        assert_eq!(to_option(12.5), Some(12.5));
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize(f32::NAN), SENTINEL);
        assert_eq!(sanitize(f32::INFINITY), SENTINEL);
        assert_eq!(sanitize(f32::NEG_INFINITY), SENTINEL);
        assert_eq!(sanitize(3.5), 3.5);
    }
}
