//! Decimal quantization between the integer and float domains.
//!
//! A scale factor `s` keeps `s` decimal digits after the point (or drops
//! `-s` digits before it): the integer domain value is `round(v * 10^s)`.

use crate::error::{EpakError, Result};
use earth_common::sentinel::{is_valid, sanitize, SENTINEL};

fn multiplier(scale_factor: f32) -> f64 {
    let s = scale_factor as f64;
    if s.fract() == 0.0 && s.abs() <= 64.0 {
        10f64.powi(s as i32)
    } else {
        10f64.powf(s)
    }
}

/// Rescale integer-domain values to floats in place: `v / 10^scale_factor`.
///
/// Non-finite inputs (the pipeline's missing marker) become [`SENTINEL`].
pub fn dequantize(values: &mut [f32], scale_factor: f32) {
    let m = multiplier(scale_factor);
    for v in values.iter_mut() {
        *v = if v.is_finite() {
            sanitize((*v as f64 / m) as f32)
        } else {
            SENTINEL
        };
    }
}

/// Convert floats to the integer domain, with `None` for missing values.
///
/// The sentinel and any non-finite value are treated as missing.
pub fn quantize(values: &[f32], scale_factor: f32) -> Result<Vec<Option<i32>>> {
    let m = multiplier(scale_factor);
    values
        .iter()
        .map(|&v| {
            if !is_valid(v) || !v.is_finite() {
                return Ok(None);
            }
            let q = (v as f64 * m).round();
            if q < i32::MIN as f64 || q > i32::MAX as f64 {
                return Err(EpakError::ValueOutOfRange(q));
            }
            Ok(Some(q as i32))
        })
        .collect()
}
