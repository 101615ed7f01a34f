//! Planar delta transform over `[grids][rows][cols]` arrays.
//!
//! Each plane is coded independently. Row 0 is a running sum along x, column 0
//! of every later row is a running sum along y, and every interior cell is
//! predicted from its left (`a`), upper (`b`) and upper-left (`c`) neighbours
//! as `a + b - c`. When the prediction is unusable because a neighbour is
//! missing, the fallback order is `a`, `b`, `c`, then `0`.
//!
//! During decoding missing values are carried as NaN; the dequantizer turns
//! them into the sentinel before anything leaves the pipeline.

use crate::error::{EpakError, Result};

#[inline]
fn present(v: f32) -> Option<f64> {
    let v = v as f64;
    if v.is_finite() {
        Some(v)
    } else {
        None
    }
}

#[inline]
fn add(raw: f32, p: f64) -> f32 {
    (raw as f64 + p) as f32
}

fn predict(a: Option<f64>, b: Option<f64>, c: Option<f64>) -> f64 {
    match (a, b, c) {
        (Some(a), Some(b), Some(c)) => a + b - c,
        _ => a.or(b).or(c).unwrap_or(0.0),
    }
}

/// Replace deltas with absolute values in place, plane by plane.
///
/// `values` must hold at least `cols * rows * grids` elements; anything past
/// that is left alone.
pub fn undelta_plane(values: &mut [f32], cols: usize, rows: usize, grids: usize) {
    let area = cols * rows;
    if area == 0 {
        return;
    }

    for plane in values.chunks_exact_mut(area).take(grids) {
        for x in 1..cols {
            let p = present(plane[x - 1]).unwrap_or(0.0);
            plane[x] = add(plane[x], p);
        }

        for y in 1..rows {
            let j = y * cols;
            let p = present(plane[j - cols]).unwrap_or(0.0);
            plane[j] = add(plane[j], p);

            for x in 1..cols {
                let i = j + x;
                let a = present(plane[i - 1]);
                let b = present(plane[i - cols]);
                let c = present(plane[i - cols - 1]);
                plane[i] = add(plane[i], predict(a, b, c));
            }
        }
    }
}

/// Forward transform: turn absolute integer values into planar deltas.
///
/// This is the exact inverse of [`undelta_plane`]; missing values stay
/// missing and neighbours are resolved with the same fallback chain.
pub fn delta_plane(
    values: &[Option<i32>],
    cols: usize,
    rows: usize,
    grids: usize,
) -> Result<Vec<Option<i32>>> {
    let area = cols * rows;
    let expected = area * grids;
    if values.len() != expected {
        return Err(EpakError::invalid_dimensions(format!(
            "{} values do not fill {}x{}x{}",
            values.len(),
            cols,
            rows,
            grids
        )));
    }

    let mut out = Vec::with_capacity(expected);
    if area == 0 {
        return Ok(out);
    }

    let get = |plane: &[Option<i32>], i: usize| plane[i].map(f64::from);

    for plane in values.chunks_exact(area) {
        for y in 0..rows {
            for x in 0..cols {
                let i = y * cols + x;
                let Some(v) = plane[i] else {
                    out.push(None);
                    continue;
                };

                let p = match (x, y) {
                    (0, 0) => 0.0,
                    (_, 0) => get(plane, i - 1).unwrap_or(0.0),
                    (0, _) => get(plane, i - cols).unwrap_or(0.0),
                    _ => predict(
                        get(plane, i - 1),
                        get(plane, i - cols),
                        get(plane, i - cols - 1),
                    ),
                };

                let delta = v as f64 - p;
                if delta < i32::MIN as f64 || delta > i32::MAX as f64 {
                    return Err(EpakError::ValueOutOfRange(delta));
                }
                out.push(Some(delta as i32));
            }
        }
    }

    Ok(out)
}
