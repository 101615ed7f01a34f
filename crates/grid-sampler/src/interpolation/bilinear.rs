//! Bilinear interpolation that survives one missing corner.
//!
//! With all four corners present this is the usual weighted sum. With three,
//! the value comes from the plane through the three present corners, which is
//! exact on the triangle they span. Two or more missing corners give the
//! sentinel.

use super::{check_len, Interpolator, VectorSample};
use crate::error::Result;
use crate::grid::{Neighbors, RegularGrid};
use earth_common::sentinel::{is_valid, sanitize, SENTINEL};

/// Corner values in `[v00, v10, v01, v11]` order, `None` where missing.
type Corners = [Option<f64>; 4];

fn blend(corners: Corners, x: f64, y: f64) -> Option<f64> {
    let rx = 1.0 - x;
    let ry = 1.0 - y;
    match corners {
        [Some(v00), Some(v10), Some(v01), Some(v11)] => {
            Some(v00 * rx * ry + v10 * x * ry + v01 * rx * y + v11 * x * y)
        }
        [Some(v00), Some(v10), None, Some(v11)] => Some(v10 + rx * (v00 - v10) + y * (v11 - v10)),
        [Some(v00), None, Some(v01), Some(v11)] => Some(v01 + x * (v11 - v01) + ry * (v00 - v01)),
        [Some(v00), Some(v10), Some(v01), None] => Some(v00 + x * (v10 - v00) + y * (v01 - v00)),
        [None, Some(v10), Some(v01), Some(v11)] => Some(v11 + rx * (v01 - v11) + ry * (v10 - v11)),
        _ => None,
    }
}

fn indices(n: &Neighbors) -> [usize; 4] {
    [n.i00, n.i10, n.i01, n.i11]
}

/// Bilinear interpolation of a scalar field.
#[derive(Debug, Clone, Copy)]
pub struct BilinearScalar<'a> {
    grid: &'a RegularGrid,
    data: &'a [f32],
}

impl<'a> BilinearScalar<'a> {
    /// `data` must hold exactly one value per grid point.
    pub fn new(grid: &'a RegularGrid, data: &'a [f32]) -> Result<Self> {
        check_len(grid, data)?;
        Ok(Self { grid, data })
    }
}

impl Interpolator for BilinearScalar<'_> {
    type Output = f32;

    fn interpolate(&self, coord: [f64; 2]) -> f32 {
        let Some(n) = self.grid.closest4(coord) else {
            return SENTINEL;
        };

        let corners = indices(&n).map(|i| {
            let v = self.data[i];
            is_valid(v).then_some(v as f64)
        });

        blend(corners, n.x, n.y)
            .map(|v| sanitize(v as f32))
            .unwrap_or(SENTINEL)
    }
}

/// Bilinear interpolation of a vector field held as separate u and v planes.
///
/// A corner counts as present only when both components are valid.
#[derive(Debug, Clone, Copy)]
pub struct BilinearVector<'a> {
    grid: &'a RegularGrid,
    u: &'a [f32],
    v: &'a [f32],
}

impl<'a> BilinearVector<'a> {
    pub fn new(grid: &'a RegularGrid, u: &'a [f32], v: &'a [f32]) -> Result<Self> {
        check_len(grid, u)?;
        check_len(grid, v)?;
        Ok(Self { grid, u, v })
    }
}

impl Interpolator for BilinearVector<'_> {
    type Output = VectorSample;

    fn interpolate(&self, coord: [f64; 2]) -> VectorSample {
        let Some(n) = self.grid.closest4(coord) else {
            return VectorSample::SENTINEL;
        };

        let present = indices(&n).map(|i| is_valid(self.u[i]) && is_valid(self.v[i]));
        let corners = |plane: &[f32]| -> Corners {
            let idx = indices(&n);
            [0, 1, 2, 3].map(|k| present[k].then(|| plane[idx[k]] as f64))
        };

        match (
            blend(corners(self.u), n.x, n.y),
            blend(corners(self.v), n.x, n.y),
        ) {
            (Some(u), Some(v)) => {
                let sample = VectorSample::new(sanitize(u as f32), sanitize(v as f32));
                if sample.is_valid() {
                    sample
                } else {
                    VectorSample::SENTINEL
                }
            }
            _ => VectorSample::SENTINEL,
        }
    }
}
