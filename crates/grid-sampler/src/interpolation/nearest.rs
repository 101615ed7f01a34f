//! Nearest-neighbour interpolation.

use super::{check_len, Interpolator, VectorSample};
use crate::error::Result;
use crate::grid::RegularGrid;
use earth_common::sentinel::{is_valid, SENTINEL};

/// Value of the closest grid point, or the sentinel outside the grid.
#[derive(Debug, Clone, Copy)]
pub struct NearestScalar<'a> {
    grid: &'a RegularGrid,
    data: &'a [f32],
}

impl<'a> NearestScalar<'a> {
    pub fn new(grid: &'a RegularGrid, data: &'a [f32]) -> Result<Self> {
        check_len(grid, data)?;
        Ok(Self { grid, data })
    }
}

impl Interpolator for NearestScalar<'_> {
    type Output = f32;

    fn interpolate(&self, coord: [f64; 2]) -> f32 {
        self.grid
            .closest(coord)
            .map_or(SENTINEL, |i| self.data[i])
    }
}

/// Vector at the closest grid point; the sentinel unless both components are valid.
#[derive(Debug, Clone, Copy)]
pub struct NearestVector<'a> {
    grid: &'a RegularGrid,
    u: &'a [f32],
    v: &'a [f32],
}

impl<'a> NearestVector<'a> {
    pub fn new(grid: &'a RegularGrid, u: &'a [f32], v: &'a [f32]) -> Result<Self> {
        check_len(grid, u)?;
        check_len(grid, v)?;
        Ok(Self { grid, u, v })
    }
}

impl Interpolator for NearestVector<'_> {
    type Output = VectorSample;

    fn interpolate(&self, coord: [f64; 2]) -> VectorSample {
        match self.grid.closest(coord) {
            Some(i) if is_valid(self.u[i]) && is_valid(self.v[i]) => {
                VectorSample::new(self.u[i], self.v[i])
            }
            _ => VectorSample::SENTINEL,
        }
    }
}
