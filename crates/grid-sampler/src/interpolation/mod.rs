//! Point interpolation over a [`RegularGrid`](crate::RegularGrid).
//!
//! Interpolators borrow a grid and its backing data and are read-only, so a
//! single instance can be shared across threads. Every interpolator returns
//! the sentinel (or [`VectorSample::SENTINEL`]) where no value can be derived.

pub mod bilinear;
pub mod nearest;

pub use bilinear::{BilinearScalar, BilinearVector};
pub use nearest::{NearestScalar, NearestVector};

use crate::config::InterpolationMethod;
use crate::error::{GridError, Result};
use crate::grid::RegularGrid;
use earth_common::math::{length, to_cardinal_degrees};
use earth_common::sentinel::{is_valid, SENTINEL};
use serde::{Deserialize, Serialize};

/// A function from `[lon, lat]` in degrees to a sampled value.
pub trait Interpolator {
    type Output;

    fn interpolate(&self, coord: [f64; 2]) -> Self::Output;
}

/// A sampled vector with its magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VectorSample {
    pub u: f32,
    pub v: f32,
    pub magnitude: f32,
}

impl VectorSample {
    /// The "no data" vector.
    pub const SENTINEL: Self = Self {
        u: SENTINEL,
        v: SENTINEL,
        magnitude: SENTINEL,
    };

    pub fn new(u: f32, v: f32) -> Self {
        Self {
            u,
            v,
            magnitude: length(u as f64, v as f64) as f32,
        }
    }

    pub fn is_valid(&self) -> bool {
        is_valid(self.u) && is_valid(self.v) && is_valid(self.magnitude)
    }

    /// The scalar view of a vector field: its magnitude.
    pub fn scalarize(&self) -> f32 {
        self.magnitude
    }

    /// Compass direction the vector points toward, in `[0, 360)`.
    pub fn bearing(&self) -> Option<f64> {
        self.is_valid()
            .then(|| to_cardinal_degrees(self.u as f64, self.v as f64))
    }
}

pub(crate) fn check_len(grid: &RegularGrid, data: &[f32]) -> Result<()> {
    if data.len() != grid.len() {
        return Err(GridError::LengthMismatch {
            expected: grid.len(),
            actual: data.len(),
        });
    }
    Ok(())
}

/// A scalar interpolator chosen at runtime.
#[derive(Debug, Clone, Copy)]
pub enum ScalarInterpolator<'a> {
    Nearest(NearestScalar<'a>),
    Bilinear(BilinearScalar<'a>),
}

impl<'a> ScalarInterpolator<'a> {
    pub fn new(method: InterpolationMethod, grid: &'a RegularGrid, data: &'a [f32]) -> Result<Self> {
        Ok(match method {
            InterpolationMethod::Nearest => Self::Nearest(NearestScalar::new(grid, data)?),
            InterpolationMethod::Bilinear => Self::Bilinear(BilinearScalar::new(grid, data)?),
        })
    }
}

impl Interpolator for ScalarInterpolator<'_> {
    type Output = f32;

    fn interpolate(&self, coord: [f64; 2]) -> f32 {
        match self {
            Self::Nearest(i) => i.interpolate(coord),
            Self::Bilinear(i) => i.interpolate(coord),
        }
    }
}

/// A vector interpolator chosen at runtime.
#[derive(Debug, Clone, Copy)]
pub enum VectorInterpolator<'a> {
    Nearest(NearestVector<'a>),
    Bilinear(BilinearVector<'a>),
}

impl<'a> VectorInterpolator<'a> {
    pub fn new(
        method: InterpolationMethod,
        grid: &'a RegularGrid,
        u: &'a [f32],
        v: &'a [f32],
    ) -> Result<Self> {
        Ok(match method {
            InterpolationMethod::Nearest => Self::Nearest(NearestVector::new(grid, u, v)?),
            InterpolationMethod::Bilinear => Self::Bilinear(BilinearVector::new(grid, u, v)?),
        })
    }
}

impl Interpolator for VectorInterpolator<'_> {
    type Output = VectorSample;

    fn interpolate(&self, coord: [f64; 2]) -> VectorSample {
        match self {
            Self::Nearest(i) => i.interpolate(coord),
            Self::Bilinear(i) => i.interpolate(coord),
        }
    }
}
