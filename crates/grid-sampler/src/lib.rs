//! Regular grids and point interpolation over decoded EPAK fields.
//!
//! A [`RegularGrid`] maps `[lon, lat]` coordinates in degrees to point
//! indices. Interpolators pair a grid with one plane of data (or two, for
//! vectors) and evaluate it anywhere on the globe, returning the sentinel
//! where the grid has no data.
//!
//! ```
//! use grid_sampler::{AxisSpec, BilinearScalar, Interpolator, RegularGrid};
//!
//! let grid = RegularGrid::new(AxisSpec::new(0.0, 1.0, 360), AxisSpec::new(-90.0, 1.0, 181))?;
//! let data = vec![273.15f32; grid.len()];
//! let interp = BilinearScalar::new(&grid, &data)?;
//! assert_eq!(interp.interpolate([359.5, 45.25]), 273.15);
//! # Ok::<(), grid_sampler::GridError>(())
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod grid;
pub mod interpolation;
pub mod sample;

pub use config::{InterpolationMethod, SamplerConfig};
pub use dataset::GriddedField;
pub use error::{GridError, Result};
pub use grid::{AxisSpec, GridBounds, Neighbors, Points, RegularGrid};
pub use interpolation::{
    BilinearScalar, BilinearVector, Interpolator, NearestScalar, NearestVector,
    ScalarInterpolator, VectorInterpolator, VectorSample,
};
pub use sample::{sample_all, sample_grid};
