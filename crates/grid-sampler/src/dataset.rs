//! Pairing a decoded block with the grid it lives on.

use crate::config::InterpolationMethod;
use crate::error::{GridError, Result};
use crate::grid::RegularGrid;
use crate::interpolation::{ScalarInterpolator, VectorInterpolator};
use epak_parser::{Block, BlockMetadata, DecodedField};
use tracing::debug;

/// A decoded block whose planes are laid out on `grid`.
#[derive(Debug, Clone)]
pub struct GriddedField {
    grid: RegularGrid,
    metadata: BlockMetadata,
    field: DecodedField,
}

impl GriddedField {
    /// Pair `block` with `grid`; the block's cols and rows must match the grid.
    pub fn new(grid: RegularGrid, block: Block) -> Result<Self> {
        let (width, height) = grid.dimensions();
        let Block { metadata, field } = block;
        if width != field.cols() || height != field.rows() {
            return Err(GridError::DimensionMismatch {
                grid_width: width,
                grid_height: height,
                data_width: field.cols(),
                data_height: field.rows(),
            });
        }

        debug!(
            width,
            height,
            grids = field.grids(),
            cylindrical = grid.is_cylindrical(),
            "Paired block with grid"
        );

        Ok(Self {
            grid,
            metadata,
            field,
        })
    }

    pub fn grid(&self) -> &RegularGrid {
        &self.grid
    }

    pub fn metadata(&self) -> &BlockMetadata {
        &self.metadata
    }

    pub fn field(&self) -> &DecodedField {
        &self.field
    }

    /// Number of planes.
    pub fn planes(&self) -> usize {
        self.field.grids()
    }

    /// Values of plane `z`.
    pub fn plane(&self, z: usize) -> Result<&[f32]> {
        self.field.plane(z).ok_or(GridError::PlaneOutOfRange {
            index: z,
            grids: self.field.grids(),
        })
    }

    /// Interpolator over plane `z`.
    pub fn scalar(&self, z: usize, method: InterpolationMethod) -> Result<ScalarInterpolator<'_>> {
        ScalarInterpolator::new(method, &self.grid, self.plane(z)?)
    }

    /// Interpolator over a vector whose components are planes `z_u` and `z_v`.
    pub fn vector(
        &self,
        z_u: usize,
        z_v: usize,
        method: InterpolationMethod,
    ) -> Result<VectorInterpolator<'_>> {
        VectorInterpolator::new(method, &self.grid, self.plane(z_u)?, self.plane(z_v)?)
    }
}
