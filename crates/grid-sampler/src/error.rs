//! Error types for grid construction and sampling.

use thiserror::Error;

/// Result type alias using GridError.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors that can occur while building grids or pairing them with data.
#[derive(Error, Debug)]
pub enum GridError {
    /// An axis has a zero, negative or non-finite step, or no points.
    #[error("invalid axis: {0}")]
    InvalidAxis(String),

    /// Grid and data shapes disagree.
    #[error("dimension mismatch: grid is {grid_width}x{grid_height}, data is {data_width}x{data_height}")]
    DimensionMismatch {
        grid_width: usize,
        grid_height: usize,
        data_width: usize,
        data_height: usize,
    },

    /// Data length does not match the number of grid points.
    #[error("data has {actual} values, grid has {expected} points")]
    LengthMismatch { expected: usize, actual: usize },

    /// Requested plane does not exist in the block.
    #[error("plane {index} out of range, block has {grids}")]
    PlaneOutOfRange { index: usize, grids: usize },

    /// Configuration error.
    #[error("configuration error: {0}")]
    InvalidConfig(String),
}

impl GridError {
    /// Create an InvalidAxis error.
    pub fn invalid_axis(msg: impl Into<String>) -> Self {
        Self::InvalidAxis(msg.into())
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
