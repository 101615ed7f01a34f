//! Error types for shared parsing helpers.

use thiserror::Error;

/// Result type alias using CommonError.
pub type CommonResult<T> = Result<T, CommonError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommonError {
    #[error("Invalid decimal value: {0}")]
    InvalidDecimal(String),

    #[error("Division by zero in fraction: {0}")]
    ZeroDenominator(String),
}
