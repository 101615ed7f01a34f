//! Error types for EPAK decoding and encoding.

use thiserror::Error;

/// Errors that can occur while decoding or encoding EPAK data.
///
/// Every variant is fatal to the call in progress: no partially decoded
/// container or block is ever returned alongside an error.
#[derive(Error, Debug)]
pub enum EpakError {
    /// The container did not start with the `head` tag.
    #[error("expected 'head' but found '{found}'")]
    BadMagic { found: String },

    /// A chunk tag is neither a known block type nor `tail`.
    #[error("unknown block type: {0}")]
    UnknownBlockType(String),

    /// Ran out of bytes (or, for a block stream, values) before a declared
    /// length or encoded width was satisfied.
    #[error("truncated input in {context}: needed {needed}, {available} available")]
    TruncatedInput {
        context: String,
        needed: usize,
        available: usize,
    },

    /// The header payload is not UTF-8 JSON.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// A packed-delta run would write past the declared output length.
    #[error("run length {run} at element {index} exceeds the {remaining} remaining output slots")]
    InvalidRunLength {
        index: usize,
        run: f64,
        remaining: usize,
    },

    /// A packed-delta element is not a number, null, or `[delta, run]` pair.
    #[error("invalid packed element at {index}: {reason}")]
    InvalidElement { index: usize, reason: String },

    /// A chunk declared a negative or undersized length.
    #[error("invalid length {length} for '{tag}'")]
    InvalidLength { tag: String, length: i64 },

    /// Block dimensions are negative or their product overflows.
    #[error("invalid block dimensions: {0}")]
    InvalidDimensions(String),

    /// The codec stream produced more values than the block holds.
    #[error("codec stream overflows block capacity of {capacity} values")]
    ValueOverflow { capacity: usize },

    /// A value cannot be represented in the 32-bit integer domain.
    #[error("value {0} is outside the 32-bit integer range")]
    ValueOutOfRange(f64),
}

impl EpakError {
    /// Create a TruncatedInput error.
    pub fn truncated(context: impl Into<String>, needed: usize, available: usize) -> Self {
        Self::TruncatedInput {
            context: context.into(),
            needed,
            available,
        }
    }

    /// Create a MalformedHeader error.
    pub fn malformed_header(msg: impl Into<String>) -> Self {
        Self::MalformedHeader(msg.into())
    }

    /// Create an InvalidDimensions error.
    pub fn invalid_dimensions(msg: impl Into<String>) -> Self {
        Self::InvalidDimensions(msg.into())
    }
}

impl From<serde_json::Error> for EpakError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedHeader(err.to_string())
    }
}

impl From<std::str::Utf8Error> for EpakError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::MalformedHeader(format!("header is not UTF-8: {}", err))
    }
}

/// Result type for EPAK operations.
pub type Result<T> = std::result::Result<T, EpakError>;
