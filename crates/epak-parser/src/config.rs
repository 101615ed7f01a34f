//! Decoder options.

use serde::{Deserialize, Serialize};

/// What to do when a packed-delta run is longer than the space left.
///
/// Passed to [`crate::decode_packed_delta_rle`]; container decoding has no
/// runs and so takes no policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunLengthPolicy {
    /// Truncate the run to the remaining output length.
    #[default]
    Clamp,
    /// Fail with `InvalidRunLength`.
    Reject,
}

impl RunLengthPolicy {
    /// Parse from string (case-insensitive), defaulting to `Clamp`.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "reject" | "strict" => Self::Reject,
            _ => Self::Clamp,
        }
    }
}

/// Options for [`crate::decode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Stop right after the header; no block bytes are read.
    pub header_only: bool,
}

impl DecodeOptions {
    /// Options that parse the header and nothing else.
    pub fn header_only() -> Self {
        Self { header_only: true }
    }
}
