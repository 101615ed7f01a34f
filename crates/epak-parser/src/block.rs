//! Quantized delta-plane varpack ("ppak") blocks.
//!
//! ```text
//!   int32   int32   int32      float32      byte[]
//! [ cols ][ rows ][ grids ][ scaleFactor ][ varpack data ]
//! ```
//!
//! All multi-byte values are big-endian. The block decodes to
//! `cols * rows * grids` floats.

use crate::delta::undelta_plane;
use crate::error::{EpakError, Result};
use crate::field::DecodedField;
use crate::quantize::dequantize;
use crate::varpack;
use bytes::Buf;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Size of the fixed block header.
pub const BLOCK_HEADER_LEN: usize = 16;

/// Most values one byte of varpack data can produce (`0xFF n` yields 256
/// values from two bytes).
const MAX_VALUES_PER_BYTE: usize = 128;

/// Recognized block type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Ppak,
    Ppk2,
}

impl BlockType {
    /// Look up a 4-byte chunk tag.
    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"ppak" => Some(Self::Ppak),
            b"ppk2" => Some(Self::Ppk2),
            _ => None,
        }
    }

    pub fn tag(&self) -> [u8; 4] {
        match self {
            Self::Ppak => *b"ppak",
            Self::Ppk2 => *b"ppk2",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ppak => "ppak",
            Self::Ppk2 => "ppk2",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed header fields of a block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockMetadata {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub cols: usize,
    pub rows: usize,
    pub grids: usize,
    #[serde(rename = "scaleFactor")]
    pub scale_factor: f32,
}

impl BlockMetadata {
    /// Number of values the block decodes to.
    pub fn value_count(&self) -> usize {
        self.cols * self.rows * self.grids
    }
}

/// A decoded block: its header plus the values.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub metadata: BlockMetadata,
    pub field: DecodedField,
}

impl Block {
    pub fn values(&self) -> &[f32] {
        self.field.values()
    }
}

fn dimension(name: &str, value: i32) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| EpakError::invalid_dimensions(format!("{} is negative: {}", name, value)))
}

/// Decode a varpack stream of `cols * rows * grids` planar deltas.
///
/// Runs the varpack codec, undoes the planar delta, and dequantizes. Missing
/// samples come out as the sentinel. A stream that ends before every value
/// is produced is `TruncatedInput`.
pub fn decode_ppak(
    bytes: &[u8],
    cols: usize,
    rows: usize,
    grids: usize,
    scale_factor: f32,
) -> Result<Vec<f32>> {
    let count = cols
        .checked_mul(rows)
        .and_then(|n| n.checked_mul(grids))
        .ok_or_else(|| {
            EpakError::invalid_dimensions(format!("{}x{}x{} overflows", cols, rows, grids))
        })?;

    // reject impossible counts before allocating for them
    let reachable = bytes.len().saturating_mul(MAX_VALUES_PER_BYTE);
    if count > reachable {
        return Err(EpakError::truncated(
            format!("varpack stream for {}x{}x{} block", cols, rows, grids),
            count,
            reachable,
        ));
    }

    let mut values = vec![0.0f32; count];
    let written = varpack::decode_into(bytes, &mut values)?;
    if written < count {
        return Err(EpakError::truncated("varpack stream", count, written));
    }

    undelta_plane(&mut values, cols, rows, grids);
    dequantize(&mut values, scale_factor);
    Ok(values)
}

/// Decode one block payload (header plus codec stream).
///
/// `payload` is exactly the declared block length; nothing past it is read.
pub fn decode_block(block_type: BlockType, payload: &[u8]) -> Result<Block> {
    if payload.len() < BLOCK_HEADER_LEN {
        return Err(EpakError::truncated(
            format!("{} block header", block_type),
            BLOCK_HEADER_LEN,
            payload.len(),
        ));
    }

    let (mut header, data) = payload.split_at(BLOCK_HEADER_LEN);
    let cols = dimension("cols", header.get_i32())?;
    let rows = dimension("rows", header.get_i32())?;
    let grids = dimension("grids", header.get_i32())?;
    let scale_factor = header.get_f32();

    let metadata = BlockMetadata {
        block_type,
        cols,
        rows,
        grids,
        scale_factor,
    };

    let values = decode_ppak(data, cols, rows, grids, scale_factor)?;
    let field = DecodedField::new(cols, rows, grids, values)?;

    debug!(
        block_type = %block_type,
        cols,
        rows,
        grids,
        scale_factor,
        bytes = payload.len(),
        "Decoded block"
    );

    Ok(Block { metadata, field })
}
