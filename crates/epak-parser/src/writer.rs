//! Building EPAK containers.
//!
//! The encoder mirrors the decoding pipeline in reverse: quantize, forward
//! planar delta, varpack. Values must stay within the exact-integer range of
//! `f32` once quantized for a lossless round trip.

use crate::block::{BlockType, BLOCK_HEADER_LEN};
use crate::container::{HEAD_TAG, TAIL_TAG};
use crate::delta::delta_plane;
use crate::error::{EpakError, Result};
use crate::quantize::quantize;
use crate::varpack;
use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;
use tracing::debug;

/// Encode `cols * rows * grids` floats as a block payload (header included).
pub fn encode_ppak(
    values: &[f32],
    cols: usize,
    rows: usize,
    grids: usize,
    scale_factor: f32,
) -> Result<Vec<u8>> {
    let dim = |name: &str, v: usize| {
        i32::try_from(v)
            .map_err(|_| EpakError::invalid_dimensions(format!("{} too large: {}", name, v)))
    };
    let (c, r, g) = (dim("cols", cols)?, dim("rows", rows)?, dim("grids", grids)?);

    let quantized = quantize(values, scale_factor)?;
    let deltas = delta_plane(&quantized, cols, rows, grids)?;
    let stream = varpack::encode(&deltas);

    let mut out = Vec::with_capacity(BLOCK_HEADER_LEN + stream.len());
    out.put_i32(c);
    out.put_i32(r);
    out.put_i32(g);
    out.put_f32(scale_factor);
    out.extend_from_slice(&stream);
    Ok(out)
}

/// Incrementally assembles a container: header, blocks, tail.
#[derive(Debug, Clone)]
pub struct EpakWriter {
    buf: BytesMut,
    blocks: usize,
}

impl EpakWriter {
    /// Start a container with `header` serialized as JSON.
    pub fn new<H: Serialize + ?Sized>(header: &H) -> Result<Self> {
        let json = serde_json::to_vec(header)?;
        let mut buf = BytesMut::with_capacity(json.len() + 16);
        buf.put_slice(HEAD_TAG);
        put_length(&mut buf, json.len())?;
        buf.put_slice(&json);
        Ok(Self { buf, blocks: 0 })
    }

    /// Append a chunk with an arbitrary tag and payload.
    pub fn push_chunk(&mut self, tag: [u8; 4], payload: &[u8]) -> Result<&mut Self> {
        self.buf.put_slice(&tag);
        put_length(&mut self.buf, payload.len())?;
        self.buf.put_slice(payload);
        self.blocks += 1;
        Ok(self)
    }

    /// Encode and append one `ppk2` block.
    pub fn push_block(
        &mut self,
        values: &[f32],
        cols: usize,
        rows: usize,
        grids: usize,
        scale_factor: f32,
    ) -> Result<&mut Self> {
        let payload = encode_ppak(values, cols, rows, grids, scale_factor)?;
        debug!(cols, rows, grids, bytes = payload.len(), "Encoded block");
        self.push_chunk(BlockType::Ppk2.tag(), &payload)
    }

    /// Number of chunks written so far.
    pub fn block_count(&self) -> usize {
        self.blocks
    }

    /// Write the tail and return the finished container.
    pub fn finish(mut self) -> Bytes {
        self.buf.put_slice(TAIL_TAG);
        self.buf.freeze()
    }
}

fn put_length(buf: &mut BytesMut, len: usize) -> Result<()> {
    let len = i32::try_from(len).map_err(|_| EpakError::InvalidLength {
        tag: "chunk".to_string(),
        length: len as i64,
    })?;
    buf.put_i32(len);
    Ok(())
}
