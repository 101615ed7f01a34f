//! EPAK ("Earth-Pack") container decoding.
//!
//! EPAK is a chunked binary format for gridded weather snapshots: a JSON
//! header, any number of self-describing blocks, and a tail marker. Each
//! block holds one or more planes of quantized values coded as planar deltas
//! and packed with a variable-width integer encoding.
//!
//! # Pipeline
//!
//! ```text
//! bytes ─► container::decode ─► block::decode_block (per chunk)
//!                                     │
//!                                     ├─► varpack::decode_into   (bytes -> integer deltas)
//!                                     ├─► delta::undelta_plane   (deltas -> absolute values)
//!                                     └─► quantize::dequantize   (integers -> floats, missing -> sentinel)
//! ```
//!
//! # Example
//!
//! ```
//! use epak_parser::{decode, DecodeOptions, EpakWriter};
//!
//! let mut writer = EpakWriter::new(&serde_json::json!({"name": "demo"}))?;
//! writer.push_block(&[1.0, 2.0, 3.0, 4.0], 2, 2, 1, 1.0)?;
//! let bytes = writer.finish();
//!
//! let epak = decode(&bytes, &DecodeOptions::default())?;
//! assert_eq!(epak.blocks[0].values(), &[1.0, 2.0, 3.0, 4.0]);
//! # Ok::<(), epak_parser::EpakError>(())
//! ```

pub mod block;
pub mod config;
pub mod container;
pub mod delta;
pub mod error;
pub mod field;
pub mod quantize;
pub mod rle;
pub mod varpack;
pub mod writer;

pub use block::{decode_block, decode_ppak, Block, BlockMetadata, BlockType};
pub use config::{DecodeOptions, RunLengthPolicy};
pub use container::{decode, decode_header, Epak};
pub use error::{EpakError, Result};
pub use field::DecodedField;
pub use rle::{decode_packed_delta_rle, parse_elements, PackedElement};
pub use writer::{encode_ppak, EpakWriter};

pub use earth_common::SENTINEL;
