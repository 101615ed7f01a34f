//! EPAK container parsing.
//!
//! ```text
//! file  := head block* tail
//! head  := "head" int32(length) utf8_json(length)
//! block := type4  int32(length) payload(length)
//! tail  := "tail"
//! ```
//!
//! Example with a three byte header and one two byte block:
//!
//! ```text
//! ["head"][0x00000003][0x10, 0x11, 0x12]["ppk2"][0x00000002][0xff, 0xff]["tail"]
//! ```

use crate::block::{decode_block, Block, BlockMetadata, BlockType};
use crate::config::DecodeOptions;
use crate::error::{EpakError, Result};
use bytes::Buf;
use serde_json::Value;
use tracing::{debug, trace};

pub const HEAD_TAG: &[u8; 4] = b"head";
pub const TAIL_TAG: &[u8; 4] = b"tail";

/// A decoded container.
#[derive(Debug, Clone, PartialEq)]
pub struct Epak {
    /// The JSON header describing the dataset.
    pub header: Value,
    /// Decoded blocks in file order.
    pub blocks: Vec<Block>,
}

impl Epak {
    /// Block headers in file order.
    pub fn metadata(&self) -> impl Iterator<Item = &BlockMetadata> {
        self.blocks.iter().map(|b| &b.metadata)
    }

    /// Split into the header, the value arrays, and the block headers.
    pub fn into_parts(self) -> (Value, Vec<Vec<f32>>, Vec<BlockMetadata>) {
        let mut values = Vec::with_capacity(self.blocks.len());
        let mut metadata = Vec::with_capacity(self.blocks.len());
        for block in self.blocks {
            metadata.push(block.metadata);
            values.push(block.field.into_values());
        }
        (self.header, values, metadata)
    }
}

/// Bounds-checked reader over the container bytes.
struct Cursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn take(&mut self, n: usize, context: &str) -> Result<&'a [u8]> {
        let available = self.data.len() - self.offset;
        if available < n {
            return Err(EpakError::truncated(
                format!("{} at offset {}", context, self.offset),
                n,
                available,
            ));
        }
        let s = &self.data[self.offset..self.offset + n];
        self.offset += n;
        Ok(s)
    }

    fn tag(&mut self, context: &str) -> Result<[u8; 4]> {
        let mut tag = [0u8; 4];
        tag.copy_from_slice(self.take(4, context)?);
        Ok(tag)
    }

    fn length(&mut self, tag: &[u8; 4]) -> Result<usize> {
        let mut raw = self.take(4, "chunk length")?;
        let length = raw.get_i32();
        usize::try_from(length).map_err(|_| EpakError::InvalidLength {
            tag: tag_name(tag),
            length: length as i64,
        })
    }
}

fn tag_name(tag: &[u8]) -> String {
    String::from_utf8_lossy(tag).into_owned()
}

/// Decode a complete EPAK buffer.
///
/// The whole buffer must already be in memory. On any error nothing is
/// returned; a container is either decoded completely or not at all.
pub fn decode(data: &[u8], options: &DecodeOptions) -> Result<Epak> {
    let mut cursor = Cursor::new(data);

    let head = cursor.tag("container head")?;
    if &head != HEAD_TAG {
        return Err(EpakError::BadMagic {
            found: tag_name(&head),
        });
    }

    let length = cursor.length(&head)?;
    let json = cursor.take(length, "header json")?;
    let header: Value = serde_json::from_str(std::str::from_utf8(json)?)?;
    trace!(bytes = length, "Parsed container header");

    if options.header_only {
        return Ok(Epak {
            header,
            blocks: Vec::new(),
        });
    }

    let mut blocks = Vec::new();
    loop {
        let tag = cursor.tag("block tag")?;
        if &tag == TAIL_TAG {
            break;
        }

        let block_type = BlockType::from_tag(&tag)
            .ok_or_else(|| EpakError::UnknownBlockType(tag_name(&tag)))?;
        let length = cursor.length(&tag)?;
        let payload = cursor.take(length, block_type.as_str())?;
        blocks.push(decode_block(block_type, payload)?);
    }

    debug!(
        blocks = blocks.len(),
        bytes = cursor.offset,
        "Decoded EPAK container"
    );

    Ok(Epak { header, blocks })
}

/// Decode only the header of an EPAK buffer.
pub fn decode_header(data: &[u8]) -> Result<Value> {
    decode(data, &DecodeOptions::header_only()).map(|epak| epak.header)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = tag.to_vec();
        out.extend_from_slice(&(payload.len() as i32).to_be_bytes());
        out.extend_from_slice(payload);
        out
    }

    #[test]
    fn test_empty_container() {
        let mut data = chunk(b"head", br#"{"a":1}"#);
        data.extend_from_slice(b"tail");

        let epak = decode(&data, &DecodeOptions::default()).unwrap();
        assert_eq!(epak.header["a"], 1);
        assert!(epak.blocks.is_empty());
    }

    #[test]
    fn test_bad_magic() {
        let data = chunk(b"HEAD", b"{}");
        let err = decode(&data, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, EpakError::BadMagic { ref found } if found == "HEAD"));
    }

    #[test]
    fn test_missing_tail_is_truncation() {
        let data = chunk(b"head", b"{}");
        let err = decode(&data, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, EpakError::TruncatedInput { .. }));
    }

    #[test]
    fn test_header_only_ignores_the_rest() {
        let mut data = chunk(b"head", b"{}");
        data.extend_from_slice(b"junk that is not a block");
        let header = decode_header(&data).unwrap();
        assert_eq!(header, serde_json::json!({}));
    }

    #[test]
    fn test_malformed_header() {
        let mut data = chunk(b"head", b"{not json");
        data.extend_from_slice(b"tail");
        let err = decode(&data, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, EpakError::MalformedHeader(_)));

        let mut data = chunk(b"head", &[0x22, 0xFF, 0x22]);
        data.extend_from_slice(b"tail");
        let err = decode(&data, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, EpakError::MalformedHeader(_)));
    }

    #[test]
    fn test_negative_length() {
        let mut data = b"head".to_vec();
        data.extend_from_slice(&(-4i32).to_be_bytes());
        let err = decode(&data, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, EpakError::InvalidLength { length: -4, .. }));
    }

    #[test]
    fn test_declared_length_past_end() {
        let mut data = b"head".to_vec();
        data.extend_from_slice(&100i32.to_be_bytes());
        data.extend_from_slice(b"{}");
        let err = decode(&data, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            EpakError::TruncatedInput {
                needed: 100,
                available: 2,
                ..
            }
        ));
    }
}
