//! Varpack: variable-width signed integer encoding.
//!
//! The first byte of every value selects its width class:
//!
//! ```text
//! 0x00-0x7F  1 byte   signed 7-bit value
//! 0x80-0xBF  2 bytes  signed 14-bit value (low 6 bits of the first byte are the high bits)
//! 0xC0-0xDF  3 bytes  signed 21-bit value (low 5 bits)
//! 0xE0-0xEF  4 bytes  signed 28-bit value (low 4 bits)
//! 0xF0-0xFE  5 bytes  full 32-bit value in the next four bytes (BE)
//! 0xFF       2 bytes  run marker: next byte n, emits n + 1 missing values
//! ```

use crate::error::{EpakError, Result};
use tracing::trace;

const RUN_MARKER: u8 = 0xFF;
const MAX_RUN: usize = 256;

/// One decoded unit of a varpack stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A single signed value.
    Value(i32),
    /// A run of this many missing values.
    Missing(usize),
}

impl Token {
    /// Number of logical elements this token expands to.
    pub fn len(&self) -> usize {
        match self {
            Token::Value(_) => 1,
            Token::Missing(n) => *n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Iterator over the tokens of a varpack byte stream.
///
/// Yields an error once if the stream ends in the middle of a value, then stops.
pub struct VarpackReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> VarpackReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Byte offset of the next token.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn read_token(&mut self) -> Result<Token> {
        let start = self.pos;
        let b = self.bytes[start];
        let width = match b {
            0x00..=0x7F => 1,
            0x80..=0xBF => 2,
            0xC0..=0xDF => 3,
            0xE0..=0xEF => 4,
            RUN_MARKER => 2,
            _ => 5,
        };

        let available = self.bytes.len() - start;
        if available < width {
            return Err(EpakError::truncated(
                format!("varpack value at offset {}", start),
                width,
                available,
            ));
        }

        let s = &self.bytes[start..start + width];
        self.pos += width;

        let token = match width {
            1 => Token::Value((((b as u32) << 25) as i32) >> 25),
            2 if b == RUN_MARKER => Token::Missing(s[1] as usize + 1),
            2 => Token::Value(((((b as u32) << 26) as i32) >> 18) | s[1] as i32),
            3 => Token::Value(
                ((((b as u32) << 27) as i32) >> 11) | (s[1] as i32) << 8 | s[2] as i32,
            ),
            4 => Token::Value(
                ((((b as u32) << 28) as i32) >> 4)
                    | (s[1] as i32) << 16
                    | (s[2] as i32) << 8
                    | s[3] as i32,
            ),
            _ => Token::Value(i32::from_be_bytes([s[1], s[2], s[3], s[4]])),
        };

        Ok(token)
    }
}

impl Iterator for VarpackReader<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.bytes.len() {
            return None;
        }
        match self.read_token() {
            Ok(token) => Some(Ok(token)),
            Err(e) => {
                self.pos = self.bytes.len();
                Some(Err(e))
            }
        }
    }
}

/// Decode a varpack stream into `out`, writing NaN for missing values.
///
/// Returns the number of slots written. Slots past that count are left
/// untouched. A stream that yields more values than `out` can hold is an error.
pub fn decode_into(bytes: &[u8], out: &mut [f32]) -> Result<usize> {
    let capacity = out.len();
    let mut j = 0;

    for token in VarpackReader::new(bytes) {
        match token? {
            Token::Value(v) => {
                let slot = out
                    .get_mut(j)
                    .ok_or(EpakError::ValueOverflow { capacity })?;
                *slot = v as f32;
                j += 1;
            }
            Token::Missing(n) => {
                let end = j + n;
                if end > capacity {
                    return Err(EpakError::ValueOverflow { capacity });
                }
                out[j..end].fill(f32::NAN);
                j = end;
            }
        }
    }

    trace!(bytes = bytes.len(), values = j, "Decoded varpack stream");
    Ok(j)
}

/// Decode a whole varpack stream, with `None` for missing values.
pub fn decode(bytes: &[u8]) -> Result<Vec<Option<i32>>> {
    let mut values = Vec::new();
    for token in VarpackReader::new(bytes) {
        match token? {
            Token::Value(v) => values.push(Some(v)),
            Token::Missing(n) => values.extend(std::iter::repeat(None).take(n)),
        }
    }
    Ok(values)
}

/// Number of bytes the minimal encoding of `v` occupies.
pub fn encoded_width(v: i32) -> usize {
    match v {
        -64..=63 => 1,
        -8192..=8191 => 2,
        -1_048_576..=1_048_575 => 3,
        -134_217_728..=134_217_727 => 4,
        _ => 5,
    }
}

fn push_value(out: &mut Vec<u8>, v: i32) {
    match encoded_width(v) {
        1 => out.push(v as u8 & 0x7F),
        2 => out.extend_from_slice(&[0x80 | ((v >> 8) as u8 & 0x3F), v as u8]),
        3 => out.extend_from_slice(&[0xC0 | ((v >> 16) as u8 & 0x1F), (v >> 8) as u8, v as u8]),
        4 => out.extend_from_slice(&[
            0xE0 | ((v >> 24) as u8 & 0x0F),
            (v >> 16) as u8,
            (v >> 8) as u8,
            v as u8,
        ]),
        _ => {
            out.push(0xF0);
            out.extend_from_slice(&v.to_be_bytes());
        }
    }
}

fn push_missing(out: &mut Vec<u8>, mut run: usize) {
    while run > 0 {
        let n = run.min(MAX_RUN);
        out.extend_from_slice(&[RUN_MARKER, (n - 1) as u8]);
        run -= n;
    }
}

/// Encode values with the minimal width per value; `None` becomes run markers.
pub fn encode(values: &[Option<i32>]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len());
    let mut run = 0;

    for value in values {
        match value {
            Some(v) => {
                push_missing(&mut out, run);
                run = 0;
                push_value(&mut out, *v);
            }
            None => run += 1,
        }
    }
    push_missing(&mut out, run);

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_byte_sign_extension() {
        assert_eq!(decode(&[0x00]).unwrap(), vec![Some(0)]);
        assert_eq!(decode(&[0x3F]).unwrap(), vec![Some(63)]);
        assert_eq!(decode(&[0x40]).unwrap(), vec![Some(-64)]);
        assert_eq!(decode(&[0x7F]).unwrap(), vec![Some(-1)]);
    }

    #[test]
    fn test_two_byte_values() {
        // low 6 bits 0x01, next byte 0x02 -> 0x0102
        assert_eq!(decode(&[0x81, 0x02]).unwrap(), vec![Some(258)]);
        assert_eq!(decode(&[0xBF, 0xFF]).unwrap(), vec![Some(-1)]);
        assert_eq!(decode(&[0xA0, 0x00]).unwrap(), vec![Some(-8192)]);
    }

    #[test]
    fn test_five_byte_ignores_low_nibble() {
        assert_eq!(
            decode(&[0xF7, 0x80, 0x00, 0x00, 0x00]).unwrap(),
            vec![Some(i32::MIN)]
        );
        assert_eq!(
            decode(&[0xF0, 0x00, 0x01, 0x00, 0x00]).unwrap(),
            vec![Some(65536)]
        );
    }

    #[test]
    fn test_run_marker() {
        let values = decode(&[0xFF, 0x03]).unwrap();
        assert_eq!(values, vec![None; 4]);
    }

    #[test]
    fn test_run_marker_between_values() {
        let values = decode(&[0x01, 0xFF, 0x00, 0x02]).unwrap();
        assert_eq!(values, vec![Some(1), None, Some(2)]);
    }

    #[test]
    fn test_truncated_input() {
        for bytes in [&[0x81][..], &[0xC0, 0x01], &[0xE0, 0, 0], &[0xF0, 0, 0, 0], &[0xFF]] {
            let err = decode(bytes).unwrap_err();
            assert!(
                matches!(err, EpakError::TruncatedInput { .. }),
                "expected truncation for {:?}, got {:?}",
                bytes,
                err
            );
        }
    }

    #[test]
    fn test_reader_stops_after_error() {
        let mut reader = VarpackReader::new(&[0x01, 0x81]);
        assert_eq!(reader.next().unwrap().unwrap(), Token::Value(1));
        assert!(reader.next().unwrap().is_err());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_decode_into_nan_for_missing() {
        let mut out = [0.0f32; 4];
        let n = decode_into(&[0x05, 0xFF, 0x01], &mut out).unwrap();
        assert_eq!(n, 3);
        assert_eq!(out[0], 5.0);
        assert!(out[1].is_nan());
        assert!(out[2].is_nan());
        assert_eq!(out[3], 0.0);
    }

    #[test]
    fn test_decode_into_overflow() {
        let mut out = [0.0f32; 2];
        let err = decode_into(&[0x01, 0x02, 0x03], &mut out).unwrap_err();
        assert!(matches!(err, EpakError::ValueOverflow { capacity: 2 }));

        let err = decode_into(&[0xFF, 0x02], &mut out).unwrap_err();
        assert!(matches!(err, EpakError::ValueOverflow { capacity: 2 }));
    }

    #[test]
    fn test_encoded_width_boundaries() {
        assert_eq!(encoded_width(63), 1);
        assert_eq!(encoded_width(64), 2);
        assert_eq!(encoded_width(-8193), 3);
        assert_eq!(encoded_width(134_217_727), 4);
        assert_eq!(encoded_width(134_217_728), 5);
        assert_eq!(encoded_width(i32::MIN), 5);
    }

    #[test]
    fn test_encode_long_missing_run_splits() {
        let values = vec![None; 300];
        let bytes = encode(&values);
        assert_eq!(bytes, vec![0xFF, 0xFF, 0xFF, 43]);
        assert_eq!(decode(&bytes).unwrap().len(), 300);
    }
}
