//! "Packed Delta RLE" arrays.
//!
//! A JSON-friendly encoding used by the alternate data path. Decoding has
//! three steps:
//!
//! 1. Unroll runs: every `[v, n]` pair stands for `n` copies of `v`.
//! 2. Running sum: `T[i] = T[i-1] + D[i]`, restarting from zero after a null.
//! 3. Unpack: `R[i] = T[i] * scale_factor + add_offset`.
//!
//! ```text
//! [1,[2,5],3,[null,2],4] -> [1,2,2,2,2,2,3,null,null,4] -> [1,3,5,7,9,11,14,S,S,4]
//! ```
//!
//! Nulls, NaN and non-finite results become the sentinel `S`.

use crate::config::RunLengthPolicy;
use crate::error::{EpakError, Result};
use earth_common::math::clamp;
use earth_common::sentinel::{sanitize, SENTINEL};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// One element of a packed array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PackedElement {
    /// `[delta, run_length]`: the delta repeated `run_length` times.
    Run(Option<f64>, Option<f64>),
    /// A single delta; `None` is a missing value.
    Delta(Option<f64>),
}

/// Wire shape of an element: arrays of any length read only their first two
/// entries, so `[d]` is a run with no length and writes nothing.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawElement {
    Run(Vec<Option<f64>>),
    Delta(Option<f64>),
}

impl<'de> Deserialize<'de> for PackedElement {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawElement::deserialize(deserializer)? {
            RawElement::Run(items) => Self::Run(
                items.first().copied().flatten(),
                items.get(1).copied().flatten(),
            ),
            RawElement::Delta(delta) => Self::Delta(delta),
        })
    }
}

/// Parse a JSON array of numbers, nulls, and `[delta, run]` pairs.
pub fn parse_elements(value: &Value) -> Result<Vec<PackedElement>> {
    let items = value.as_array().ok_or_else(|| EpakError::InvalidElement {
        index: 0,
        reason: "expected an array".to_string(),
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            PackedElement::deserialize(item).map_err(|e| EpakError::InvalidElement {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Decode packed elements into exactly `length` floats.
///
/// Runs longer than the remaining output are clamped or rejected per
/// `policy`. Elements left over once the output is full are ignored, and any
/// unfilled tail is the sentinel.
pub fn decode_packed_delta_rle(
    elements: &[PackedElement],
    scale_factor: f64,
    add_offset: f64,
    length: usize,
    policy: RunLengthPolicy,
) -> Result<Vec<f32>> {
    let mut result = vec![SENTINEL; length];
    let mut j = 0usize;
    let mut prev = 0.0f64;

    for (index, element) in elements.iter().enumerate() {
        if j >= length {
            debug!(
                ignored = elements.len() - index,
                "Output full, ignoring remaining packed elements"
            );
            break;
        }

        let (delta, stop) = match *element {
            PackedElement::Delta(delta) => (delta, j + 1),
            PackedElement::Run(delta, run) => {
                let run = run.unwrap_or(f64::NAN);
                let remaining = length - j;
                if run.is_nan() {
                    (delta, j)
                } else {
                    if run > remaining as f64 {
                        match policy {
                            RunLengthPolicy::Reject => {
                                return Err(EpakError::InvalidRunLength {
                                    index,
                                    run,
                                    remaining,
                                });
                            }
                            RunLengthPolicy::Clamp => {
                                warn!(index, run, remaining, "Clamping packed run length");
                            }
                        }
                    }
                    let stop = clamp(j as f64 + run, j as f64, length as f64).ceil();
                    (delta, stop as usize)
                }
            }
        };

        match delta.filter(|d| !d.is_nan()) {
            None => {
                if j < stop {
                    result[j..stop].fill(SENTINEL);
                    j = stop;
                    prev = 0.0;
                }
            }
            Some(d) => {
                while j < stop {
                    prev += d;
                    result[j] = sanitize((prev * scale_factor + add_offset) as f32);
                    j += 1;
                }
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value, scale: f64, offset: f64, length: usize) -> Vec<f32> {
        let elements = parse_elements(&value).unwrap();
        decode_packed_delta_rle(&elements, scale, offset, length, RunLengthPolicy::Clamp).unwrap()
    }

    #[test]
    fn test_worked_example() {
        let out = decode(json!([1, [2, 5], 3, [null, 2], 4]), 1.0, 0.0, 10);
        assert_eq!(
            out,
            vec![1.0, 3.0, 5.0, 7.0, 9.0, 11.0, 14.0, SENTINEL, SENTINEL, 4.0]
        );
    }

    #[test]
    fn test_scale_and_offset() {
        let out = decode(json!([10, 10, -5]), 0.5, 100.0, 3);
        assert_eq!(out, vec![105.0, 110.0, 107.5]);
    }

    #[test]
    fn test_single_null_resets_accumulator() {
        let out = decode(json!([5, null, 5]), 1.0, 0.0, 3);
        assert_eq!(out, vec![5.0, SENTINEL, 5.0]);
    }

    #[test]
    fn test_tail_filled_with_sentinel() {
        let out = decode(json!([1, 1]), 1.0, 0.0, 4);
        assert_eq!(out, vec![1.0, 2.0, SENTINEL, SENTINEL]);
    }

    #[test]
    fn test_long_run_is_clamped() {
        let out = decode(json!([[1, 1000000]]), 1.0, 0.0, 3);
        assert_eq!(out, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_long_run_rejected_when_strict() {
        let elements = parse_elements(&json!([0, [1, 5]])).unwrap();
        let err =
            decode_packed_delta_rle(&elements, 1.0, 0.0, 3, RunLengthPolicy::Reject).unwrap_err();
        assert!(matches!(
            err,
            EpakError::InvalidRunLength {
                index: 1,
                remaining: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_and_missing_run_lengths_are_ignored() {
        let out = decode(json!([3, [null, 0], [7, null], [2, -4], 1]), 1.0, 0.0, 2);
        assert_eq!(out, vec![3.0, 4.0]);
    }

    #[test]
    fn test_elements_past_length_ignored() {
        let out = decode(json!([1, 2, 3, 4]), 1.0, 0.0, 2);
        assert_eq!(out, vec![1.0, 3.0]);
    }

    #[test]
    fn test_non_finite_result_becomes_sentinel() {
        let out = decode(json!([1e300]), 1e300, 0.0, 1);
        assert_eq!(out, vec![SENTINEL]);
    }

    #[test]
    fn test_short_and_long_run_arrays() {
        let elements = parse_elements(&json!([[4], [], [1, 2, 99], 5])).unwrap();
        assert_eq!(
            elements,
            vec![
                PackedElement::Run(Some(4.0), None),
                PackedElement::Run(None, None),
                PackedElement::Run(Some(1.0), Some(2.0)),
                PackedElement::Delta(Some(5.0)),
            ]
        );

        let out = decode(json!([[4], [], [1, 2, 99], 5]), 1.0, 0.0, 3);
        assert_eq!(out, vec![1.0, 2.0, 7.0]);
    }

    #[test]
    fn test_parse_rejects_strings() {
        let err = parse_elements(&json!([1, "two"])).unwrap_err();
        assert!(matches!(err, EpakError::InvalidElement { index: 1, .. }));

        let err = parse_elements(&json!({"a": 1})).unwrap_err();
        assert!(matches!(err, EpakError::InvalidElement { index: 0, .. }));
    }
}
