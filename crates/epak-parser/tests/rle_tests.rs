//! Packed delta RLE decoding through the public API.

use epak_parser::{decode_packed_delta_rle, parse_elements, EpakError, PackedElement, RunLengthPolicy, SENTINEL};
use serde_json::json;

#[test]
fn test_parse_element_shapes() {
    let elements = parse_elements(&json!([1.5, null, [2, 3], [null, 4]])).unwrap();
    assert_eq!(
        elements,
        vec![
            PackedElement::Delta(Some(1.5)),
            PackedElement::Delta(None),
            PackedElement::Run(Some(2.0), Some(3.0)),
            PackedElement::Run(None, Some(4.0)),
        ]
    );
}

#[test]
fn test_temperature_like_series() {
    // 27315 + cumulative deltas, scaled to Kelvin with two decimals
    let elements = parse_elements(&json!([27315, [10, 3], -5])).unwrap();
    let out = decode_packed_delta_rle(&elements, 0.01, 0.0, 5, RunLengthPolicy::Clamp).unwrap();
    let expected = [273.15f32, 273.25, 273.35, 273.45, 273.40];
    for (a, b) in out.iter().zip(expected) {
        assert!((a - b).abs() < 1e-3, "{} vs {}", a, b);
    }
}

#[test]
fn test_null_run_then_restart() {
    let elements = parse_elements(&json!([[4, 2], [null, 2], 1, 1])).unwrap();
    let out = decode_packed_delta_rle(&elements, 1.0, 10.0, 6, RunLengthPolicy::Clamp).unwrap();
    assert_eq!(out, vec![14.0, 18.0, SENTINEL, SENTINEL, 11.0, 12.0]);
}

#[test]
fn test_fractional_run_rounds_up() {
    let elements = parse_elements(&json!([[1, 1.5], 5])).unwrap();
    let out = decode_packed_delta_rle(&elements, 1.0, 0.0, 3, RunLengthPolicy::Clamp).unwrap();
    assert_eq!(out, vec![1.0, 2.0, 7.0]);
}

#[test]
fn test_empty_input() {
    let out = decode_packed_delta_rle(&[], 1.0, 0.0, 2, RunLengthPolicy::Clamp).unwrap();
    assert_eq!(out, vec![SENTINEL, SENTINEL]);

    let out = decode_packed_delta_rle(&[PackedElement::Delta(Some(1.0))], 1.0, 0.0, 0, RunLengthPolicy::Reject)
        .unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_reject_policy_allows_exact_fit() {
    let elements = parse_elements(&json!([[2, 3]])).unwrap();
    let out = decode_packed_delta_rle(&elements, 1.0, 0.0, 3, RunLengthPolicy::Reject).unwrap();
    assert_eq!(out, vec![2.0, 4.0, 6.0]);

    let err = decode_packed_delta_rle(&elements, 1.0, 0.0, 2, RunLengthPolicy::Reject).unwrap_err();
    assert!(matches!(err, EpakError::InvalidRunLength { index: 0, remaining: 2, .. }));
}
