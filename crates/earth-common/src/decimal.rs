//! Parsing of axis values that may be written as fractions.
//!
//! Grid axes in dataset headers carry their start and step either as plain
//! numbers, as strings like `"1/4"`, or as two-element `[numerator,
//! denominator]` arrays. Fractions keep steps such as one third of a degree
//! exact in the metadata.

use crate::error::{CommonError, CommonResult};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Number(f64),
    Pair([f64; 2]),
    Text(String),
}

/// Convert `"a/b"` or a plain numeric string to a number.
pub fn decimalize(text: &str) -> CommonResult<f64> {
    let text = text.trim();
    match text.split_once('/') {
        Some((num, den)) => {
            let num = parse_number(num, text)?;
            let den = parse_number(den, text)?;
            if den == 0.0 {
                return Err(CommonError::ZeroDenominator(text.to_string()));
            }
            Ok(num / den)
        }
        None => parse_number(text, text),
    }
}

fn parse_number(part: &str, whole: &str) -> CommonResult<f64> {
    part.trim()
        .parse::<f64>()
        .map_err(|_| CommonError::InvalidDecimal(whole.to_string()))
}

/// Serde adapter for `#[serde(deserialize_with = "earth_common::decimal::deserialize")]`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawDecimal::deserialize(deserializer)? {
        RawDecimal::Number(n) => Ok(n),
        RawDecimal::Pair([num, den]) => {
            if den == 0.0 {
                Err(serde::de::Error::custom(CommonError::ZeroDenominator(format!(
                    "[{num}, {den}]"
                ))))
            } else {
                Ok(num / den)
            }
        }
        RawDecimal::Text(text) => decimalize(&text).map_err(serde::de::Error::custom),
    }
}
