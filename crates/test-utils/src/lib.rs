//! Shared test utilities for the EPAK workspace.
//!
//! This crate provides:
//! - Synthetic field generators (predictable, temperature-like, wind, holes)
//! - Axis fixtures for common global and regional grids
//! - Hand-built EPAK byte buffers that do not go through the encoder
//! - Approximate equality assertions
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! ```ignore
//! use test_utils::{assert_approx_eq, fixtures::epak};
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::*;
pub use generators::*;

use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write `bytes` to a file named `name` inside a fresh temporary directory.
///
/// The directory is removed when the returned guard is dropped.
pub fn write_temp_file(name: &str, bytes: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("Failed to create temp file");
    file.write_all(bytes).expect("Failed to write temp file");
    (dir, path)
}

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if !(diff <= epsilon) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Asserts that two float slices match element-wise within `epsilon`.
///
/// Sentinel elements must match exactly.
#[macro_export]
macro_rules! assert_slice_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: &[f32] = &$left[..];
        let right: &[f32] = &$right[..];
        assert_eq!(left.len(), right.len(), "slice lengths differ");
        for (i, (l, r)) in left.iter().zip(right.iter()).enumerate() {
            if *l == $crate::SENTINEL || *r == $crate::SENTINEL {
                assert_eq!(l, r, "sentinel mismatch at index {}", i);
            } else if ((*l as f64) - (*r as f64)).abs() > $epsilon as f64 {
                panic!("mismatch at index {}: {} vs {}", i, l, r);
            }
        }
    }};
}

pub use earth_common::SENTINEL;
