//! Common types and helpers shared across the EPAK crates.
//!
//! Holds the "no data" sentinel convention, the small amount of geographic
//! math the grid and interpolation code relies on, and parsing of axis values
//! written as fractions.

pub mod coord;
pub mod decimal;
pub mod error;
pub mod math;
pub mod sentinel;

pub use coord::format_coordinates;
pub use decimal::decimalize;
pub use error::{CommonError, CommonResult};
pub use math::{clamp, floor_mod, length, to_cardinal_degrees};
pub use sentinel::{is_valid, SENTINEL};
