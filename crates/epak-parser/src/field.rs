//! Decoded float arrays.

use crate::error::{EpakError, Result};
use earth_common::sentinel::is_valid;

/// The values of one decoded block, laid out as `[grids][rows][cols]`.
///
/// Every element is either a finite value or the sentinel. The field is
/// immutable once built, so it can be shared freely between readers.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedField {
    cols: usize,
    rows: usize,
    grids: usize,
    values: Vec<f32>,
}

impl DecodedField {
    /// Wrap `values`, which must hold exactly `cols * rows * grids` elements.
    pub fn new(cols: usize, rows: usize, grids: usize, values: Vec<f32>) -> Result<Self> {
        let expected = cols
            .checked_mul(rows)
            .and_then(|n| n.checked_mul(grids))
            .ok_or_else(|| {
                EpakError::invalid_dimensions(format!("{}x{}x{} overflows", cols, rows, grids))
            })?;
        if values.len() != expected {
            return Err(EpakError::invalid_dimensions(format!(
                "expected {} values for {}x{}x{}, got {}",
                expected,
                cols,
                rows,
                grids,
                values.len()
            )));
        }
        Ok(Self {
            cols,
            rows,
            grids,
            values,
        })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn grids(&self) -> usize {
        self.grids
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f32> {
        self.values
    }

    /// The `cols * rows` values of plane `z`.
    pub fn plane(&self, z: usize) -> Option<&[f32]> {
        if z >= self.grids {
            return None;
        }
        let area = self.cols * self.rows;
        Some(&self.values[z * area..(z + 1) * area])
    }

    /// Value at `(x, y, z)`, or `None` outside the field.
    pub fn value_at(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        if x >= self.cols || y >= self.rows || z >= self.grids {
            return None;
        }
        self.values
            .get(z * self.cols * self.rows + y * self.cols + x)
            .copied()
    }

    /// Number of sentinel elements.
    pub fn count_missing(&self) -> usize {
        self.values.iter().filter(|v| !is_valid(**v)).count()
    }

    /// Smallest and largest valid value, if any.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.values
            .iter()
            .copied()
            .filter(|v| is_valid(*v))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Hash of up to `samples` evenly strided elements (all when `samples` is 0).
    ///
    /// Trades collision resistance for speed: meant for memoizing derived
    /// data by content, not for integrity checks.
    pub fn content_hash(&self, samples: usize) -> i32 {
        let len = self.values.len();
        let byte_len = (len * std::mem::size_of::<f32>()) as i32;
        let step = if samples == 0 {
            1.0
        } else {
            (len as f64 / samples as f64).max(1.0)
        };

        let mut hash = byte_len;
        let mut i = 0.0f64;
        while (i as usize) < len {
            let bits = self.values[i as usize].to_bits() as i32;
            hash = hash.wrapping_mul(31).wrapping_add(bits);
            i += step;
        }
        hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use earth_common::SENTINEL;

    fn field() -> DecodedField {
        let values = (0..12).map(|v| v as f32).collect();
        DecodedField::new(3, 2, 2, values).unwrap()
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = DecodedField::new(2, 2, 1, vec![0.0; 3]).unwrap_err();
        assert!(matches!(err, EpakError::InvalidDimensions(_)));
    }

    #[test]
    fn test_value_at_layout() {
        let f = field();
        assert_eq!(f.value_at(0, 0, 0), Some(0.0));
        assert_eq!(f.value_at(2, 1, 0), Some(5.0));
        assert_eq!(f.value_at(1, 0, 1), Some(7.0));
        assert_eq!(f.value_at(3, 0, 0), None);
        assert_eq!(f.value_at(0, 0, 2), None);
    }

    #[test]
    fn test_plane() {
        let f = field();
        assert_eq!(f.plane(1).unwrap(), &[6.0, 7.0, 8.0, 9.0, 10.0, 11.0]);
        assert!(f.plane(2).is_none());
    }

    #[test]
    fn test_missing_and_range() {
        let f = DecodedField::new(2, 2, 1, vec![3.0, SENTINEL, -1.0, SENTINEL]).unwrap();
        assert_eq!(f.count_missing(), 2);
        assert_eq!(f.min_max(), Some((-1.0, 3.0)));

        let empty = DecodedField::new(1, 1, 1, vec![SENTINEL]).unwrap();
        assert_eq!(empty.min_max(), None);
    }

    #[test]
    fn test_content_hash_changes_with_content() {
        let a = field();
        let mut values = a.values().to_vec();
        values[4] = 99.0;
        let b = DecodedField::new(3, 2, 2, values).unwrap();

        assert_eq!(a.content_hash(0), field().content_hash(0));
        assert_ne!(a.content_hash(0), b.content_hash(0));
    }

    #[test]
    fn test_content_hash_sampling_is_stable() {
        let f = field();
        assert_eq!(f.content_hash(4), f.content_hash(4));
        assert_eq!(f.content_hash(100), f.content_hash(0));
    }
}
