//! Regular longitude/latitude grids.
//!
//! Each axis has a `start` in degrees, a `delta` between ticks and a `size`
//! (number of ticks, inclusive of the origin). Positive deltas move east and
//! north. A full 1° grid starting at the south pole is
//!
//! ```text
//! lon: {start: 0,   delta: 1, size: 360}   lon in [0, 359]
//! lat: {start: -90, delta: 1, size: 181}   lat in [-90, 90]
//! ```
//!
//! Points are stored row-major: index `i = y * width + x`.

use crate::error::{GridError, Result};
use earth_common::math::floor_mod;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const RAD: f64 = PI / 180.0;

/// One axis of a regular grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    #[serde(deserialize_with = "earth_common::decimal::deserialize")]
    pub start: f64,
    #[serde(deserialize_with = "earth_common::decimal::deserialize")]
    pub delta: f64,
    pub size: usize,
}

impl AxisSpec {
    pub fn new(start: f64, delta: f64, size: usize) -> Self {
        Self { start, delta, size }
    }

    /// Coordinate of the last tick.
    pub fn end(&self) -> f64 {
        self.start + self.delta * (self.size as f64 - 1.0)
    }

    fn validate(&self, name: &str) -> Result<()> {
        if self.size == 0 {
            return Err(GridError::invalid_axis(format!("{} axis has no points", name)));
        }
        if !self.start.is_finite() {
            return Err(GridError::invalid_axis(format!(
                "{} start is not finite: {}",
                name, self.start
            )));
        }
        if !self.delta.is_finite() || self.delta == 0.0 {
            return Err(GridError::invalid_axis(format!(
                "{} delta must be finite and non-zero: {}",
                name, self.delta
            )));
        }
        Ok(())
    }
}

impl From<(f64, f64, usize)> for AxisSpec {
    fn from((start, delta, size): (f64, f64, usize)) -> Self {
        Self::new(start, delta, size)
    }
}

/// The four grid points enclosing a coordinate.
///
/// ```text
///        x = 1.4
///   --i00--|--i10--   y = 8.3 gives the corners [1, 8], [2, 8], [1, 9], [2, 9]
///     |    .    |     with x = 0.4 and y = 0.3
///   --i01-----i11--
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbors {
    pub i00: usize,
    pub i10: usize,
    pub i01: usize,
    pub i11: usize,
    /// Fractional offset from `i00` along the longitude axis, in `[0, 1)`.
    pub x: f64,
    /// Fractional offset from `i00` along the latitude axis, in `[0, 1)`.
    pub y: f64,
}

/// Grid extent in radians, half a cell beyond the outermost points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    /// `[lon, lat]` of the low corner.
    pub low: [f64; 2],
    /// `[lon, lat]` extent.
    pub size: [f64; 2],
}

/// A regular geographic grid mapping `[lon, lat]` coordinates to point indices.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularGrid {
    lon: AxisSpec,
    lat: AxisSpec,
    cylinder: bool,
}

impl RegularGrid {
    /// Build a grid from its longitude and latitude axes.
    pub fn new(lon: AxisSpec, lat: AxisSpec) -> Result<Self> {
        lon.validate("longitude")?;
        lat.validate("latitude")?;
        lon.size
            .checked_mul(lat.size)
            .ok_or_else(|| GridError::invalid_axis("grid point count overflows"))?;

        let cylinder = (lon.size as f64 * lon.delta).floor() >= 360.0;
        Ok(Self { lon, lat, cylinder })
    }

    pub fn lon_axis(&self) -> &AxisSpec {
        &self.lon
    }

    pub fn lat_axis(&self) -> &AxisSpec {
        &self.lat
    }

    /// `(width, height)` in points.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.lon.size, self.lat.size)
    }

    /// True if the grid fully wraps around the longitude axis.
    pub fn is_cylindrical(&self) -> bool {
        self.cylinder
    }

    /// Total number of points.
    pub fn len(&self) -> usize {
        self.lon.size * self.lat.size
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Continuous grid position of a coordinate, or `None` for NaN input.
    ///
    /// Longitude is normalized with floor-mod so that `x` is never negative.
    fn position(&self, coord: [f64; 2]) -> Option<(f64, f64)> {
        let [lon, lat] = coord;
        if lon.is_nan() || lat.is_nan() {
            return None;
        }
        let x = floor_mod(lon - self.lon.start, 360.0) / self.lon.delta;
        let y = (lat - self.lat.start) / self.lat.delta;
        Some((x, y))
    }

    /// Index of the grid point closest to `[lon, lat]`.
    ///
    /// Returns `None` when the coordinate is more than half a step outside the
    /// grid. On a cylindrical grid, positions rounding to `width` wrap to
    /// column 0.
    pub fn closest(&self, coord: [f64; 2]) -> Option<usize> {
        let (x, y) = self.position(coord)?;
        let (nx, ny) = (self.lon.size as f64, self.lat.size as f64);

        // round half up
        let rx = (x + 0.5).floor();
        let ry = (y + 0.5).floor();

        if 0.0 <= ry && ry < ny && 0.0 <= rx && (rx < nx || (rx == nx && self.cylinder)) {
            let col = if rx == nx { 0 } else { rx as usize };
            return Some(ry as usize * self.lon.size + col);
        }
        None
    }

    /// The four points surrounding `[lon, lat]` and the offsets within that cell.
    ///
    /// Returns `None` unless all four points exist. The ceiling column wraps
    /// to 0 only on a cylindrical grid.
    pub fn closest4(&self, coord: [f64; 2]) -> Option<Neighbors> {
        let (x, y) = self.position(coord)?;
        let (nx, ny) = (self.lon.size as f64, self.lat.size as f64);

        let fx = x.floor();
        let fy = y.floor();
        let cx = fx + 1.0;
        let cy = fy + 1.0;

        if 0.0 <= fy && cy < ny && 0.0 <= fx && (cx < nx || (cx == nx && self.cylinder)) {
            let width = self.lon.size;
            let i00 = fy as usize * width + fx as usize;
            let i01 = i00 + width;
            let (i10, i11) = if cx == nx {
                (i00 + 1 - width, i01 + 1 - width)
            } else {
                (i00 + 1, i01 + 1)
            };
            return Some(Neighbors {
                i00,
                i10,
                i01,
                i11,
                x: x - fx,
                y: y - fy,
            });
        }
        None
    }

    /// Coordinate `[lon, lat]` of point `index`.
    pub fn coord_of(&self, index: usize) -> Option<[f64; 2]> {
        if index >= self.len() {
            return None;
        }
        let x = index % self.lon.size;
        let y = index / self.lon.size;
        Some([
            self.lon.start + x as f64 * self.lon.delta,
            self.lat.start + y as f64 * self.lat.delta,
        ])
    }

    /// Extent in radians, including half a cell on every side.
    pub fn bounds(&self) -> GridBounds {
        let half_lon = self.lon.delta / 2.0;
        let half_lat = self.lat.delta / 2.0;
        let lon_low = (self.lon.start - half_lon) * RAD;
        let lon_high = (self.lon.end() + half_lon) * RAD;
        let lat_low = (self.lat.start - half_lat) * RAD;
        let lat_high = (self.lat.end() + half_lat) * RAD;
        GridBounds {
            low: [lon_low, lat_low],
            size: [lon_high - lon_low, lat_high - lat_low],
        }
    }

    /// Iterate `(lon, lat, index)` over every point in row-major order.
    pub fn points(&self) -> Points<'_> {
        self.points_from(0)
    }

    /// Like [`points`](Self::points) but starting at `start`.
    pub fn points_from(&self, start: usize) -> Points<'_> {
        Points {
            grid: self,
            next: start,
        }
    }
}

/// Iterator over grid points, see [`RegularGrid::points`].
#[derive(Debug, Clone)]
pub struct Points<'a> {
    grid: &'a RegularGrid,
    next: usize,
}

impl Iterator for Points<'_> {
    type Item = (f64, f64, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.next;
        let [lon, lat] = self.grid.coord_of(i)?;
        self.next += 1;
        Some((lon, lat, i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.grid.len().saturating_sub(self.next);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Points<'_> {}
