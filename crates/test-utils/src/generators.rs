//! Synthetic field generators.
//!
//! All generators return row-major `Vec<f32>` of `width * height` values
//! (row 0 first), the layout of one decoded plane.

use earth_common::SENTINEL;

/// Each cell is `col * 1000 + row`, so any misplaced read is obvious.
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid[1], 1000.0);  // col=1, row=0
/// assert_eq!(grid[10], 1.0);    // col=0, row=1
/// ```
pub fn create_test_grid(width: usize, height: usize) -> Vec<f32> {
    (0..height)
        .flat_map(|row| (0..width).map(move |col| (col * 1000 + row) as f32))
        .collect()
}

/// Temperature-like values in Kelvin, 250K (first cell) rising to ~310K.
///
/// Values carry two decimals so they survive quantization with scale factor 2.
pub fn create_temperature_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let x = col as f32 / width.max(1) as f32;
            let y = row as f32 / height.max(1) as f32;
            let t = 250.0 + x * 30.0 + y * 30.0;
            data.push((t * 100.0).round() / 100.0);
        }
    }
    data
}

/// U (west-east) wind component: varies with row from -20 to +20 m/s.
pub fn create_u_wind_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        let u = (row as f32 / height.max(1) as f32 - 0.5) * 40.0;
        data.extend(std::iter::repeat(u.round()).take(width));
    }
    data
}

/// V (south-north) wind component: varies with column from -15 to +15 m/s.
pub fn create_v_wind_grid(width: usize, height: usize) -> Vec<f32> {
    let row: Vec<f32> = (0..width)
        .map(|col| ((col as f32 / width.max(1) as f32 - 0.5) * 30.0).round())
        .collect();
    row.iter().copied().cycle().take(width * height).collect()
}

/// A grid filled with one value.
pub fn create_constant_grid(width: usize, height: usize, value: f32) -> Vec<f32> {
    vec![value; width * height]
}

/// Zeros with the sentinel at each `(col, row)` in `holes`.
pub fn create_grid_with_holes(width: usize, height: usize, holes: &[(usize, usize)]) -> Vec<f32> {
    let mut data = vec![0.0f32; width * height];
    punch_holes(&mut data, width, holes);
    data
}

/// Set the sentinel at each `(col, row)` that lies inside the grid.
pub fn punch_holes(data: &mut [f32], width: usize, holes: &[(usize, usize)]) {
    for &(col, row) in holes {
        if let Some(v) = data.get_mut(row * width + col).filter(|_| col < width) {
            *v = SENTINEL;
        }
    }
}

/// Deterministically replace roughly one cell in `every` with the sentinel.
pub fn scatter_holes(data: &mut [f32], width: usize, seed: u32, every: u32) {
    if width == 0 || every == 0 {
        return;
    }
    for (i, v) in data.iter_mut().enumerate() {
        let (col, row) = ((i % width) as u32, (i / width) as u32);
        if simple_hash(col, row, seed) % every == 0 {
            *v = SENTINEL;
        }
    }
}

/// Interleave two equally sized planes into one `[u, v]` stacked field
/// (plane 0 = u, plane 1 = v), the layout of a two-grid block.
pub fn stack_planes(u: &[f32], v: &[f32]) -> Vec<f32> {
    assert_eq!(u.len(), v.len(), "planes must be the same size");
    u.iter().chain(v.iter()).copied().collect()
}

fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}
