//! Human readable coordinates.

/// Format `(lon, lat)` in degrees as e.g. `"45.00° N, 122.50° W"`.
pub fn format_coordinates(lon: f64, lat: f64) -> String {
    format!(
        "{:.2}° {}, {:.2}° {}",
        lat.abs(),
        if lat >= 0.0 { "N" } else { "S" },
        lon.abs(),
        if lon >= 0.0 { "E" } else { "W" }
    )
}
