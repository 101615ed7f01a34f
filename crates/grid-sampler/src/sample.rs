//! Batch sampling.

use crate::config::SamplerConfig;
use crate::grid::RegularGrid;
use crate::interpolation::Interpolator;
use rayon::prelude::*;
use tracing::debug;

/// Evaluate `interp` at every coordinate, in input order.
///
/// Batches of at least `config.parallel_threshold` coordinates are spread over
/// the rayon thread pool.
pub fn sample_all<I>(interp: &I, coords: &[[f64; 2]], config: &SamplerConfig) -> Vec<I::Output>
where
    I: Interpolator + Sync,
    I::Output: Send,
{
    if coords.len() >= config.parallel_threshold {
        debug!(
            points = coords.len(),
            threshold = config.parallel_threshold,
            "Sampling in parallel"
        );
        coords.par_iter().map(|&c| interp.interpolate(c)).collect()
    } else {
        coords.iter().map(|&c| interp.interpolate(c)).collect()
    }
}

/// Resample onto every point of `target`, in its row-major order.
pub fn sample_grid<I>(interp: &I, target: &RegularGrid, config: &SamplerConfig) -> Vec<I::Output>
where
    I: Interpolator + Sync,
    I::Output: Send,
{
    let coords: Vec<[f64; 2]> = target.points().map(|(lon, lat, _)| [lon, lat]).collect();
    sample_all(interp, &coords, config)
}
