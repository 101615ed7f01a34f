//! Report builders behind the `epak-inspect` subcommands.

use anyhow::{bail, Context, Result};
use earth_common::{decimalize, format_coordinates, sentinel::to_option};
use epak_parser::{
    decode, decode_header, decode_packed_delta_rle, parse_elements, BlockMetadata, DecodeOptions,
    RunLengthPolicy,
};
use grid_sampler::{
    AxisSpec, GriddedField, InterpolationMethod, Interpolator, RegularGrid, VectorSample,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

/// Summary of one decoded block.
#[derive(Debug, Clone, Serialize)]
pub struct BlockReport {
    pub index: usize,
    #[serde(flatten)]
    pub metadata: BlockMetadata,
    pub min: Option<f32>,
    pub max: Option<f32>,
    pub missing: usize,
    pub hash: i32,
}

/// Where and how to sample a decoded block.
#[derive(Debug, Clone)]
pub struct SampleRequest {
    pub lon: f64,
    pub lat: f64,
    /// Longitude axis as `(start, delta)`; the size comes from the block.
    pub lon_axis: (f64, f64),
    /// Latitude axis as `(start, delta)`; the size comes from the block.
    pub lat_axis: (f64, f64),
    pub block: usize,
    pub plane: usize,
    /// Second plane holding the v component; samples a vector when set.
    pub v_plane: Option<usize>,
    pub method: InterpolationMethod,
}

/// Result of sampling one coordinate.
#[derive(Debug, Clone, Serialize)]
pub struct SampleReport {
    pub location: String,
    pub coord: [f64; 2],
    pub method: InterpolationMethod,
    pub cylindrical: bool,
    /// Scalar value, `None` where there is no data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector: Option<VectorSample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearing: Option<f64>,
}

/// Parse `"start,delta"` where each part may be a fraction such as `1/4`.
pub fn parse_axis(text: &str) -> Result<(f64, f64)> {
    let Some((start, delta)) = text.split_once(',') else {
        bail!("axis must be \"start,delta\", got {text:?}");
    };
    let start = decimalize(start).with_context(|| format!("invalid axis start in {text:?}"))?;
    let delta = decimalize(delta).with_context(|| format!("invalid axis delta in {text:?}"))?;
    Ok((start, delta))
}

/// The container header, without decoding any block.
pub fn header_report(bytes: &[u8]) -> Result<Value> {
    decode_header(bytes).context("failed to decode EPAK header")
}

/// Per-block summaries.
pub fn block_reports(bytes: &[u8], hash_samples: usize) -> Result<Vec<BlockReport>> {
    let epak = decode(bytes, &DecodeOptions::default()).context("failed to decode EPAK file")?;
    info!(blocks = epak.blocks.len(), "Decoded file");

    Ok(epak
        .blocks
        .iter()
        .enumerate()
        .map(|(index, block)| {
            let range = block.field.min_max();
            BlockReport {
                index,
                metadata: block.metadata,
                min: range.map(|r| r.0),
                max: range.map(|r| r.1),
                missing: block.field.count_missing(),
                hash: block.field.content_hash(hash_samples),
            }
        })
        .collect())
}

/// Sample one coordinate of one block.
pub fn sample_point(bytes: &[u8], request: &SampleRequest) -> Result<SampleReport> {
    let mut epak =
        decode(bytes, &DecodeOptions::default()).context("failed to decode EPAK file")?;
    if request.block >= epak.blocks.len() {
        bail!(
            "block {} out of range, file has {}",
            request.block,
            epak.blocks.len()
        );
    }
    let block = epak.blocks.swap_remove(request.block);

    let lon = AxisSpec::new(request.lon_axis.0, request.lon_axis.1, block.metadata.cols);
    let lat = AxisSpec::new(request.lat_axis.0, request.lat_axis.1, block.metadata.rows);
    let grid = RegularGrid::new(lon, lat).context("invalid grid axes")?;
    let field = GriddedField::new(grid, block)?;

    let coord = [request.lon, request.lat];
    debug!(?coord, method = %request.method, "Sampling");

    let mut report = SampleReport {
        location: format_coordinates(request.lon, request.lat),
        coord,
        method: request.method,
        cylindrical: field.grid().is_cylindrical(),
        value: None,
        vector: None,
        bearing: None,
    };

    match request.v_plane {
        Some(v_plane) => {
            let sample = field
                .vector(request.plane, v_plane, request.method)?
                .interpolate(coord);
            if sample.is_valid() {
                report.bearing = sample.bearing();
                report.vector = Some(sample);
            }
        }
        None => {
            let value = field.scalar(request.plane, request.method)?.interpolate(coord);
            report.value = to_option(value);
        }
    }

    Ok(report)
}

/// Decode a packed delta RLE JSON array; missing values become `None`.
pub fn unpack_rle(
    json: &str,
    scale_factor: f64,
    add_offset: f64,
    length: usize,
    policy: RunLengthPolicy,
) -> Result<Vec<Option<f32>>> {
    let value: Value = serde_json::from_str(json).context("input is not valid JSON")?;
    let elements = parse_elements(&value)?;
    let values = decode_packed_delta_rle(&elements, scale_factor, add_offset, length, policy)?;
    Ok(values.into_iter().map(to_option).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_axis() {
        assert_eq!(parse_axis("0,1").unwrap(), (0.0, 1.0));
        assert_eq!(parse_axis("90, -1/4").unwrap(), (90.0, -0.25));
        assert!(parse_axis("0").is_err());
        assert!(parse_axis("a,1").is_err());
    }

    #[test]
    fn test_unpack_rle() {
        let out = unpack_rle("[1, [2, 5], 3, [null, 2], 4]", 1.0, 0.0, 10, RunLengthPolicy::Clamp)
            .unwrap();
        assert_eq!(out[6], Some(14.0));
        assert_eq!(out[7], None);
        assert_eq!(out[9], Some(4.0));
    }
}
