//! Tests for the inspector reports and the binary.

use epak_inspect::{block_reports, header_report, sample_point, SampleRequest};
use epak_parser::{BlockType, EpakWriter};
use grid_sampler::InterpolationMethod;
use serde_json::{json, Value};
use std::process::Command;
use test_utils::fixtures::epak::single_block_2x2;
use test_utils::{create_constant_grid, create_grid_with_holes, stack_planes, write_temp_file};

fn global_file() -> Vec<u8> {
    let temperature = create_grid_with_holes(360, 181, &[(10, 100)]);
    let temperature: Vec<f32> = temperature
        .iter()
        .map(|&v| if v == 0.0 { 288.5 } else { v })
        .collect();
    let u = create_constant_grid(360, 181, 3.0);
    let v = create_constant_grid(360, 181, 4.0);

    let mut writer = EpakWriter::new(&json!({"name": "gfs", "time": "2024-06-01T00:00Z"})).unwrap();
    writer.push_block(&temperature, 360, 181, 1, 1.0).unwrap();
    writer.push_block(&stack_planes(&u, &v), 360, 181, 2, 0.0).unwrap();
    writer.finish().to_vec()
}

fn request() -> SampleRequest {
    SampleRequest {
        lon: -0.5,
        lat: 10.25,
        lon_axis: (0.0, 1.0),
        lat_axis: (-90.0, 1.0),
        block: 0,
        plane: 0,
        v_plane: None,
        method: InterpolationMethod::Bilinear,
    }
}

// ============================================================================
// Reports
// ============================================================================

#[test]
fn test_header_report() {
    let header = header_report(&global_file()).unwrap();
    assert_eq!(header["name"], "gfs");
}

#[test]
fn test_block_reports() {
    let reports = block_reports(&single_block_2x2(), 0).unwrap();
    assert_eq!(reports.len(), 1);
    let r = &reports[0];
    assert_eq!(r.metadata.block_type, BlockType::Ppk2);
    assert_eq!((r.metadata.cols, r.metadata.rows, r.metadata.grids), (2, 2, 1));
    assert_eq!(r.min, Some(1.0));
    assert_eq!(r.max, Some(4.0));
    assert_eq!(r.missing, 0);

    let json = serde_json::to_value(r).unwrap();
    assert_eq!(json["type"], "ppk2");
    assert_eq!(json["scaleFactor"], 0.0);
}

#[test]
fn test_block_reports_counts_missing() {
    let reports = block_reports(&global_file(), 1000).unwrap();
    assert_eq!(reports[0].missing, 1);
    assert_eq!(reports[0].max, Some(288.5));
    assert_eq!(reports[1].metadata.grids, 2);
}

#[test]
fn test_sample_scalar_across_seam() {
    let report = sample_point(&global_file(), &request()).unwrap();
    assert!(report.cylindrical);
    assert_eq!(report.value, Some(288.5));
    assert!(report.vector.is_none());
}

#[test]
fn test_sample_missing_point() {
    let req = SampleRequest {
        lon: 10.0,
        lat: 10.0,
        method: InterpolationMethod::Nearest,
        ..request()
    };
    let report = sample_point(&global_file(), &req).unwrap();
    assert_eq!(report.value, None);
}

#[test]
fn test_sample_vector() {
    let req = SampleRequest {
        block: 1,
        v_plane: Some(1),
        ..request()
    };
    let report = sample_point(&global_file(), &req).unwrap();
    let vector = report.vector.unwrap();
    assert_eq!(vector.magnitude, 5.0);
    assert!(report.bearing.unwrap() > 0.0 && report.bearing.unwrap() < 90.0);
}

#[test]
fn test_sample_bad_block_index() {
    let req = SampleRequest {
        block: 5,
        ..request()
    };
    assert!(sample_point(&global_file(), &req).is_err());
}

#[test]
fn test_sample_plane_out_of_range() {
    let req = SampleRequest {
        plane: 3,
        ..request()
    };
    assert!(sample_point(&global_file(), &req).is_err());
}

// ============================================================================
// Binary
// ============================================================================

fn run(args: &[&str]) -> Value {
    let output = Command::new(env!("CARGO_BIN_EXE_epak-inspect"))
        .args(args)
        .output()
        .expect("failed to run epak-inspect");
    assert!(
        output.status.success(),
        "epak-inspect failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn test_binary_header_and_sample() {
    let (_dir, path) = write_temp_file("gfs.epak", &global_file());
    let path = path.to_str().unwrap();

    let header = run(&["header", path]);
    assert_eq!(header["time"], "2024-06-01T00:00Z");

    let blocks = run(&["blocks", path]);
    assert_eq!(blocks.as_array().unwrap().len(), 2);

    let sample = run(&["sample", path, "--lon", "-0.5", "--lat", "10.25", "--method", "nearest"]);
    assert_eq!(sample["value"], 288.5);
    assert_eq!(sample["method"], "nearest");
}

#[test]
fn test_binary_unpack() {
    let (_dir, path) = write_temp_file("packed.json", b"[1, [2, 5], 3, [null, 2], 4]");
    let values = run(&["unpack", path.to_str().unwrap(), "--length", "10"]);
    assert_eq!(values, json!([1.0, 3.0, 5.0, 7.0, 9.0, 11.0, 14.0, null, null, 4.0]));
}

#[test]
fn test_binary_rejects_garbage() {
    let (_dir, path) = write_temp_file("bad.epak", b"not an epak file");
    let status = Command::new(env!("CARGO_BIN_EXE_epak-inspect"))
        .args(["blocks", path.to_str().unwrap()])
        .output()
        .unwrap()
        .status;
    assert!(!status.success());
}
