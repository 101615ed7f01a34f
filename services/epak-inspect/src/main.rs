//! EPAK inspection tool.
//!
//! Prints the header or block summaries of an EPAK file, samples a
//! coordinate through an interpolator, or unpacks a packed delta RLE array.
//! All output is JSON on stdout; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use epak_inspect::{
    block_reports, header_report, parse_axis, sample_point, unpack_rle, InspectConfig,
    SampleRequest,
};
use grid_sampler::InterpolationMethod;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "epak-inspect")]
#[command(about = "Inspect and sample EPAK weather files")]
struct Args {
    /// Log level
    #[arg(long, default_value = "warn", env = "EPAK_LOG_LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the JSON header without decoding blocks
    Header { file: PathBuf },

    /// Print dimensions, scale factor and value statistics for every block
    Blocks { file: PathBuf },

    /// Interpolate one coordinate
    Sample {
        file: PathBuf,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude axis as "start,delta"
        #[arg(long, default_value = "0,1", allow_hyphen_values = true)]
        lon_axis: String,

        /// Latitude axis as "start,delta"
        #[arg(long, default_value = "-90,1", allow_hyphen_values = true)]
        lat_axis: String,

        /// Block index
        #[arg(long, default_value_t = 0)]
        block: usize,

        /// Plane index (the u component for vectors)
        #[arg(long, default_value_t = 0)]
        plane: usize,

        /// Plane holding the v component; samples a vector when given
        #[arg(long)]
        v_plane: Option<usize>,

        /// Interpolation method (nearest, bilinear)
        #[arg(long)]
        method: Option<String>,
    },

    /// Decode a packed delta RLE JSON array
    Unpack {
        file: PathBuf,

        #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
        scale_factor: f64,

        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        add_offset: f64,

        /// Number of output values
        #[arg(long)]
        length: usize,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = InspectConfig::from_env()?;

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);
    if config.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    match args.command {
        Command::Header { file } => {
            let bytes = read(&file)?;
            print_json(&header_report(&bytes)?)
        }
        Command::Blocks { file } => {
            let bytes = read(&file)?;
            print_json(&block_reports(&bytes, config.hash_samples)?)
        }
        Command::Sample {
            file,
            lon,
            lat,
            lon_axis,
            lat_axis,
            block,
            plane,
            v_plane,
            method,
        } => {
            let request = SampleRequest {
                lon,
                lat,
                lon_axis: parse_axis(&lon_axis)?,
                lat_axis: parse_axis(&lat_axis)?,
                block,
                plane,
                v_plane,
                method: method
                    .as_deref()
                    .map(InterpolationMethod::from_str)
                    .unwrap_or(config.sampler.interpolation),
            };
            let bytes = read(&file)?;
            print_json(&sample_point(&bytes, &request)?)
        }
        Command::Unpack {
            file,
            scale_factor,
            add_offset,
            length,
        } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let values = unpack_rle(&json, scale_factor, add_offset, length, config.run_length_policy)?;
            print_json(&values)
        }
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    info!(file = %path.display(), bytes = bytes.len(), "Read file");
    Ok(bytes)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
