//! Inspection and point sampling of EPAK files.
//!
//! The binary is a thin clap wrapper over these functions; each returns a
//! serializable report so output can be printed as JSON or checked in tests.

pub mod config;
pub mod inspect;

pub use config::InspectConfig;
pub use inspect::{
    block_reports, header_report, parse_axis, sample_point, unpack_rle, BlockReport, SampleReport,
    SampleRequest,
};
