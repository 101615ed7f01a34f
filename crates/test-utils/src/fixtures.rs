//! Common fixtures for EPAK and grid tests.

/// Axis definitions as `(start, delta, size)` in degrees.
pub mod axes {
    /// 1° longitude axis covering the whole globe from 0°E.
    pub const LON_GLOBAL_1DEG: (f64, f64, usize) = (0.0, 1.0, 360);

    /// 1° latitude axis from the south pole to the north pole.
    pub const LAT_GLOBAL_1DEG: (f64, f64, usize) = (-90.0, 1.0, 181);

    /// GFS 0.25° longitude axis.
    pub const LON_GFS_0P25: (f64, f64, usize) = (0.0, 0.25, 1440);

    /// GFS 0.25° latitude axis, north to south.
    pub const LAT_GFS_0P25: (f64, f64, usize) = (90.0, -0.25, 721);

    /// A regional 10x10 axis pair that does not wrap.
    pub const LON_REGIONAL: (f64, f64, usize) = (-10.0, 2.0, 10);
    pub const LAT_REGIONAL: (f64, f64, usize) = (-10.0, 2.0, 10);
}

/// Hand-assembled EPAK buffers.
///
/// These build bytes directly rather than through the encoder, so decoder
/// tests do not depend on the writer being correct.
pub mod epak {
    /// `tag | int32 BE length | payload`.
    pub fn chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = tag.to_vec();
        out.extend_from_slice(&(payload.len() as i32).to_be_bytes());
        out.extend_from_slice(payload);
        out
    }

    /// Block payload: the 16-byte header followed by raw varpack bytes.
    pub fn ppak_payload(cols: i32, rows: i32, grids: i32, scale_factor: f32, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(16 + data.len());
        out.extend_from_slice(&cols.to_be_bytes());
        out.extend_from_slice(&rows.to_be_bytes());
        out.extend_from_slice(&grids.to_be_bytes());
        out.extend_from_slice(&scale_factor.to_be_bytes());
        out.extend_from_slice(data);
        out
    }

    /// A full container: header JSON, the given chunks, then the tail.
    pub fn container(header_json: &str, chunks: &[Vec<u8>]) -> Vec<u8> {
        let mut out = chunk(b"head", header_json.as_bytes());
        for c in chunks {
            out.extend_from_slice(c);
        }
        out.extend_from_slice(b"tail");
        out
    }

    /// One 2x2x1 `ppk2` block whose raw deltas are all 1 (decodes to 1, 2, 2, 4).
    pub fn single_block_2x2() -> Vec<u8> {
        container(
            r#"{"name":"fixture","units":"K"}"#,
            &[chunk(b"ppk2", &ppak_payload(2, 2, 1, 0.0, &[1, 1, 1, 1]))],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_layout() {
        assert_eq!(epak::chunk(b"ppk2", &[9]), b"ppk2\x00\x00\x00\x01\x09".to_vec());
    }

    #[test]
    fn test_single_block_fixture_shape() {
        let bytes = epak::single_block_2x2();
        assert_eq!(&bytes[..4], b"head");
        assert_eq!(&bytes[bytes.len() - 4..], b"tail");
    }

    #[test]
    fn test_axis_fixtures() {
        let (_, delta, size) = axes::LON_GLOBAL_1DEG;
        assert!(delta * size as f64 >= 360.0);
        let (_, delta, size) = axes::LON_REGIONAL;
        assert!(delta * (size as f64) < 360.0);
    }
}
