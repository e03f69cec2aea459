//! Compression workloads.

use std::io::{Read, Write};

use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use hyperpi_core::{Category, Workload, WorkloadError, WorkloadInput};

const ROUND_TRIPS: usize = 100;
const PHRASE: &str = "The quick brown fox jumps over the lazy dog. ";
const PHRASE_REPEATS: usize = 1000;

/// Gzip and zlib compress/decompress round trips over ~45 KB of text.
pub fn deflate_round_trip() -> Workload {
    Workload::new(
        "deflate-round-trip",
        Category::Compression,
        ROUND_TRIPS,
        deflate_body,
    )
    .with_description("gzip and zlib compress + decompress, length checked")
    .with_score_scale(0.1)
}

fn gzip_round_trip(data: &[u8], out: &mut Vec<u8>) -> Result<usize, WorkloadError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    let compressed = encoder.finish()?;
    out.clear();
    GzDecoder::new(compressed.as_slice()).read_to_end(out)?;
    Ok(compressed.len())
}

fn zlib_round_trip(data: &[u8], out: &mut Vec<u8>) -> Result<usize, WorkloadError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    let compressed = encoder.finish()?;
    out.clear();
    ZlibDecoder::new(compressed.as_slice()).read_to_end(out)?;
    Ok(compressed.len())
}

fn check_length(kind: &str, data: &[u8], out: &[u8]) -> Result<(), WorkloadError> {
    if out.len() != data.len() {
        return Err(WorkloadError::Corrupted(format!(
            "{} decompressed {} bytes, expected {}",
            kind,
            out.len(),
            data.len()
        )));
    }
    Ok(())
}

fn deflate_body(input: &WorkloadInput) -> Result<u64, WorkloadError> {
    let data = PHRASE.repeat(PHRASE_REPEATS).into_bytes();
    let mut out = Vec::with_capacity(data.len());
    let half = input.size / 2;
    let mut compressed_total = 0u64;

    for _ in 0..half {
        compressed_total += gzip_round_trip(&data, &mut out)? as u64;
        check_length("gzip", &data, &out)?;
    }
    for _ in 0..half {
        compressed_total += zlib_round_trip(&data, &mut out)? as u64;
        check_length("zlib", &data, &out)?;
    }

    Ok(compressed_total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_restore_input() {
        let data = PHRASE.repeat(10).into_bytes();
        let mut out = Vec::new();
        let gz = gzip_round_trip(&data, &mut out).unwrap();
        assert_eq!(out, data);
        let z = zlib_round_trip(&data, &mut out).unwrap();
        assert_eq!(out, data);
        assert!(gz < data.len() && z < data.len());
    }

    #[test]
    fn test_length_mismatch_is_corruption() {
        let err = check_length("gzip", b"abc", b"ab").unwrap_err();
        assert!(matches!(err, WorkloadError::Corrupted(_)));
    }

    #[test]
    fn test_body_runs() {
        assert!(deflate_body(&WorkloadInput::for_worker(2, 0, 0)).unwrap() > 0);
    }
}
