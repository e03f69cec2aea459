//! Memory workloads.
//!
//! Both bodies allocate a fresh buffer per invocation, so concurrent workers
//! compete for memory bandwidth rather than sharing cache lines.

use std::hint::black_box;

use hyperpi_core::{Category, RateUnit, Workload, WorkloadError, WorkloadInput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
const RANDOM_BYTES: usize = 100 * 1024 * 1024;
const SEQUENTIAL_BYTES: usize = 50 * 1024 * 1024;

// One random read per this many bytes.
const RANDOM_READ_STRIDE: usize = 100;

/// Fill, sum, then randomly read a 100 MiB buffer.
pub fn random_access() -> Workload {
    Workload::new("memory-random", Category::Memory, RANDOM_BYTES, random_body)
        .with_description("write and read 100 MiB, then 1% random reads")
        .with_work(RANDOM_BYTES as f64 / GIB)
        .with_unit(RateUnit::Gibibytes)
        .with_score_scale(10.0)
}

/// Fill and sum a 50 MiB buffer.
pub fn sequential_access() -> Workload {
    Workload::new(
        "memory-sequential",
        Category::Memory,
        SEQUENTIAL_BYTES,
        sequential_body,
    )
    .with_description("write and read 50 MiB sequentially")
    .with_work(SEQUENTIAL_BYTES as f64 / GIB)
    .with_unit(RateUnit::Gibibytes)
    .with_score_scale(10.0)
}

fn fill_and_sum(size: usize) -> (Vec<u8>, u64) {
    let mut buffer = vec![0u8; size];
    for (i, byte) in buffer.iter_mut().enumerate() {
        *byte = (i & 0xFF) as u8;
    }
    let sum = buffer
        .iter()
        .fold(0u64, |acc, &b| acc.wrapping_add(b as u64));
    (buffer, sum)
}

fn random_body(input: &WorkloadInput) -> Result<u64, WorkloadError> {
    let (buffer, mut sum) = fill_and_sum(input.size);
    if buffer.is_empty() {
        return Ok(sum);
    }
    let mut rng = ChaCha8Rng::seed_from_u64(input.seed);
    for _ in 0..buffer.len() / RANDOM_READ_STRIDE {
        let idx = rng.random_range(0..buffer.len());
        sum = sum.wrapping_add(buffer[idx] as u64);
    }
    Ok(black_box(sum))
}

fn sequential_body(input: &WorkloadInput) -> Result<u64, WorkloadError> {
    let (_, sum) = fill_and_sum(input.size);
    Ok(black_box(sum))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_sum() {
        // two full 0..=255 cycles
        let sum = sequential_body(&WorkloadInput::for_worker(512, 1, 0)).unwrap();
        assert_eq!(sum, 2 * (0..256u64).sum::<u64>());
    }

    #[test]
    fn test_random_reproducible_per_seed() {
        let input = WorkloadInput::for_worker(10_000, 3, 1);
        assert_eq!(random_body(&input).unwrap(), random_body(&input).unwrap());
    }

    #[test]
    fn test_random_empty_buffer() {
        assert_eq!(random_body(&WorkloadInput::for_worker(0, 3, 1)).unwrap(), 0);
    }

    #[test]
    fn test_work_in_gibibytes() {
        let w = sequential_access();
        assert!((w.work() - 50.0 / 1024.0).abs() < 1e-12);
        assert_eq!(w.unit(), RateUnit::Gibibytes);
    }
}
