//! Algorithmic workloads.

use std::hint::black_box;

use hyperpi_core::{Category, RateUnit, Workload, WorkloadError, WorkloadInput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SORT_ELEMENTS: usize = 100_000;
const STRING_OPS: usize = 1000;
const BINARY_OPS: usize = 50_000_000;
const WORD: &str = "benchmark_string_processing_performance_test_data";
const WORDS_PER_OP: usize = 100;

/// Sorts random, sorted, reversed and half-random data.
pub fn sorting() -> Workload {
    Workload::new("sorting", Category::Algorithmic, SORT_ELEMENTS, sorting_body)
        .with_description("sort random, presorted, reversed and half-shuffled i64 data")
        .with_unit(RateUnit::Elements)
        .with_score_scale(1e-3)
}

/// Concatenation, search and replace on a 5 KB string.
pub fn string_processing() -> Workload {
    Workload::new("string-processing", Category::Algorithmic, STRING_OPS, string_body)
        .with_description("concatenate 100 words, search and replace")
        .with_score_scale(0.1)
}

/// Big/little endian encoding and bit masking.
pub fn binary_encoding() -> Workload {
    Workload::new("binary-encoding", Category::Algorithmic, BINARY_OPS, binary_body)
        .with_description("u64/u32 endian round trips and masks")
        .with_score_scale(0.1)
}

fn ensure_sorted(data: &[i64], stage: &str) -> Result<(), WorkloadError> {
    if data.windows(2).all(|w| w[0] <= w[1]) {
        Ok(())
    } else {
        Err(WorkloadError::Corrupted(format!("{} output not sorted", stage)))
    }
}

fn sorting_body(input: &WorkloadInput) -> Result<u64, WorkloadError> {
    let n = input.size;
    let bound = (n as i64).saturating_mul(10).max(1);
    let mut rng = ChaCha8Rng::seed_from_u64(input.seed);
    let mut data: Vec<i64> = (0..n).map(|_| rng.random_range(0..bound)).collect();

    data.sort_unstable();
    ensure_sorted(&data, "random")?;
    data.sort_unstable();
    data.reverse();
    data.sort_unstable();
    ensure_sorted(&data, "reversed")?;
    for value in data.iter_mut().skip(n / 2) {
        *value = rng.random_range(0..bound);
    }
    data.sort_unstable();
    ensure_sorted(&data, "half-shuffled")?;

    Ok(data.iter().fold(0u64, |acc, &v| acc.wrapping_add(v as u64)))
}

fn string_body(input: &WorkloadInput) -> Result<u64, WorkloadError> {
    let words = vec![WORD; WORDS_PER_OP];
    let mut acc = 0u64;
    for _ in 0..input.size {
        let mut joined = String::new();
        for word in &words {
            joined.push_str(black_box(word));
        }
        let found = joined.contains("performance");
        let index = joined.find("test").unwrap_or(0);
        let replaced = joined.replace("benchmark", "performance");
        acc = acc
            .wrapping_add(found as u64)
            .wrapping_add(index as u64)
            .wrapping_add(replaced.len() as u64);
    }
    Ok(acc)
}

fn binary_body(input: &WorkloadInput) -> Result<u64, WorkloadError> {
    let mut acc = 0u64;
    for i in 0..input.size as u64 {
        let num = black_box(i);
        let mut buf = num.to_be_bytes();
        acc = acc.wrapping_add(u64::from_be_bytes(buf));
        let low = (num as u32).to_le_bytes();
        buf[..4].copy_from_slice(&low);
        acc ^= u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as u64;
        acc = acc
            .wrapping_add((num & 0xFF00) >> 8)
            .wrapping_add((num << 16) & 0xFFFF_0000)
            .wrapping_add(!num);
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorting_body() {
        assert!(sorting_body(&WorkloadInput::for_worker(1000, 5, 0)).is_ok());
        assert!(sorting_body(&WorkloadInput::for_worker(0, 5, 0)).is_ok());
    }

    #[test]
    fn test_ensure_sorted_detects_disorder() {
        assert!(ensure_sorted(&[1, 2, 2, 3], "x").is_ok());
        assert!(ensure_sorted(&[2, 1], "x").is_err());
    }

    #[test]
    fn test_string_body() {
        let one = string_body(&WorkloadInput::for_worker(1, 0, 0)).unwrap();
        let two = string_body(&WorkloadInput::for_worker(2, 0, 0)).unwrap();
        assert_eq!(two, one * 2);
    }

    #[test]
    fn test_binary_body_runs() {
        assert!(binary_body(&WorkloadInput::for_worker(1000, 0, 0)).is_ok());
    }
}
