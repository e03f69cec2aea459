//! Compute-intensive workloads.

use std::hint::black_box;

use hyperpi_core::{compute_pi, Category, RateUnit, ScoreModel, Workload, WorkloadError, WorkloadInput};

const PI_DIGITS: usize = 10_000;
const BIT_OPERATIONS: usize = 50_000_000;
const INTEGER_OPERATIONS: usize = 100_000_000;
const PI_PREFIX: &str = "14159265358979";

/// Generates 10,000 digits of pi and checks the leading digits.
pub fn pi_digits() -> Workload {
    Workload::new("pi-digits", Category::ComputeIntensive, PI_DIGITS, pi_body)
        .with_description("Machin spigot over base-10000 limbs")
        .with_work(1.0)
        .with_unit(RateUnit::Invocations)
        .with_score_model(ScoreModel::Latency)
}

/// Counts, reverses and rotates bits of 50M integers.
pub fn bit_operations() -> Workload {
    Workload::new("bit-operations", Category::ComputeIntensive, BIT_OPERATIONS, bit_body)
        .with_description("leading/trailing zeros, popcount, byte swap and rotate")
        .with_score_scale(1e-3)
}

/// Mixed 64-bit integer arithmetic over 100M iterations.
pub fn integer_arithmetic() -> Workload {
    Workload::new(
        "integer-arithmetic",
        Category::ComputeIntensive,
        INTEGER_OPERATIONS,
        integer_body,
    )
    .with_description("add, multiply, divide, modulo, xor and shifts on i64")
    .with_score_scale(1e-3)
}

fn pi_body(input: &WorkloadInput) -> Result<u64, WorkloadError> {
    let pi = compute_pi(input.size).map_err(|e| WorkloadError::Corrupted(e.to_string()))?;
    let fraction = pi.fraction();
    let expected = &PI_PREFIX[..PI_PREFIX.len().min(input.size)];
    if !fraction.starts_with(expected) {
        return Err(WorkloadError::Corrupted(format!(
            "pi digits start with {}",
            &fraction[..expected.len()]
        )));
    }
    Ok(pi.checksum())
}

fn bit_body(input: &WorkloadInput) -> Result<u64, WorkloadError> {
    let mut acc = 0u64;
    for i in 0..input.size {
        let n = black_box(i as u32);
        acc = acc
            .wrapping_add(n.leading_zeros() as u64)
            .wrapping_add(n.trailing_zeros() as u64)
            .wrapping_add(n.count_ones() as u64)
            .wrapping_add(n.swap_bytes() as u64)
            .wrapping_add(n.rotate_left(5) as u64);
        acc ^= (n & n.wrapping_sub(1)) as u64;
        acc ^= (n | n.wrapping_add(1)) as u64;
        acc ^= (n ^ n.wrapping_add(1)) as u64;
    }
    Ok(acc)
}

fn integer_body(input: &WorkloadInput) -> Result<u64, WorkloadError> {
    let mut acc = 0i64;
    for i in 0..input.size as i64 {
        let a = black_box(i);
        let b = a + 1;
        let c = a + 2;
        acc = acc
            .wrapping_add(a.wrapping_add(b.wrapping_mul(c)))
            .wrapping_add((a + b) / (c + 1))
            .wrapping_add(a ^ b ^ c)
            .wrapping_add((a + b) & (c | a))
            .wrapping_add(a.wrapping_mul(b).wrapping_add(c.wrapping_mul(a)))
            .wrapping_add((a << 3) >> 2)
            .wrapping_add(a % (b + 1));
    }
    Ok(acc as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(size: usize) -> WorkloadInput {
        WorkloadInput::for_worker(size, 42, 0)
    }

    #[test]
    fn test_pi_body_checks_digits() {
        assert!(pi_body(&input(100)).is_ok());
        assert!(pi_body(&input(3)).is_ok());
    }

    #[test]
    fn test_pi_body_zero_digits_fails() {
        assert!(matches!(pi_body(&input(0)), Err(WorkloadError::Corrupted(_))));
    }

    #[test]
    fn test_bit_body_deterministic() {
        assert_eq!(bit_body(&input(1000)).unwrap(), bit_body(&input(1000)).unwrap());
    }

    #[test]
    fn test_integer_body_runs() {
        assert!(integer_body(&input(1000)).is_ok());
    }

    #[test]
    fn test_descriptors() {
        let pi = pi_digits();
        assert_eq!(pi.work(), 1.0);
        assert_eq!(pi.score_model(), ScoreModel::Latency);
        assert_eq!(integer_arithmetic().work(), INTEGER_OPERATIONS as f64);
    }
}
