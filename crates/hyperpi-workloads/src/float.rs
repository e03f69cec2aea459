//! Floating-point workloads.

use std::f64::consts::PI;
use std::hint::black_box;

use hyperpi_core::{Category, RateUnit, Workload, WorkloadError, WorkloadInput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const FLOAT_MIX_OPS: usize = 5_000_000;
const TRIG_OPS: usize = 2_000_000;
const MATRIX_DIM: usize = 200;

/// Arithmetic, powers, roots, logs and 2x2 matrix products on random inputs.
pub fn float_mix() -> Workload {
    Workload::new("float-mix", Category::FloatingPoint, FLOAT_MIX_OPS, float_mix_body)
        .with_description("basic arithmetic, pow/sqrt/cbrt/log, trig and 2x2 products")
        .with_score_scale(1e-3)
}

/// Sine, cosine, tangent and their inverses.
pub fn trigonometry() -> Workload {
    Workload::new("trigonometry", Category::FloatingPoint, TRIG_OPS, trig_body)
        .with_description("sin/cos/tan and asin/acos/atan round trips")
        .with_score_scale(1e-3)
}

/// Naive 200x200 dense matrix multiplication.
pub fn matrix_multiply() -> Workload {
    Workload::new("matrix-multiply", Category::FloatingPoint, MATRIX_DIM, matrix_body)
        .with_description("200x200 f64 matrix product, triple loop")
        .with_work(1.0)
        .with_unit(RateUnit::Matrices)
        .with_score_scale(1000.0)
}

fn float_mix_body(input: &WorkloadInput) -> Result<u64, WorkloadError> {
    let mut rng = ChaCha8Rng::seed_from_u64(input.seed);
    let ops = input.size;
    let mut result = 0.0f64;

    for _ in 0..ops / 8 {
        let a: f64 = rng.random();
        let b: f64 = rng.random();
        result += a + b;
        result += a - b;
        result += a * b;
        if b != 0.0 {
            result += a / b;
        }
    }
    for _ in 0..ops / 8 {
        let x = rng.random::<f64>() * 10.0 + 1.0;
        let y = rng.random::<f64>() * 5.0 + 0.5;
        result += x.powf(y) + x.sqrt() + x.cbrt() + x.log10();
    }
    for _ in 0..ops / 5 {
        let x = rng.random::<f64>() * 100.0;
        result += x.sin() + x.cos() + x.abs().sqrt() + (x.abs() + 1.0).ln();
        result += (-x.abs() / 10.0).exp();
    }
    for _ in 0..ops / 5 {
        let x = rng.random::<f64>() * 10.0;
        let y = rng.random::<f64>() * 10.0;
        result += x.powf(y) + x.atan2(y) + x.hypot(y);
    }
    for _ in 0..ops / 10 {
        let a: [f64; 4] = rng.random();
        let b: [f64; 4] = rng.random();
        let c11 = a[0] * b[0] + a[1] * b[2];
        let c12 = a[0] * b[1] + a[1] * b[3];
        let c21 = a[2] * b[0] + a[3] * b[2];
        let c22 = a[2] * b[1] + a[3] * b[3];
        result += c11 + c12 + c21 + c22;
    }
    for _ in 0..ops / 10 {
        let angle = rng.random::<f64>() * 2.0 * PI;
        result += angle.tan() + rng.random::<f64>().asin() + rng.random::<f64>().acos();
    }

    Ok(black_box(result).to_bits())
}

fn trig_body(input: &WorkloadInput) -> Result<u64, WorkloadError> {
    let mut result = 0.0f64;
    for i in 0..input.size {
        let x = black_box(i as f64 * 0.001);
        result += x.sin() + x.cos() + x.tan();
        result += x.sin().asin() + x.cos().acos() + x.tan().atan();
    }
    Ok(black_box(result).to_bits())
}

fn matrix_body(input: &WorkloadInput) -> Result<u64, WorkloadError> {
    let n = input.size;
    let mut a = vec![0.0f64; n * n];
    let mut b = vec![0.0f64; n * n];
    let mut c = vec![0.0f64; n * n];
    for i in 0..n {
        for j in 0..n {
            a[i * n + j] = (i * j) as f64 + 0.1;
            b[i * n + j] = (i + j) as f64 + 0.2;
        }
    }
    for i in 0..n {
        for j in 0..n {
            let mut sum = 0.0;
            for k in 0..n {
                sum += a[i * n + k] * b[k * n + j];
            }
            c[i * n + j] = sum;
        }
    }
    let trace: f64 = (0..n).map(|i| c[i * n + i]).sum();
    Ok(black_box(trace).to_bits())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_mix_reproducible() {
        let input = WorkloadInput::for_worker(400, 9, 2);
        assert_eq!(float_mix_body(&input).unwrap(), float_mix_body(&input).unwrap());
    }

    #[test]
    fn test_trig_runs() {
        assert!(trig_body(&WorkloadInput::for_worker(100, 0, 0)).is_ok());
    }

    #[test]
    fn test_matrix_small_trace() {
        // a = [[0.1, 0.1], [0.1, 1.1]], b = [[0.2, 1.2], [1.2, 2.2]]
        // c00 = 0.02 + 0.12, c11 = 0.12 + 2.42
        let bits = matrix_body(&WorkloadInput::for_worker(2, 0, 0)).unwrap();
        let trace = f64::from_bits(bits);
        assert!((trace - 2.68).abs() < 1e-9);
    }

    #[test]
    fn test_matrix_work_is_one_matrix() {
        let w = matrix_multiply();
        assert_eq!(w.size(), MATRIX_DIM);
        assert_eq!(w.work(), 1.0);
    }
}
