//! Measurement and per-workload result types.

use std::time::Duration;

use crate::category::Category;
use crate::workload::{RateUnit, Workload};

/// One timed execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Measurement {
    pub wall: Duration,
}

impl Measurement {
    pub fn new(wall: Duration) -> Self {
        Self { wall }
    }

    pub fn seconds(&self) -> f64 {
        self.wall.as_secs_f64()
    }
}

/// Returns `work / duration` in units per second.
///
/// A zero duration yields `0.0` rather than infinity.
///
/// ```
/// use hyperpi_core::rate;
/// use std::time::Duration;
///
/// assert_eq!(rate(100.0, Duration::from_secs(2)), 50.0);
/// assert_eq!(rate(100.0, Duration::ZERO), 0.0);
/// ```
pub fn rate(work: f64, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 0.0;
    }
    finite_or_zero(work / duration.as_secs_f64())
}

/// Returns `multi_rate / single_rate / workers`.
///
/// Clamped to `0.0` when `single_rate` or `workers` is zero; never NaN or
/// infinite. Values above 1 are possible under measurement noise.
pub fn compute_efficiency(multi_rate: f64, single_rate: f64, workers: usize) -> f64 {
    if single_rate <= 0.0 || workers == 0 {
        return 0.0;
    }
    finite_or_zero(multi_rate / single_rate / workers as f64)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Aggregated result for one workload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BenchmarkResult {
    /// Workload name.
    pub name: String,
    /// Workload category.
    pub category: Category,
    /// Raw (un-normalized) score averaged over kept rounds.
    pub score: f64,
    /// Mean round duration over kept rounds.
    pub duration: Duration,
    /// Single-worker rate in `unit`.
    pub single_rate: f64,
    /// Multi-worker rate in `unit`.
    pub multi_rate: f64,
    /// `multi_rate / single_rate / workers`.
    pub efficiency: f64,
    /// Worker count `P`.
    pub workers: usize,
    /// Repetition multiplier `T`.
    pub repetitions: usize,
    /// Rounds executed.
    pub rounds: usize,
    /// Rounds surviving the outlier filter.
    pub rounds_kept: usize,
    /// Rate unit.
    pub unit: RateUnit,
    /// Error message if the workload failed.
    pub failure: Option<String>,
}

impl BenchmarkResult {
    /// Creates a failed result for `workload`.
    pub fn failed(
        workload: &Workload,
        workers: usize,
        repetitions: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: workload.name().to_string(),
            category: workload.category(),
            score: 0.0,
            duration: Duration::ZERO,
            single_rate: 0.0,
            multi_rate: 0.0,
            efficiency: 0.0,
            workers,
            repetitions,
            rounds: 0,
            rounds_kept: 0,
            unit: workload.unit(),
            failure: Some(message.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Multi-worker to single-worker rate ratio, `0.0` when the single rate is zero.
    pub fn ratio(&self) -> f64 {
        if self.single_rate <= 0.0 {
            0.0
        } else {
            finite_or_zero(self.multi_rate / self.single_rate)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WorkloadError;
    use crate::workload::WorkloadInput;

    #[test]
    fn test_efficiency_zero_single_rate() {
        assert_eq!(compute_efficiency(1000.0, 0.0, 4), 0.0);
        assert_eq!(compute_efficiency(0.0, 0.0, 4), 0.0);
    }

    #[test]
    fn test_efficiency_zero_workers() {
        assert_eq!(compute_efficiency(1000.0, 10.0, 0), 0.0);
    }

    #[test]
    fn test_efficiency_may_exceed_one() {
        let e = compute_efficiency(900.0, 100.0, 8);
        assert!((e - 1.125).abs() < 1e-12);
    }

    #[test]
    fn test_efficiency_never_non_finite() {
        let e = compute_efficiency(f64::INFINITY, f64::MIN_POSITIVE, 1);
        assert_eq!(e, 0.0);
        let e = compute_efficiency(f64::NAN, 1.0, 1);
        assert_eq!(e, 0.0);
    }

    #[test]
    fn test_rate_zero_duration() {
        assert_eq!(rate(1e9, Duration::ZERO), 0.0);
    }

    #[test]
    fn test_failed_result() {
        let w = Workload::new("w", Category::Memory, 1, |_: &WorkloadInput| {
            Ok::<u64, WorkloadError>(0)
        });
        let r = BenchmarkResult::failed(&w, 4, 1, "boom");
        assert!(r.is_failed());
        assert_eq!(r.category, Category::Memory);
        assert_eq!(r.ratio(), 0.0);
        assert_eq!(r.failure.as_deref(), Some("boom"));
    }

    #[test]
    fn test_measurement_seconds() {
        let m = Measurement::new(Duration::from_millis(1500));
        assert!((m.seconds() - 1.5).abs() < 1e-12);
    }
}
