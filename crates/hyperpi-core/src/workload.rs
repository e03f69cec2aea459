//! Workload descriptors.
//!
//! A [`Workload`] is an immutable descriptor around a body that performs one
//! unit of CPU work. Bodies return a checksum so the timing layer can pass it
//! through `std::hint::black_box`; returning an error marks the measurement
//! as failed.

use std::fmt::{self, Debug};
use std::sync::Arc;
use std::time::Duration;

use crate::category::Category;
use crate::error::WorkloadError;

/// Signature of a workload body.
pub type WorkloadFn = dyn Fn(&WorkloadInput) -> Result<u64, WorkloadError> + Send + Sync;

const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Per-invocation input handed to a workload body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadInput {
    /// The workload's size parameter.
    pub size: usize,
    /// Seed for any PRNG the body uses. Unique per worker.
    pub seed: u64,
    /// Index of the worker running this invocation.
    pub worker: usize,
}

impl WorkloadInput {
    /// Builds the input for `worker`, deriving its seed from `base_seed`.
    ///
    /// ```
    /// use hyperpi_core::WorkloadInput;
    ///
    /// let a = WorkloadInput::for_worker(1000, 42, 0);
    /// let b = WorkloadInput::for_worker(1000, 42, 1);
    /// assert_ne!(a.seed, b.seed);
    /// assert_eq!(a, WorkloadInput::for_worker(1000, 42, 0));
    /// ```
    pub fn for_worker(size: usize, base_seed: u64, worker: usize) -> Self {
        let seed = base_seed ^ (worker as u64).wrapping_add(1).wrapping_mul(SEED_MIX);
        Self { size, seed, worker }
    }
}

/// Unit of a workload's throughput rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RateUnit {
    Operations,
    Gibibytes,
    Messages,
    Matrices,
    Elements,
    Invocations,
}

impl RateUnit {
    /// Suffix used when printing a rate.
    pub fn suffix(self) -> &'static str {
        match self {
            RateUnit::Operations => "ops/s",
            RateUnit::Gibibytes => "GiB/s",
            RateUnit::Messages => "msg/s",
            RateUnit::Matrices => "mat/s",
            RateUnit::Elements => "elem/s",
            RateUnit::Invocations => "runs/s",
        }
    }
}

/// How a round's raw score is derived from its measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScoreModel {
    /// `score = multi_rate * scale`. A zero multi-worker duration scores
    /// `+inf`.
    Throughput { scale: f64 },
    /// Blend of single (80%) and multi (20%) durations, each scored as
    /// `4e7 / milliseconds`. A zero duration scores `+inf`.
    Latency,
}

impl ScoreModel {
    const LATENCY_NUMERATOR: f64 = 4e7;

    /// Computes the raw score of one round.
    ///
    /// ```
    /// use hyperpi_core::workload::ScoreModel;
    /// use std::time::Duration;
    ///
    /// let model = ScoreModel::Throughput { scale: 0.001 };
    /// let score = model.raw_score(Duration::from_secs(1), Duration::from_secs(1), 2_000_000.0);
    /// assert!((score - 2000.0).abs() < 1e-9);
    /// ```
    pub fn raw_score(self, single: Duration, multi: Duration, multi_rate: f64) -> f64 {
        match self {
            ScoreModel::Throughput { .. } if multi.is_zero() => f64::INFINITY,
            ScoreModel::Throughput { scale } => multi_rate * scale,
            ScoreModel::Latency => 0.8 * Self::time_score(single) + 0.2 * Self::time_score(multi),
        }
    }

    fn time_score(duration: Duration) -> f64 {
        let ms = duration.as_secs_f64() * 1000.0;
        if ms == 0.0 {
            f64::INFINITY
        } else {
            Self::LATENCY_NUMERATOR / ms
        }
    }
}

/// A registered unit of CPU work.
///
/// Identity is the pair `(name, category)`.
///
/// # Example
///
/// ```
/// use hyperpi_core::{Category, Workload, WorkloadInput};
///
/// let workload = Workload::new("sum", Category::ComputeIntensive, 1_000, |input: &WorkloadInput| {
///     Ok((0..input.size as u64).sum())
/// });
///
/// assert_eq!(workload.work(), 1_000.0);
/// let checksum = workload.run(&WorkloadInput::for_worker(workload.size(), 7, 0)).unwrap();
/// assert_eq!(checksum, 499_500);
/// ```
#[derive(Clone)]
pub struct Workload {
    name: String,
    description: String,
    category: Category,
    size: usize,
    work: Option<f64>,
    unit: RateUnit,
    score_model: ScoreModel,
    body: Arc<WorkloadFn>,
}

impl Debug for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workload")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("size", &self.size)
            .field("work", &self.work())
            .field("unit", &self.unit)
            .field("score_model", &self.score_model)
            .finish()
    }
}

impl Workload {
    /// Creates a workload measured in operations with a throughput scale of 1.
    pub fn new<F>(name: impl Into<String>, category: Category, size: usize, body: F) -> Self
    where
        F: Fn(&WorkloadInput) -> Result<u64, WorkloadError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: String::new(),
            category,
            size,
            work: None,
            unit: RateUnit::Operations,
            score_model: ScoreModel::Throughput { scale: 1.0 },
            body: Arc::new(body),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the amount of work one invocation performs, in [`Self::unit`].
    pub fn with_work(mut self, work: f64) -> Self {
        self.work = Some(work);
        self
    }

    pub fn with_unit(mut self, unit: RateUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_score_model(mut self, model: ScoreModel) -> Self {
        self.score_model = model;
        self
    }

    /// Shorthand for `with_score_model(ScoreModel::Throughput { scale })`.
    pub fn with_score_scale(self, scale: f64) -> Self {
        self.with_score_model(ScoreModel::Throughput { scale })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Work per invocation. Defaults to the size parameter.
    pub fn work(&self) -> f64 {
        self.work.unwrap_or(self.size as f64)
    }

    pub fn unit(&self) -> RateUnit {
        self.unit
    }

    pub fn score_model(&self) -> ScoreModel {
        self.score_model
    }

    /// Returns true if `other` has the same identity.
    pub fn same_identity(&self, other: &Workload) -> bool {
        self.name == other.name && self.category == other.category
    }

    /// Runs the body once.
    pub fn run(&self, input: &WorkloadInput) -> Result<u64, WorkloadError> {
        (self.body)(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &WorkloadInput) -> Result<u64, WorkloadError> {
        Ok(0)
    }

    #[test]
    fn test_work_defaults_to_size() {
        let w = Workload::new("noop", Category::Memory, 64, noop);
        assert_eq!(w.work(), 64.0);
        assert_eq!(w.with_work(0.5).work(), 0.5);
    }

    #[test]
    fn test_identity() {
        let a = Workload::new("x", Category::Memory, 1, noop);
        let b = Workload::new("x", Category::Memory, 2, noop);
        let c = Workload::new("x", Category::Algorithmic, 1, noop);
        assert!(a.same_identity(&b));
        assert!(!a.same_identity(&c));
    }

    #[test]
    fn test_worker_seeds_differ() {
        let seeds: Vec<u64> = (0..16)
            .map(|w| WorkloadInput::for_worker(1, 42, w).seed)
            .collect();
        for (i, a) in seeds.iter().enumerate() {
            for b in &seeds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_latency_score_zero_duration_is_infinite() {
        let score = ScoreModel::Latency.raw_score(Duration::ZERO, Duration::ZERO, 0.0);
        assert!(score.is_infinite());
    }

    #[test]
    fn test_throughput_score_zero_duration_is_infinite() {
        // The reported rate is clamped to 0, the score is not.
        let multi_rate = crate::rate(4000.0, Duration::ZERO);
        assert_eq!(multi_rate, 0.0);
        let score = ScoreModel::Throughput { scale: 1.0 }.raw_score(
            Duration::ZERO,
            Duration::ZERO,
            multi_rate,
        );
        assert!(score.is_infinite() && score > 0.0);
    }

    #[test]
    fn test_latency_score_blend() {
        // 4e7 / 1000ms = 40_000 for both phases
        let score = ScoreModel::Latency.raw_score(
            Duration::from_secs(1),
            Duration::from_secs(1),
            0.0,
        );
        assert!((score - 40_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_body_error_propagates() {
        let w = Workload::new("bad", Category::Compression, 1, |_: &WorkloadInput| {
            Err(WorkloadError::Corrupted("length mismatch".into()))
        });
        let err = w.run(&WorkloadInput::for_worker(1, 0, 0)).unwrap_err();
        assert!(err.to_string().contains("length mismatch"));
    }
}
