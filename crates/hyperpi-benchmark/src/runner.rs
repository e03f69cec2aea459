//! Suite orchestrator.

use std::time::Instant;

use hyperpi_config::BenchConfig;
use hyperpi_core::{BenchmarkResult, Category, HyperPiError, Result, Workload};
use tracing::{debug, info, warn};

use crate::outliers::{summarize, trim_outliers};
use crate::rounds::RoundPolicy;
use crate::timing::TimingProtocol;

/// An ordered set of workloads plus the protocol and round policy used to
/// run them.
///
/// Workloads run sequentially in registration order; only the
/// multi-worker phase of each round is concurrent.
///
/// # Example
///
/// ```
/// use hyperpi_benchmark::{RoundPolicy, Suite, TimingProtocol};
/// use hyperpi_core::{Category, Workload, WorkloadInput};
/// use std::time::Duration;
///
/// let workload = Workload::new("sum", Category::ComputeIntensive, 100, |input: &WorkloadInput| {
///     Ok((0..input.size as u64).sum())
/// });
/// let suite = Suite::new(
///     TimingProtocol::new(2, 1),
///     RoundPolicy::new(Duration::from_millis(1), 4, 4),
/// )
/// .with_workload(workload)
/// .unwrap();
///
/// let results = suite.run();
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].rounds, 4);
/// assert_eq!(results[0].rounds_kept, 2);
/// ```
#[derive(Debug, Clone)]
pub struct Suite {
    workloads: Vec<Workload>,
    protocol: TimingProtocol,
    policy: RoundPolicy,
}

impl Suite {
    pub fn new(protocol: TimingProtocol, policy: RoundPolicy) -> Self {
        Self {
            workloads: Vec::new(),
            protocol,
            policy,
        }
    }

    /// Builds an empty suite from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HyperPiError::Config`] if the configuration fails
    /// validation.
    pub fn from_config(config: &BenchConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| HyperPiError::Config(e.to_string()))?;
        let policy =
            RoundPolicy::from_config(&config.rounds).map_err(|e| HyperPiError::Config(e.to_string()))?;
        Ok(Self::new(TimingProtocol::from_config(config), policy))
    }

    /// Appends a workload.
    ///
    /// # Errors
    ///
    /// Returns [`HyperPiError::DuplicateWorkload`] if a workload with the same
    /// name and category is already registered.
    pub fn register(&mut self, workload: Workload) -> Result<()> {
        if self.workloads.iter().any(|w| w.same_identity(&workload)) {
            return Err(HyperPiError::DuplicateWorkload {
                name: workload.name().to_string(),
                category: workload.category(),
            });
        }
        self.workloads.push(workload);
        Ok(())
    }

    pub fn with_workload(mut self, workload: Workload) -> Result<Self> {
        self.register(workload)?;
        Ok(self)
    }

    pub fn with_workloads<I>(mut self, workloads: I) -> Result<Self>
    where
        I: IntoIterator<Item = Workload>,
    {
        for workload in workloads {
            self.register(workload)?;
        }
        Ok(self)
    }

    /// Keeps only the workloads of the named category.
    ///
    /// An unknown name logs a warning and leaves the suite empty.
    pub fn filter_category(mut self, name: &str) -> Self {
        match name.parse::<Category>() {
            Ok(category) => {
                self.workloads.retain(|w| w.category() == category);
            }
            Err(e) => {
                warn!(event = "unknown_category", category = name, "{}", e);
                self.workloads.clear();
            }
        }
        self
    }

    pub fn workloads(&self) -> &[Workload] {
        &self.workloads
    }

    /// Categories present in the suite, in first-registration order.
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for workload in &self.workloads {
            if !seen.contains(&workload.category()) {
                seen.push(workload.category());
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.workloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workloads.is_empty()
    }

    pub fn protocol(&self) -> &TimingProtocol {
        &self.protocol
    }

    pub fn policy(&self) -> &RoundPolicy {
        &self.policy
    }

    /// Runs every workload and returns one result each, in registration
    /// order. Failures are captured in the result, never propagated.
    pub fn run(&self) -> Vec<BenchmarkResult> {
        let started = Instant::now();
        info!(
            event = "suite_start",
            workload_count = self.workloads.len(),
            workers = self.protocol.workers(),
            repetitions = self.protocol.repetitions(),
        );

        let results: Vec<BenchmarkResult> =
            self.workloads.iter().map(|w| self.run_workload(w)).collect();

        let failed = results.iter().filter(|r| r.is_failed()).count();
        info!(
            event = "suite_end",
            workload_count = results.len(),
            failed,
            duration_ms = started.elapsed().as_millis() as u64,
        );
        results
    }

    /// Runs one workload through adaptive rounds and outlier trimming.
    pub fn run_workload(&self, workload: &Workload) -> BenchmarkResult {
        info!(
            event = "workload_start",
            workload = workload.name(),
            category = workload.category().name(),
        );

        match self.measure(workload) {
            Ok(result) => {
                info!(
                    event = "workload_end",
                    workload = workload.name(),
                    rounds = result.rounds,
                    score = result.score,
                    duration_ms = result.duration.as_secs_f64() * 1000.0,
                );
                result
            }
            Err(e) => {
                warn!(
                    event = "workload_failed",
                    workload = workload.name(),
                    category = workload.category().name(),
                    error = %e,
                );
                BenchmarkResult::failed(
                    workload,
                    self.protocol.workers(),
                    self.protocol.repetitions(),
                    e.to_string(),
                )
            }
        }
    }

    fn measure(&self, workload: &Workload) -> Result<BenchmarkResult> {
        let samples = self.policy.run_adaptive(|index| {
            let sample = self.protocol.measure(workload)?;
            debug!(
                event = "round",
                workload = workload.name(),
                round = index,
                score = sample.score,
                elapsed_ms = sample.elapsed.as_secs_f64() * 1000.0,
            );
            Ok(sample)
        })?;

        let rounds = samples.len();
        let kept = trim_outliers(samples, self.policy.trim_fraction());
        let summary = summarize(&kept)
            .ok_or_else(|| HyperPiError::Internal("no rounds survived trimming".to_string()))?;

        Ok(BenchmarkResult {
            name: workload.name().to_string(),
            category: workload.category(),
            score: summary.score,
            duration: summary.duration,
            single_rate: summary.single_rate,
            multi_rate: summary.multi_rate,
            efficiency: summary.efficiency,
            workers: self.protocol.workers(),
            repetitions: self.protocol.repetitions(),
            rounds,
            rounds_kept: summary.kept,
            unit: workload.unit(),
            failure: None,
        })
    }
}
