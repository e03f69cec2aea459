//! Timing protocol: one round of single-worker baseline plus multi-worker
//! fan-out.

use std::hint::black_box;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use hyperpi_config::BenchConfig;
use hyperpi_core::{
    compute_efficiency, rate, HyperPiError, Measurement, Result, Workload, WorkloadInput,
};
use tracing::trace;

use crate::fanout::{fan_out, panic_message};

/// Measurements from one round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSample {
    /// Trimmed-mean single-worker duration.
    pub single: Duration,
    /// Multi-worker wall clock divided by the repetition multiplier.
    pub multi: Duration,
    /// Total time the round took, baseline included.
    pub elapsed: Duration,
    pub single_rate: f64,
    pub multi_rate: f64,
    pub efficiency: f64,
    /// Raw score from the workload's score model.
    pub score: f64,
}

/// Runs a workload once on a single worker and once across `P * T` workers.
///
/// # Example
///
/// ```
/// use hyperpi_benchmark::TimingProtocol;
///
/// let protocol = TimingProtocol::new(4, 2).with_single_trials(7);
/// assert_eq!(protocol.workers(), 4);
/// assert_eq!(protocol.launched_workers(), 8);
/// assert_eq!(protocol.single_trials(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct TimingProtocol {
    workers: usize,
    repetitions: usize,
    single_trials: usize,
    seed: u64,
}

impl TimingProtocol {
    /// Minimum number of baseline trials; one fastest and one slowest are
    /// always discarded.
    pub const MIN_SINGLE_TRIALS: usize = 3;

    /// Creates a protocol with 5 baseline trials and seed 42.
    ///
    /// Zero workers or repetitions are raised to one.
    pub fn new(workers: usize, repetitions: usize) -> Self {
        Self {
            workers: workers.max(1),
            repetitions: repetitions.max(1),
            single_trials: 5,
            seed: 42,
        }
    }

    /// Builds a protocol from configuration.
    pub fn from_config(config: &BenchConfig) -> Self {
        Self::new(config.worker_count(), config.repetitions)
            .with_single_trials(config.timing.single_trials)
            .with_seed(config.seed)
    }

    pub fn with_single_trials(mut self, trials: usize) -> Self {
        self.single_trials = trials.max(Self::MIN_SINGLE_TRIALS);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    pub fn single_trials(&self) -> usize {
        self.single_trials
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of workers launched in the multi-worker phase, `P * T`.
    pub fn launched_workers(&self) -> usize {
        self.workers.saturating_mul(self.repetitions)
    }

    /// Runs one full round and derives its rates and score.
    ///
    /// # Errors
    ///
    /// Returns the first workload error or panic; the round is not retried.
    pub fn measure(&self, workload: &Workload) -> Result<RoundSample> {
        let started = Instant::now();
        let single = self.single_baseline(workload)?;
        let multi = self.multi_wall(workload)?;
        let elapsed = started.elapsed();

        let work = workload.work();
        let single_rate = rate(work, single);
        let multi_rate = rate(self.workers as f64 * work, multi);
        let efficiency = compute_efficiency(multi_rate, single_rate, self.workers);
        let score = workload
            .score_model()
            .raw_score(single, multi, multi_rate);

        Ok(RoundSample {
            single,
            multi,
            elapsed,
            single_rate,
            multi_rate,
            efficiency,
            score,
        })
    }

    /// Runs the workload serially `single_trials` times on worker 0 and
    /// returns the trimmed mean.
    pub fn single_baseline(&self, workload: &Workload) -> Result<Duration> {
        let input = WorkloadInput::for_worker(workload.size(), self.seed, 0);
        let mut trials = Vec::with_capacity(self.single_trials);
        for _ in 0..self.single_trials {
            trials.push(invoke(workload, &input)?);
        }
        Ok(trimmed_mean(&mut trials))
    }

    /// Launches `P * T` workers and returns the wall clock divided by `T`.
    pub fn multi_wall(&self, workload: &Workload) -> Result<Duration> {
        let launched = self.launched_workers();
        let started = Instant::now();
        let outcomes = fan_out(launched, |worker| {
            let input = WorkloadInput::for_worker(workload.size(), self.seed, worker);
            invoke(workload, &input)
        });
        let wall = started.elapsed();

        for outcome in outcomes {
            match outcome {
                Ok(Ok(measurement)) => {
                    trace!(
                        workload = workload.name(),
                        worker_ms = measurement.seconds() * 1000.0,
                        "worker finished"
                    );
                }
                Ok(Err(e)) => return Err(e),
                Err(panicked) => {
                    return Err(HyperPiError::WorkerPanicked {
                        workload: workload.name().to_string(),
                        worker: panicked.worker,
                        message: panicked.message,
                    })
                }
            }
        }

        Ok(wall.div_f64(self.repetitions as f64))
    }
}

/// Times one invocation, converting body errors and panics into
/// [`HyperPiError`].
pub fn invoke(workload: &Workload, input: &WorkloadInput) -> Result<Measurement> {
    let started = Instant::now();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| workload.run(input)));
    let wall = started.elapsed();

    match outcome {
        Ok(Ok(checksum)) => {
            black_box(checksum);
            Ok(Measurement::new(wall))
        }
        Ok(Err(source)) => Err(HyperPiError::WorkloadFailed {
            workload: workload.name().to_string(),
            worker: input.worker,
            source,
        }),
        Err(payload) => Err(HyperPiError::WorkerPanicked {
            workload: workload.name().to_string(),
            worker: input.worker,
            message: panic_message(payload.as_ref()),
        }),
    }
}

/// Sorts `trials`, drops the single fastest and slowest, and averages the
/// rest. With fewer than three trials nothing is dropped.
///
/// ```
/// use hyperpi_benchmark::trimmed_mean;
/// use hyperpi_core::Measurement;
/// use std::time::Duration;
///
/// let mut trials: Vec<Measurement> = [50, 10, 20, 30, 1]
///     .iter()
///     .map(|&ms| Measurement::new(Duration::from_millis(ms)))
///     .collect();
/// assert_eq!(trimmed_mean(&mut trials), Duration::from_millis(20));
/// ```
pub fn trimmed_mean(trials: &mut [Measurement]) -> Duration {
    if trials.is_empty() {
        return Duration::ZERO;
    }
    trials.sort();
    let kept = if trials.len() >= 3 {
        &trials[1..trials.len() - 1]
    } else {
        &trials[..]
    };
    let total: Duration = kept.iter().map(|m| m.wall).sum();
    total / kept.len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperpi_core::Category;
    use hyperpi_test::{counting_workload, failing_workload, panicking_workload, spin_workload};
    use std::sync::atomic::Ordering;

    fn ms(values: &[u64]) -> Vec<Measurement> {
        values
            .iter()
            .map(|&v| Measurement::new(Duration::from_millis(v)))
            .collect()
    }

    #[test]
    fn test_trimmed_mean_drops_extremes() {
        assert_eq!(
            trimmed_mean(&mut ms(&[100, 1, 5, 6, 7])),
            Duration::from_millis(6)
        );
    }

    #[test]
    fn test_trimmed_mean_small_inputs() {
        assert_eq!(trimmed_mean(&mut []), Duration::ZERO);
        assert_eq!(trimmed_mean(&mut ms(&[4, 6])), Duration::from_millis(5));
    }

    #[test]
    fn test_invocation_counts() {
        let (workload, counter) = counting_workload("count", Category::Memory);
        let protocol = TimingProtocol::new(3, 2);
        protocol.measure(&workload).unwrap();
        // 5 baseline trials + 3 * 2 fan-out workers
        assert_eq!(counter.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn test_sample_is_finite() {
        let workload = spin_workload("spin", Category::ComputeIntensive, 1000);
        let sample = TimingProtocol::new(2, 1).measure(&workload).unwrap();
        assert!(sample.single_rate.is_finite() && sample.single_rate >= 0.0);
        assert!(sample.multi_rate.is_finite() && sample.multi_rate >= 0.0);
        assert!(sample.efficiency.is_finite() && sample.efficiency >= 0.0);
        assert!(sample.elapsed >= sample.single);
    }

    #[test]
    fn test_body_error_fails_round() {
        let workload = failing_workload("fail", Category::Compression);
        match TimingProtocol::new(2, 1).measure(&workload) {
            Err(HyperPiError::WorkloadFailed { workload, worker, .. }) => {
                assert_eq!(workload, "fail");
                assert_eq!(worker, 0);
            }
            other => panic!("expected WorkloadFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_worker_panic_fails_round() {
        let workload = panicking_workload("panic", Category::Concurrency, 1);
        match TimingProtocol::new(2, 1).measure(&workload) {
            Err(HyperPiError::WorkerPanicked { worker, message, .. }) => {
                assert_eq!(worker, 1);
                assert!(message.contains("fixture panic"));
            }
            other => panic!("expected WorkerPanicked, got {:?}", other),
        }
    }

    #[test]
    fn test_protocol_clamps_inputs() {
        let protocol = TimingProtocol::new(0, 0).with_single_trials(1);
        assert_eq!(protocol.workers(), 1);
        assert_eq!(protocol.repetitions(), 1);
        assert_eq!(protocol.single_trials(), TimingProtocol::MIN_SINGLE_TRIALS);
    }
}
