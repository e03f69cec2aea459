//! Adaptive round planning.

use std::time::Duration;

use hyperpi_config::{ConfigError, RoundConfig};
use hyperpi_core::Result;
use tracing::debug;

use crate::timing::RoundSample;

/// How many rounds to run for one workload.
///
/// The first round doubles as the duration estimate; the target count is
/// `target / estimate` clamped to `[min_rounds, max_rounds]`.
///
/// # Example
///
/// ```
/// use hyperpi_benchmark::RoundPolicy;
/// use std::time::Duration;
///
/// let policy = RoundPolicy::default();
/// assert_eq!(policy.plan_round_count(Duration::from_millis(100)), 50);
/// assert_eq!(policy.plan_round_count(Duration::from_secs(2)), 10);
/// assert_eq!(policy.plan_round_count(Duration::from_micros(10)), 100);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RoundPolicy {
    target: Duration,
    min_rounds: usize,
    max_rounds: usize,
    trim_fraction: f64,
}

impl Default for RoundPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), 10, 100)
    }
}

impl RoundPolicy {
    /// Creates a policy; `min_rounds` is raised to 1 and `max_rounds` to
    /// `min_rounds`.
    pub fn new(target: Duration, min_rounds: usize, max_rounds: usize) -> Self {
        let min_rounds = min_rounds.max(1);
        Self {
            target,
            min_rounds,
            max_rounds: max_rounds.max(min_rounds),
            trim_fraction: 0.2,
        }
    }

    pub fn from_config(config: &RoundConfig) -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(config.target_duration()?, config.min_rounds, config.max_rounds)
            .with_trim_fraction(config.trim_fraction))
    }

    pub fn with_trim_fraction(mut self, fraction: f64) -> Self {
        self.trim_fraction = fraction;
        self
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    pub fn min_rounds(&self) -> usize {
        self.min_rounds
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    pub fn trim_fraction(&self) -> f64 {
        self.trim_fraction
    }

    /// Target round count for a sample round of length `estimate`.
    pub fn plan_round_count(&self, estimate: Duration) -> usize {
        if estimate.is_zero() {
            return self.max_rounds;
        }
        let ratio = self.target.as_secs_f64() / estimate.as_secs_f64();
        if !ratio.is_finite() {
            return self.max_rounds;
        }
        (ratio.floor() as usize).clamp(self.min_rounds, self.max_rounds)
    }

    /// Runs rounds until the planned count is reached, or earlier once the
    /// cumulative time has met the target and at least `min_rounds` are done.
    ///
    /// `round` receives the zero-based round index. The sample round is
    /// round 0 and is kept in the returned samples.
    pub fn run_adaptive<F>(&self, mut round: F) -> Result<Vec<RoundSample>>
    where
        F: FnMut(usize) -> Result<RoundSample>,
    {
        let sample = round(0)?;
        let planned = self.plan_round_count(sample.elapsed);
        debug!(
            event = "round_plan",
            estimate_ms = sample.elapsed.as_secs_f64() * 1000.0,
            planned,
        );

        let mut cumulative = sample.elapsed;
        let mut samples = Vec::with_capacity(planned);
        samples.push(sample);

        while samples.len() < planned {
            if cumulative >= self.target && samples.len() >= self.min_rounds {
                break;
            }
            let next = round(samples.len())?;
            cumulative += next.elapsed;
            samples.push(next);
        }

        Ok(samples)
    }
}
