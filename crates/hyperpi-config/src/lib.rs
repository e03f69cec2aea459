//! Configuration system for HyperPi.
//!
//! Load benchmark configuration from TOML or YAML files to control worker
//! count, round scheduling and category weights without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use hyperpi_config::{BenchConfig, WorkerCount};
//! use std::time::Duration;
//!
//! let config = BenchConfig::from_toml_str(r#"
//!     workers = { count = 8 }
//!     repetitions = 2
//!
//!     [rounds]
//!     target_seconds = 2.5
//!     min_rounds = 5
//!
//!     [weights]
//!     compute-intensive = 1.0
//! "#).unwrap();
//!
//! assert_eq!(config.workers, WorkerCount::Count(8));
//! assert_eq!(config.rounds.target_duration().unwrap(), Duration::from_millis(2500));
//! assert_eq!(config.rounds.max_rounds, 100);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use hyperpi_config::BenchConfig;
//!
//! let config = BenchConfig::load("hyperpi.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use hyperpi_core::Category;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on `workers * repetitions`, the threads launched per round.
pub const MAX_LAUNCHED_WORKERS: usize = 4096;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main benchmark configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BenchConfig {
    /// Worker count `P` for the multi-worker phase.
    #[serde(default)]
    pub workers: WorkerCount,

    /// Repetition multiplier `T`.
    #[serde(default = "default_repetitions")]
    pub repetitions: usize,

    /// Base seed from which every worker's PRNG seed is derived.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Single-worker baseline configuration.
    #[serde(default)]
    pub timing: TimingConfig,

    /// Adaptive round scheduling.
    #[serde(default)]
    pub rounds: RoundConfig,

    /// Category weight overrides, keyed by category name.
    #[serde(default)]
    pub weights: Option<BTreeMap<String, f64>>,

    /// Run only this category.
    #[serde(default)]
    pub category: Option<String>,
}

fn default_repetitions() -> usize {
    1
}

fn default_seed() -> u64 {
    42
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            workers: WorkerCount::default(),
            repetitions: default_repetitions(),
            seed: default_seed(),
            timing: TimingConfig::default(),
            rounds: RoundConfig::default(),
            weights: None,
            category: None,
        }
    }
}

impl BenchConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, choosing the format by extension.
    ///
    /// `.yaml` and `.yml` are parsed as YAML, everything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, fails to parse, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path)?,
            _ => Self::from_toml_file(path)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the worker count.
    pub fn with_workers(mut self, count: usize) -> Self {
        self.workers = WorkerCount::Count(count);
        self
    }

    /// Sets the repetition multiplier.
    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Sets the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Restricts the run to one category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Replaces the round policy.
    pub fn with_rounds(mut self, rounds: RoundConfig) -> Self {
        self.rounds = rounds;
        self
    }

    /// Resolved worker count.
    pub fn worker_count(&self) -> usize {
        self.workers.resolve()
    }

    /// Parses the weight overrides into categories.
    ///
    /// Returns `None` when no overrides are configured.
    pub fn weight_table(&self) -> Result<Option<BTreeMap<Category, f64>>, ConfigError> {
        let Some(weights) = &self.weights else {
            return Ok(None);
        };
        let mut table = BTreeMap::new();
        for (name, &weight) in weights {
            let category: Category = name
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("weights: {}", e)))?;
            table.insert(category, weight);
        }
        Ok(Some(table))
    }

    /// Checks the configuration for inconsistent values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == WorkerCount::Count(0) {
            return Err(ConfigError::Invalid("workers must be at least 1".into()));
        }
        if self.repetitions == 0 {
            return Err(ConfigError::Invalid("repetitions must be at least 1".into()));
        }
        let launched = self.worker_count().saturating_mul(self.repetitions);
        if launched > MAX_LAUNCHED_WORKERS {
            return Err(ConfigError::Invalid(format!(
                "workers x repetitions must be at most {}, got {}",
                MAX_LAUNCHED_WORKERS, launched
            )));
        }
        self.timing.validate()?;
        self.rounds.validate()?;
        if let Some(table) = self.weight_table()? {
            for (category, weight) in table {
                if !weight.is_finite() || weight < 0.0 {
                    return Err(ConfigError::Invalid(format!(
                        "weight for {} must be a non-negative number, got {}",
                        category, weight
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Worker count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerCount {
    /// One worker per available logical processor.
    #[default]
    Auto,

    /// Specific number of workers.
    Count(usize),
}

impl WorkerCount {
    /// Resolves the worker count to an actual number.
    pub fn resolve(&self) -> usize {
        match self {
            WorkerCount::Auto => std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(1),
            WorkerCount::Count(n) => *n,
        }
    }
}

impl std::fmt::Display for WorkerCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerCount::Auto => write!(f, "auto"),
            WorkerCount::Count(n) => write!(f, "{}", n),
        }
    }
}

/// Single-worker baseline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TimingConfig {
    /// Serial trials per round; the fastest and slowest are discarded.
    #[serde(default = "default_single_trials")]
    pub single_trials: usize,
}

fn default_single_trials() -> usize {
    5
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            single_trials: default_single_trials(),
        }
    }
}

impl TimingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.single_trials < 3 {
            return Err(ConfigError::Invalid(format!(
                "timing.single_trials must be at least 3, got {}",
                self.single_trials
            )));
        }
        Ok(())
    }
}

/// Adaptive round scheduling configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RoundConfig {
    /// Cumulative round time after which the loop may stop.
    #[serde(default = "default_target_seconds")]
    pub target_seconds: f64,

    /// Lower bound on the round count.
    #[serde(default = "default_min_rounds")]
    pub min_rounds: usize,

    /// Upper bound on the round count.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,

    /// Fraction of rounds dropped from each end before averaging.
    #[serde(default = "default_trim_fraction")]
    pub trim_fraction: f64,
}

fn default_target_seconds() -> f64 {
    5.0
}

fn default_min_rounds() -> usize {
    10
}

fn default_max_rounds() -> usize {
    100
}

fn default_trim_fraction() -> f64 {
    0.2
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            target_seconds: default_target_seconds(),
            min_rounds: default_min_rounds(),
            max_rounds: default_max_rounds(),
            trim_fraction: default_trim_fraction(),
        }
    }
}

impl RoundConfig {
    /// Returns the target duration, or an error if `target_seconds` is not a
    /// representable non-negative duration.
    pub fn target_duration(&self) -> Result<Duration, ConfigError> {
        Duration::try_from_secs_f64(self.target_seconds).map_err(|e| {
            ConfigError::Invalid(format!(
                "rounds.target_seconds {}: {}",
                self.target_seconds, e
            ))
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let target = self.target_duration()?;
        if target.is_zero() {
            return Err(ConfigError::Invalid(
                "rounds.target_seconds must be positive".into(),
            ));
        }
        if self.min_rounds == 0 {
            return Err(ConfigError::Invalid(
                "rounds.min_rounds must be at least 1".into(),
            ));
        }
        if self.min_rounds > self.max_rounds {
            return Err(ConfigError::Invalid(format!(
                "rounds.min_rounds ({}) exceeds rounds.max_rounds ({})",
                self.min_rounds, self.max_rounds
            )));
        }
        if !(0.0..0.5).contains(&self.trim_fraction) {
            return Err(ConfigError::Invalid(format!(
                "rounds.trim_fraction must be in [0, 0.5), got {}",
                self.trim_fraction
            )));
        }
        Ok(())
    }
}
