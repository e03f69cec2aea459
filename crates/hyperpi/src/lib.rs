//! HyperPi - A multi-category CPU throughput benchmark in Rust
//!
//! One call runs the full workload catalog with a configuration and
//! returns a scored report.
//!
//! # Example
//!
//! ```rust
//! use hyperpi::prelude::*;
//!
//! let calculator = ScoreCalculator::new(CategoryWeights::canonical());
//! assert_eq!(calculator.weights().get(Category::Memory), Some(0.15));
//! assert_eq!(normalize_score(0.0), 0.1);
//! ```

// Core types
pub use hyperpi_core::{
    compute_efficiency, compute_pi, rate, BenchmarkResult, Category, HyperPiError, Measurement,
    PiDigits, RateUnit, Result, ScoreModel, UnknownCategory, Workload, WorkloadError,
    WorkloadInput,
};

// Configuration
pub use hyperpi_config::{BenchConfig, ConfigError, RoundConfig, TimingConfig, WorkerCount};

// Scoring
pub use hyperpi_scoring::{
    compare_with_baseline, normalize_score, CategoryScore, CategoryWeights, ScoreCalculator,
};

// Measurement engine and reports
pub use hyperpi_benchmark::{
    fan_out, BaselineComparison, CsvExporter, RoundPolicy, Suite, SuiteReport, TimingProtocol,
    WorkloadRow,
};

// Workload catalog
pub use hyperpi_workloads::catalog;

mod run;
pub use run::{run_suite, standard_suite};

#[cfg(feature = "console")]
pub use hyperpi_console as console;

pub mod prelude {
    pub use super::{
        catalog, compute_pi, run_suite, standard_suite, BenchConfig, BenchmarkResult, Category,
        CategoryWeights, HyperPiError, ScoreCalculator, Suite, SuiteReport, Workload,
        WorkloadInput,
    };
    pub use super::normalize_score;
}
