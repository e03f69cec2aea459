//! Measurement engine for the HyperPi CPU benchmark.
//!
//! This crate turns a list of workloads into scored results:
//! - [`TimingProtocol`] times one round: a trimmed-mean single-worker
//!   baseline and a `P * T` worker fan-out
//! - [`RoundPolicy`] decides how many rounds to run from a sample round
//! - [`outliers`] drops the fastest and slowest rounds before averaging
//! - [`Suite`] runs workloads in registration order and captures failures
//! - [`SuiteReport`] and [`CsvExporter`] render the results
//!
//! # Example
//!
//! ```
//! use hyperpi_benchmark::{RoundPolicy, Suite, SuiteReport, TimingProtocol};
//! use hyperpi_core::{Category, Workload, WorkloadInput};
//! use hyperpi_scoring::{CategoryWeights, ScoreCalculator};
//! use std::time::Duration;
//!
//! let workload = Workload::new("sum", Category::ComputeIntensive, 1000, |input: &WorkloadInput| {
//!     Ok((0..input.size as u64).fold(input.seed, |acc, i| acc.wrapping_add(i)))
//! })
//! .with_score_scale(0.001);
//!
//! let suite = Suite::new(
//!     TimingProtocol::new(2, 1),
//!     RoundPolicy::new(Duration::from_millis(1), 4, 8),
//! )
//! .with_workload(workload)
//! .unwrap();
//!
//! let calculator = ScoreCalculator::new(CategoryWeights::from_pairs([(Category::ComputeIntensive, 1.0)]));
//! let report = SuiteReport::new(suite.run(), &calculator, 2, 1);
//! assert_eq!(report.workloads.len(), 1);
//! assert!(report.composite.is_finite());
//! ```

mod fanout;
pub mod outliers;
pub mod report;
mod rounds;
mod runner;
mod timing;

pub use fanout::{fan_out, WorkerPanic};
pub use outliers::{summarize, trim_outliers, RoundSummary};
pub use report::{BaselineComparison, CsvExporter, SuiteReport, WorkloadRow};
pub use rounds::RoundPolicy;
pub use runner::Suite;
pub use timing::{invoke, trimmed_mean, RoundSample, TimingProtocol};
