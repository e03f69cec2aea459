//! Score normalization and composite aggregation for HyperPi.
//!
//! Raw workload scores span many orders of magnitude (hashes per second vs.
//! matrix multiplications per second). This crate compresses them onto a
//! common log scale and combines per-category means into one weighted
//! composite:
//! - [`normalize_score`] maps any raw score, including `NaN` and infinities,
//!   to a finite value
//! - [`CategoryWeights`] is the explicitly constructed weight table
//! - [`ScoreCalculator`] produces category rows and the composite score
//!
//! # Example
//!
//! ```
//! use hyperpi_core::Category;
//! use hyperpi_scoring::{CategoryWeights, ScoreCalculator};
//!
//! let calculator = ScoreCalculator::new(CategoryWeights::canonical());
//! assert_eq!(calculator.composite(&[]), 0.0);
//! assert_eq!(calculator.weights().get(Category::ComputeIntensive), Some(0.2));
//! ```

mod calculator;
mod normalize;
mod weights;


pub use calculator::{compare_with_baseline, CategoryScore, ScoreCalculator};
pub use normalize::{normalize_score, NON_FINITE_SCORE, SCORE_CAP, SCORE_FLOOR};
pub use weights::CategoryWeights;
