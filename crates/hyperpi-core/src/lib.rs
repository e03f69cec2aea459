//! HyperPi Core - Core types for CPU benchmarking
//!
//! This crate provides the fundamental abstractions for HyperPi:
//! - Workload descriptors and the closed set of benchmark categories
//! - Per-workload measurement results with clamped rates
//! - Error types shared by every crate in the workspace
//! - The base-10000 pi spigot used as the reference workload

pub mod category;
pub mod digits;
pub mod error;
pub mod result;
pub mod workload;

#[cfg(test)]
mod digits_tests;

pub use category::{Category, UnknownCategory};
pub use digits::{compute_pi, PiDigits};
pub use error::{HyperPiError, Result, WorkloadError};
pub use result::{compute_efficiency, rate, BenchmarkResult, Measurement};
pub use workload::{RateUnit, ScoreModel, Workload, WorkloadFn, WorkloadInput};
