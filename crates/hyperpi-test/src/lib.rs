//! Shared test fixtures for HyperPi crates.
//!
//! This crate provides workload bodies, result builders and fast round
//! policies for testing. It depends only on `hyperpi-core` and
//! `hyperpi-config` to avoid circular dependencies.
//!
//! - [`workloads`] - Cheap, failing and panicking workloads
//! - [`results`] - `BenchmarkResult` builder
//! - [`rounds`] - Round policies that finish in milliseconds
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! hyperpi-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use hyperpi_test::workloads::{spin_workload, panicking_workload};
//! use hyperpi_test::results::ResultBuilder;
//! ```

pub mod results;
pub mod rounds;
pub mod workloads;

pub use results::ResultBuilder;
pub use rounds::{fast_config, fast_rounds};
pub use workloads::{counting_workload, failing_workload, panicking_workload, spin_workload};
