//! Error types for HyperPi

use thiserror::Error;

use crate::category::Category;

/// Main error type for HyperPi operations
#[derive(Debug, Error)]
pub enum HyperPiError {
    /// Error in benchmark configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Digit generation was asked for fewer than one digit
    #[error("Invalid digit count: {0} (at least 1 digit is required)")]
    InvalidDigitCount(usize),

    /// A workload with the same name and category is already registered
    #[error("Duplicate workload: {name} ({category})")]
    DuplicateWorkload { name: String, category: Category },

    /// A workload body returned an error
    #[error("Workload {workload} failed on worker {worker}: {source}")]
    WorkloadFailed {
        workload: String,
        worker: usize,
        #[source]
        source: WorkloadError,
    },

    /// A workload body panicked
    #[error("Workload {workload} panicked on worker {worker}: {message}")]
    WorkerPanicked {
        workload: String,
        worker: usize,
        message: String,
    },

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error returned by a workload body.
#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The workload produced output that failed its own consistency check.
    #[error("Corrupted output: {0}")]
    Corrupted(String),

    #[error("Crypto error: {0}")]
    Crypto(String),
}

/// Result type alias for HyperPi operations
pub type Result<T> = std::result::Result<T, HyperPiError>;
