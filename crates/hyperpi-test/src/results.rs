//! `BenchmarkResult` builder.

use std::time::Duration;

use hyperpi_core::{BenchmarkResult, Category, RateUnit};

/// Builds `BenchmarkResult` values with sensible defaults.
///
/// ```
/// use hyperpi_core::Category;
/// use hyperpi_test::ResultBuilder;
///
/// let result = ResultBuilder::new("pi", Category::ComputeIntensive).score(9000.0).build();
/// assert_eq!(result.score, 9000.0);
/// assert!(!result.is_failed());
/// ```
#[derive(Debug, Clone)]
pub struct ResultBuilder {
    result: BenchmarkResult,
}

impl ResultBuilder {
    pub fn new(name: &str, category: Category) -> Self {
        Self {
            result: BenchmarkResult {
                name: name.to_string(),
                category,
                score: 1000.0,
                duration: Duration::from_millis(10),
                single_rate: 100.0,
                multi_rate: 400.0,
                efficiency: 1.0,
                workers: 4,
                repetitions: 1,
                rounds: 10,
                rounds_kept: 6,
                unit: RateUnit::Operations,
                failure: None,
            },
        }
    }

    pub fn score(mut self, score: f64) -> Self {
        self.result.score = score;
        self
    }

    pub fn rates(mut self, single: f64, multi: f64) -> Self {
        self.result.single_rate = single;
        self.result.multi_rate = multi;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.result.duration = duration;
        self
    }

    pub fn failed(mut self, message: &str) -> Self {
        self.result.failure = Some(message.to_string());
        self.result.score = 0.0;
        self.result.single_rate = 0.0;
        self.result.multi_rate = 0.0;
        self.result.efficiency = 0.0;
        self
    }

    pub fn build(self) -> BenchmarkResult {
        self.result
    }
}
