//! Category aggregation and composite scoring.

use hyperpi_core::{BenchmarkResult, Category};

use crate::normalize::normalize_score;
use crate::weights::CategoryWeights;

/// One row of the category table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryScore {
    pub category: Category,
    /// Mean normalized score of successful workloads, `0.0` if none succeeded.
    pub score: f64,
    /// Weight from the table, `None` if the category is unweighted.
    pub weight: Option<f64>,
    /// Successful workloads in this category.
    pub completed: usize,
    /// Failed workloads in this category.
    pub failed: usize,
}

impl CategoryScore {
    /// True when at least one workload in the category failed.
    pub fn is_degraded(&self) -> bool {
        self.failed > 0
    }

    /// Contribution to the composite score.
    pub fn weighted(&self) -> f64 {
        self.score * self.weight.unwrap_or(0.0)
    }
}

/// Turns per-workload results into category scores and a composite.
///
/// Only successful results are averaged; failed results are counted so the
/// category can be flagged as degraded.
#[derive(Debug, Clone, Default)]
pub struct ScoreCalculator {
    weights: CategoryWeights,
}

impl ScoreCalculator {
    pub fn new(weights: CategoryWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &CategoryWeights {
        &self.weights
    }

    /// Normalized score of a single result.
    pub fn normalized(&self, result: &BenchmarkResult) -> f64 {
        normalize_score(result.score)
    }

    /// Mean normalized score of the successful results in `category`.
    ///
    /// Returns `0.0` when the category has no successful results.
    pub fn category_score(&self, results: &[BenchmarkResult], category: Category) -> f64 {
        let (sum, count) = results
            .iter()
            .filter(|r| r.category == category && !r.is_failed())
            .fold((0.0, 0usize), |(sum, count), r| {
                (sum + normalize_score(r.score), count + 1)
            });
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    /// Category rows in canonical order.
    ///
    /// Includes every weighted category, plus unweighted categories that
    /// have results. A weighted category with no successful workloads is
    /// listed with score `0.0`.
    pub fn category_scores(&self, results: &[BenchmarkResult]) -> Vec<CategoryScore> {
        Category::ALL
            .iter()
            .copied()
            .filter(|&c| self.weights.contains(c) || results.iter().any(|r| r.category == c))
            .map(|category| {
                let failed = results
                    .iter()
                    .filter(|r| r.category == category && r.is_failed())
                    .count();
                let completed = results
                    .iter()
                    .filter(|r| r.category == category && !r.is_failed())
                    .count();
                CategoryScore {
                    category,
                    score: self.category_score(results, category),
                    weight: self.weights.get(category),
                    completed,
                    failed,
                }
            })
            .collect()
    }

    /// Weighted sum of category means.
    ///
    /// Categories without successful results contribute zero; categories
    /// outside the weight table are ignored.
    pub fn composite(&self, results: &[BenchmarkResult]) -> f64 {
        self.weights
            .iter()
            .map(|(category, weight)| self.category_score(results, category) * weight)
            .sum()
    }
}

/// Percentage change of `current` relative to `baseline`.
///
/// Returns `None` when the baseline is not a positive finite number.
///
/// ```
/// use hyperpi_scoring::compare_with_baseline;
///
/// assert_eq!(compare_with_baseline(1500.0, 1000.0), Some(50.0));
/// assert_eq!(compare_with_baseline(900.0, 0.0), None);
/// ```
pub fn compare_with_baseline(current: f64, baseline: f64) -> Option<f64> {
    if !baseline.is_finite() || baseline <= 0.0 || !current.is_finite() {
        return None;
    }
    Some((current - baseline) / baseline * 100.0)
}
