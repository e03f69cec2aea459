//! Running the standard catalog from configuration.

use hyperpi_benchmark::{Suite, SuiteReport};
use hyperpi_config::BenchConfig;
use hyperpi_core::{HyperPiError, Result};
use hyperpi_scoring::{CategoryWeights, ScoreCalculator};
use tracing::info;

/// Builds a suite holding the full catalog, narrowed by the configured
/// category filter if one is set.
///
/// # Errors
///
/// Returns [`HyperPiError::Config`] for an invalid configuration.
pub fn standard_suite(config: &BenchConfig) -> Result<Suite> {
    let suite = Suite::from_config(config)?.with_workloads(hyperpi_workloads::catalog())?;
    Ok(match config.category.as_deref() {
        Some(name) => suite.filter_category(name),
        None => suite,
    })
}

/// Runs the standard suite and scores it.
///
/// Uses the configured weight table, or the canonical one if none is set.
/// An unknown category filter yields an empty report with composite `0`.
///
/// ```no_run
/// use hyperpi::{run_suite, BenchConfig};
///
/// let report = run_suite(&BenchConfig::new().with_category("compute")).unwrap();
/// println!("{}", report);
/// ```
pub fn run_suite(config: &BenchConfig) -> Result<SuiteReport> {
    let weights = match config
        .weight_table()
        .map_err(|e| HyperPiError::Config(e.to_string()))?
    {
        Some(table) => CategoryWeights::from_pairs(table),
        None => CategoryWeights::canonical(),
    };
    let calculator = ScoreCalculator::new(weights);

    let suite = standard_suite(config)?;
    let protocol = suite.protocol();
    let (workers, repetitions) = (protocol.workers(), protocol.repetitions());
    let results = suite.run();

    let report = SuiteReport::new(results, &calculator, workers, repetitions);
    info!(
        event = "report_ready",
        composite = report.composite,
        failed = report.failed_count(),
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperpi_core::Category;
    use hyperpi_test::fast_config;

    #[test]
    fn test_standard_suite_holds_catalog() {
        let suite = standard_suite(&fast_config()).unwrap();
        assert_eq!(suite.len(), 17);
        assert_eq!(suite.categories().len(), Category::ALL.len());
    }

    #[test]
    fn test_standard_suite_filter() {
        let suite = standard_suite(&fast_config().with_category("floating-point")).unwrap();
        assert_eq!(suite.len(), 3);
        assert!(suite
            .workloads()
            .iter()
            .all(|w| w.category() == Category::FloatingPoint));
    }

    #[test]
    fn test_unknown_category_reports_zero() {
        let report = run_suite(&fast_config().with_category("gpu")).unwrap();
        assert!(report.workloads.is_empty());
        assert_eq!(report.composite, 0.0);
    }

    #[test]
    fn test_invalid_config() {
        let err = run_suite(&fast_config().with_repetitions(0)).unwrap_err();
        assert!(matches!(err, HyperPiError::Config(_)));
    }
}
