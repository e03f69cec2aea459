//! End-to-end suite runs with fixture workloads.

use std::sync::atomic::Ordering;
use std::time::Duration;

use hyperpi_benchmark::{RoundPolicy, Suite, SuiteReport, TimingProtocol};
use hyperpi_core::Category;
use hyperpi_scoring::{normalize_score, CategoryWeights, ScoreCalculator};
use hyperpi_test::{
    counting_workload, failing_workload, fast_config, panicking_workload, spin_workload,
};

fn fast_suite() -> Suite {
    Suite::from_config(&fast_config()).unwrap()
}

#[test]
fn test_single_category_composite_equals_normalized_score() {
    let suite = fast_suite()
        .with_workload(spin_workload("spin", Category::ComputeIntensive, 2000))
        .unwrap();
    let results = suite.run();
    assert_eq!(results.len(), 1);

    let calculator =
        ScoreCalculator::new(CategoryWeights::from_pairs([(Category::ComputeIntensive, 1.0)]));
    let report = SuiteReport::new(results, &calculator, 2, 1);

    let expected = normalize_score(report.workloads[0].result.score);
    assert!((report.composite - expected).abs() < 1e-9);
    assert!(report.composite.is_finite());
    assert!(report.composite >= 0.0);
}

#[test]
fn test_unknown_category_gives_empty_report() {
    let suite = fast_suite()
        .with_workload(spin_workload("spin", Category::Memory, 10))
        .unwrap()
        .filter_category("quantum");
    let results = suite.run();
    assert!(results.is_empty());

    let report = SuiteReport::new(results, &ScoreCalculator::default(), 2, 1);
    assert_eq!(report.composite, 0.0);
    assert!(report.workloads.is_empty());
}

#[test]
fn test_panicking_workload_is_isolated() {
    let suite = fast_suite()
        .with_workloads([
            spin_workload("before", Category::Concurrency, 100),
            panicking_workload("explodes", Category::Concurrency, 1),
            spin_workload("after", Category::Memory, 100),
        ])
        .unwrap();
    let results = suite.run();

    assert_eq!(results.len(), 3);
    assert!(!results[0].is_failed());
    assert!(results[1].is_failed());
    assert!(!results[2].is_failed());
    assert!(results[1].failure.as_deref().unwrap().contains("panicked"));

    let report = SuiteReport::new(results, &ScoreCalculator::default(), 2, 1);
    let concurrency = report
        .categories
        .iter()
        .find(|c| c.category == Category::Concurrency)
        .unwrap();
    assert!(concurrency.is_degraded());
    assert_eq!(concurrency.completed, 1);
    assert_eq!(concurrency.failed, 1);
    // The failed workload does not drag the category mean down.
    assert!((concurrency.score - report.workloads[0].normalized).abs() < 1e-9);
}

#[test]
fn test_failed_category_scores_zero() {
    let suite = fast_suite()
        .with_workload(failing_workload("bad", Category::Compression))
        .unwrap();
    let report = SuiteReport::new(
        suite.run(),
        &ScoreCalculator::new(CategoryWeights::from_pairs([(Category::Compression, 1.0)])),
        2,
        1,
    );
    assert_eq!(report.composite, 0.0);
    assert!(report.to_string().contains("FAILED"));
}

#[test]
fn test_round_count_within_bounds() {
    let policy = RoundPolicy::new(Duration::from_millis(5), 4, 12);
    let suite = Suite::new(TimingProtocol::new(2, 1), policy)
        .with_workload(spin_workload("spin", Category::Algorithmic, 500))
        .unwrap();
    let result = &suite.run()[0];
    assert!(result.rounds >= 4 && result.rounds <= 12);
    let k = ((result.rounds as f64 * 0.2).floor() as usize).max(1);
    assert_eq!(result.rounds_kept, result.rounds - 2 * k);
}

#[test]
fn test_invocations_per_round() {
    let (workload, counter) = counting_workload("count", Category::Memory);
    let policy = RoundPolicy::new(Duration::from_secs(3600), 3, 3);
    let suite = Suite::new(TimingProtocol::new(4, 2), policy)
        .with_workload(workload)
        .unwrap();
    let results = suite.run();
    assert_eq!(results[0].rounds, 3);
    // Each round: 5 baseline trials + 4 * 2 fan-out workers.
    assert_eq!(counter.load(Ordering::SeqCst), 3 * (5 + 8));
}

#[test]
fn test_results_in_registration_order() {
    let suite = fast_suite()
        .with_workloads([
            spin_workload("z", Category::Algorithmic, 10),
            spin_workload("a", Category::ComputeIntensive, 10),
            spin_workload("m", Category::Memory, 10),
        ])
        .unwrap();
    let names: Vec<String> = suite.run().into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["z", "a", "m"]);
}
