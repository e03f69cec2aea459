//! Report files on disk.

use hyperpi_benchmark::{CsvExporter, SuiteReport};
use hyperpi_core::Category;
use hyperpi_scoring::{CategoryWeights, ScoreCalculator};
use hyperpi_test::ResultBuilder;
use tempfile::TempDir;

fn sample_report() -> SuiteReport {
    let results = vec![
        ResultBuilder::new("pi-digits", Category::ComputeIntensive)
            .score(12_000.0)
            .build(),
        ResultBuilder::new("sorting", Category::Algorithmic)
            .score(350.0)
            .build(),
    ];
    SuiteReport::new(results, &ScoreCalculator::new(CategoryWeights::canonical()), 8, 1)
}

#[test]
fn test_text_file_matches_stdout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.txt");
    let report = sample_report();

    report.to_file(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, report.to_string());
}

#[test]
fn test_json_file_parses() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.json");
    sample_report().to_json_file(&path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["workers"], 8);
    assert_eq!(value["workloads"].as_array().unwrap().len(), 2);
    assert_eq!(value["workloads"][0]["name"], "pi-digits");
}

#[test]
fn test_csv_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.csv");
    CsvExporter::to_file(&sample_report(), &path).unwrap();
    let csv = std::fs::read_to_string(&path).unwrap();
    assert_eq!(csv.lines().count(), 3);
}

#[test]
fn test_write_to_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("report.txt");
    assert!(sample_report().to_file(&path).is_err());
}
