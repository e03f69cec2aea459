//! Report generation for suite results.

use std::fmt::{self, Write as _};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use hyperpi_core::BenchmarkResult;
use hyperpi_scoring::{compare_with_baseline, CategoryScore, ScoreCalculator};
use serde::{Deserialize, Serialize};

/// One row of the detail table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadRow {
    #[serde(flatten)]
    pub result: BenchmarkResult,
    /// Normalized score, `0.0` for failed workloads.
    pub normalized: f64,
}

/// Composite compared with a reference score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineComparison {
    pub baseline: f64,
    /// Percentage change, `None` when the baseline is not positive.
    pub change_percent: Option<f64>,
}

/// Full suite report: composite, category table and per-workload details.
///
/// `Display` renders the text report; [`SuiteReport::to_json`] the JSON one.
///
/// # Example
///
/// ```
/// use hyperpi_benchmark::SuiteReport;
/// use hyperpi_scoring::{CategoryWeights, ScoreCalculator};
///
/// let calculator = ScoreCalculator::new(CategoryWeights::canonical());
/// let report = SuiteReport::new(Vec::new(), &calculator, 4, 1);
/// assert_eq!(report.composite, 0.0);
///
/// let text = report.to_string();
/// assert!(text.starts_with("=== HyperPi v"));
/// assert!(text.contains("Composite score: 0.00"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    pub version: String,
    pub workers: usize,
    pub repetitions: usize,
    pub composite: f64,
    pub categories: Vec<CategoryScore>,
    pub workloads: Vec<WorkloadRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<BaselineComparison>,
    /// Adds raw scores to the text detail table.
    #[serde(skip)]
    pub verbose: bool,
}

impl SuiteReport {
    /// Scores `results` and assembles the report.
    pub fn new(
        results: Vec<BenchmarkResult>,
        calculator: &ScoreCalculator,
        workers: usize,
        repetitions: usize,
    ) -> Self {
        let composite = calculator.composite(&results);
        let categories = calculator.category_scores(&results);
        let workloads = results
            .into_iter()
            .map(|result| {
                let normalized = if result.is_failed() {
                    0.0
                } else {
                    calculator.normalized(&result)
                };
                WorkloadRow { result, normalized }
            })
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            workers,
            repetitions,
            composite,
            categories,
            workloads,
            baseline: None,
            verbose: false,
        }
    }

    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = Some(BaselineComparison {
            baseline,
            change_percent: compare_with_baseline(self.composite, baseline),
        });
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// True when any workload failed.
    pub fn is_degraded(&self) -> bool {
        self.categories.iter().any(CategoryScore::is_degraded)
    }

    pub fn failed_count(&self) -> usize {
        self.workloads.iter().filter(|w| w.result.is_failed()).count()
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Writes the text report to a file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, self.to_string())
    }

    /// Writes the JSON report to a file.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let json = self.to_json().map_err(io::Error::other)?;
        fs::write(path, json)
    }

    /// Writes the text report to a writer.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.to_string().as_bytes())
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== HyperPi v{} Benchmark Report ===", self.version)?;
        writeln!(f)?;
        writeln!(
            f,
            "Workers: {} | Repetitions: {}",
            self.workers, self.repetitions
        )?;
        writeln!(f, "Composite score: {:.2}", self.composite)?;
        if let Some(comparison) = &self.baseline {
            match comparison.change_percent {
                Some(change) => writeln!(
                    f,
                    "Baseline: {:.2} ({:+.2}%)",
                    comparison.baseline, change
                )?,
                None => writeln!(
                    f,
                    "Baseline: {:.2} (invalid, no comparison)",
                    comparison.baseline
                )?,
            }
        }
        writeln!(f)?;

        writeln!(f, "Category scores:")?;
        for row in &self.categories {
            let weight = match row.weight {
                Some(w) => format!("{:.0}%", w * 100.0),
                None => "-".to_string(),
            };
            write!(
                f,
                "  {:<18}: {:>8.2} (weight: {})",
                row.category.name(),
                row.score,
                weight
            )?;
            if row.is_degraded() {
                write!(f, " DEGRADED ({} failed)", row.failed)?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;

        writeln!(f, "Workload details:")?;
        for row in &self.workloads {
            let r = &row.result;
            write!(f, "  {:<18} | {:<20} | ", r.category.name(), r.name)?;
            if let Some(message) = &r.failure {
                writeln!(f, "FAILED: {}", message)?;
                continue;
            }
            write!(
                f,
                "score: {:>8.2} | single: {:>12.2} {} | multi: {:>12.2} {} | multi/single: {:.2} | time: {}",
                row.normalized,
                r.single_rate,
                r.unit.suffix(),
                r.multi_rate,
                r.unit.suffix(),
                r.ratio(),
                format_duration(r.duration),
            )?;
            if self.verbose {
                write!(
                    f,
                    " | raw: {} | efficiency: {:.2} | rounds: {}/{}",
                    format_raw(r.score),
                    r.efficiency,
                    r.rounds_kept,
                    r.rounds
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// Zero-duration rounds score +inf; the report prints a word instead.
fn format_raw(score: f64) -> String {
    if score.is_finite() {
        format!("{:.2}", score)
    } else {
        "unbounded".to_string()
    }
}

/// Formats a duration as milliseconds below one second, seconds below one
/// minute, and minutes plus seconds above.
///
/// ```
/// use hyperpi_benchmark::report::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_millis(250)), "250.00ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(125)), "2m 5.00s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        let minutes = (secs / 60.0).floor();
        format!("{}m {:.2}s", minutes as u64, secs - minutes * 60.0)
    }
}

/// CSV exporter for suite reports.
///
/// One row per workload with its category, normalized and raw score, rates,
/// efficiency, round counts and failure message.
///
/// # Example
///
/// ```
/// use hyperpi_benchmark::{CsvExporter, SuiteReport};
/// use hyperpi_scoring::ScoreCalculator;
///
/// let report = SuiteReport::new(Vec::new(), &ScoreCalculator::default(), 2, 1);
/// let csv = CsvExporter::to_string(&report);
/// assert!(csv.starts_with("category,name,normalized_score"));
/// ```
pub struct CsvExporter;

impl CsvExporter {
    const HEADER: &'static str = "category,name,normalized_score,raw_score,single_rate,multi_rate,unit,efficiency,duration_ms,rounds,rounds_kept,failure";

    /// Exports the report to a CSV string.
    pub fn to_string(report: &SuiteReport) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail.
        let _ = Self::render(report, &mut output);
        output
    }

    fn render(report: &SuiteReport, output: &mut String) -> fmt::Result {
        writeln!(output, "{}", Self::HEADER)?;
        for row in &report.workloads {
            let r = &row.result;
            writeln!(
                output,
                "{},{},{:.2},{:.4},{:.4},{:.4},{},{:.4},{:.3},{},{},{}",
                r.category.name(),
                escape(&r.name),
                row.normalized,
                r.score,
                r.single_rate,
                r.multi_rate,
                r.unit.suffix(),
                r.efficiency,
                r.duration.as_secs_f64() * 1000.0,
                r.rounds,
                r.rounds_kept,
                escape(r.failure.as_deref().unwrap_or("")),
            )?;
        }
        Ok(())
    }

    /// Exports the report to a CSV file.
    pub fn to_file(report: &SuiteReport, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, Self::to_string(report))
    }

    /// Writes the report as CSV to a writer.
    pub fn write<W: Write>(report: &SuiteReport, mut writer: W) -> io::Result<()> {
        writer.write_all(Self::to_string(report).as_bytes())
    }
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
