//! HyperPi command-line benchmark runner.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use hyperpi::{
    catalog, compute_pi, run_suite, BenchConfig, Category, CsvExporter, WorkerCount,
};
use owo_colors::OwoColorize;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "hyperpi", version, about = "Multi-category CPU throughput benchmark")]
struct Cli {
    /// Worker count (defaults to the number of logical processors)
    #[arg(short = 'p', long)]
    workers: Option<usize>,

    /// Repetition multiplier: each worker slot runs this many times
    #[arg(short = 't', long = "times")]
    times: Option<usize>,

    /// Run only one category (e.g. compute, memory, crypto)
    #[arg(short, long)]
    category: Option<String>,

    /// Show raw scores per workload and enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Also write the report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print this many digits of pi and exit
    #[arg(long, value_name = "DIGITS")]
    pi: Option<usize>,

    /// TOML or YAML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Also export per-workload results as CSV
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Compare the composite score with a baseline score
    #[arg(long, value_name = "SCORE")]
    baseline: Option<f64>,

    /// List registered workloads and exit
    #[arg(long)]
    list: bool,

    /// Do not print the host summary
    #[arg(long)]
    no_host_info: bool,
}

impl Cli {
    /// Loads the configuration file, if any, and applies flag overrides.
    fn bench_config(&self) -> Result<BenchConfig> {
        let mut config = match &self.config {
            Some(path) => BenchConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => BenchConfig::new(),
        };
        if let Some(workers) = self.workers {
            config.workers = WorkerCount::Count(workers);
        }
        if let Some(times) = self.times {
            config.repetitions = times;
        }
        if let Some(category) = &self.category {
            config.category = Some(category.clone());
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(digits) = cli.pi {
        let pi = compute_pi(digits).context("cannot compute pi")?;
        println!("{}", pi);
        return Ok(());
    }

    if cli.list {
        print_catalog();
        return Ok(());
    }

    let config = cli.bench_config()?;
    hyperpi::console::init(cli.verbose);

    if !cli.no_host_info && !cli.json {
        print_host_info(config.worker_count(), config.repetitions);
    }

    let mut report = run_suite(&config)?.with_verbose(cli.verbose);
    if let Some(baseline) = cli.baseline {
        report = report.with_baseline(baseline);
    }

    let rendered = if cli.json {
        report.to_json().context("failed to serialize report")?
    } else {
        report.to_string()
    };
    println!("{}", rendered);

    if let Some(path) = &cli.output {
        save(path, "report", || std::fs::write(path, &rendered));
    }
    if let Some(path) = &cli.csv {
        save(path, "CSV export", || CsvExporter::to_file(&report, path));
    }

    Ok(())
}

// Write failures are reported but do not change the exit status.
fn save(path: &Path, what: &str, write: impl FnOnce() -> io::Result<()>) -> bool {
    match write() {
        Ok(()) => {
            eprintln!("{} saved to {}", what, path.display());
            true
        }
        Err(e) => {
            error!(event = "report_write_failed", path = %path.display(), error = %e);
            eprintln!("failed to save {} to {}: {}", what, path.display(), e);
            false
        }
    }
}

fn print_host_info(workers: usize, repetitions: usize) {
    let logical = std::thread::available_parallelism().map_or(1, |n| n.get());
    let line = format!(
        "Host: {} {} | logical CPUs: {} | workers: {} | repetitions: {}",
        std::env::consts::OS,
        std::env::consts::ARCH,
        logical,
        workers,
        repetitions
    );
    if io::stdout().is_terminal() {
        println!("{}\n", line.bright_white().bold());
    } else {
        println!("{}\n", line);
    }
}

fn print_catalog() {
    let workloads = catalog();
    for category in Category::ALL {
        println!("{}", category.name().bright_cyan().bold());
        for workload in workloads.iter().filter(|w| w.category() == category) {
            println!("  {:<22} {}", workload.name(), workload.description());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::parse_from(["hyperpi", "-p", "4", "-t", "2", "-c", "memory", "-v"]);
        assert_eq!(cli.workers, Some(4));
        assert_eq!(cli.times, Some(2));
        assert_eq!(cli.category.as_deref(), Some("memory"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_save_to_missing_directory_returns_false() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("report.txt");
        assert!(!save(&path, "report", || std::fs::write(&path, "x")));
        assert!(!path.exists());

        let ok = dir.path().join("report.txt");
        assert!(save(&ok, "report", || std::fs::write(&ok, "x")));
        assert_eq!(std::fs::read_to_string(&ok).unwrap(), "x");
    }

    #[test]
    fn test_negative_digits_rejected() {
        assert!(Cli::try_parse_from(["hyperpi", "--pi", "-5"]).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bench.toml");
        std::fs::write(&path, "repetitions = 3\ncategory = \"crypto\"\n").unwrap();

        let cli = Cli::parse_from([
            "hyperpi",
            "--config",
            path.to_str().unwrap(),
            "-t",
            "5",
        ]);
        let config = cli.bench_config().unwrap();
        assert_eq!(config.repetitions, 5);
        assert_eq!(config.category.as_deref(), Some("crypto"));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let cli = Cli::parse_from(["hyperpi", "-p", "0"]);
        assert!(cli.bench_config().is_err());
    }
}
