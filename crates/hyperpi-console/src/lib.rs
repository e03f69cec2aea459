//! Colorful console output for benchmark lifecycle events.
//!
//! Provides a custom `tracing` layer that formats suite and workload events
//! with colors on stderr, leaving stdout to the report.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (suite/workload start and end)
//! - **WARN**: Failed workloads and unknown category filters
//! - **DEBUG**: Round plans and individual rounds

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// overrides the default filter, which is `hyperpi=info`, or `hyperpi=debug`
/// when `verbose` is set.
pub fn init(verbose: bool) {
    INIT.get_or_init(|| {
        EPOCH.get_or_init(Instant::now);
        print_banner();

        let default = if verbose {
            "hyperpi=debug"
        } else {
            "hyperpi=info"
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(HyperPiConsoleLayer)
            .try_init();
    });
}

// Returns elapsed time since init.
fn elapsed_secs() -> f64 {
    EPOCH.get().map_or(0.0, |epoch| epoch.elapsed().as_secs_f64())
}

fn print_banner() {
    let banner = r#"
 _   _                       ____  _
| | | |_   _ _ __   ___ _ __|  _ \(_)
| |_| | | | | '_ \ / _ \ '__| |_) | |
|  _  | |_| | |_) |  __/ |  |  __/| |
|_| |_|\__, | .__/ \___|_|  |_|   |_|
       |___/|_|
"#;

    let version_line = format!("          v{} - CPU Throughput Benchmark\n", VERSION);

    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{}", banner.bright_cyan());
    let _ = writeln!(stderr, "{}", version_line.bright_white().bold());
    let _ = stderr.flush();
}

/// A tracing layer that formats benchmark events with colors.
pub struct HyperPiConsoleLayer;

impl<S: Subscriber> Layer<S> for HyperPiConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("hyperpi") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    workload: Option<String>,
    category: Option<String>,
    error: Option<String>,
    message: Option<String>,
    workload_count: Option<u64>,
    workers: Option<u64>,
    repetitions: Option<u64>,
    failed: Option<u64>,
    rounds: Option<u64>,
    round: Option<u64>,
    planned: Option<u64>,
    score: Option<f64>,
    duration_ms: Option<f64>,
    elapsed_ms: Option<f64>,
    estimate_ms: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "workload" => self.workload = Some(s.trim_matches('"').to_string()),
            "category" => self.category = Some(s.trim_matches('"').to_string()),
            "error" => self.error = Some(s),
            "message" => self.message = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "workload_count" => self.workload_count = Some(value),
            "workers" => self.workers = Some(value),
            "repetitions" => self.repetitions = Some(value),
            "failed" => self.failed = Some(value),
            "rounds" => self.rounds = Some(value),
            "round" => self.round = Some(value),
            "planned" => self.planned = Some(value),
            "duration_ms" => self.duration_ms = Some(value as f64),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "score" => self.score = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "elapsed_ms" => self.elapsed_ms = Some(value),
            "estimate_ms" => self.estimate_ms = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "workload" => self.workload = Some(value.to_string()),
            "category" => self.category = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            "message" => self.message = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "suite_start" => format_suite_start(v),
        "suite_end" => format_suite_end(v),
        "workload_start" => format_workload_start(v),
        "workload_end" => format_workload_end(v),
        "workload_failed" => format_workload_failed(v),
        "unknown_category" => format_unknown_category(v),
        "round_plan" => format_round_plan(v),
        "round" => format_round(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>8.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_suite_start(v: &EventVisitor) -> String {
    format!(
        "{} {} Benchmark │ {} workloads │ {} workers │ x{} repetitions",
        format_elapsed(),
        "▶".bright_green().bold(),
        v.workload_count
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_yellow(),
        v.workers
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_yellow(),
        v.repetitions.unwrap_or(1).bright_yellow(),
    )
}

fn format_suite_end(v: &EventVisitor) -> String {
    let failed = v.failed.unwrap_or(0);
    let status = if failed == 0 {
        "ALL PASSED".bright_green().bold().to_string()
    } else {
        format!("{} FAILED", failed).bright_red().bold().to_string()
    };

    format!(
        "{} {} Benchmark complete │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0.0)).yellow(),
        status
    )
}

fn format_workload_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} {}",
        format_elapsed(),
        "▶".bright_blue(),
        v.workload.as_deref().unwrap_or("unknown").white().bold(),
        format!("[{}]", v.category.as_deref().unwrap_or("-")).bright_black(),
    )
}

fn format_workload_end(v: &EventVisitor) -> String {
    format!(
        "{} {} {} done │ {} │ {} rounds │ raw score {}",
        format_elapsed(),
        "◀".bright_blue(),
        v.workload.as_deref().unwrap_or("unknown").white().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0.0)).yellow(),
        v.rounds
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .white(),
        format_score(v.score.unwrap_or(0.0)).bright_magenta().bold(),
    )
}

fn format_workload_failed(v: &EventVisitor) -> String {
    format!(
        "{} {} {} failed │ {}",
        format_elapsed(),
        "✗".bright_red().bold(),
        v.workload.as_deref().unwrap_or("unknown").white().bold(),
        v.error.as_deref().unwrap_or("unknown error").bright_red(),
    )
}

fn format_unknown_category(v: &EventVisitor) -> String {
    format!(
        "{} {} unknown category {} │ nothing to run",
        format_elapsed(),
        "!".bright_yellow().bold(),
        v.category.as_deref().unwrap_or("?").bright_yellow(),
    )
}

fn format_round_plan(v: &EventVisitor) -> String {
    format!(
        "{}   estimate {} │ planning {} rounds",
        format_elapsed(),
        format_duration_ms(v.estimate_ms.unwrap_or(0.0)).bright_black(),
        v.planned.unwrap_or(0).bright_black(),
    )
}

fn format_round(v: &EventVisitor) -> String {
    format!(
        "{}   round {:>3} │ {} │ raw score {}",
        format_elapsed(),
        v.round.unwrap_or(0).bright_black(),
        format_duration_ms(v.elapsed_ms.unwrap_or(0.0)).bright_black(),
        format_score(v.score.unwrap_or(0.0)).bright_black(),
    )
}

fn format_duration_ms(ms: f64) -> String {
    if ms < 1000.0 {
        format!("{:.2}ms", ms)
    } else if ms < 60_000.0 {
        format!("{:.2}s", ms / 1000.0)
    } else {
        let mins = (ms / 60_000.0).floor();
        let secs = (ms - mins * 60_000.0) / 1000.0;
        format!("{}m {:.2}s", mins as u64, secs)
    }
}

// Thousands separators on the integer part, two decimals.
fn format_score(score: f64) -> String {
    if !score.is_finite() {
        return score.to_string();
    }
    let whole = score.trunc().abs() as u64;
    let frac = ((score.abs() - score.trunc().abs()) * 100.0).round() as u64;
    let (whole, frac) = if frac == 100 { (whole + 1, 0) } else { (whole, frac) };
    let sign = if score < 0.0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, whole.to_formatted_string(&Locale::en), frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(12.5), "12.50ms");
        assert_eq!(format_duration_ms(1500.0), "1.50s");
        assert_eq!(format_duration_ms(125_000.0), "2m 5.00s");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(1234567.891), "1,234,567.89");
        assert_eq!(format_score(0.999), "1.00");
        assert_eq!(format_score(-12.5), "-12.50");
    }

    #[test]
    fn test_unknown_event_is_silent() {
        let v = EventVisitor {
            event: Some("something_else".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&v).is_empty());
    }

    #[test]
    fn test_failed_event_mentions_workload() {
        let v = EventVisitor {
            event: Some("workload_failed".to_string()),
            workload: Some("sorting".to_string()),
            error: Some("boom".to_string()),
            ..EventVisitor::default()
        };
        let line = format_event(&v);
        assert!(line.contains("sorting"));
        assert!(line.contains("boom"));
    }

    #[test]
    fn test_init_is_idempotent() {
        init(false);
        init(true);
    }
}
