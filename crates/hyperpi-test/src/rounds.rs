//! Round policies for tests.

use hyperpi_config::{BenchConfig, RoundConfig};

/// Few rounds and a millisecond target.
pub fn fast_rounds() -> RoundConfig {
    RoundConfig {
        target_seconds: 0.001,
        min_rounds: 4,
        max_rounds: 8,
        trim_fraction: 0.2,
    }
}

/// A config with two workers, fixed seed and [`fast_rounds`].
pub fn fast_config() -> BenchConfig {
    BenchConfig::new()
        .with_workers(2)
        .with_repetitions(1)
        .with_seed(7)
        .with_rounds(fast_rounds())
}
