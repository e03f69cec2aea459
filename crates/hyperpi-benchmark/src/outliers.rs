//! Symmetric outlier trimming over round scores.

use std::time::Duration;

use crate::timing::RoundSample;

/// Rounds to drop from each end: `max(1, floor(n * fraction))`.
pub fn trim_count(n: usize, fraction: f64) -> usize {
    ((n as f64 * fraction).floor() as usize).max(1)
}

/// Sorts rounds by score and drops [`trim_count`] from each end.
///
/// Fewer than four rounds are returned unchanged, as is any input where
/// trimming would leave nothing.
///
/// ```
/// use hyperpi_benchmark::outliers::trim_count;
///
/// assert_eq!(trim_count(4, 0.2), 1);
/// assert_eq!(trim_count(10, 0.2), 2);
/// assert_eq!(trim_count(100, 0.2), 20);
/// ```
pub fn trim_outliers(mut rounds: Vec<RoundSample>, fraction: f64) -> Vec<RoundSample> {
    let n = rounds.len();
    if n < 4 {
        return rounds;
    }
    let k = trim_count(n, fraction);
    if 2 * k >= n {
        return rounds;
    }
    rounds.sort_by(|a, b| a.score.total_cmp(&b.score));
    rounds.truncate(n - k);
    rounds.drain(..k);
    rounds
}

/// Means over kept rounds.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub score: f64,
    pub single_rate: f64,
    pub multi_rate: f64,
    pub efficiency: f64,
    pub duration: Duration,
    pub kept: usize,
}

/// Averages kept rounds. Returns `None` for an empty slice.
pub fn summarize(kept: &[RoundSample]) -> Option<RoundSummary> {
    if kept.is_empty() {
        return None;
    }
    let n = kept.len() as f64;
    let mean = |f: fn(&RoundSample) -> f64| kept.iter().map(f).sum::<f64>() / n;
    let total: Duration = kept.iter().map(|r| r.elapsed).sum();

    Some(RoundSummary {
        score: mean(|r| r.score),
        single_rate: mean(|r| r.single_rate),
        multi_rate: mean(|r| r.multi_rate),
        efficiency: mean(|r| r.efficiency),
        duration: total / kept.len() as u32,
        kept: kept.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(scores: &[f64]) -> Vec<RoundSample> {
        scores
            .iter()
            .map(|&score| RoundSample {
                single: Duration::from_millis(1),
                multi: Duration::from_millis(1),
                elapsed: Duration::from_millis(2),
                single_rate: score,
                multi_rate: score,
                efficiency: 1.0,
                score,
            })
            .collect()
    }

    fn scores(rounds: &[RoundSample]) -> Vec<f64> {
        rounds.iter().map(|r| r.score).collect()
    }

    #[test]
    fn test_short_input_untouched() {
        let kept = trim_outliers(scored(&[3.0, 1.0, 2.0]), 0.2);
        assert_eq!(scores(&kept), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_four_rounds_drop_one_each_end() {
        let kept = trim_outliers(scored(&[40.0, 10.0, 30.0, 20.0]), 0.2);
        assert_eq!(scores(&kept), vec![20.0, 30.0]);
    }

    #[test]
    fn test_ten_rounds_drop_two_each_end() {
        let input: Vec<f64> = (1..=10).rev().map(f64::from).collect();
        let kept = trim_outliers(scored(&input), 0.2);
        assert_eq!(scores(&kept), vec![3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_hundred_rounds_keep_sixty() {
        let input: Vec<f64> = (0..100).map(f64::from).collect();
        let kept = trim_outliers(scored(&input), 0.2);
        assert_eq!(kept.len(), 60);
        assert_eq!(kept[0].score, 20.0);
        assert_eq!(kept[59].score, 79.0);
    }

    #[test]
    fn test_trim_that_empties_keeps_all() {
        let kept = trim_outliers(scored(&[1.0, 2.0, 3.0, 4.0, 5.0]), 0.45);
        assert_eq!(kept.len(), 1);
        let kept = trim_outliers(scored(&[1.0, 2.0, 3.0, 4.0]), 0.5);
        assert_eq!(kept.len(), 4);
    }

    #[test]
    fn test_summarize_means() {
        let summary = summarize(&scored(&[2.0, 4.0])).unwrap();
        assert_eq!(summary.score, 3.0);
        assert_eq!(summary.multi_rate, 3.0);
        assert_eq!(summary.duration, Duration::from_millis(2));
        assert_eq!(summary.kept, 2);
        assert!(summarize(&[]).is_none());
    }
}
