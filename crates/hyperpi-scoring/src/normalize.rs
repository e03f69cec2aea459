// Log-scale score normalization.

/// Normalized value for a non-positive raw score.
pub const SCORE_FLOOR: f64 = 0.1;

/// Normalized value for a `NaN` or infinite raw score.
pub const NON_FINITE_SCORE: f64 = 10_000.0;

/// Raw scores are capped here before the log transform.
pub const SCORE_CAP: f64 = 10_000_000.0;

/// Maps a raw score onto the common log scale.
///
/// `log10(min(score, SCORE_CAP) / 1000 + 1) * 1000` for positive scores,
/// [`SCORE_FLOOR`] for `score <= 0` and [`NON_FINITE_SCORE`] for `NaN` or
/// infinities. The result is always finite.
///
/// ```
/// use hyperpi_scoring::normalize_score;
///
/// assert!((normalize_score(9000.0) - 1000.0).abs() < 1e-9);
/// assert_eq!(normalize_score(-5.0), 0.1);
/// assert_eq!(normalize_score(f64::NAN), 10_000.0);
/// ```
pub fn normalize_score(score: f64) -> f64 {
    if !score.is_finite() {
        return NON_FINITE_SCORE;
    }
    if score <= 0.0 {
        return SCORE_FLOOR;
    }
    let capped = score.min(SCORE_CAP);
    (capped / 1000.0 + 1.0).log10() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_for_non_positive() {
        assert_eq!(normalize_score(0.0), SCORE_FLOOR);
        assert_eq!(normalize_score(-0.0), SCORE_FLOOR);
        assert_eq!(normalize_score(-1e12), SCORE_FLOOR);
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(normalize_score(f64::INFINITY), NON_FINITE_SCORE);
        assert_eq!(normalize_score(f64::NEG_INFINITY), NON_FINITE_SCORE);
        assert_eq!(normalize_score(f64::NAN), NON_FINITE_SCORE);
    }

    #[test]
    fn test_cap() {
        let at_cap = normalize_score(SCORE_CAP);
        assert_eq!(normalize_score(SCORE_CAP * 10.0), at_cap);
        // log10(10_001) * 1000
        assert!((at_cap - 4000.0434).abs() < 1e-3);
    }

    #[test]
    fn test_monotonic() {
        let samples = [1e-6, 0.5, 1.0, 10.0, 999.0, 1000.0, 1e5, 9_999_999.0];
        for pair in samples.windows(2) {
            assert!(
                normalize_score(pair[0]) < normalize_score(pair[1]),
                "{} vs {}",
                pair[0],
                pair[1]
            );
        }
    }
}
