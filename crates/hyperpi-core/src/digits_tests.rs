//! Tests for the pi spigot.

use crate::digits::compute_pi;
use crate::error::HyperPiError;

const FIRST_100: &str = "1415926535897932384626433832795028841971693993751058209749445923078164062862089986280348253421170679";

#[test]
fn test_first_ten_digits() {
    assert_eq!(compute_pi(10).unwrap().to_string(), "3.1415926535");
}

#[test]
fn test_first_hundred_digits() {
    let pi = compute_pi(100).unwrap();
    assert_eq!(pi.fraction(), FIRST_100);
    assert_eq!(pi.len(), 100);
}

#[test]
fn test_non_multiple_of_four_truncates() {
    assert_eq!(compute_pi(1).unwrap().to_string(), "3.1");
    assert_eq!(compute_pi(7).unwrap().fraction(), "1415926");
    assert_eq!(compute_pi(12).unwrap().fraction(), "141592653589");
}

#[test]
fn test_prefix_stable_across_lengths() {
    for n in [10, 13, 50, 99, 100] {
        let pi = compute_pi(n).unwrap();
        assert_eq!(pi.fraction(), &FIRST_100[..n], "n = {}", n);
    }
}

#[test]
fn test_thousand_digits_tail() {
    let pi = compute_pi(1000).unwrap();
    let fraction = pi.fraction();
    assert_eq!(fraction.len(), 1000);
    assert!(fraction.starts_with(FIRST_100));
    assert!(fraction.ends_with("2164201989"));
}

#[test]
fn test_deterministic() {
    let a = compute_pi(500).unwrap();
    let b = compute_pi(500).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.checksum(), b.checksum());
}

#[test]
fn test_integer_part() {
    let pi = compute_pi(4).unwrap();
    assert_eq!(pi.integer(), 3);
    assert_eq!(pi.limbs(), &[1415]);
}

#[test]
fn test_zero_digits_rejected() {
    match compute_pi(0) {
        Err(HyperPiError::InvalidDigitCount(0)) => {}
        other => panic!("expected InvalidDigitCount, got {:?}", other),
    }
}
