//! Pi digit generation.
//!
//! A Machin-formula spigot over base-10000 limbs:
//!
//! ```text
//! pi = 16 * atan(1/5) - 4 * atan(1/239)
//! ```
//!
//! Each arctangent series is evaluated term by term into a fixed-width
//! accumulator. Intermediate values stay below `57121 * 10000`, so plain
//! `i64` arithmetic suffices.

use std::fmt;

use crate::error::{HyperPiError, Result};

const BASE: i64 = 10_000;
const LIMB_DIGITS: usize = 4;
const GUARD_LIMBS: usize = 3;

// (16 * 5, 5^2) is added first, (4 * 239, 239^2) is subtracted first.
const SERIES: [(i64, i64); 2] = [(80, 25), (956, 57_121)];

/// Decimal expansion of pi produced by [`compute_pi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PiDigits {
    integer: u8,
    limbs: Vec<u16>,
    digits: usize,
}

impl PiDigits {
    /// Number of fractional digits.
    pub fn len(&self) -> usize {
        self.digits
    }

    pub fn is_empty(&self) -> bool {
        self.digits == 0
    }

    /// The integer part (always 3).
    pub fn integer(&self) -> u8 {
        self.integer
    }

    /// Base-10000 limbs of the fraction, most significant first.
    pub fn limbs(&self) -> &[u16] {
        &self.limbs
    }

    /// The fractional digits without the leading `3.`.
    pub fn fraction(&self) -> String {
        let mut out = String::with_capacity(self.limbs.len() * LIMB_DIGITS);
        for limb in &self.limbs {
            out.push_str(&format!("{:04}", limb));
        }
        out.truncate(self.digits);
        out
    }

    /// Folds the limbs into a checksum.
    pub fn checksum(&self) -> u64 {
        self.limbs
            .iter()
            .fold(self.integer as u64, |acc, &limb| {
                acc.wrapping_mul(BASE as u64).wrapping_add(limb as u64)
            })
    }
}

impl fmt::Display for PiDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.integer, self.fraction())
    }
}

/// Computes the first `digits` fractional digits of pi.
///
/// # Errors
///
/// Returns [`HyperPiError::InvalidDigitCount`] when `digits` is zero.
///
/// # Example
///
/// ```
/// use hyperpi_core::compute_pi;
///
/// let pi = compute_pi(10).unwrap();
/// assert_eq!(pi.to_string(), "3.1415926535");
/// ```
pub fn compute_pi(digits: usize) -> Result<PiDigits> {
    if digits == 0 {
        return Err(HyperPiError::InvalidDigitCount(digits));
    }

    let slots = digits.div_ceil(LIMB_DIGITS) + GUARD_LIMBS;
    let mut acc = vec![0i64; slots];
    let mut term = vec![0i64; slots];

    for (pass, &(numerator, divisor)) in SERIES.iter().enumerate() {
        term.fill(0);
        term[0] = numerator;
        let mut add = pass == 0;
        let mut head = 0;
        let mut odd = 1i64;

        while head < slots {
            let mut rem = 0i64;
            let mut frac = 0i64;
            for j in head..slots {
                let p = rem * BASE + term[j];
                term[j] = p / divisor;
                rem = p % divisor;

                let t = frac * BASE + term[j];
                let u = t / odd;
                frac = t % odd;

                if add {
                    acc[j] += u;
                } else {
                    acc[j] -= u;
                }
            }
            if term[head] == 0 {
                head += 1;
            }
            odd += 2;
            add = !add;
        }
    }

    let mut carry = -1i64;
    for slot in (1..slots).rev() {
        let t = acc[slot] + carry;
        acc[slot] = t % BASE;
        if acc[slot] < 0 {
            acc[slot] += BASE;
            carry = t / BASE - 1;
        } else {
            carry = t / BASE;
        }
    }

    let integer = u8::try_from(acc[0] + carry)
        .map_err(|_| HyperPiError::Internal("digit accumulator overflowed".to_string()))?;
    let limbs = acc[1..slots - 2].iter().map(|&limb| limb as u16).collect();

    Ok(PiDigits {
        integer,
        limbs,
        digits,
    })
}
