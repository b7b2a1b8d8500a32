//! Prime bucket-count sizing.
//!
//! Bucket and slot counts are kept prime so that `hash % bucket_count` spreads keys
//! independently of any regularity in the hash values.

use crate::{TableError, table::invariant_violation};

/// Returns true if `n` is prime.
///
/// Uses trial division by every `i` with `i * i <= n`. Values `<= 1` are never prime.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: usize) -> bool {
    if n <= 1 {
        return false;
    }

    let mut divisor: usize = 2;
    while divisor.saturating_mul(divisor) <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor = divisor.saturating_add(1);
    }
    true
}

/// Returns the smallest prime greater than or equal to `n`.
///
/// # Panics
///
/// Panics if no prime `>= n` fits in `usize`.
#[must_use]
pub fn next_prime(n: usize) -> usize {
    let mut candidate = n;
    while !is_prime(candidate) {
        candidate = match candidate.checked_add(1) {
            Some(next) => next,
            None => invariant_violation(TableError::PrimeOverflow { start: n }),
        };
    }
    candidate
}
