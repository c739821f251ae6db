//! Prime search by trial division.
//!
//! Two primes are required per filter construction: the affine hash family's
//! modulus (first prime after the bit-array length) and the removal table's
//! bucket count (first prime after a tenth of the expected element count).
//! Both are small enough that trial division up to `sqrt(candidate)` is
//! entirely adequate; no sieve or probabilistic test is warranted.

/// Return the smallest prime strictly greater than `n`.
///
/// Deterministic, no side effects.
///
/// # Examples
///
/// ```
/// use softbloom::prime::next_prime;
///
/// assert_eq!(next_prime(0), 2);
/// assert_eq!(next_prime(2), 3);
/// assert_eq!(next_prime(10), 11);
/// assert_eq!(next_prime(7919), 7927);
/// ```
#[must_use]
pub fn next_prime(n: u64) -> u64 {
    let mut candidate = n + 1;
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}

/// Trial-division primality test, divisors up to and including
/// `sqrt(candidate)`.
fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true; // 2 and 3
    }
    if n % 2 == 0 {
        return false;
    }
    let mut divisor = 3;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}
