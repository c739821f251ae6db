//! Parameter calculation for soft-deletion Bloom filters.
//!
//! Implements the classic Bloom filter sizing formulas, each extended with an
//! independent scale factor so callers can tune the space/time trade-off:
//!
//! - bits: `m = ⌈c · (-n · ln p) / (ln 2)²⌉`
//! - hashes: `k = max(1, round(d · (m₀/n) · ln 2))`
//!
//! where `n` is the expected element count, `p` the target false positive
//! rate, `c` the bit-array scale factor, `d` the hash-count scale factor, and
//! `m₀` the *unscaled* bit count (the value of `m` at `c = 1`).
//!
//! # Scale Factor Decoupling
//!
//! The hash-count formula deliberately takes the unscaled bit count: growing
//! the bit array via `c` leaves the number of hash functions unchanged, so the
//! two knobs can be studied independently. Feeding the scaled size in would
//! silently couple them.
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/Time Trade-offs in Hash Coding with
//!   Allowable Errors"

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use crate::error::{Result, SoftBloomError};
use std::f64::consts::LN_2;

/// Mathematical constant: (ln 2)² ≈ 0.4804530139182014.
const LN2_SQUARED: f64 = LN_2 * LN_2;

/// Validate an expected-element count.
pub(crate) fn validate_items(n: usize) -> Result<()> {
    if n == 0 {
        return Err(SoftBloomError::invalid_item_count(n));
    }
    Ok(())
}

/// Validate a target false positive rate.
pub(crate) fn validate_fp_rate(fp_rate: f64) -> Result<()> {
    if !fp_rate.is_finite() || fp_rate <= 0.0 || fp_rate >= 1.0 {
        return Err(SoftBloomError::fp_rate_out_of_bounds(fp_rate));
    }
    Ok(())
}

/// Validate a scale factor (must be finite and strictly positive).
pub(crate) fn validate_scale(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SoftBloomError::invalid_scale_factor(name, value));
    }
    Ok(())
}

/// Calculate the bit-array length for the given constraints.
///
/// Implements `m = ⌈c · (-n · ln p) / (ln 2)²⌉`, clamped to at least 1 bit.
///
/// # Arguments
///
/// * `n` - Expected number of elements (must be > 0)
/// * `fp_rate` - Target false positive rate (must be in (0, 1))
/// * `size_scale` - Bit-array scale factor `c` (must be finite and > 0)
///
/// # Errors
///
/// - [`SoftBloomError::InvalidItemCount`] if `n == 0`
/// - [`SoftBloomError::FalsePositiveRateOutOfBounds`] if `fp_rate` is not in (0, 1)
/// - [`SoftBloomError::InvalidScaleFactor`] if `size_scale` is non-positive
/// - [`SoftBloomError::InvalidParameters`] if the result exceeds system limits
///
/// # Examples
///
/// ```
/// use softbloom::core::params::scaled_bit_count;
///
/// // 1000 items at 1% -> the classic 9586 bits
/// let m = scaled_bit_count(1000, 0.01, 1.0).unwrap();
/// assert_eq!(m, 9586);
///
/// // Doubling the scale factor doubles the array
/// let m2 = scaled_bit_count(1000, 0.01, 2.0).unwrap();
/// assert!(m2 >= 2 * m - 1);
/// ```
pub fn scaled_bit_count(n: usize, fp_rate: f64, size_scale: f64) -> Result<usize> {
    validate_items(n)?;
    validate_fp_rate(fp_rate)?;
    validate_scale("size", size_scale)?;

    let m = size_scale * (-(n as f64) * fp_rate.ln()) / LN2_SQUARED;

    if m > (usize::MAX / 2) as f64 {
        return Err(SoftBloomError::invalid_parameters(format!(
            "calculated bit count {:.0} exceeds system limits",
            m
        )));
    }

    // Round up so the target rate is met or beaten; never below one bit.
    Ok((m.ceil() as usize).max(1))
}

/// Calculate the number of hash functions for the given constraints.
///
/// Implements `k = max(1, round(d · (m₀/n) · ln 2))`.
///
/// `unscaled_bits` must be the bit count computed with `size_scale = 1`; see
/// the module docs for why the scaled size is *not* used here.
///
/// # Arguments
///
/// * `unscaled_bits` - Unscaled bit count `m₀` (must be > 0)
/// * `n` - Expected number of elements (must be > 0)
/// * `count_scale` - Hash-count scale factor `d` (must be finite and > 0)
///
/// # Errors
///
/// - [`SoftBloomError::InvalidFilterSize`] if `unscaled_bits == 0`
/// - [`SoftBloomError::InvalidItemCount`] if `n == 0`
/// - [`SoftBloomError::InvalidScaleFactor`] if `count_scale` is non-positive
///
/// # Examples
///
/// ```
/// use softbloom::core::params::scaled_hash_count;
///
/// // 9586 bits for 1000 items -> the classic k = 7
/// assert_eq!(scaled_hash_count(9586, 1000, 1.0).unwrap(), 7);
///
/// // Tiny filters still get at least one hash function
/// assert_eq!(scaled_hash_count(1, 1000, 1.0).unwrap(), 1);
/// ```
pub fn scaled_hash_count(unscaled_bits: usize, n: usize, count_scale: f64) -> Result<usize> {
    if unscaled_bits == 0 {
        return Err(SoftBloomError::invalid_filter_size(unscaled_bits));
    }
    validate_items(n)?;
    validate_scale("hash-count", count_scale)?;

    let k = count_scale * (unscaled_bits as f64 / n as f64) * LN_2;

    // No upper clamp: an oversized d is a legitimate experiment (the filter
    // saturates toward all-ones, which callers can observe via fill_ratio).
    Ok((k.round() as usize).max(1))
}

/// Theoretical false positive rate after `n` insertions.
///
/// Implements `p = (1 - e^(-kn/m))^k`, the standard estimate assuming
/// independent, uniform hash functions. Returns 0.0 for an empty filter.
///
/// # Examples
///
/// ```
/// use softbloom::core::params::expected_fp_rate;
///
/// let p = expected_fp_rate(9586, 1000, 7);
/// assert!((p - 0.01).abs() < 0.002);
/// assert_eq!(expected_fp_rate(9586, 0, 7), 0.0);
/// ```
#[must_use]
pub fn expected_fp_rate(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 || k == 0 || n == 0 {
        return 0.0;
    }

    let exponent = -((k * n) as f64) / m as f64;
    let prob_bit_one = 1.0 - exponent.exp();
    prob_bit_one.powf(k as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_count_classic_values() {
        assert_eq!(scaled_bit_count(1000, 0.01, 1.0).unwrap(), 9586);
        // 100k items at 0.1%
        let m = scaled_bit_count(100_000, 0.001, 1.0).unwrap();
        assert!((1_437_758..=1_437_760).contains(&m));
    }

    #[test]
    fn test_bit_count_scaling() {
        let m1 = scaled_bit_count(1000, 0.01, 1.0).unwrap();
        let m3 = scaled_bit_count(1000, 0.01, 3.0).unwrap();
        let ratio = m3 as f64 / m1 as f64;
        assert!((ratio - 3.0).abs() < 0.01);
    }

    #[test]
    fn test_bit_count_rejects_zero_items() {
        assert_eq!(
            scaled_bit_count(0, 0.01, 1.0),
            Err(SoftBloomError::invalid_item_count(0))
        );
    }

    #[test]
    fn test_bit_count_rejects_bad_fp_rate() {
        for fp in [0.0, 1.0, -0.5, 2.0, f64::NAN, f64::INFINITY] {
            assert!(scaled_bit_count(1000, fp, 1.0).is_err(), "fp={fp}");
        }
    }

    #[test]
    fn test_bit_count_rejects_bad_scale() {
        for c in [0.0, -1.0] {
            assert_eq!(
                scaled_bit_count(1000, 0.01, c),
                Err(SoftBloomError::invalid_scale_factor("size", c)),
                "c={c}"
            );
        }
        // NaN never compares equal to itself, so match on the payload instead.
        assert!(matches!(
            scaled_bit_count(1000, 0.01, f64::NAN),
            Err(SoftBloomError::InvalidScaleFactor { name: "size", value }) if value.is_nan()
        ));
    }

    #[test]
    fn test_hash_count_classic_values() {
        assert_eq!(scaled_hash_count(9586, 1000, 1.0).unwrap(), 7);
        assert_eq!(scaled_hash_count(1_000_000, 100_000, 1.0).unwrap(), 7);
    }

    #[test]
    fn test_hash_count_never_zero() {
        assert_eq!(scaled_hash_count(1, 1_000_000, 1.0).unwrap(), 1);
        assert_eq!(scaled_hash_count(100, 1000, 0.001).unwrap(), 1);
    }

    #[test]
    fn test_hash_count_scales_with_d() {
        let k1 = scaled_hash_count(9586, 1000, 1.0).unwrap();
        let k4 = scaled_hash_count(9586, 1000, 4.0).unwrap();
        assert!(k4 > k1);
        // No clamp: large d keeps growing k
        let k100 = scaled_hash_count(9586, 1000, 100.0).unwrap();
        assert!(k100 > 100);
    }

    #[test]
    fn test_hash_count_decoupled_from_size_scale() {
        // The unscaled bit count drives k regardless of how big the actual
        // array is; callers pass m0, not m.
        let m0 = scaled_bit_count(1000, 0.01, 1.0).unwrap();
        let k_small = scaled_hash_count(m0, 1000, 1.0).unwrap();
        let _m_big = scaled_bit_count(1000, 0.01, 10.0).unwrap();
        let k_big = scaled_hash_count(m0, 1000, 1.0).unwrap();
        assert_eq!(k_small, k_big);
    }

    #[test]
    fn test_hash_count_rejects_invalid() {
        assert!(scaled_hash_count(0, 1000, 1.0).is_err());
        assert!(scaled_hash_count(9586, 0, 1.0).is_err());
        assert!(scaled_hash_count(9586, 1000, 0.0).is_err());
    }

    #[test]
    fn test_expected_fp_rate_near_target() {
        let p = expected_fp_rate(9586, 1000, 7);
        assert!((p - 0.01).abs() < 0.002);
    }

    #[test]
    fn test_expected_fp_rate_empty_filter() {
        assert_eq!(expected_fp_rate(9586, 0, 7), 0.0);
    }

    #[test]
    fn test_expected_fp_rate_saturated() {
        // Far more insertions than capacity pushes the rate toward 1
        let p = expected_fp_rate(100, 10_000, 7);
        assert!(p > 0.99);
    }

    #[test]
    fn test_expected_fp_rate_monotone_in_n() {
        let mut last = 0.0;
        for n in [10, 100, 500, 1000, 5000] {
            let p = expected_fp_rate(9586, n, 7);
            assert!(p >= last);
            last = p;
        }
    }
}
