//! Universal affine hash family over a prime modulus.
//!
//! Each member of the family maps an encoded key `x` to a bit-array index via
//!
//! ```text
//! h_{a,b}(x) = (((a·x) mod MAX_UINT + b) mod k) mod size
//! ```
//!
//! where `k` is the first prime strictly greater than `size` and `(a, b)` are
//! random coefficients drawn uniformly from `[1, k-1]`. Choosing `k` prime and
//! larger than `size` guarantees `(a·x + b)` shares no common factor with the
//! modulus, which is what makes the family universal: distinct coefficient
//! pairs behave like independent hash functions.
//!
//! # Overflow Control
//!
//! The product `a·x` is computed in 128-bit arithmetic and reduced modulo
//! [`MAX_UINT`](crate::encode::MAX_UINT) before `b` is added. After that
//! reduction every operand fits in a `u64` with room to spare, so no step can
//! wrap.
//!
//! # Determinism
//!
//! Coefficients come from a caller-supplied RNG rather than process-wide
//! random state. Construct the family (or the filter above it) from a seeded
//! RNG and every run hashes identically.

use crate::encode::MAX_UINT;
use crate::error::{Result, SoftBloomError};
use crate::prime::next_prime;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A fixed family of affine hash functions sharing one prime modulus.
///
/// The coefficient sequence is generated once at construction and immutable
/// afterward; the family never grows or shrinks.
///
/// # Examples
///
/// ```
/// use softbloom::hash::AffineHashFamily;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let family = AffineHashFamily::generate(1000, 7, &mut rng).unwrap();
///
/// assert_eq!(family.len(), 7);
/// let idx = family.index_of(12345, 0);
/// assert!(idx < 1000);
/// // Same key, same function, same index
/// assert_eq!(idx, family.index_of(12345, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AffineHashFamily {
    /// `(a, b)` coefficient pairs, one per hash function.
    coefficients: Vec<(u64, u64)>,
    /// Prime modulus `k`: first prime strictly greater than `size`.
    modulus: u64,
    /// Bit-array length the indices are reduced into.
    size: u64,
}

impl AffineHashFamily {
    /// Generate a family of `count` hash functions for a bit array of
    /// `size` bits, drawing coefficients from `rng`.
    ///
    /// # Errors
    ///
    /// - [`SoftBloomError::InvalidFilterSize`] if `size == 0`
    /// - [`SoftBloomError::InvalidHashCount`] if `count == 0`
    pub fn generate<R: Rng + ?Sized>(size: usize, count: usize, rng: &mut R) -> Result<Self> {
        if size == 0 {
            return Err(SoftBloomError::invalid_filter_size(size));
        }
        if count == 0 {
            return Err(SoftBloomError::invalid_hash_count(count));
        }

        let modulus = next_prime(size as u64);
        let coefficients = (0..count)
            .map(|_| (rng.gen_range(1..modulus), rng.gen_range(1..modulus)))
            .collect();

        Ok(Self {
            coefficients,
            modulus,
            size: size as u64,
        })
    }

    /// Number of hash functions in the family.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// Always `false`: generation rejects empty families.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// The prime modulus `k`.
    #[must_use]
    #[inline]
    pub const fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Bit-array length indices are reduced into.
    #[must_use]
    #[inline]
    pub const fn size(&self) -> usize {
        self.size as usize
    }

    /// Map an encoded key to a bit-array index with function `fn_index`.
    ///
    /// # Panics
    ///
    /// Panics if `fn_index >= len()`.
    #[must_use]
    #[inline]
    pub fn index_of(&self, encoded_key: u64, fn_index: usize) -> usize {
        let (a, b) = self.coefficients[fn_index];
        // a·x can exceed 64 bits (a < k, x < 2^32); widen, then reduce.
        let product = (u128::from(a) * u128::from(encoded_key) % u128::from(MAX_UINT)) as u64;
        (((product + b) % self.modulus) % self.size) as usize
    }

    /// Iterate over every family member's index for `encoded_key`.
    pub fn indices(&self, encoded_key: u64) -> impl Iterator<Item = usize> + '_ {
        (0..self.coefficients.len()).map(move |i| self.index_of(encoded_key, i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn family(size: usize, count: usize, seed: u64) -> AffineHashFamily {
        let mut rng = StdRng::seed_from_u64(seed);
        AffineHashFamily::generate(size, count, &mut rng).unwrap()
    }

    #[test]
    fn test_generate_sets_prime_modulus() {
        let f = family(1000, 7, 1);
        assert_eq!(f.modulus(), 1009);
        assert_eq!(f.size(), 1000);
        assert_eq!(f.len(), 7);
    }

    #[test]
    fn test_generate_rejects_degenerate_input() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            AffineHashFamily::generate(0, 7, &mut rng).unwrap_err(),
            SoftBloomError::invalid_filter_size(0)
        );
        assert_eq!(
            AffineHashFamily::generate(1000, 0, &mut rng).unwrap_err(),
            SoftBloomError::invalid_hash_count(0)
        );
    }

    #[test]
    fn test_coefficients_in_range() {
        let f = family(1000, 32, 42);
        for &(a, b) in &f.coefficients {
            assert!((1..f.modulus()).contains(&a));
            assert!((1..f.modulus()).contains(&b));
        }
    }

    #[test]
    fn test_indices_within_bounds() {
        let f = family(997, 16, 3);
        for key in [0u64, 1, 12345, MAX_UINT - 1] {
            for idx in f.indices(key) {
                assert!(idx < 997);
            }
        }
    }

    #[test]
    fn test_deterministic_under_fixed_seed() {
        let f1 = family(5000, 7, 99);
        let f2 = family(5000, 7, 99);
        assert_eq!(f1, f2);
        for key in [0u64, 17, 4_000_000_000] {
            let a: Vec<_> = f1.indices(key).collect();
            let b: Vec<_> = f2.indices(key).collect();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let f1 = family(5000, 7, 1);
        let f2 = family(5000, 7, 2);
        assert_ne!(f1, f2);
    }

    #[test]
    fn test_members_disagree_on_keys() {
        // With 7 functions over 10k slots, at least two members should map a
        // given key to different indices.
        let f = family(10_000, 7, 5);
        let indices: Vec<_> = f.indices(123_456).collect();
        let first = indices[0];
        assert!(indices.iter().any(|&i| i != first));
    }

    #[test]
    fn test_max_key_no_overflow() {
        // Largest encodable key against the largest coefficients the family
        // can draw; must not wrap in debug builds.
        let f = family(usize::MAX >> 32, 4, 8);
        for idx in f.indices(MAX_UINT - 1) {
            assert!(idx < f.size());
        }
    }

    #[test]
    fn test_distribution_roughly_uniform() {
        let f = family(100, 1, 7);
        let mut counts = vec![0usize; 100];
        for key in 0..10_000u64 {
            counts[f.index_of(key, 0)] += 1;
        }
        // Every slot should see some traffic; affine families over a prime
        // modulus do not leave gaps on sequential keys.
        let empty = counts.iter().filter(|&&c| c == 0).count();
        assert!(empty < 5, "{empty} empty slots out of 100");
    }

    #[test]
    fn test_size_one_family() {
        let f = family(1, 3, 11);
        assert_eq!(f.index_of(999, 0), 0);
    }
}
