//! Bloom filter with soft deletion.
//!
//! A standard bit-array Bloom filter cannot delete: clearing a bit risks
//! false negatives for every other member sharing it. This filter pairs the
//! bit array with an exact [`RemovalTable`] and defines logical presence as
//!
//! ```text
//! present(s) = every family index bit set  AND  NOT removal-table member
//! ```
//!
//! `remove` never touches the bit array; it records the string in the table.
//! A later `insert` of the same string clears the record, so the table is the
//! sole undo mechanism and the bit array stays monotone.
//!
//! # Protocol
//!
//! - `insert(s)`: no-op when `contains(s)` already holds; otherwise clears any
//!   soft-delete record for `s`, then sets every family index bit.
//! - `contains(s)`: `false` immediately when `s` is soft-deleted; otherwise
//!   `true` only if every index bit is set (one zero bit proves absence).
//! - `remove(s)`: records `s` in the table when `contains(s)` holds; silent
//!   no-op otherwise. Removing a false positive is indistinguishable from
//!   removing a member at this boundary, and is handled identically.
//!
//! # Guarantees
//!
//! - No false negatives for strings inserted and never removed.
//! - A removed string is never reported present until re-inserted.
//! - False positives occur at a rate tunable via the construction parameters.
//!
//! # Concurrency
//!
//! Single-threaded by design: all state is exclusively owned, mutations take
//! `&mut self`, and there are no suspension points. Wrap a whole filter in a
//! `Mutex` (or `RwLock`, since `contains` takes `&self`) if sharing across
//! threads is ever required.

use crate::core::bitvec::BitVec;
use crate::core::params;
use crate::encode::encode;
use crate::error::Result;
use crate::hash::AffineHashFamily;
use crate::prime::next_prime;
use crate::table::RemovalTable;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Assumed fraction of inserted elements that will later be removed; sizes
/// the removal table at `next_prime(n / 10)` buckets.
const ASSUMED_DELETION_DENOMINATOR: u64 = 10;

/// Bloom filter with an exact side table for soft deletion.
///
/// # Examples
///
/// ```
/// use softbloom::SoftDeleteBloomFilter;
///
/// let mut filter = SoftDeleteBloomFilter::with_seed(1000, 0.01, 1.0, 1.0, 42).unwrap();
///
/// filter.insert("hello");
/// assert!(filter.contains("hello"));
///
/// filter.remove("hello");
/// assert!(!filter.contains("hello"));
///
/// filter.insert("hello");
/// assert!(filter.contains("hello"));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SoftDeleteBloomFilter {
    /// Monotone bit array; set by `insert`, never cleared.
    bits: BitVec,
    /// Affine hash family mapping encoded keys to bit indices.
    family: AffineHashFamily,
    /// Soft-deleted strings; membership overrides the bit array.
    removed: RemovalTable,
    /// Configured expected element count `n`.
    expected_items: usize,
    /// Configured target false positive rate `p`.
    target_fp_rate: f64,
    /// Configured bit-array scale factor `c`.
    size_scale: f64,
    /// Configured hash-count scale factor `d`.
    hash_scale: f64,
}

impl SoftDeleteBloomFilter {
    /// Create a filter with entropy-seeded hash coefficients.
    ///
    /// Derives the bit-array length from `(p, n, c)`, the hash-function count
    /// from the *unscaled* length and `d`, and the removal-table size from
    /// the assumed ~10% deletion rate (see [`crate::core::params`] for the
    /// formulas and the scale-factor decoupling).
    ///
    /// # Arguments
    ///
    /// * `expected_items` - Expected number of elements `n` (must be > 0)
    /// * `fp_rate` - Target false positive probability `p` in (0, 1)
    /// * `size_scale` - Bit-array scale factor `c` (finite, > 0)
    /// * `hash_scale` - Hash-count scale factor `d` (finite, > 0)
    ///
    /// # Errors
    ///
    /// Fails fast on any invalid parameter; construction is the only fallible
    /// surface.
    pub fn new(
        expected_items: usize,
        fp_rate: f64,
        size_scale: f64,
        hash_scale: f64,
    ) -> Result<Self> {
        Self::with_rng(
            expected_items,
            fp_rate,
            size_scale,
            hash_scale,
            &mut StdRng::from_entropy(),
        )
    }

    /// Create a filter whose hash coefficients are reproducible from `seed`.
    ///
    /// Two filters built with identical parameters and seed hash identically,
    /// which makes experiments and tests deterministic.
    ///
    /// # Errors
    ///
    /// Same conditions as [`SoftDeleteBloomFilter::new`].
    pub fn with_seed(
        expected_items: usize,
        fp_rate: f64,
        size_scale: f64,
        hash_scale: f64,
        seed: u64,
    ) -> Result<Self> {
        Self::with_rng(
            expected_items,
            fp_rate,
            size_scale,
            hash_scale,
            &mut StdRng::seed_from_u64(seed),
        )
    }

    /// Create a filter drawing hash coefficients from a caller-supplied RNG.
    ///
    /// # Errors
    ///
    /// Same conditions as [`SoftDeleteBloomFilter::new`].
    pub fn with_rng<R: Rng + ?Sized>(
        expected_items: usize,
        fp_rate: f64,
        size_scale: f64,
        hash_scale: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let scaled_bits = params::scaled_bit_count(expected_items, fp_rate, size_scale)?;
        // The hash-count formula deliberately sees the unscaled size so the
        // two scale factors stay independent knobs.
        let unscaled_bits = params::scaled_bit_count(expected_items, fp_rate, 1.0)?;
        let hash_count = params::scaled_hash_count(unscaled_bits, expected_items, hash_scale)?;

        let bits = BitVec::new(scaled_bits)?;
        let family = AffineHashFamily::generate(scaled_bits, hash_count, rng)?;
        let removal_buckets =
            next_prime(expected_items as u64 / ASSUMED_DELETION_DENOMINATOR);
        let removed = RemovalTable::new(removal_buckets)?;

        Ok(Self {
            bits,
            family,
            removed,
            expected_items,
            target_fp_rate: fp_rate,
            size_scale,
            hash_scale,
        })
    }

    /// Insert a string.
    ///
    /// Idempotent: a string the filter already reports present is left
    /// untouched. Otherwise any soft-delete record for it is cleared first
    /// (undoing a prior `remove`), then every family index bit is set.
    ///
    /// O(k + chain) where k is the hash-function count.
    pub fn insert(&mut self, element: &str) {
        if self.contains(element) {
            return;
        }

        self.removed.remove(element);
        let key = encode(element);
        for index in 0..self.family.len() {
            self.bits.set(self.family.index_of(key, index));
        }
    }

    /// Whether the filter reports `element` present.
    ///
    /// Soft-deleted elements are never reported present, even when their bit
    /// pattern remains fully set through other members. Otherwise a single
    /// zero bit proves absence; all bits set means "probably present".
    #[must_use]
    pub fn contains(&self, element: &str) -> bool {
        if self.removed.contains(element) {
            return false;
        }

        let key = encode(element);
        self.family.indices(key).all(|index| self.bits.get(index))
    }

    /// Soft-delete a string.
    ///
    /// Records `element` in the removal table when the filter currently
    /// reports it present; otherwise a silent no-op (there is nothing to
    /// remove, and "remove of a false positive" is not detectable here).
    pub fn remove(&mut self, element: &str) {
        if self.contains(element) {
            self.removed.insert(element);
        }
    }

    /// Insert every string in `elements`.
    pub fn insert_batch<S: AsRef<str>>(&mut self, elements: &[S]) {
        for element in elements {
            self.insert(element.as_ref());
        }
    }

    /// Query every string in `elements`.
    #[must_use]
    pub fn contains_batch<S: AsRef<str>>(&self, elements: &[S]) -> Vec<bool> {
        elements.iter().map(|e| self.contains(e.as_ref())).collect()
    }

    // --- Introspection for drivers and reporting -------------------------

    /// Bit-array length (the scaled size `m`).
    #[must_use]
    #[inline]
    pub fn bit_count(&self) -> usize {
        self.bits.len()
    }

    /// Number of hash functions in the family (`k`).
    #[must_use]
    #[inline]
    pub fn hash_count(&self) -> usize {
        self.family.len()
    }

    /// Prime modulus used by the hash family.
    #[must_use]
    #[inline]
    pub fn hash_modulus(&self) -> u64 {
        self.family.modulus()
    }

    /// Removal-table bucket count (`q`).
    #[must_use]
    #[inline]
    pub fn removal_bucket_count(&self) -> usize {
        self.removed.bucket_count()
    }

    /// Number of strings currently soft-deleted.
    #[must_use]
    #[inline]
    pub fn soft_deleted_count(&self) -> usize {
        self.removed.len()
    }

    /// Configured expected element count `n`.
    #[must_use]
    #[inline]
    pub fn expected_items(&self) -> usize {
        self.expected_items
    }

    /// Configured target false positive rate `p`.
    #[must_use]
    #[inline]
    pub fn target_fp_rate(&self) -> f64 {
        self.target_fp_rate
    }

    /// Configured bit-array scale factor `c`.
    #[must_use]
    #[inline]
    pub fn size_scale(&self) -> f64 {
        self.size_scale
    }

    /// Configured hash-count scale factor `d`.
    #[must_use]
    #[inline]
    pub fn hash_scale(&self) -> f64 {
        self.hash_scale
    }

    /// Fraction of bits currently set, in `[0, 1]`.
    #[must_use]
    pub fn fill_ratio(&self) -> f64 {
        self.bits.fill_ratio()
    }

    /// Estimated current false positive rate.
    ///
    /// `fill_ratio()^k`: the probability that k independent probes all land on
    /// set bits. Derived from the observed bit density rather than an
    /// insertion count, since the filter does not track exact cardinality.
    #[must_use]
    pub fn estimated_fp_rate(&self) -> f64 {
        self.fill_ratio().powi(self.hash_count() as i32)
    }

    /// Theoretical false positive rate had exactly `n` elements been
    /// inserted, per the standard formula.
    #[must_use]
    pub fn design_fp_rate(&self) -> f64 {
        params::expected_fp_rate(self.bit_count(), self.expected_items, self.hash_count())
    }

    /// Approximate heap usage in bytes across both structures.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.bits.memory_usage() + self.removed.memory_usage()
    }
}
