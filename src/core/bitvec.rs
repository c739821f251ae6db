//! Word-packed bit vector for single-threaded Bloom filters.
//!
//! `BitVec` is a fixed-size bit array backed by `Box<[u64]>`, with each word
//! holding 64 bits. The filter owns its bit vector exclusively and mutates it
//! from `&mut self`, so plain words suffice; there is no atomic machinery and
//! no locking discipline.
//!
//! # Monotonicity
//!
//! The only mutator is [`BitVec::set`]: bits flip from 0 to 1 and never back.
//! A filter's bit array therefore only ever grows denser, which is exactly the
//! invariant soft deletion relies on (the removal table, not the bit array, is
//! the undo mechanism).
//!
//! # Memory Layout
//!
//! Bits are packed into 64-bit words in little-endian bit order:
//!
//! ```text
//! Word 0: [bit 0][bit 1]...[bit 63]
//! Word 1: [bit 64][bit 65]...[bit 127]
//! ```

use crate::error::{Result, SoftBloomError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed-size bit array, packed 64 bits per word.
///
/// # Examples
///
/// ```
/// use softbloom::core::bitvec::BitVec;
///
/// let mut bits = BitVec::new(100).unwrap();
/// bits.set(42);
/// assert!(bits.get(42));
/// assert!(!bits.get(43));
/// assert_eq!(bits.count_ones(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BitVec {
    /// Storage words, each holding 64 bits.
    words: Box<[u64]>,
    /// Total number of addressable bits.
    len: usize,
}

impl BitVec {
    /// Create a bit vector of `num_bits` bits, all initialized to 0.
    ///
    /// # Errors
    ///
    /// Returns [`SoftBloomError::InvalidFilterSize`] if `num_bits` is 0.
    pub fn new(num_bits: usize) -> Result<Self> {
        if num_bits == 0 {
            return Err(SoftBloomError::invalid_filter_size(num_bits));
        }

        let num_words = (num_bits + 63) / 64;
        Ok(Self {
            words: vec![0u64; num_words].into_boxed_slice(),
            len: num_bits,
        })
    }

    /// Number of bits in the vector.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always `false` for a successfully constructed vector; provided for API
    /// completeness.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set the bit at `index` to 1.
    ///
    /// Idempotent: setting an already-set bit changes nothing. Bits are never
    /// cleared.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`. Callers derive indices by reducing modulo
    /// the vector length, so an out-of-range index is a programming error.
    #[inline]
    pub fn set(&mut self, index: usize) {
        assert!(index < self.len, "bit index {index} out of range");
        self.words[index / 64] |= 1u64 << (index % 64);
    }

    /// Read the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[must_use]
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "bit index {index} out of range");
        (self.words[index / 64] >> (index % 64)) & 1 == 1
    }

    /// Number of set bits.
    ///
    /// O(len/64), one POPCNT per word.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Fraction of bits set, in `[0, 1]`.
    ///
    /// A saturated filter (ratio near 1) answers "present" for almost
    /// everything.
    #[must_use]
    pub fn fill_ratio(&self) -> f64 {
        self.count_ones() as f64 / self.len as f64
    }

    /// Approximate heap usage in bytes.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.words.len() * std::mem::size_of::<u64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_all_zero() {
        let bits = BitVec::new(1000).unwrap();
        assert_eq!(bits.len(), 1000);
        assert_eq!(bits.count_ones(), 0);
        assert!(!bits.is_empty());
    }

    #[test]
    fn test_new_rejects_zero_bits() {
        assert_eq!(
            BitVec::new(0).unwrap_err(),
            SoftBloomError::invalid_filter_size(0)
        );
    }

    #[test]
    fn test_set_and_get() {
        let mut bits = BitVec::new(128).unwrap();
        bits.set(0);
        bits.set(63);
        bits.set(64);
        bits.set(127);

        assert!(bits.get(0));
        assert!(bits.get(63));
        assert!(bits.get(64));
        assert!(bits.get(127));
        assert!(!bits.get(1));
        assert!(!bits.get(100));
        assert_eq!(bits.count_ones(), 4);
    }

    #[test]
    fn test_set_idempotent() {
        let mut bits = BitVec::new(64).unwrap();
        bits.set(10);
        bits.set(10);
        assert_eq!(bits.count_ones(), 1);
    }

    #[test]
    fn test_non_word_aligned_length() {
        let mut bits = BitVec::new(70).unwrap();
        bits.set(69);
        assert!(bits.get(69));
        assert_eq!(bits.count_ones(), 1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_set_out_of_range_panics() {
        let mut bits = BitVec::new(64).unwrap();
        bits.set(64);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_get_out_of_range_panics() {
        let bits = BitVec::new(64).unwrap();
        let _ = bits.get(64);
    }

    #[test]
    fn test_fill_ratio() {
        let mut bits = BitVec::new(100).unwrap();
        assert_eq!(bits.fill_ratio(), 0.0);
        for i in 0..50 {
            bits.set(i);
        }
        assert!((bits.fill_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut a = BitVec::new(64).unwrap();
        a.set(3);
        let b = a.clone();
        a.set(4);
        assert!(b.get(3));
        assert!(!b.get(4));
    }

    #[test]
    fn test_memory_usage() {
        let bits = BitVec::new(1000).unwrap();
        assert_eq!(bits.memory_usage(), 16 * 8); // ceil(1000/64) = 16 words
    }
}
