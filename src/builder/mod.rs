//! Builder pattern for filter construction.
//!
//! # Type-State Pattern
//!
//! The builder enforces required parameters at compile time by progressing
//! through states:
//!
//! ```text
//! Initial → WithItems → Complete → SoftDeleteBloomFilter
//!     ↓          ↓           ↓
//!  .expected_items()  .false_positive_rate()  .build()
//! ```
//!
//! Scale factors and the seed are optional and default to `1.0` / entropy.
//!
//! # Examples
//!
//! ## Minimal Configuration
//!
//! ```
//! use softbloom::builder::SoftDeleteBloomFilterBuilder;
//!
//! let filter = SoftDeleteBloomFilterBuilder::new()
//!     .expected_items(10_000)
//!     .false_positive_rate(0.01)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(filter.expected_items(), 10_000);
//! ```
//!
//! ## Full Configuration
//!
//! ```
//! use softbloom::builder::SoftDeleteBloomFilterBuilder;
//!
//! let filter = SoftDeleteBloomFilterBuilder::new()
//!     .expected_items(1000)
//!     .false_positive_rate(0.01)
//!     .size_scale(2.0)
//!     .hash_count_scale(1.5)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! assert!(filter.bit_count() > 19_000);
//! ```
//!
//! ## Error Handling
//!
//! ```
//! use softbloom::builder::SoftDeleteBloomFilterBuilder;
//!
//! let result = SoftDeleteBloomFilterBuilder::new()
//!     .expected_items(0)  // Invalid!
//!     .false_positive_rate(0.01)
//!     .build();
//!
//! assert!(result.is_err());
//! ```

use crate::error::Result;
use crate::filters::SoftDeleteBloomFilter;
use std::marker::PhantomData;

/// Type-state marker: no required parameters set.
pub struct Initial;

/// Type-state marker: expected item count is set.
pub struct WithItems;

/// Type-state marker: all required parameters set.
pub struct Complete;

/// Type-state builder for [`SoftDeleteBloomFilter`].
///
/// Required parameters transition the state; optional parameters are
/// available once the required ones are in place.
pub struct SoftDeleteBloomFilterBuilder<State> {
    expected_items: Option<usize>,
    fp_rate: Option<f64>,
    size_scale: f64,
    hash_count_scale: f64,
    seed: Option<u64>,
    _state: PhantomData<State>,
}

impl SoftDeleteBloomFilterBuilder<Initial> {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            expected_items: None,
            fp_rate: None,
            size_scale: 1.0,
            hash_count_scale: 1.0,
            seed: None,
            _state: PhantomData,
        }
    }

    /// Set the expected number of elements (required).
    #[must_use]
    pub fn expected_items(self, items: usize) -> SoftDeleteBloomFilterBuilder<WithItems> {
        SoftDeleteBloomFilterBuilder {
            expected_items: Some(items),
            fp_rate: self.fp_rate,
            size_scale: self.size_scale,
            hash_count_scale: self.hash_count_scale,
            seed: self.seed,
            _state: PhantomData,
        }
    }
}

impl Default for SoftDeleteBloomFilterBuilder<Initial> {
    fn default() -> Self {
        Self::new()
    }
}

impl SoftDeleteBloomFilterBuilder<WithItems> {
    /// Set the target false positive rate (required).
    #[must_use]
    pub fn false_positive_rate(self, fp_rate: f64) -> SoftDeleteBloomFilterBuilder<Complete> {
        SoftDeleteBloomFilterBuilder {
            expected_items: self.expected_items,
            fp_rate: Some(fp_rate),
            size_scale: self.size_scale,
            hash_count_scale: self.hash_count_scale,
            seed: self.seed,
            _state: PhantomData,
        }
    }
}

impl SoftDeleteBloomFilterBuilder<Complete> {
    /// Set the bit-array scale factor `c` (optional, defaults to 1.0).
    #[must_use]
    pub fn size_scale(mut self, scale: f64) -> Self {
        self.size_scale = scale;
        self
    }

    /// Set the hash-count scale factor `d` (optional, defaults to 1.0).
    #[must_use]
    pub fn hash_count_scale(mut self, scale: f64) -> Self {
        self.hash_count_scale = scale;
        self
    }

    /// Seed the hash-coefficient RNG for reproducible filters (optional;
    /// defaults to entropy seeding).
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration and construct the filter.
    ///
    /// # Errors
    ///
    /// Propagates the construction errors of
    /// [`SoftDeleteBloomFilter::new`]: zero items, false positive rate
    /// outside (0, 1), or a non-positive scale factor.
    pub fn build(self) -> Result<SoftDeleteBloomFilter> {
        // Safe because the type state guarantees both were set.
        let expected_items = self.expected_items.expect("items set in WithItems state");
        let fp_rate = self.fp_rate.expect("fp_rate set in Complete state");

        match self.seed {
            Some(seed) => SoftDeleteBloomFilter::with_seed(
                expected_items,
                fp_rate,
                self.size_scale,
                self.hash_count_scale,
                seed,
            ),
            None => SoftDeleteBloomFilter::new(
                expected_items,
                fp_rate,
                self.size_scale,
                self.hash_count_scale,
            ),
        }
    }
}
