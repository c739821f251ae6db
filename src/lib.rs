//! softbloom: a Bloom filter with soft deletion.
//!
//! A Bloom filter answers set-membership queries with zero false negatives
//! and a tunable false-positive rate, but its bit array cannot support true
//! deletion: clearing a bit could erase evidence of other members. softbloom
//! pairs the bit array with an exact separate-chaining hash table of removed
//! strings, so the pair supports `insert` / `contains` / `remove` with
//! soft-deletion semantics:
//!
//! ```text
//! present(s) = every hash bit of s set  AND  s not in the removal table
//! ```
//!
//! # Quick Start
//!
//! ```
//! use softbloom::SoftDeleteBloomFilter;
//!
//! // 1000 expected items, 1% target false positive rate, unit scale factors
//! let mut filter = SoftDeleteBloomFilter::new(1000, 0.01, 1.0, 1.0).unwrap();
//!
//! filter.insert("hello");
//! assert!(filter.contains("hello"));     // definitely inserted
//! assert!(!filter.contains("goodbye"));  // almost certainly absent
//!
//! filter.remove("hello");
//! assert!(!filter.contains("hello"));    // soft-deleted
//!
//! filter.insert("hello");
//! assert!(filter.contains("hello"));     // re-insert undoes the deletion
//! ```
//!
//! # Using the Builder
//!
//! ```
//! use softbloom::builder::SoftDeleteBloomFilterBuilder;
//!
//! let filter = SoftDeleteBloomFilterBuilder::new()
//!     .expected_items(10_000)
//!     .false_positive_rate(0.001)
//!     .seed(42)                 // reproducible hash coefficients
//!     .build()
//!     .unwrap();
//! ```
//!
//! # How It Hashes
//!
//! Strings are first encoded to an integer by an order-sensitive polynomial
//! hash with explicit overflow control ([`encode`]), then mapped to bit
//! indices by a universal family of affine functions over a prime modulus
//! ([`hash`]). The prime (first prime after the bit-array length) comes from
//! trial division ([`prime`]). All coefficients are drawn from an explicit
//! RNG, so a fixed seed reproduces the filter exactly.
//!
//! # Tuning Knobs
//!
//! Construction takes two scale factors on top of the classic `(n, p)` pair:
//!
//! - `size_scale` (`c`) multiplies the bit-array length
//! - `hash_scale` (`d`) multiplies the hash-function count
//!
//! The hash count is derived from the *unscaled* bit length, so the two knobs
//! are independent: growing the array with `c` does not change how many
//! functions probe it. See [`core::params`] for the formulas.
//!
//! # Concurrency
//!
//! Single-threaded by design. Every structure is exclusively owned by one
//! filter; mutations take `&mut self`. For shared deployments, guard the
//! whole filter with a `Mutex`, or an `RwLock` if concurrent readers matter
//! (`contains` takes `&self` and never mutates).
//!
//! # Feature Flags
//!
//! | Feature   | Enables                                    |
//! |-----------|--------------------------------------------|
//! | `serde`   | `Serialize`/`Deserialize` on filter state  |
//! | `metrics` | `metrics::AccuracyTracker` for observed false-positive/negative rates |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::manual_range_contains)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Core data structures and parameter math
pub mod core;

/// String-to-integer polynomial encoding
pub mod encode;

/// Error types and result alias
pub mod error;

/// Filter implementations
pub mod filters;

/// Affine hash family machinery
pub mod hash;

/// Prime search utilities
pub mod prime;

/// Removal table for soft-deleted elements
pub mod table;

/// Type-safe filter builder
pub mod builder;

/// Observed accuracy tracking (requires `metrics` feature)
#[cfg(feature = "metrics")]
#[cfg_attr(docsrs, doc(cfg(feature = "metrics")))]
pub mod metrics;

// Re-export the types most callers need at the crate root.
pub use builder::SoftDeleteBloomFilterBuilder;
pub use error::{Result, SoftBloomError};
pub use filters::SoftDeleteBloomFilter;
pub use hash::AffineHashFamily;
pub use table::RemovalTable;

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use softbloom::prelude::*;
///
/// let mut filter = SoftDeleteBloomFilter::with_seed(100, 0.01, 1.0, 1.0, 1).unwrap();
/// filter.insert("hello");
/// assert!(filter.contains("hello"));
/// ```
pub mod prelude {
    pub use crate::builder::SoftDeleteBloomFilterBuilder;
    pub use crate::error::{Result, SoftBloomError};
    pub use crate::filters::SoftDeleteBloomFilter;
    pub use crate::hash::AffineHashFamily;
    pub use crate::table::RemovalTable;

    #[cfg(feature = "metrics")]
    pub use crate::metrics::AccuracyTracker;
}
