//! Error types for softbloom operations.
//!
//! Construction is the only fallible surface of the crate: once a filter is
//! built, `insert`/`contains`/`remove` on well-formed strings always succeed.
//! All validation therefore fails fast, at construction, with one of the
//! variants below.
//!
//! # Error Propagation
//!
//! ```
//! use softbloom::Result;
//! use softbloom::core::params::{scaled_bit_count, scaled_hash_count};
//!
//! fn derive_params(n: usize, fp: f64) -> Result<(usize, usize)> {
//!     let m = scaled_bit_count(n, fp, 1.0)?;
//!     let k = scaled_hash_count(m, n, 1.0)?;
//!     Ok((m, k))
//! }
//! # assert!(derive_params(1000, 0.01).is_ok());
//! ```

#![allow(clippy::module_name_repetitions)]

use std::fmt;

/// Result type alias for softbloom operations.
///
/// All fallible operations return [`Result<T>`] where the error type is
/// [`SoftBloomError`].
pub type Result<T> = std::result::Result<T, SoftBloomError>;

/// Errors that can occur while constructing a filter or its parts.
///
/// # Design Notes
/// - `Clone` + `PartialEq` enable testing and error comparison
/// - Each variant carries the offending value so callers can report it
#[derive(Debug, Clone, PartialEq)]
pub enum SoftBloomError {
    /// Invalid filter parameters provided during construction.
    ///
    /// Catch-all for parameter combinations that don't satisfy mathematical
    /// constraints or would produce a non-functional filter.
    InvalidParameters {
        /// Human-readable description of what's invalid.
        message: String,
    },

    /// False positive rate out of valid bounds (0, 1).
    ///
    /// Bloom filters require 0 < p < 1:
    /// - p = 0 would require infinite memory
    /// - p = 1 accepts everything (useless)
    FalsePositiveRateOutOfBounds {
        /// The invalid false positive rate that was provided.
        fp_rate: f64,
    },

    /// Expected element count is invalid.
    ///
    /// Occurs when n = 0, which breaks every parameter formula
    /// (division by zero, log of zero).
    InvalidItemCount {
        /// The invalid count that was provided.
        count: usize,
    },

    /// A size or hash-count scale factor is non-positive or non-finite.
    InvalidScaleFactor {
        /// Which scale factor was invalid ("size" or "hash-count").
        name: &'static str,
        /// The invalid value that was provided.
        value: f64,
    },

    /// Bit array or bucket array size is invalid.
    ///
    /// Sizes must be positive and within system memory limits.
    InvalidFilterSize {
        /// The invalid size.
        size: usize,
    },

    /// Hash family configuration is invalid (zero functions).
    InvalidHashCount {
        /// The invalid hash count provided.
        count: usize,
    },
}

impl fmt::Display for SoftBloomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameters { message } => {
                write!(f, "Invalid filter parameters: {}.", message)
            }
            Self::FalsePositiveRateOutOfBounds { fp_rate } => {
                write!(
                    f,
                    "False positive rate {} is out of bounds. Must be in range (0, 1).",
                    fp_rate
                )
            }
            Self::InvalidItemCount { count } => {
                write!(
                    f,
                    "Invalid item count: {}. Expected items must be greater than 0.",
                    count
                )
            }
            Self::InvalidScaleFactor { name, value } => {
                write!(
                    f,
                    "Invalid {} scale factor: {}. Must be finite and greater than 0.",
                    name, value
                )
            }
            Self::InvalidFilterSize { size } => {
                write!(
                    f,
                    "Invalid filter size: {}. Must be positive and within memory limits.",
                    size
                )
            }
            Self::InvalidHashCount { count } => {
                write!(
                    f,
                    "Invalid hash function count: {}. At least one hash function is required.",
                    count
                )
            }
        }
    }
}

impl std::error::Error for SoftBloomError {}

impl SoftBloomError {
    /// Create an `InvalidParameters` error with a formatted message.
    #[must_use]
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }

    /// Create a `FalsePositiveRateOutOfBounds` error.
    #[must_use]
    pub fn fp_rate_out_of_bounds(fp_rate: f64) -> Self {
        Self::FalsePositiveRateOutOfBounds { fp_rate }
    }

    /// Create an `InvalidItemCount` error.
    #[must_use]
    pub fn invalid_item_count(count: usize) -> Self {
        Self::InvalidItemCount { count }
    }

    /// Create an `InvalidScaleFactor` error.
    #[must_use]
    pub fn invalid_scale_factor(name: &'static str, value: f64) -> Self {
        Self::InvalidScaleFactor { name, value }
    }

    /// Create an `InvalidFilterSize` error.
    #[must_use]
    pub fn invalid_filter_size(size: usize) -> Self {
        Self::InvalidFilterSize { size }
    }

    /// Create an `InvalidHashCount` error.
    #[must_use]
    pub fn invalid_hash_count(count: usize) -> Self {
        Self::InvalidHashCount { count }
    }
}
