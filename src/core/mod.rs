//! Core data structures and parameter math.
//!
//! - [`bitvec`]: the word-packed bit array owned by each filter
//! - [`params`]: sizing formulas with independent scale factors

pub mod bitvec;
pub mod params;

pub use bitvec::BitVec;
