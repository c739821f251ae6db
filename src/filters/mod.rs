//! Filter implementations.
//!
//! A single variant lives here: [`SoftDeleteBloomFilter`], the bit-array
//! Bloom filter paired with an exact removal table for soft deletion.

pub mod soft_delete;

pub use soft_delete::SoftDeleteBloomFilter;
