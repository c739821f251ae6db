//! Hash machinery driving the filter.
//!
//! ```text
//! hash/
//! ├── family.rs  - Affine universal hash family over a prime modulus
//! └── mod.rs     - This file (public API)
//! ```
//!
//! String-to-integer encoding lives separately in [`crate::encode`]; this
//! module consumes its output. The family's coefficients come from an
//! explicit RNG so hashing is reproducible under a fixed seed.

pub mod family;

pub use family::AffineHashFamily;
