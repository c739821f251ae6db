//! Polynomial string encoding with explicit overflow control.
//!
//! Every string entering the filter is first mapped to an unsigned integer by
//! a polynomial hash over its bytes:
//!
//! ```text
//! encode(s) = (s[0]·C⁰ + s[1]·C¹ + ... + s[n]·Cⁿ) mod MAX_UINT
//! ```
//!
//! where `C = 53`, a prime close to the size of the usable letter alphabet
//! (26 lowercase + 26 uppercase). Both the running power `Cⁱ` and the
//! accumulator are reduced modulo [`MAX_UINT`] after every multiply-add, so no
//! intermediate value ever exceeds 64 bits.
//!
//! # Order Sensitivity
//!
//! Because each position contributes through a distinct power of `C`,
//! permutations of the same bytes encode to different values with high
//! probability:
//!
//! ```
//! use softbloom::encode::encode;
//!
//! assert_ne!(encode("reed"), encode("deer"));
//! ```

/// Polynomial base: a prime roughly equal to the number of distinct letters
/// (upper and lower case).
pub const ENCODING_BASE: u64 = 53;

/// Modulus bounding every encoded key: the largest 32-bit unsigned value.
///
/// Keys live in `[0, MAX_UINT)` even though they are carried as `u64`, which
/// gives downstream affine hashing 32 bits of headroom for its own modular
/// arithmetic.
pub const MAX_UINT: u64 = u32::MAX as u64;

/// Encode a string as an unsigned integer in `[0, MAX_UINT)`.
///
/// Pure and deterministic: the same string always encodes to the same value.
/// The empty string encodes to 0. Iterates over UTF-8 bytes, so any Rust
/// string is accepted.
///
/// # Overflow Reasoning
///
/// The accumulator and the running power are both kept below `2³²` by modular
/// reduction, and each byte is below `2⁸`, so every intermediate product fits
/// comfortably in a `u64` (at most `2³² · 2⁸ = 2⁴⁰`).
///
/// # Examples
///
/// ```
/// use softbloom::encode::encode;
///
/// assert_eq!(encode(""), 0);
/// assert_eq!(encode("a"), u64::from(b'a'));
/// assert_eq!(encode("abc"), encode("abc")); // deterministic
/// ```
#[must_use]
pub fn encode(s: &str) -> u64 {
    let mut sum: u64 = 0;
    let mut power: u64 = 1; // C^0
    for &byte in s.as_bytes() {
        sum = (sum + power * u64::from(byte)) % MAX_UINT;
        power = (power * ENCODING_BASE) % MAX_UINT;
    }
    sum
}
