#![no_std]
#![doc = include_str!("../README.md")]
#![allow(non_snake_case)]
#![forbid(unsafe_code)]
#![warn(
    clippy::unwrap_used,
    clippy::mod_module_files,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused,
    unused_attributes,
    unused_imports,
    unused_mut,
    unused_must_use
)]

#[cfg(test)]
extern crate std;

pub use subtle;
pub use zeroize;

pub mod edwards;
pub mod field;
pub mod montgomery;
pub mod params;
pub mod scalar;
pub mod word;

pub use field::{Field, FieldElement};
pub use params::{CURVE25519, CurveParams};
pub use scalar::Scalar;
pub use word::{MAX_LEN, MIN_LEN, WORD_BITS, Word};

use core::fmt;

/// Errors surfaced by the fallible curve operations.
///
/// All error reporting is by value; there is no panic-based control flow in
/// release builds (length and buffer preconditions are `debug_assert!`s).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// Inversion of an element congruent to zero.
    InversionZero,
    /// A point failed validation: off-curve, low-order, a failed
    /// decompression, or a projective Z that collapsed to zero.
    InvalidPoint,
    /// A zero scalar where the protocol forbids it.
    InvalidScalar,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::InversionZero => "inversion of zero",
            Error::InvalidPoint => "invalid curve point",
            Error::InvalidScalar => "invalid scalar",
        })
    }
}

impl core::error::Error for Error {}
