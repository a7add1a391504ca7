#![no_std]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::checked_conversions,
    clippy::panic,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

mod power;
mod prime;
mod ring;

pub use power::pow_mod;
pub use prime::{is_probable_prime, mr_witness};
pub use ring::QrRing;

use bignum::{Word, B_PER_W};
use subtle::Choice;

/// Largest supported modulus width in bits (the 512-bit registry
/// ceiling).
pub const MAX_BITS: u32 = 512;

/// Word capacity of a ring element.
pub const LIMBS: usize = (MAX_BITS / B_PER_W) as usize;

/// Ring element: a fixed-capacity little-endian word array. Words above
/// the ring's active length stay zero.
pub type Elem = [Word; LIMBS];

/// The all-zero element.
pub const ZERO: Elem = [0; LIMBS];

/// Constant-time element select: `b` when the choice is set, else `a`.
#[inline]
pub fn select(a: &Elem, b: &Elem, choice: Choice) -> Elem {
    let mut out = *a;
    bignum::ww::cond_assign(&mut out, b, choice);
    out
}
