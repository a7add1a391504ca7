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

#[cfg(feature = "std")]
extern crate std;

pub mod bign96;
pub mod dsa;
mod keys;
mod params;
mod sign;
mod std_params;

pub use keys::{PublicKey, SecretKey};
pub use params::Params;
pub use sign::{sign, sign_deterministic, verify, Signature};

use belt_hash::{BeltHash, Digest};
use core::fmt;

/// Error kinds surfaced at the protocol boundary.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// Malformed input (length, padding, range).
    BadInput,
    /// Invalid or unsupported domain parameters.
    BadParams,
    /// The random generator failed or exhausted its retry budget.
    BadRng,
    /// Private key out of range.
    BadPrivKey,
    /// Public key malformed or off the curve.
    BadPubKey,
    /// A transmitted point is malformed or off the curve.
    BadPoint,
    /// Malformed object identifier.
    BadOid,
    /// Signature rejected.
    BadSig,
    /// Operation invoked out of order.
    BadLogic,
    /// Authentication (key confirmation) failed.
    Auth,
    /// Allocation failure.
    OutOfMemory,
    /// Entropy sources could not satisfy a request.
    NotEnoughEntropy,
    /// Generator output failed statistical acceptance.
    StatTest,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::BadInput => "malformed input",
            Error::BadParams => "invalid domain parameters",
            Error::BadRng => "random generator failure",
            Error::BadPrivKey => "invalid private key",
            Error::BadPubKey => "invalid public key",
            Error::BadPoint => "invalid curve point",
            Error::BadOid => "malformed object identifier",
            Error::BadSig => "invalid signature",
            Error::BadLogic => "operation out of order",
            Error::Auth => "authentication failure",
            Error::OutOfMemory => "out of memory",
            Error::NotEnoughEntropy => "not enough entropy",
            Error::StatTest => "statistical test failure",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Protocol result type.
pub type Result<T> = core::result::Result<T, Error>;

/// belt-hash of a message, the digest the level-128 signature layer
/// signs.
pub fn hash_message(msg: &[u8]) -> [u8; 32] {
    let mut hasher = BeltHash::new();
    hasher.update(msg);
    hasher.finalize().into()
}
