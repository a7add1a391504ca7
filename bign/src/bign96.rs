//! The experimental 96-bit security level.
//!
//! Same algebra as the standard levels, but with its own literal
//! constants: a 10-octet `s0`, the `s0 || 0 || 0 || 0x80` multiplier
//! layout and 34-octet signatures, signing 32-octet belt-hash digests.

use crate::sign::{derive_k, finish_sign, sample_k, sig_len, verify_core};
use crate::{Error, Params, PublicKey, Result, SecretKey, Signature};
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

/// Encoded signature length: 34 octets.
pub const SIGNATURE_LEN: usize = 34;

/// Loads the level-96 standard parameters.
pub fn params_std(name: &str) -> Result<Params> {
    let params = Params::std(name)?;
    if params.l != 96 {
        return Err(Error::BadParams);
    }
    Ok(params)
}

/// Validates a level-96 parameter set.
pub fn params_val(params: &Params) -> Result<()> {
    if params.l != 96 {
        return Err(Error::BadParams);
    }
    params.validate()
}

/// Signs a 32-octet belt-hash digest with a fresh random nonce.
pub fn sign(
    params: &Params,
    oid_der: &[u8],
    hash: &[u8],
    key: &SecretKey,
    rng: &mut (impl CryptoRngCore + ?Sized),
) -> Result<Signature> {
    if params.l != 96 {
        return Err(Error::BadParams);
    }
    let mut k = sample_k(params, rng)?;
    let sig = finish_sign(params, oid_der, hash, key, &k);
    k.zeroize();
    sig
}

/// Deterministic signing; a pure function of `(key, hash, t)`.
pub fn sign_deterministic(
    params: &Params,
    oid_der: &[u8],
    hash: &[u8],
    key: &SecretKey,
    t: &[u8],
) -> Result<Signature> {
    if params.l != 96 {
        return Err(Error::BadParams);
    }
    if hash.len() != 32 {
        return Err(Error::BadInput);
    }
    let mut k = derive_k(params, hash, key, t)?;
    let sig = finish_sign(params, oid_der, hash, key, &k);
    k.zeroize();
    sig
}

/// Verifies a 34-octet signature.
pub fn verify(
    params: &Params,
    oid_der: &[u8],
    hash: &[u8],
    sig: &Signature,
    key: &PublicKey,
) -> Result<()> {
    if params.l != 96 {
        return Err(Error::BadParams);
    }
    debug_assert_eq!(sig_len(96), SIGNATURE_LEN);
    verify_core(params, oid_der, hash, sig, key)
}
