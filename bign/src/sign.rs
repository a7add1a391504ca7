//! Signing and verification.
//!
//! A signature is `s0 || s1` where `s0` is the truncated
//! `belt-hash(oid || R || H)` and `s1 = (k - H - (s0 + 2^l) d) mod q`.
//! No inversion appears anywhere; the secret-dependent work is one
//! fixed-window multiplication and a handful of ring operations.

use crate::params::order_words_of;
use crate::{Error, Params, PublicKey, Result, SecretKey};
use belt_hash::{BeltHash, Digest};
use bignum::{ww, Word};
use der::asn1::ObjectIdentifier;
use der::Decode;
use generic_array::{
    typenum::{Unsigned, U24, U32, U48, U64},
    ArrayLength, GenericArray,
};
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

/// Length of the `s0` component in octets.
pub(crate) fn s0_len(l: u32) -> usize {
    if l == 96 {
        10
    } else {
        (l / 8) as usize
    }
}

/// Total signature length in octets.
pub(crate) fn sig_len(l: u32) -> usize {
    s0_len(l) + (l / 4) as usize
}

/// Length of the message digest the level signs: belt-hash output for
/// the experimental level, a full-width digest otherwise.
pub(crate) fn hash_len(l: u32) -> usize {
    if l == 96 {
        32
    } else {
        (l / 4) as usize
    }
}

/// The `s0 + 2^l` multiplier as little-endian octets. The standard
/// levels append a single 0x01 sentinel octet; the experimental 96-bit
/// level keeps its literal layout `s0 || 0 || 0 || 0x80`.
fn s0_hat(l: u32, s0: &[u8], out: &mut [u8; 40]) -> usize {
    let n = s0_len(l);
    out[..n].copy_from_slice(s0);
    if l == 96 {
        out[10] = 0;
        out[11] = 0;
        out[12] = 0x80;
        13
    } else {
        out[n] = 0x01;
        n + 1
    }
}

/// A detached signature.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Signature {
    bytes: [u8; 96],
    len: usize,
}

impl Signature {
    /// Parses a signature of the exact level-determined length.
    pub fn from_slice(params: &Params, slice: &[u8]) -> Result<Self> {
        if slice.len() != sig_len(params.l) {
            return Err(Error::BadSig);
        }
        let mut bytes = [0u8; 96];
        bytes[..slice.len()].copy_from_slice(slice);
        Ok(Signature {
            bytes,
            len: slice.len(),
        })
    }

    /// The encoded signature.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// Signs a message digest with a fresh random nonce.
pub fn sign(
    params: &Params,
    oid_der: &[u8],
    hash: &[u8],
    key: &SecretKey,
    rng: &mut (impl CryptoRngCore + ?Sized),
) -> Result<Signature> {
    if params.l == 96 {
        return Err(Error::BadParams);
    }
    let mut k = sample_k(params, rng)?;
    let sig = finish_sign(params, oid_der, hash, key, &k);
    k.zeroize();
    sig
}

/// Signs deterministically: the nonce is derived from the key, the
/// digest and the caller's seasoning string `t`, so repeated calls are
/// byte-identical.
pub fn sign_deterministic(
    params: &Params,
    oid_der: &[u8],
    hash: &[u8],
    key: &SecretKey,
    t: &[u8],
) -> Result<Signature> {
    if params.l == 96 {
        return Err(Error::BadParams);
    }
    if hash.len() != hash_len(params.l) {
        return Err(Error::BadInput);
    }
    let mut k = derive_k(params, hash, key, t)?;
    let sig = finish_sign(params, oid_der, hash, key, &k);
    k.zeroize();
    sig
}

/// Verifies a signature over a message digest.
pub fn verify(
    params: &Params,
    oid_der: &[u8],
    hash: &[u8],
    sig: &Signature,
    key: &PublicKey,
) -> Result<()> {
    if params.l == 96 {
        return Err(Error::BadParams);
    }
    verify_core(params, oid_der, hash, sig, key)
}

/// Samples the nonce `k` uniformly from `[1, q)`.
pub(crate) fn sample_k(
    params: &Params,
    rng: &mut (impl CryptoRngCore + ?Sized),
) -> Result<[u8; 64]> {
    let no = params.no();
    let q = order_words_of(params);
    let qn = ww::limbs_vartime(&q);
    let mut k_words = [0 as Word; qring::LIMBS];
    if !bignum::rand::rand_nz_mod(&mut k_words[..qn], &q[..qn], rng) {
        return Err(Error::BadRng);
    }
    let mut k_bytes = [0u8; 64];
    ww::to_le_bytes(&mut k_bytes[..no], &k_words[..qn]);
    k_words.zeroize();
    Ok(k_bytes)
}

/// Derives the deterministic nonce from `(key, H mod q, t)` over
/// belt-hash (the RFC 6979 drbg with `t` as additional input),
/// dispatched over the level's scalar width.
pub(crate) fn derive_k(
    params: &Params,
    hash: &[u8],
    key: &SecretKey,
    t: &[u8],
) -> Result<[u8; 64]> {
    let rq = params.scalar_ring()?;
    let no = params.no();
    let h_int = rq.decode_mod_vartime(hash).ok_or(Error::BadInput)?;
    let mut h_canon = [0u8; 64];
    rq.encode(&h_int, &mut h_canon[..no]);

    match no {
        24 => derive_k_sized::<U24>(params, key, &h_canon[..no], t),
        32 => derive_k_sized::<U32>(params, key, &h_canon[..no], t),
        48 => derive_k_sized::<U48>(params, key, &h_canon[..no], t),
        64 => derive_k_sized::<U64>(params, key, &h_canon[..no], t),
        _ => Err(Error::BadParams),
    }
}

fn derive_k_sized<N: ArrayLength<u8>>(
    params: &Params,
    key: &SecretKey,
    h_le: &[u8],
    t: &[u8],
) -> Result<[u8; 64]> {
    let no = params.no();
    debug_assert_eq!(no, N::to_usize());

    let mut x = GenericArray::<u8, N>::default();
    x.copy_from_slice(key.as_bytes());
    x.reverse();
    let mut n = GenericArray::<u8, N>::default();
    n.copy_from_slice(&params.q[..no]);
    n.reverse();
    let mut h = GenericArray::<u8, N>::default();
    h.copy_from_slice(h_le);
    h.reverse();

    let mut k = rfc6979::generate_k::<BeltHash, N>(&x, &n, &h, t);
    k.reverse();
    let mut out = [0u8; 64];
    out[..no].copy_from_slice(&k);
    x.zeroize();
    k.zeroize();
    Ok(out)
}

/// The shared tail of both signing modes; `k_bytes` holds a canonical
/// nonce in `[1, q)`.
pub(crate) fn finish_sign(
    params: &Params,
    oid_der: &[u8],
    hash: &[u8],
    key: &SecretKey,
    k_bytes: &[u8; 64],
) -> Result<Signature> {
    check_oid(oid_der)?;
    if hash.len() != hash_len(params.l) {
        return Err(Error::BadInput);
    }
    if key.level() != params.l {
        return Err(Error::BadPrivKey);
    }
    let no = params.no();
    let curve = params.curve()?;
    let rq = params.scalar_ring()?;

    let mut k = Option::from(rq.decode(&k_bytes[..no])).ok_or(Error::BadRng)?;
    let mut d = Option::from(rq.decode(key.as_bytes())).ok_or(Error::BadPrivKey)?;

    let mut k_words = [0 as Word; qring::LIMBS];
    ww::from_le_bytes(&mut k_words, &k_bytes[..no]);
    let (r_pt, finite) = curve.mul_gen(&k_words);
    k_words.zeroize();
    if !bool::from(finite) {
        return Err(Error::BadRng);
    }
    let mut r_bytes = [0u8; 64];
    curve.encode_x(&r_pt, &mut r_bytes[..no]);

    // s0 = <belt-hash(oid || R || H)>
    let mut hasher = BeltHash::new();
    hasher.update(oid_der);
    hasher.update(&r_bytes[..no]);
    hasher.update(hash);
    let digest = hasher.finalize();
    let n0 = s0_len(params.l);
    let s0 = &digest[..n0];

    // s1 = k - H - (s0 + 2^l) d mod q
    let mut hat = [0u8; 40];
    let hat_len = s0_hat(params.l, s0, &mut hat);
    let s0_int = rq
        .decode_mod_vartime(&hat[..hat_len])
        .ok_or(Error::BadInput)?;
    let h_int = rq.decode_mod_vartime(hash).ok_or(Error::BadInput)?;
    let mut prod = rq.mul(&s0_int, &d);
    let s1 = rq.sub(&rq.sub(&k, &h_int), &prod);

    let mut sig = Signature {
        bytes: [0u8; 96],
        len: sig_len(params.l),
    };
    sig.bytes[..n0].copy_from_slice(s0);
    rq.encode(&s1, &mut sig.bytes[n0..n0 + no]);

    k.zeroize();
    d.zeroize();
    prod.zeroize();
    Ok(sig)
}

pub(crate) fn verify_core(
    params: &Params,
    oid_der: &[u8],
    hash: &[u8],
    sig: &Signature,
    key: &PublicKey,
) -> Result<()> {
    check_oid(oid_der)?;
    if hash.len() != hash_len(params.l) {
        return Err(Error::BadInput);
    }
    if key.level() != params.l {
        return Err(Error::BadPubKey);
    }
    let no = params.no();
    let n0 = s0_len(params.l);
    if sig.as_bytes().len() != sig_len(params.l) {
        return Err(Error::BadSig);
    }
    let (s0, s1_bytes) = sig.as_bytes().split_at(n0);

    let curve = params.curve()?;
    let rq = params.scalar_ring()?;

    // s1 >= q is rejected outright
    let s1 = Option::from(rq.decode(s1_bytes)).ok_or(Error::BadSig)?;
    let q_pt =
        Option::from(curve.decode_point(key.as_bytes())).ok_or(Error::BadPubKey)?;

    // R = (s1 + H) G + (s0 + 2^l) Q
    let h_int = rq.decode_mod_vartime(hash).ok_or(Error::BadInput)?;
    let t = rq.to_canonical(&rq.add(&s1, &h_int));
    let mut hat = [0u8; 40];
    let hat_len = s0_hat(params.l, s0, &mut hat);
    let mut hat_words = [0 as Word; 5];
    ww::from_le_bytes(&mut hat_words, &hat[..hat_len]);

    let r_pt = curve
        .lincomb_vartime(&[(&t[..], curve.base()), (&hat_words[..], &q_pt)])
        .ok_or(Error::BadSig)?;

    let mut r_bytes = [0u8; 64];
    curve.encode_x(&r_pt, &mut r_bytes[..no]);
    let mut hasher = BeltHash::new();
    hasher.update(oid_der);
    hasher.update(&r_bytes[..no]);
    hasher.update(hash);
    let digest = hasher.finalize();

    if digest[..n0] == *s0 {
        Ok(())
    } else {
        Err(Error::BadSig)
    }
}

pub(crate) fn check_oid(oid_der: &[u8]) -> Result<()> {
    ObjectIdentifier::from_der(oid_der).map_err(|_| Error::BadOid)?;
    Ok(())
}
