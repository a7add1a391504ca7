//! Key pairs.

use crate::params::order_words_of;
use crate::{Error, Params, Result};
use bignum::{rand::rand_nz_mod, ww};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Private signing key: a scalar in `[1, q)`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    l: u32,
    d: [u8; 64],
}

impl SecretKey {
    /// Generates a key by rejection sampling below the group order.
    pub fn random(params: &Params, rng: &mut (impl CryptoRngCore + ?Sized)) -> Result<Self> {
        let no = params.no();
        let q = order_words_of(params);
        let qn = ww::limbs_vartime(&q);
        let mut d_words = [0 as bignum::Word; qring::LIMBS];
        if !rand_nz_mod(&mut d_words[..qn], &q[..qn], rng) {
            return Err(Error::BadRng);
        }
        let mut d = [0u8; 64];
        ww::to_le_bytes(&mut d[..no], &d_words[..qn]);
        d_words.zeroize();
        Ok(SecretKey { l: params.l, d })
    }

    /// Parses a little-endian scalar of exactly `l/4` octets; zero and
    /// values at or above `q` are rejected.
    pub fn from_bytes(params: &Params, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != params.no() {
            return Err(Error::BadInput);
        }
        let rq = params.scalar_ring()?;
        let elem = Option::from(rq.decode(bytes)).ok_or(Error::BadPrivKey)?;
        if bool::from(rq.is_zero(&elem)) {
            return Err(Error::BadPrivKey);
        }
        let mut d = [0u8; 64];
        d[..bytes.len()].copy_from_slice(bytes);
        Ok(SecretKey { l: params.l, d })
    }

    /// The key material, little-endian.
    ///
    /// Treat the returned bytes with the care they deserve.
    pub fn as_bytes(&self) -> &[u8] {
        &self.d[..(self.l / 4) as usize]
    }

    /// Security level of the key.
    pub fn level(&self) -> u32 {
        self.l
    }

    /// Computes the matching public key `Q = d G`.
    pub fn public_key(&self, params: &Params) -> Result<PublicKey> {
        if params.l != self.l {
            return Err(Error::BadParams);
        }
        let curve = params.curve()?;
        let no = params.no();
        let mut d_words = [0 as bignum::Word; qring::LIMBS];
        ww::from_le_bytes(&mut d_words, self.as_bytes());
        let (q_pt, finite) = curve.mul_gen(&d_words);
        d_words.zeroize();
        if !bool::from(finite) {
            return Err(Error::BadPrivKey);
        }
        let mut point = [0u8; 128];
        curve.encode_point(&q_pt, &mut point[..2 * no]);
        Ok(PublicKey {
            l: self.l,
            point,
        })
    }
}

/// Public verification key: an affine point `x || y`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PublicKey {
    l: u32,
    point: [u8; 128],
}

impl PublicKey {
    /// Parses `x || y` (each `l/4` octets) and checks the point lies on
    /// the curve.
    pub fn from_bytes(params: &Params, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 2 * params.no() {
            return Err(Error::BadInput);
        }
        let curve = params.curve()?;
        if bool::from(curve.decode_point(bytes).is_none()) {
            return Err(Error::BadPubKey);
        }
        let mut point = [0u8; 128];
        point[..bytes.len()].copy_from_slice(bytes);
        Ok(PublicKey { l: params.l, point })
    }

    /// The encoded point.
    pub fn as_bytes(&self) -> &[u8] {
        &self.point[..(self.l / 2) as usize]
    }

    /// Security level of the key.
    pub fn level(&self) -> u32 {
        self.l
    }
}
