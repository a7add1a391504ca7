//! Domain parameters: the padded byte layout, the standard registry and
//! full validation.

use crate::{Error, Result};
use belt_hash::{BeltHash, Digest};
use bignum::{ww, Word};
use eccore::{CurveParams, EcGroup};
use qring::QrRing;

/// MOV embedding-degree threshold used by validation.
const MOV_THRESHOLD: usize = 50;

/// Miller–Rabin rounds for the order primality check.
const MR_ROUNDS: usize = 32;

/// Domain parameters at a stated security level.
///
/// All integers are little-endian with the active `l/4` octets in front;
/// trailing octets must be zero and are checked on ingest. The base
/// point is `(0, y_G)` as the standard's generation procedure fixes it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Params {
    /// Security level, one of 96, 128, 192 or 256.
    pub l: u32,
    /// Field modulus `p`, a `2l`-bit prime with `p = 3 (mod 4)`.
    pub p: [u8; 64],
    /// Equation coefficient `A`.
    pub a: [u8; 64],
    /// Equation coefficient `B`.
    pub b: [u8; 64],
    /// Generation seed; all-zero when the set predates the derivation
    /// rule.
    pub seed: [u8; 8],
    /// Group order `q`.
    pub q: [u8; 64],
    /// y-coordinate of the base point.
    pub yg: [u8; 64],
}

use crate::std_params::{STD_L128, STD_L192, STD_L256, STD_L96};

/// Registry names.
const OID_L96: &str = "1.2.112.0.2.0.34.101.45.3.0";
const OID_L128: &str = "1.2.112.0.2.0.34.101.45.3.1";
const OID_L192: &str = "1.2.112.0.2.0.34.101.45.3.2";
const OID_L256: &str = "1.2.112.0.2.0.34.101.45.3.3";

impl Params {
    /// Octet length of a field element or scalar at this level.
    pub fn no(&self) -> usize {
        (self.l / 4) as usize
    }

    /// Loads a standard parameter set by its dotted registry name.
    pub fn std(name: &str) -> Result<Params> {
        match name {
            OID_L96 => Ok(STD_L96),
            OID_L128 => Ok(STD_L128),
            OID_L192 => Ok(STD_L192),
            OID_L256 => Ok(STD_L256),
            _ => Err(Error::BadOid),
        }
    }

    /// Full validation: layout, field and curve structure, seed-derived
    /// coefficient, generator correctness, Hasse bound, MOV safety,
    /// order primality and `q G = O`.
    pub fn validate(&self) -> Result<()> {
        self.check_layout()?;
        let no = self.no();

        // p = 3 (mod 4) and exactly 2l bits
        if self.p[0] & 3 != 3 {
            return Err(Error::BadParams);
        }
        if self.p[no - 1] & 0x80 == 0 {
            return Err(Error::BadParams);
        }

        // B reconstruction from the seed, when one is declared
        if self.seed.iter().any(|&b| b != 0) {
            let derived = derive_b(&self.p[..no], &self.a[..no], &self.seed, no)?;
            if derived[..no] != self.b[..no] {
                return Err(Error::BadParams);
            }
        }

        let curve = self.curve()?;
        if !curve.seems_valid_group() {
            return Err(Error::BadParams);
        }
        if ww::bit_len_vartime(curve.order_words()) != 2 * self.l as usize {
            return Err(Error::BadParams);
        }

        // y_G must be the canonical square root B^((p+1)/4)
        let field = curve.field();
        let b = Option::from(field.decode(&self.b[..no])).ok_or(Error::BadParams)?;
        let yg = Option::from(field.decode(&self.yg[..no])).ok_or(Error::BadParams)?;
        let (root, is_square) = field.sqrt_3mod4(&b);
        if !bool::from(is_square) || !bool::from(field.eq(&root, &yg)) {
            return Err(Error::BadParams);
        }

        // order primality with hash-derived witness bases, q != p, MOV
        if !order_is_probable_prime(&curve, &self.q[..no]) {
            return Err(Error::BadParams);
        }
        if self.q[..no] == self.p[..no] {
            return Err(Error::BadParams);
        }
        if !curve.mov_degree_exceeds(MOV_THRESHOLD) {
            return Err(Error::BadParams);
        }

        // q G = O: the constant-time ladder reports a zero multiple
        let (_, finite) = curve.mul_gen(curve.order_words());
        if bool::from(finite) {
            return Err(Error::BadParams);
        }
        Ok(())
    }

    /// Builds the curve descriptor for these parameters.
    pub fn curve(&self) -> Result<EcGroup> {
        self.check_layout()?;
        let no = self.no();
        let zero_x = [0u8; 64];
        EcGroup::new(&CurveParams {
            p: &self.p[..no],
            a: &self.a[..no],
            b: &self.b[..no],
            base_x: &zero_x[..no],
            base_y: &self.yg[..no],
            order: &self.q[..no],
            cofactor: 1,
        })
        .ok_or(Error::BadParams)
    }

    /// The scalar ring `Z/q`.
    pub(crate) fn scalar_ring(&self) -> Result<QrRing> {
        let no = self.no();
        QrRing::montgomery(&self.q[..no]).ok_or(Error::BadParams)
    }

    fn check_layout(&self) -> Result<()> {
        if !matches!(self.l, 96 | 128 | 192 | 256) {
            return Err(Error::BadParams);
        }
        let no = self.no();
        let tails_zero = self.p[no..].iter().all(|&b| b == 0)
            && self.a[no..].iter().all(|&b| b == 0)
            && self.b[no..].iter().all(|&b| b == 0)
            && self.q[no..].iter().all(|&b| b == 0)
            && self.yg[no..].iter().all(|&b| b == 0);
        if !tails_zero {
            return Err(Error::BadInput);
        }
        Ok(())
    }
}

/// Reconstructs `B` from `belt-hash(p || A || seed) || belt-hash(p || A
/// || seed+1) || ... mod p`, chaining as many digests as the level
/// needs.
pub fn derive_b(p: &[u8], a: &[u8], seed: &[u8; 8], no: usize) -> Result<[u8; 64]> {
    let field = QrRing::gfp(p).ok_or(Error::BadParams)?;
    let mut stream = [0u8; 64];
    let mut counter = u64::from_le_bytes(*seed);
    let mut filled = 0;
    while filled < no {
        let mut hasher = BeltHash::new();
        hasher.update(p);
        hasher.update(a);
        hasher.update(counter.to_le_bytes());
        let digest = hasher.finalize();
        let take = digest.len().min(stream.len() - filled);
        stream[filled..filled + take].copy_from_slice(&digest[..take]);
        filled += take;
        counter = counter.wrapping_add(1);
    }
    let elem = field
        .decode_mod_vartime(&stream[..no])
        .ok_or(Error::BadParams)?;
    let mut out = [0u8; 64];
    field.encode(&elem, &mut out[..no]);
    Ok(out)
}

/// Order primality via Miller–Rabin with deterministic, hash-derived
/// witness bases, so validation needs no generator.
fn order_is_probable_prime(curve: &EcGroup, q_bytes: &[u8]) -> bool {
    let q = curve.order_words();
    // small or even orders never pass the size checks above, but stay
    // defensive about the ring construction
    let ring = match QrRing::montgomery_from_words(q) {
        Some(r) => r,
        None => return false,
    };
    let mut done = 0usize;
    let mut counter = 0u32;
    while done < MR_ROUNDS {
        if counter > 4 * MR_ROUNDS as u32 {
            return false;
        }
        let mut hasher = BeltHash::new();
        hasher.update(q_bytes);
        hasher.update(counter.to_le_bytes());
        let digest = hasher.finalize();
        counter += 1;
        let base = match ring.decode_mod_vartime(&digest) {
            Some(b) => b,
            None => return false,
        };
        if bool::from(ring.is_zero(&base)) {
            continue;
        }
        if !qring::mr_witness(&ring, &base) {
            return false;
        }
        done += 1;
    }
    true
}

/// Dotted-string registry plus word access used by the signing layer.
pub(crate) fn order_words_of(params: &Params) -> [Word; qring::LIMBS + 1] {
    let mut q = [0 as Word; qring::LIMBS + 1];
    ww::from_le_bytes(&mut q[..qring::LIMBS], &params.q[..params.no()]);
    q
}
