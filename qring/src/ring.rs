//! The ring descriptor and its element operations.

use crate::{Elem, LIMBS, MAX_BITS, ZERO};
use bignum::{word, ww, zz, Word, B_PER_W};
use subtle::{Choice, CtOption};

/// Reduction strategy, chosen from the modulus shape at construction.
#[derive(Clone, Copy, Debug)]
enum Reduction {
    /// Odd modulus; elements live in Montgomery form `a * R mod m`.
    Montgomery { m0: Word },
    /// `m = 2^(nW) - c` with a small `c`; canonical form.
    Crandall { c: Word },
    /// General modulus; canonical form.
    Barrett { mu: [Word; LIMBS + 1] },
}

/// Quotient ring `Z/m` with `m` fixed at construction.
///
/// Elements are canonical residues carried in the strategy's internal
/// form; `decode` rejects out-of-range input and `encode ∘ decode` is
/// the identity on `[0, m)`.
#[derive(Clone, Copy, Debug)]
pub struct QrRing {
    n: usize,
    no: usize,
    bits: u32,
    modulus: Elem,
    unity: Elem,
    r2: Elem,
    reduction: Reduction,
}

impl QrRing {
    /// Builds the ring for a byte-encoded (little-endian) odd prime
    /// field modulus, selecting Crandall reduction when the modulus has
    /// the shape `2^(nW) - c` with `c < 2^(W/2)` and Montgomery
    /// otherwise.
    pub fn gfp(p_bytes: &[u8]) -> Option<Self> {
        let words = load_words(p_bytes)?;
        let n = ww::limbs_vartime(&words);
        if n == 0 || words[0] & 1 == 0 {
            return None;
        }
        let c = words[0].wrapping_neg();
        let crandall = n > 1
            && words[1..n].iter().all(|&w| w == Word::MAX)
            && c != 0
            && c < (1 as Word) << (B_PER_W / 2);
        if crandall {
            Self::with_reduction(words, Reduction::Crandall { c })
        } else {
            Self::montgomery_from_words(&words[..n])
        }
    }

    /// Builds a Montgomery ring over a byte-encoded odd modulus.
    pub fn montgomery(m_bytes: &[u8]) -> Option<Self> {
        let words = load_words(m_bytes)?;
        let n = ww::limbs_vartime(&words);
        Self::montgomery_from_words(&words[..n])
    }

    /// Builds a Montgomery ring over an odd modulus given as words.
    pub fn montgomery_from_words(m: &[Word]) -> Option<Self> {
        let mut words = ZERO;
        if m.len() > LIMBS {
            return None;
        }
        words[..m.len()].copy_from_slice(m);
        let n = ww::limbs_vartime(&words);
        if n == 0 || words[0] & 1 == 0 || (n == 1 && words[0] <= 3) {
            return None;
        }
        let m0 = word::neg_inv(words[0]);
        Self::with_reduction(words, Reduction::Montgomery { m0 })
    }

    /// Builds a Barrett ring over an arbitrary byte-encoded modulus
    /// greater than three.
    pub fn barrett(m_bytes: &[u8]) -> Option<Self> {
        let words = load_words(m_bytes)?;
        let n = ww::limbs_vartime(&words);
        if n == 0 || (n == 1 && words[0] <= 3) {
            return None;
        }
        let mut mu = [0 as Word; LIMBS + 1];
        zz::barrett_param(&mut mu[..n + 1], &words[..n]);
        Self::with_reduction(words, Reduction::Barrett { mu })
    }

    fn with_reduction(modulus: Elem, reduction: Reduction) -> Option<Self> {
        let n = ww::limbs_vartime(&modulus);
        let bits = ww::bit_len_vartime(&modulus) as u32;
        if bits > MAX_BITS {
            return None;
        }
        let mut ring = QrRing {
            n,
            no: (bits as usize).div_ceil(8),
            bits,
            modulus,
            unity: ZERO,
            r2: ZERO,
            reduction,
        };
        match reduction {
            Reduction::Montgomery { .. } => {
                // unity = R mod m, r2 = R^2 mod m, with R = 2^(nW)
                let mut pow = [0 as Word; 2 * LIMBS + 1];
                pow[n] = 1;
                zz::mod_reduce(&mut ring.unity[..n], &pow[..n + 1], &modulus[..n]);
                let mut sq = [0 as Word; 2 * LIMBS];
                zz::sqr(&mut sq[..2 * n], &ring.unity[..n]);
                let mut r2 = ZERO;
                zz::mod_reduce(&mut r2[..n], &sq[..2 * n], &modulus[..n]);
                ring.r2 = r2;
            }
            Reduction::Crandall { .. } | Reduction::Barrett { .. } => {
                ring.unity[0] = 1;
            }
        }
        Some(ring)
    }

    /// Active word count of an element.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Canonical octet size of an encoded element.
    pub fn no(&self) -> usize {
        self.no
    }

    /// Modulus bit length.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// The modulus as its active word slice.
    pub fn modulus_words(&self) -> &[Word] {
        &self.modulus[..self.n]
    }

    /// Additive identity.
    pub fn zero(&self) -> Elem {
        ZERO
    }

    /// Multiplicative identity in internal form.
    pub fn one(&self) -> Elem {
        self.unity
    }

    /// `a == 0`.
    pub fn is_zero(&self, a: &Elem) -> Choice {
        ww::is_zero(a)
    }

    /// `a == 1`.
    pub fn is_unity(&self, a: &Elem) -> Choice {
        ww::eq(a, &self.unity)
    }

    /// Element equality (internal forms are canonical, so word equality
    /// is value equality).
    pub fn eq(&self, a: &Elem, b: &Elem) -> Choice {
        ww::eq(a, b)
    }

    /// Decodes a little-endian canonical byte string of exactly
    /// [`Self::no`] octets; rejects values at or above the modulus.
    pub fn decode(&self, bytes: &[u8]) -> CtOption<Elem> {
        if bytes.len() != self.no {
            return CtOption::new(ZERO, Choice::from(0));
        }
        let mut a = ZERO;
        ww::from_le_bytes(&mut a[..self.n], bytes);
        let ok = ww::lt(&a[..self.n], self.modulus_words());
        CtOption::new(self.to_internal(&a), ok)
    }

    /// Decodes exactly [`Self::no`] octets whose value may reach `2m`,
    /// folding once. Constant-time; requires the modulus top bit set,
    /// which every protocol modulus here satisfies.
    pub fn decode_lazy(&self, bytes: &[u8]) -> Option<Elem> {
        if bytes.len() != self.no {
            return None;
        }
        let mut a = ZERO;
        ww::from_le_bytes(&mut a[..self.n], bytes);
        let geq = !zz::borrow_mask(&a[..self.n], self.modulus_words());
        zz::cond_sub_assign(&mut a[..self.n], self.modulus_words(), geq);
        Some(self.to_internal(&a))
    }

    /// Decodes an arbitrary-length little-endian byte string modulo `m`.
    /// Variable-time; public data only.
    pub fn decode_mod_vartime(&self, bytes: &[u8]) -> Option<Elem> {
        const WB: usize = (B_PER_W / 8) as usize;
        if bytes.len() > 2 * LIMBS * WB {
            return None;
        }
        let mut wide = [0 as Word; 2 * LIMBS];
        ww::from_le_bytes(&mut wide, bytes);
        let mut a = ZERO;
        zz::mod_reduce(&mut a[..self.n], &wide, self.modulus_words());
        Some(self.to_internal(&a))
    }

    /// Encodes an element as [`Self::no`] little-endian octets.
    pub fn encode(&self, a: &Elem, out: &mut [u8]) {
        debug_assert_eq!(out.len(), self.no);
        let c = self.to_canonical(a);
        ww::to_le_bytes(out, &c);
    }

    /// Translates an element out of the internal form.
    pub fn to_canonical(&self, a: &Elem) -> Elem {
        match self.reduction {
            Reduction::Montgomery { m0 } => {
                let mut t = [0 as Word; 2 * LIMBS];
                t[..self.n].copy_from_slice(&a[..self.n]);
                zz::mont_reduce(&mut t[..2 * self.n], self.modulus_words(), m0);
                let mut out = ZERO;
                out[..self.n].copy_from_slice(&t[..self.n]);
                out
            }
            _ => *a,
        }
    }

    pub(crate) fn to_internal(&self, a: &Elem) -> Elem {
        match self.reduction {
            Reduction::Montgomery { .. } => self.mul(a, &self.r2),
            _ => *a,
        }
    }

    /// `a + b`.
    pub fn add(&self, a: &Elem, b: &Elem) -> Elem {
        let mut c = ZERO;
        zz::add_mod(
            &mut c[..self.n],
            &a[..self.n],
            &b[..self.n],
            self.modulus_words(),
        );
        c
    }

    /// `a - b`.
    pub fn sub(&self, a: &Elem, b: &Elem) -> Elem {
        let mut c = ZERO;
        zz::sub_mod(
            &mut c[..self.n],
            &a[..self.n],
            &b[..self.n],
            self.modulus_words(),
        );
        c
    }

    /// `-a`.
    pub fn neg(&self, a: &Elem) -> Elem {
        let mut c = ZERO;
        zz::neg_mod(&mut c[..self.n], &a[..self.n], self.modulus_words());
        c
    }

    /// `2a`.
    pub fn double(&self, a: &Elem) -> Elem {
        self.add(a, a)
    }

    /// `a / 2` (odd modulus).
    pub fn half(&self, a: &Elem) -> Elem {
        debug_assert!(self.modulus[0] & 1 == 1);
        let mut c = ZERO;
        zz::half_mod(&mut c[..self.n], &a[..self.n], self.modulus_words());
        c
    }

    /// `a * b`.
    pub fn mul(&self, a: &Elem, b: &Elem) -> Elem {
        let n = self.n;
        let mut t = [0 as Word; 2 * LIMBS];
        zz::mul(&mut t[..2 * n], &a[..n], &b[..n]);
        let mut out = ZERO;
        match self.reduction {
            Reduction::Montgomery { m0 } => {
                zz::mont_reduce(&mut t[..2 * n], self.modulus_words(), m0);
                out[..n].copy_from_slice(&t[..n]);
            }
            Reduction::Crandall { c } => {
                zz::crandall_reduce(&mut out[..n], &t[..2 * n], self.modulus_words(), c);
            }
            Reduction::Barrett { mu } => {
                zz::barrett_reduce(
                    &mut out[..n],
                    &t[..2 * n],
                    self.modulus_words(),
                    &mu[..n + 1],
                );
            }
        }
        out
    }

    /// `a * a`.
    pub fn sqr(&self, a: &Elem) -> Elem {
        let n = self.n;
        let mut t = [0 as Word; 2 * LIMBS];
        zz::sqr(&mut t[..2 * n], &a[..n]);
        let mut out = ZERO;
        match self.reduction {
            Reduction::Montgomery { m0 } => {
                zz::mont_reduce(&mut t[..2 * n], self.modulus_words(), m0);
                out[..n].copy_from_slice(&t[..n]);
            }
            Reduction::Crandall { c } => {
                zz::crandall_reduce(&mut out[..n], &t[..2 * n], self.modulus_words(), c);
            }
            Reduction::Barrett { mu } => {
                zz::barrett_reduce(
                    &mut out[..n],
                    &t[..2 * n],
                    self.modulus_words(),
                    &mu[..n + 1],
                );
            }
        }
        out
    }

    /// Fermat inversion `a^(m-2)`; the modulus must be prime. Maps zero
    /// to zero. Constant-time in `a` (the exponent is the public
    /// modulus).
    pub fn inv(&self, a: &Elem) -> Elem {
        let mut e = ZERO;
        e[..self.n].copy_from_slice(self.modulus_words());
        zz::sub_word_assign(&mut e[..self.n], 2);
        self.pow_vartime(a, &e[..self.n])
    }

    /// Inversion by binary extended GCD; odd modulus, variable-time,
    /// public data only. Returns zero when `gcd(a, m) != 1`.
    pub fn inv_vartime(&self, a: &Elem) -> Elem {
        debug_assert!(self.modulus[0] & 1 == 1);
        let ca = self.to_canonical(a);
        let mut one = ZERO;
        one[0] = 1;
        let mut r = ZERO;
        zz::div_mod(
            &mut r[..self.n],
            &one[..self.n],
            &ca[..self.n],
            self.modulus_words(),
        );
        self.to_internal(&r)
    }

    /// `a / b` via Fermat inversion.
    pub fn div(&self, a: &Elem, b: &Elem) -> Elem {
        self.mul(a, &self.inv(b))
    }

    /// Square root for `m = 3 (mod 4)`: `r = a^((m+1)/4)` plus a flag
    /// telling whether `r^2 == a` (i.e. `a` was a quadratic residue).
    pub fn sqrt_3mod4(&self, a: &Elem) -> (Elem, Choice) {
        debug_assert!(self.modulus[0] & 3 == 3);
        let mut e = [0 as Word; LIMBS + 1];
        e[..self.n].copy_from_slice(self.modulus_words());
        let carry = zz::add_word_assign(&mut e[..self.n], 1);
        e[self.n] = carry;
        ww::shr_assign(&mut e[..self.n + 1], 2);
        let r = self.pow_vartime(a, &e[..self.n]);
        let ok = self.eq(&self.sqr(&r), a);
        (r, ok)
    }
}

fn load_words(bytes: &[u8]) -> Option<Elem> {
    const WB: usize = (B_PER_W / 8) as usize;
    if bytes.is_empty() || bytes.len() > LIMBS * WB {
        return None;
    }
    let mut words = ZERO;
    ww::from_le_bytes(&mut words, bytes);
    Some(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // bign-curve256v1 field: p = 2^256 - 189 (Crandall shape)
    const P_LE: [u8; 32] =
        hex!("43ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff");
    // its group order (general odd modulus, Montgomery shape)
    const Q_LE: [u8; 32] =
        hex!("07663d2699bf5a7efc4dfb0dd68e5cd9ffffffffffffffffffffffffffffffff");

    fn rings() -> [QrRing; 3] {
        let gfp = QrRing::gfp(&P_LE).expect("p");
        let mont = QrRing::montgomery(&Q_LE).expect("q");
        let barrett = QrRing::barrett(&Q_LE).expect("q barrett");
        [gfp, mont, barrett]
    }

    #[test]
    fn construction_shapes() {
        let [gfp, mont, barrett] = rings();
        assert!(matches!(gfp.reduction, Reduction::Crandall { c: 189 }));
        assert!(matches!(mont.reduction, Reduction::Montgomery { .. }));
        assert!(matches!(barrett.reduction, Reduction::Barrett { .. }));
        for r in [&gfp, &mont, &barrett] {
            assert_eq!(r.no(), 32);
            assert_eq!(r.bits(), 256);
        }
        // p192 is not a single-word Crandall prime
        let p192 =
            hex!("fffffffffffffffffeffffffffffffffffffffffffffffff");
        let r = QrRing::gfp(&p192).expect("p192");
        assert!(matches!(r.reduction, Reduction::Montgomery { .. }));
    }

    #[test]
    fn rejects_bad_moduli() {
        assert!(QrRing::montgomery(&[4u8]).is_none()); // even
        assert!(QrRing::montgomery(&[0u8]).is_none());
        assert!(QrRing::montgomery(&[3u8]).is_none()); // too small
        assert!(QrRing::barrett(&[2u8]).is_none());
        assert!(QrRing::gfp(&[0u8; 65]).is_none()); // too wide
    }

    #[test]
    fn codec_round_trip_and_rejection() {
        for ring in rings() {
            let bytes = hex!(
                "f7eb5ee42e5a1a06b0241f97fa1f3ecc634e2463cf3c02f1fd35fb32c174adba"
            );
            let a = ring.decode(&bytes).unwrap();
            let mut out = [0u8; 32];
            ring.encode(&a, &mut out);
            assert_eq!(out, bytes);

            // the modulus itself must be rejected
            let mut m_bytes = [0u8; 32];
            ww::to_le_bytes(&mut m_bytes, &ring.modulus);
            assert!(bool::from(ring.decode(&m_bytes).is_none()));
            assert!(bool::from(ring.decode(&bytes[..31]).is_none()));
        }
    }

    #[test]
    fn ring_axioms_across_reductions() {
        let bytes_a = hex!(
            "f7eb5ee42e5a1a06b0241f97fa1f3ecc634e2463cf3c02f1fd35fb32c174adba"
        );
        let bytes_b = hex!(
            "fb3622b0d7ba5021bc4504b43b304bcd68dc522f840eee8af7bf8e1b274e1ae2"
        );
        for ring in rings() {
            let a = ring.decode(&bytes_a).unwrap();
            let b = ring.decode_lazy(&bytes_b).expect("b");

            // additive structure
            let s = ring.add(&a, &b);
            assert!(bool::from(ring.eq(&ring.sub(&s, &b), &a)));
            let z = ring.add(&a, &ring.neg(&a));
            assert!(bool::from(ring.is_zero(&z)));
            assert!(bool::from(
                ring.eq(&ring.double(&a), &ring.add(&a, &a))
            ));
            if ring.modulus[0] & 1 == 1 {
                assert!(bool::from(
                    ring.eq(&ring.double(&ring.half(&a)), &a)
                ));
            }

            // multiplicative structure
            let one = ring.one();
            assert!(bool::from(ring.eq(&ring.mul(&a, &one), &a)));
            assert!(bool::from(ring.eq(&ring.sqr(&a), &ring.mul(&a, &a))));
            let ab = ring.mul(&a, &b);
            let ba = ring.mul(&b, &a);
            assert!(bool::from(ring.eq(&ab, &ba)));
        }
    }

    #[test]
    fn inversion_agrees() {
        let bytes_a = hex!(
            "f7eb5ee42e5a1a06b0241f97fa1f3ecc634e2463cf3c02f1fd35fb32c174adba"
        );
        let [gfp, mont, _] = rings();
        for ring in [gfp, mont] {
            let a = ring.decode(&bytes_a).unwrap();
            let i1 = ring.inv(&a);
            let i2 = ring.inv_vartime(&a);
            assert!(bool::from(ring.eq(&i1, &i2)));
            assert!(bool::from(ring.is_unity(&ring.mul(&a, &i1))));
            assert!(bool::from(ring.eq(&ring.div(&ring.mul(&a, &a), &a), &a)));
        }
        // zero maps to zero
        assert!(bool::from(gfp.is_zero(&gfp.inv(&ZERO))));
    }

    #[test]
    fn square_roots() {
        let [gfp, ..] = rings();
        let bytes_a = hex!(
            "f7eb5ee42e5a1a06b0241f97fa1f3ecc634e2463cf3c02f1fd35fb32c174adba"
        );
        let a = gfp.decode(&bytes_a).unwrap();
        let sq = gfp.sqr(&a);
        let (r, ok) = gfp.sqrt_3mod4(&sq);
        assert!(bool::from(ok));
        let matches_root = bool::from(gfp.eq(&r, &a))
            || bool::from(gfp.eq(&r, &gfp.neg(&a)));
        assert!(matches_root);
    }
}
