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
#![allow(clippy::many_single_char_names)]

mod complete;
mod jacobian;
mod mul;
mod mul_vartime;
mod smult;
mod swu;

pub use mul_vartime::MAX_TERMS;
pub use smult::{MAX_WINDOW, TABLE_LEN};

use bignum::{ww, zz, Word};
use qring::{Elem, LIMBS, QrRing};
use rand_core::CryptoRngCore;
use subtle::{Choice, CtOption};

/// Affine point; the group identity has no affine encoding, so a value
/// of this type always denotes a finite point.
#[derive(Clone, Copy, Debug)]
pub struct Affine {
    /// x-coordinate (field internal form).
    pub x: Elem,
    /// y-coordinate (field internal form).
    pub y: Elem,
}

/// Homogeneous projective point `(X : Y : Z)`, `Z = 0` encoding the
/// identity. Used by the complete formulas on secret-dependent paths.
#[derive(Clone, Copy, Debug)]
pub struct Projective {
    pub(crate) x: Elem,
    pub(crate) y: Elem,
    pub(crate) z: Elem,
}

/// Jacobian point `(X : Y : Z)` for `(X/Z^2, Y/Z^3)`, `Z = 0` encoding
/// the identity. Used by the variable-time paths.
#[derive(Clone, Copy, Debug)]
pub struct Jacobian {
    pub(crate) x: Elem,
    pub(crate) y: Elem,
    pub(crate) z: Elem,
}

/// Byte-encoded curve parameters, all little-endian. Coordinate strings
/// are exactly the field's canonical octet size; the order may carry the
/// same padding.
pub struct CurveParams<'a> {
    /// Field modulus `p`.
    pub p: &'a [u8],
    /// Equation coefficient `A`.
    pub a: &'a [u8],
    /// Equation coefficient `B`.
    pub b: &'a [u8],
    /// Base point x-coordinate.
    pub base_x: &'a [u8],
    /// Base point y-coordinate.
    pub base_y: &'a [u8],
    /// Base point group order `q`.
    pub order: &'a [u8],
    /// Cofactor `h`.
    pub cofactor: Word,
}

/// Curve descriptor: owns its prime field plus the equation, base point
/// and group structure.
#[derive(Clone, Copy, Debug)]
pub struct EcGroup {
    field: QrRing,
    a: Elem,
    b: Elem,
    b3: Elem,
    base: Affine,
    order: [Word; LIMBS + 1],
    order_n: usize,
    order_bits: usize,
    cofactor: Word,
}

impl EcGroup {
    /// Builds the descriptor, checking field operability, coefficient
    /// canonicality, non-singularity and that the base point satisfies
    /// the equation.
    pub fn new(params: &CurveParams<'_>) -> Option<Self> {
        let field = QrRing::gfp(params.p)?;
        if field.bits() < 3 {
            return None;
        }
        let a = Option::<Elem>::from(field.decode(params.a))?;
        let b = Option::<Elem>::from(field.decode(params.b))?;

        // 4A^3 + 27B^2 != 0
        let a3 = field.mul(&field.sqr(&a), &a);
        let four_a3 = field.double(&field.double(&a3));
        let b2 = field.sqr(&b);
        let b2_2 = field.double(&b2);
        let b2_8 = field.double(&field.double(&b2_2));
        let b2_27 = field.add(
            &field.add(&field.double(&b2_8), &b2_8),
            &field.add(&b2_2, &b2),
        );
        let disc = field.add(&four_a3, &b2_27);
        if bool::from(field.is_zero(&disc)) {
            return None;
        }

        let base_x = Option::<Elem>::from(field.decode(params.base_x))?;
        let base_y = Option::<Elem>::from(field.decode(params.base_y))?;
        let base = Affine {
            x: base_x,
            y: base_y,
        };

        let mut order = [0 as Word; LIMBS + 1];
        if params.order.len() > core::mem::size_of_val(&order) {
            return None;
        }
        ww::from_le_bytes(&mut order, params.order);
        let order_n = ww::limbs_vartime(&order);
        if order_n == 0 || params.cofactor == 0 {
            return None;
        }

        let b3 = field.add(&field.double(&b), &b);
        let group = EcGroup {
            field,
            a,
            b,
            b3,
            base,
            order,
            order_n,
            order_bits: ww::bit_len_vartime(&order),
            cofactor: params.cofactor,
        };
        if !bool::from(group.is_on_curve(&group.base)) {
            return None;
        }
        Some(group)
    }

    /// The underlying prime field.
    pub fn field(&self) -> &QrRing {
        &self.field
    }

    /// Equation coefficient `A` (internal form).
    pub fn a(&self) -> &Elem {
        &self.a
    }

    /// Equation coefficient `B` (internal form).
    pub fn b(&self) -> &Elem {
        &self.b
    }

    /// The base point.
    pub fn base(&self) -> &Affine {
        &self.base
    }

    /// Group order as its active word slice.
    pub fn order_words(&self) -> &[Word] {
        &self.order[..self.order_n]
    }

    /// Bit length of the group order.
    pub fn order_bits(&self) -> usize {
        self.order_bits
    }

    /// Cofactor.
    pub fn cofactor(&self) -> Word {
        self.cofactor
    }

    /// Whether `(x, y)` satisfies `y^2 = x^3 + Ax + B`.
    pub fn is_on_curve(&self, p: &Affine) -> Choice {
        let f = &self.field;
        let y2 = f.sqr(&p.y);
        let rhs = f.add(
            &f.mul(&f.add(&f.sqr(&p.x), &self.a), &p.x),
            &self.b,
        );
        f.eq(&y2, &rhs)
    }

    /// Constant-time affine point equality.
    pub fn affine_eq(&self, p: &Affine, q: &Affine) -> Choice {
        self.field.eq(&p.x, &q.x) & self.field.eq(&p.y, &q.y)
    }

    /// Affine negation.
    pub fn affine_neg(&self, p: &Affine) -> Affine {
        Affine {
            x: p.x,
            y: self.field.neg(&p.y),
        }
    }

    /// Decodes `x || y` (each the field's canonical octet size),
    /// rejecting non-canonical coordinates and points off the curve.
    pub fn decode_point(&self, bytes: &[u8]) -> CtOption<Affine> {
        let no = self.field.no();
        if bytes.len() != 2 * no {
            return CtOption::new(
                Affine {
                    x: qring::ZERO,
                    y: qring::ZERO,
                },
                Choice::from(0),
            );
        }
        let x = self.field.decode(&bytes[..no]);
        let y = self.field.decode(&bytes[no..]);
        let ok = x.is_some() & y.is_some();
        let p = Affine {
            x: x.unwrap_or(qring::ZERO),
            y: y.unwrap_or(qring::ZERO),
        };
        CtOption::new(p, ok & self.is_on_curve(&p))
    }

    /// Encodes a point as `x || y`.
    pub fn encode_point(&self, p: &Affine, out: &mut [u8]) {
        let no = self.field.no();
        debug_assert_eq!(out.len(), 2 * no);
        self.field.encode(&p.x, &mut out[..no]);
        self.field.encode(&p.y, &mut out[no..]);
    }

    /// Encodes just the x-coordinate.
    pub fn encode_x(&self, p: &Affine, out: &mut [u8]) {
        self.field.encode(&p.x, out);
    }

    /// Structural group checks: cofactor sanity and the Hasse bound
    /// `(q h - p - 1)^2 <= 4p`. Variable-time; parameters are public.
    pub fn seems_valid_group(&self) -> bool {
        if self.cofactor == 0 || ww::is_zero_vartime(self.order_words()) {
            return false;
        }
        // qh, p + 1, |qh - (p+1)|, then compare squares
        let mut qh = [0 as Word; LIMBS + 2];
        let carry = zz::mul_word_acc(
            &mut qh[..self.order_n],
            &self.order[..self.order_n],
            self.cofactor,
        );
        qh[self.order_n] = carry;

        let mut p1 = [0 as Word; LIMBS + 2];
        p1[..self.field.n()].copy_from_slice(self.field.modulus_words());
        zz::add_word_assign(&mut p1, 1);

        let mut diff = [0 as Word; LIMBS + 2];
        if ww::cmp_vartime(&qh, &p1) == core::cmp::Ordering::Less {
            zz::sub(&mut diff, &p1, &qh);
        } else {
            zz::sub(&mut diff, &qh, &p1);
        }

        let mut diff_sq = [0 as Word; 2 * (LIMBS + 2)];
        zz::sqr(&mut diff_sq, &diff);

        let mut four_p = [0 as Word; LIMBS + 2];
        four_p[..self.field.n()].copy_from_slice(self.field.modulus_words());
        ww::shl_assign(&mut four_p, 2);

        ww::cmp_vartime(&diff_sq, &four_p) != core::cmp::Ordering::Greater
    }

    /// Group safety: the order is a probable prime distinct from `p` and
    /// the MOV embedding degree exceeds `threshold`
    /// (`p^i != 1 (mod q)` for `1 <= i <= threshold`).
    pub fn is_safe_group(
        &self,
        threshold: usize,
        rng: &mut (impl CryptoRngCore + ?Sized),
    ) -> bool {
        if !qring::is_probable_prime(self.order_words(), 24, rng) {
            return false;
        }
        let pn = self.field.n();
        if self.order_n == pn
            && ww::eq_vartime(&self.order[..pn], self.field.modulus_words())
        {
            return false;
        }
        self.mov_degree_exceeds(threshold)
    }

    /// `p^i != 1 (mod q)` for every `1 <= i <= threshold`.
    pub fn mov_degree_exceeds(&self, threshold: usize) -> bool {
        let ring = match QrRing::montgomery_from_words(self.order_words()) {
            Some(r) => r,
            None => return false,
        };
        // p mod q
        let mut pm = qring::ZERO;
        zz::mod_reduce(
            &mut pm[..ring.n()],
            self.field.modulus_words(),
            ring.modulus_words(),
        );
        let mut bytes = [0u8; LIMBS * (bignum::B_PER_W as usize / 8)];
        ww::to_le_bytes(&mut bytes[..ring.no()], &pm);
        let t = match Option::<Elem>::from(ring.decode(&bytes[..ring.no()])) {
            Some(t) => t,
            None => return false,
        };
        let mut acc = t;
        for _ in 0..threshold {
            if bool::from(ring.is_unity(&acc)) {
                return false;
            }
            acc = ring.mul(&acc, &t);
        }
        true
    }
}
