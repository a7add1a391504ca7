//! Montgomery, Barrett and Crandall reductions of double-length products.

use crate::word::{self, Word};
use crate::zz;

const SCRATCH: usize = 24;

/// Montgomery reduction in place (Dussé–Kaliski).
///
/// `t` holds the `2n`-word product; `m0 = -m[0]^{-1} mod 2^W`. On return
/// `t[..n]` holds `t * 2^{-nW} mod m`, canonical. Constant-time: the
/// final correction is carry-masked.
pub fn mont_reduce(t: &mut [Word], m: &[Word], m0: Word) {
    let n = m.len();
    debug_assert_eq!(t.len(), 2 * n);
    let mut extra: Word = 0;
    for i in 0..n {
        let u = t[i].wrapping_mul(m0);
        let carry = zz::mul_word_acc(&mut t[i..i + n], m, u);
        // fold the carry into the next word, remembering overflow
        let (r, c1) = word::adc(t[i + n], carry, extra);
        t[i + n] = r;
        extra = c1;
    }
    // result sits in t[n..2n] with `extra` as the 2^(nW) slot
    let geq = !zz::borrow_mask(&t[n..], m);
    let mask = word::nonzero_mask(extra) | geq;
    zz::cond_sub_assign(&mut t[n..], m, mask);
    let (lo, hi) = t.split_at_mut(n);
    lo.copy_from_slice(hi);
}

/// Barrett parameter `mu = floor(2^(2nW) / m)`; `mu.len() == m.len() + 1`.
/// Variable-time setup over the public modulus.
pub fn barrett_param(mu: &mut [Word], m: &[Word]) {
    let n = m.len();
    debug_assert_eq!(mu.len(), n + 1);
    debug_assert!(2 * n + 1 < SCRATCH);
    let mut pow = [0 as Word; SCRATCH];
    pow[2 * n] = 1;
    let mut q = [0 as Word; SCRATCH];
    let mut r = [0 as Word; SCRATCH];
    zz::div_rem(&mut q[..2 * n + 1], &mut r[..n], &pow[..2 * n + 1], m);
    mu.copy_from_slice(&q[..n + 1]);
}

/// Barrett reduction of the `2n`-word `a`: `out = a mod m` using the
/// precomputed `mu`. At most two masked corrections.
pub fn barrett_reduce(out: &mut [Word], a: &[Word], m: &[Word], mu: &[Word]) {
    let n = m.len();
    debug_assert_eq!(a.len(), 2 * n);
    debug_assert_eq!(mu.len(), n + 1);
    debug_assert_eq!(out.len(), n);
    debug_assert!(2 * n + 4 < SCRATCH);

    // q1 = a >> (n-1)W  (n+1 words)
    let q1 = &a[n - 1..];
    // q2 = q1 * mu (2n+2 words); q3 = q2 >> (n+1)W (n+1 words)
    let mut q2 = [0 as Word; 2 * SCRATCH];
    zz::mul(&mut q2[..2 * n + 2], q1, mu);
    let q3 = &q2[n + 1..2 * n + 2];

    // r1 = a mod 2^((n+1)W); r2 = q3 * m mod 2^((n+1)W)
    let mut r1 = [0 as Word; SCRATCH];
    r1[..n + 1].copy_from_slice(&a[..n + 1]);
    let mut r2full = [0 as Word; 2 * SCRATCH];
    zz::mul(&mut r2full[..2 * n + 1], q3, m);

    // r = r1 - r2 (non-negative by construction of mu)
    zz::sub_assign(&mut r1[..n + 1], &r2full[..n + 1]);

    // r < 3m: two masked subtractions of m (extended by a zero word)
    let mut mext = [0 as Word; SCRATCH];
    mext[..n].copy_from_slice(m);
    for _ in 0..2 {
        let geq = !zz::borrow_mask(&r1[..n + 1], &mext[..n + 1]);
        zz::cond_sub_assign(&mut r1[..n + 1], &mext[..n + 1], geq);
    }
    out.copy_from_slice(&r1[..n]);
}

/// Crandall reduction for `m = 2^(nW) - c` with `c < 2^(W/2)`.
///
/// `t` holds the `2n`-word product; `out = t mod m`, canonical. Two
/// folds followed by masked corrections, all constant-time.
pub fn crandall_reduce(out: &mut [Word], t: &[Word], m: &[Word], c: Word) {
    let n = m.len();
    debug_assert_eq!(t.len(), 2 * n);
    debug_assert_eq!(out.len(), n);
    debug_assert!(n < SCRATCH);

    // first fold: r = lo + hi * c  (value < 2^(nW) * (c + 1))
    let mut r = [0 as Word; SCRATCH];
    r[..n].copy_from_slice(&t[..n]);
    let carry = zz::mul_word_acc(&mut r[..n], &t[n..], c);
    r[n] = carry;

    // second fold: r = r_lo + r_hi * c, r_hi <= c so the tail is tiny
    let hi = r[n];
    r[n] = 0;
    let (lo0, hi0) = word::mul_wide(hi, c);
    let mut carry = lo0;
    let mut carry2 = hi0;
    for x in r[..n].iter_mut() {
        let (s, c1) = word::adc(*x, carry, 0);
        *x = s;
        carry = carry2.wrapping_add(c1);
        carry2 = 0;
    }

    // any remaining carry is one more wrap: add carry * c, masked
    let mask = word::nonzero_mask(carry);
    let folded = zz::add_word_assign(&mut r[..n], c & mask);
    debug_assert_eq!(folded, 0);

    // final canonical correction
    let geq = !zz::borrow_mask(&r[..n], m);
    zz::cond_sub_assign(&mut r[..n], m, geq);
    out.copy_from_slice(&r[..n]);
}
