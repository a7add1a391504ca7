//! Constant-time scalar multiplication.
//!
//! The scalar is made odd by adding the group order once or twice (which
//! leaves the product unchanged), recoded into regular signed odd digits
//! base 2^w, and consumed by a fixed window ladder running entirely on
//! the complete formulas, so the identity never needs special handling.

use crate::complete::affine_select;
use crate::smult::TABLE_LEN;
use crate::{Affine, EcGroup};
use bignum::{word, ww, zz, Word};
use qring::LIMBS;
use subtle::Choice;

// order_bits <= 513, t_bits <= 515, w >= 4: at most 129 recode steps
// plus the closing digit.
const MAX_DIGITS: usize = 132;

struct Recoding {
    mags: [Word; MAX_DIGITS],
    negs: [Word; MAX_DIGITS],
    len: usize,
}

impl EcGroup {
    /// Window width for the constant-time ladder.
    pub(crate) fn safe_window(&self) -> usize {
        if self.order_bits <= 256 {
            4
        } else {
            5
        }
    }

    /// `[d] p` in constant time.
    ///
    /// The flag is set iff the result is a finite point, i.e. iff
    /// `d mod q != 0` on the prime-order curves this engine targets;
    /// when clear the affine value is all-zero filler. The scalar may
    /// span up to the order width plus one word; callers keep it below
    /// `2q`.
    pub fn mul(&self, d: &[Word], p: &Affine) -> (Affine, Choice) {
        let w = self.safe_window();
        let rec = self.recode(d, w);
        let table = self.small_mult_affine(p, w);
        let count = 1usize << (w - 1);

        // top digit is always positive
        let top = select_entry(&table, count, rec.mags[rec.len - 1]);
        let mut acc = self.proj_from_affine(&top);

        for j in (0..rec.len - 1).rev() {
            for _ in 0..w {
                acc = self.proj_double(&acc);
            }
            let mut t = select_entry(&table, count, rec.mags[j]);
            let neg_y = self.field.neg(&t.y);
            let neg = Choice::from((rec.negs[j] & 1) as u8);
            t.y = qring::select(&t.y, &neg_y, neg);
            acc = self.proj_add_affine(&acc, &t);
        }

        self.proj_to_affine(&acc)
    }

    /// `[d] G` for the base point.
    pub fn mul_gen(&self, d: &[Word]) -> (Affine, Choice) {
        self.mul(d, &self.base)
    }

    /// Regular signed-odd recoding of `d + q` or `d + 2q` (whichever is
    /// odd): digits are odd, `|e| < 2^w`, the closing digit positive.
    fn recode(&self, d: &[Word], w: usize) -> Recoding {
        debug_assert!(d.len() <= LIMBS + 1);
        let qn = self.order_n;

        // dp = d + q, then + q again when d was odd
        let mut dp = [0 as Word; LIMBS + 2];
        dp[..d.len()].copy_from_slice(d);
        let odd_mask = (d[0] & 1).wrapping_neg();
        let mut q_ext = [0 as Word; LIMBS + 2];
        q_ext[..qn].copy_from_slice(&self.order[..qn]);
        zz::add_assign(&mut dp, &q_ext);
        zz::cond_add_assign(&mut dp, &q_ext, odd_mask);
        debug_assert_eq!(dp[0] & 1, 1);

        let t_bits = self.order_bits + 2;
        let steps = t_bits.div_ceil(w);
        debug_assert!(steps + 1 <= MAX_DIGITS);

        let mut rec = Recoding {
            mags: [0; MAX_DIGITS],
            negs: [0; MAX_DIGITS],
            len: steps + 1,
        };
        let full: Word = 1 << w;
        let low_mask: Word = (1 << (w + 1)) - 1;
        for j in 0..steps {
            let u = dp[0] & low_mask;
            // e = u - 2^w: positive when bit w of u is set
            let pos = word::nonzero_mask(u & full);
            let mag = word::select(full.wrapping_sub(u), u.wrapping_sub(full), pos);
            // d -= e: clearing the low bits handles e > 0 without
            // borrow, the masked word-add handles e < 0
            dp[0] = dp[0].wrapping_sub(mag & pos);
            zz::add_word_assign(&mut dp, mag & !pos);
            ww::shr_assign(&mut dp, w);
            rec.mags[j] = mag;
            rec.negs[j] = !pos & 1;
        }
        debug_assert!(ww::is_zero_vartime(&dp[1..]));
        debug_assert!(dp[0] & 1 == 1 && dp[0] < full);
        rec.mags[steps] = dp[0];
        rec.negs[steps] = 0;
        rec
    }
}

/// Constant-time table lookup of the odd multiple with magnitude `mag`
/// (an odd value below `2 * count`).
fn select_entry(table: &[Affine; TABLE_LEN], count: usize, mag: Word) -> Affine {
    let idx = mag >> 1;
    let mut out = table[0];
    for (i, entry) in table.iter().enumerate().take(count).skip(1) {
        let hit = Choice::from((word::eq_mask(idx, i as Word) & 1) as u8);
        out = affine_select(&out, entry, hit);
    }
    out
}
