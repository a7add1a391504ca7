//! Variable-time scalar multiplication: width-w NAF single multiplication
//! and interleaved multi-scalar sums. Verification-side only.

use crate::smult::TABLE_LEN;
use crate::{Affine, EcGroup, Jacobian};
use bignum::{ww, Word};
use qring::LIMBS;

/// Maximum number of terms in a multi-scalar sum.
pub const MAX_TERMS: usize = 4;

const MAX_NAF: usize = (LIMBS + 1) * bignum::B_PER_W as usize + 2;

/// NAF window width by scalar size.
fn naf_width(bits: usize) -> u32 {
    if bits <= 64 {
        3
    } else if bits <= 320 {
        4
    } else {
        5
    }
}

impl EcGroup {
    /// `[d] p`, variable-time; `None` when the product is the identity.
    pub fn mul_vartime(&self, d: &[Word], p: &Affine) -> Option<Affine> {
        debug_assert!(d.len() <= LIMBS + 1);
        let bits = ww::bit_len_vartime(d);
        if bits == 0 {
            return None;
        }
        let w = naf_width(bits);
        let mut digits = [0i8; MAX_NAF];
        let len = ww::wnaf(&mut digits, d, w);
        // odd multiples up to 2^(w-1) - 1
        let table = self.small_mult_affine(p, w as usize - 1);

        let mut acc = self.jacobian_identity();
        for i in (0..len).rev() {
            acc = self.jacobian_double(&acc);
            let e = digits[i];
            if e != 0 {
                let entry = &table[(e.unsigned_abs() as usize - 1) / 2];
                acc = if e > 0 {
                    self.jacobian_add_affine_vartime(&acc, entry)
                } else {
                    self.jacobian_sub_affine_vartime(&acc, entry)
                };
            }
        }
        self.jacobian_to_affine_vartime(&acc)
    }

    /// Interleaved multi-scalar sum of at most [`MAX_TERMS`] terms,
    /// variable-time; `None` when the sum is the identity.
    pub fn lincomb_vartime(
        &self,
        terms: &[(&[Word], &Affine)],
    ) -> Option<Affine> {
        debug_assert!(terms.len() <= MAX_TERMS);
        let mut digits = [[0i8; MAX_NAF]; MAX_TERMS];
        let mut lens = [0usize; MAX_TERMS];
        let mut widths = [0u32; MAX_TERMS];
        let mut tables = [[Affine {
            x: qring::ZERO,
            y: qring::ZERO,
        }; TABLE_LEN]; MAX_TERMS];

        let mut longest = 0;
        for (t, (d, p)) in terms.iter().enumerate() {
            let bits = ww::bit_len_vartime(d);
            if bits == 0 {
                continue;
            }
            let w = naf_width(bits);
            widths[t] = w;
            lens[t] = ww::wnaf(&mut digits[t], d, w);
            tables[t] = self.small_mult_affine(p, w as usize - 1);
            longest = longest.max(lens[t]);
        }

        let mut acc = self.jacobian_identity();
        for i in (0..longest).rev() {
            acc = self.jacobian_double(&acc);
            for t in 0..terms.len() {
                if i >= lens[t] {
                    continue;
                }
                let e = digits[t][i];
                if e != 0 {
                    let entry = &tables[t][(e.unsigned_abs() as usize - 1) / 2];
                    acc = if e > 0 {
                        self.jacobian_add_affine_vartime(&acc, entry)
                    } else {
                        self.jacobian_sub_affine_vartime(&acc, entry)
                    };
                }
            }
        }
        self.jacobian_to_affine_vartime(&acc)
    }
}
