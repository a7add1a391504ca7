//! Sliding-window exponentiation.

use crate::{Elem, QrRing};
use bignum::{ww, Word};

/// Window width for an exponent of the given bit length.
fn window_width(bits: usize) -> usize {
    if bits <= 79 {
        3
    } else if bits <= 239 {
        4
    } else if bits <= 671 {
        5
    } else if bits <= 1791 {
        6
    } else {
        7
    }
}

impl QrRing {
    /// `a^e` for a little-endian word exponent.
    ///
    /// Variable-time with respect to the exponent only; `a` is processed
    /// in a fixed pattern. Fine whenever the exponent is public (modulus
    /// derived, verification), which is every call site here.
    pub fn pow_vartime(&self, a: &Elem, e: &[Word]) -> Elem {
        let ebits = ww::bit_len_vartime(e);
        if ebits == 0 {
            return self.one();
        }
        let w = window_width(ebits);
        debug_assert!(w <= 5, "exponent exceeds the element capacity");

        // odd powers a, a^3, ..., a^(2^w - 1)
        let mut table = [crate::ZERO; 16];
        table[0] = *a;
        let a2 = self.sqr(a);
        for i in 1..(1usize << (w - 1)) {
            table[i] = self.mul(&table[i - 1], &a2);
        }

        let mut acc: Option<Elem> = None;
        let mut i = ebits as isize - 1;
        while i >= 0 {
            if !ww::test_bit(e, i as usize) {
                if let Some(x) = acc.as_mut() {
                    *x = self.sqr(x);
                }
                i -= 1;
                continue;
            }
            // longest odd slide of at most w bits ending at a set bit
            let mut j = (i - w as isize + 1).max(0);
            while !ww::test_bit(e, j as usize) {
                j += 1;
            }
            let mut v: usize = 0;
            for b in (j..=i).rev() {
                v = (v << 1) | usize::from(ww::test_bit(e, b as usize));
            }
            for _ in j..=i {
                if let Some(x) = acc.as_mut() {
                    *x = self.sqr(x);
                }
            }
            let t = &table[(v - 1) >> 1];
            acc = Some(match acc {
                Some(x) => self.mul(&x, t),
                None => *t,
            });
            i = j - 1;
        }
        acc.unwrap_or_else(|| self.one())
    }
}

/// `a^b mod m` over byte-encoded operands: constructs a throwaway ring
/// for `m` (Montgomery when odd, Barrett otherwise) and exponentiates in
/// it. Variable-time; public operands only.
pub fn pow_mod(
    a_bytes: &[u8],
    b_words: &[Word],
    m_bytes: &[u8],
) -> Option<Elem> {
    let ring = if m_bytes.first().is_some_and(|b| b & 1 == 1) {
        QrRing::montgomery(m_bytes)?
    } else {
        QrRing::barrett(m_bytes)?
    };
    let a = ring.decode_mod_vartime(a_bytes)?;
    Some(ring.to_canonical(&ring.pow_vartime(&a, b_words)))
}
