//! Precomputed odd small multiples via division polynomials.
//!
//! For a finite point P and window width w the table holds
//! (2i+1)·P for 0 <= i < 2^(w-1), built from the normalized division
//! polynomial sequence W and a single batch inversion, so the whole
//! construction costs one field inversion regardless of the width.

use crate::{Affine, EcGroup};

/// Largest supported window width.
pub const MAX_WINDOW: usize = 5;

/// Small-multiple table capacity: `2^(MAX_WINDOW - 1)` entries.
pub const TABLE_LEN: usize = 1 << (MAX_WINDOW - 1);

// W indices run up to (2^w - 1) + 2.
const W_LEN: usize = (1 << MAX_WINDOW) + 2;

impl EcGroup {
    /// Odd multiples `(2i+1)·p` for `i < 2^(w-1)`, affine.
    ///
    /// Requires `2 <= w <= 5` and a point of large order (the division
    /// polynomial values of a point of order above `2^w + 1` are
    /// non-zero, which the batch inversion relies on). Constant-time in
    /// the point coordinates.
    pub fn small_mult_affine(&self, p: &Affine, w: usize) -> [Affine; TABLE_LEN] {
        debug_assert!((2..=MAX_WINDOW).contains(&w));
        let f = &self.field;
        let count = 1usize << (w - 1);
        let m_max = 2 * count - 1;

        let x = &p.x;
        let y = &p.y;
        let two_y = f.double(y);
        let t2 = f.sqr(&two_y); // (2y)^2
        let t4 = f.sqr(&t2); // (2y)^4

        // seeds: W1 = W2 = 1,
        // W3 = 3(x^2 + A)^2 - 4(A^2 - 3Bx),
        // W4 = 2(x^6 + 4Bx(5x^2 - A) + 5Ax(x^3 - Ax) - 8B^2 - A^3)
        let mut wpoly = [f.zero(); W_LEN];
        wpoly[1] = f.one();
        wpoly[2] = f.one();

        let x2 = f.sqr(x);
        let x3 = f.mul(&x2, x);
        let a2 = f.sqr(&self.a);
        let bx3 = f.add(&f.double(&f.mul(&self.b, x)), &f.mul(&self.b, x));
        let s = f.add(&x2, &self.a);
        let w3 = f.sub(
            &f.add(&f.double(&f.sqr(&s)), &f.sqr(&s)),
            &f.double(&f.double(&f.sub(&a2, &bx3))),
        );
        wpoly[3] = w3;

        let x6 = f.sqr(&x3);
        let five_x2 = f.add(&f.double(&f.double(&x2)), &x2);
        let term1 = f.double(&f.double(&f.mul(&f.mul(&self.b, x), &f.sub(&five_x2, &self.a))));
        let ax = f.mul(&self.a, x);
        let five_ax = f.add(&f.double(&f.double(&ax)), &ax);
        let term2 = f.mul(&five_ax, &f.sub(&x3, &ax));
        let b2 = f.sqr(&self.b);
        let eight_b2 = f.double(&f.double(&f.double(&b2)));
        let a3 = f.mul(&a2, &self.a);
        let w4_half = f.sub(&f.sub(&f.add(&f.add(&x6, &term1), &term2), &eight_b2), &a3);
        wpoly[4] = f.double(&w4_half);

        // W_{2i}   = (W_i W_{i+2}) W_{i-1}^2 - (W_{i-2} W_i) W_{i+1}^2
        // W_{2i+1} = W_i W_{i+2} W_i^2 - (2y)^4 W_{i-1} W_{i+1} W_{i+1}^2  (odd i)
        // W_{2i+1} = (2y)^4 W_i W_{i+2} W_i^2 - W_{i-1} W_{i+1} W_{i+1}^2  (even i)
        for m in 5..=(m_max + 2).min(W_LEN - 1) {
            wpoly[m] = if m % 2 == 0 {
                let i = m / 2;
                f.sub(
                    &f.mul(&f.mul(&wpoly[i], &wpoly[i + 2]), &f.sqr(&wpoly[i - 1])),
                    &f.mul(&f.mul(&wpoly[i - 2], &wpoly[i]), &f.sqr(&wpoly[i + 1])),
                )
            } else {
                let i = (m - 1) / 2;
                let lead = f.mul(&f.mul(&wpoly[i], &wpoly[i + 2]), &f.sqr(&wpoly[i]));
                let tail = f.mul(
                    &f.mul(&wpoly[i - 1], &wpoly[i + 1]),
                    &f.sqr(&wpoly[i + 1]),
                );
                if i % 2 == 1 {
                    f.sub(&lead, &f.mul(&t4, &tail))
                } else {
                    f.sub(&f.mul(&t4, &lead), &tail)
                }
            };
        }

        // batch-invert the squares W_m^2 for odd m >= 3
        let mut squares = [f.one(); TABLE_LEN];
        for i in 1..count {
            squares[i] = f.sqr(&wpoly[2 * i + 1]);
        }
        let mut prefix = [f.one(); TABLE_LEN];
        let mut acc = f.one();
        for i in 1..count {
            prefix[i] = acc;
            acc = f.mul(&acc, &squares[i]);
        }
        let mut inv_acc = f.inv(&acc);
        let mut inverses = [f.one(); TABLE_LEN];
        for i in (1..count).rev() {
            inverses[i] = f.mul(&inv_acc, &prefix[i]);
            inv_acc = f.mul(&inv_acc, &squares[i]);
        }

        // X_m = x - (2y)^2 W_{m-1} W_{m+1} / W_m^2
        // Y_m = y (W_m W_{m+2} W_{m-1}^2 - W_{m-2} W_m W_{m+1}^2) / W_m^4
        let mut table = [*p; TABLE_LEN];
        for i in 1..count {
            let m = 2 * i + 1;
            let inv_sq = &inverses[i]; // 1 / W_m^2
            let xm = f.sub(
                x,
                &f.mul(
                    &f.mul(&t2, &f.mul(&wpoly[m - 1], &wpoly[m + 1])),
                    inv_sq,
                ),
            );
            let num = f.sub(
                &f.mul(
                    &f.mul(&wpoly[m], &wpoly[m + 2]),
                    &f.sqr(&wpoly[m - 1]),
                ),
                &f.mul(
                    &f.mul(&wpoly[m - 2], &wpoly[m]),
                    &f.sqr(&wpoly[m + 1]),
                ),
            );
            let ym = f.mul(&f.mul(y, &num), &f.sqr(inv_sq));
            table[i] = Affine { x: xm, y: ym };
        }
        table
    }
}
