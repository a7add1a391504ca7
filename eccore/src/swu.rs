//! Deterministic hashing to the curve (Shallue–Woestijne–Ulas).

use crate::{Affine, EcGroup};
use qring::Elem;

impl EcGroup {
    /// Maps a field element onto the curve.
    ///
    /// Requires `p = 3 (mod 4)`, `A != 0`, `B != 0` and `B` a quadratic
    /// residue. Two candidate abscissas `x1 = (-B/A)(1 + 1/(t^2 + t))`
    /// and `x2 = t x1` with `t = -a^2` are formed; exactly one carries a
    /// square `y^2` for `a^2 != 0, 1`, and the selection between them is
    /// mask-driven. The degenerate inputs (`a^2` in `{0, 1}`) resolve to
    /// the point `(0, sqrt(B))`, so the output lies on the curve for
    /// every input. Constant-time.
    pub fn swu(&self, a: &Elem) -> Affine {
        let f = &self.field;
        debug_assert!(!bool::from(f.is_zero(&self.a)));
        debug_assert!(!bool::from(f.is_zero(&self.b)));

        let t = f.neg(&f.sqr(a));
        let s = f.add(&f.sqr(&t), &t);
        // Fermat inversion maps 0 to 0, which folds the a = 0 case into
        // the x2 branch below.
        let s_inv = f.inv(&s);
        let mba = f.neg(&f.div(&self.b, &self.a));
        let x1 = f.mul(&mba, &f.add(&f.one(), &s_inv));
        let x2 = f.mul(&t, &x1);

        let g1 = self.equation_rhs(&x1);
        let g2 = self.equation_rhs(&x2);
        let (y1, ok1) = f.sqrt_3mod4(&g1);
        let (y2, ok2) = f.sqrt_3mod4(&g2);

        // prefer the x2 branch, fall back to x1, and rescue the two
        // degenerate inputs with (0, sqrt(B))
        let (yb, okb) = f.sqrt_3mod4(&self.b);
        debug_assert!(bool::from(okb));
        let mut x = qring::select(&qring::ZERO, &x1, ok1);
        let mut y = qring::select(&yb, &y1, ok1);
        x = qring::select(&x, &x2, ok2);
        y = qring::select(&y, &y2, ok2);
        Affine { x, y }
    }

    /// `x^3 + Ax + B`.
    pub(crate) fn equation_rhs(&self, x: &Elem) -> Elem {
        let f = &self.field;
        f.add(&f.mul(&f.add(&f.sqr(x), &self.a), x), &self.b)
    }
}
