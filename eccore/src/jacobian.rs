//! Jacobian-coordinate arithmetic with explicit case analysis.
//!
//! These formulas branch on coordinate comparisons, so they serve only
//! the variable-time paths: signature verification, parameter
//! validation, anything whose operands are public.

use crate::{Affine, EcGroup, Jacobian};

impl EcGroup {
    /// The identity in Jacobian coordinates.
    pub fn jacobian_identity(&self) -> Jacobian {
        Jacobian {
            x: self.field.one(),
            y: self.field.one(),
            z: self.field.zero(),
        }
    }

    /// Lifts an affine point (`Z = 1`).
    pub fn jacobian_from_affine(&self, p: &Affine) -> Jacobian {
        Jacobian {
            x: p.x,
            y: p.y,
            z: self.field.one(),
        }
    }

    /// Whether the point is the identity. Variable-time.
    pub fn jacobian_is_identity_vartime(&self, p: &Jacobian) -> bool {
        bool::from(self.field.is_zero(&p.z))
    }

    /// Point negation.
    pub fn jacobian_neg(&self, p: &Jacobian) -> Jacobian {
        Jacobian {
            x: p.x,
            y: self.field.neg(&p.y),
            z: p.z,
        }
    }

    /// Doubling. The identity and 2-torsion edge cases fall out of the
    /// formula itself (`Z3 = 0`), so this stays branch-free even though
    /// it lives on the variable-time side.
    pub fn jacobian_double(&self, p: &Jacobian) -> Jacobian {
        let f = &self.field;
        let xx = f.sqr(&p.x);
        let yy = f.sqr(&p.y);
        let yyyy = f.sqr(&yy);
        let zz = f.sqr(&p.z);
        // S = 2((X + YY)^2 - XX - YYYY)
        let s = f.sqr(&f.add(&p.x, &yy));
        let s = f.sub(&f.sub(&s, &xx), &yyyy);
        let s = f.double(&s);
        // M = 3XX + A ZZ^2
        let m = f.add(&f.add(&xx, &f.double(&xx)), &f.mul(&self.a, &f.sqr(&zz)));
        let t = f.sub(&f.sqr(&m), &f.double(&s));
        let y3 = f.sub(
            &f.mul(&m, &f.sub(&s, &t)),
            &f.double(&f.double(&f.double(&yyyy))),
        );
        // Z3 = (Y + Z)^2 - YY - ZZ
        let z3 = f.sub(&f.sub(&f.sqr(&f.add(&p.y, &p.z)), &yy), &zz);
        Jacobian { x: t, y: y3, z: z3 }
    }

    /// Doubling of an affine input (`Z = 1`), saving the `Z` squarings
    /// of the general formula.
    pub fn jacobian_double_affine(&self, p: &Affine) -> Jacobian {
        let f = &self.field;
        let xx = f.sqr(&p.x);
        let yy = f.sqr(&p.y);
        let yyyy = f.sqr(&yy);
        let s = f.sqr(&f.add(&p.x, &yy));
        let s = f.sub(&f.sub(&s, &xx), &yyyy);
        let s = f.double(&s);
        let m = f.add(&f.add(&xx, &f.double(&xx)), &self.a);
        let t = f.sub(&f.sqr(&m), &f.double(&s));
        let y3 = f.sub(
            &f.mul(&m, &f.sub(&s, &t)),
            &f.double(&f.double(&f.double(&yyyy))),
        );
        let z3 = f.double(&p.y);
        Jacobian { x: t, y: y3, z: z3 }
    }

    /// General addition. Variable-time.
    pub fn jacobian_add_vartime(&self, p: &Jacobian, q: &Jacobian) -> Jacobian {
        if self.jacobian_is_identity_vartime(p) {
            return *q;
        }
        if self.jacobian_is_identity_vartime(q) {
            return *p;
        }
        let f = &self.field;
        let z1z1 = f.sqr(&p.z);
        let z2z2 = f.sqr(&q.z);
        let u1 = f.mul(&p.x, &z2z2);
        let u2 = f.mul(&q.x, &z1z1);
        let s1 = f.mul(&f.mul(&p.y, &q.z), &z2z2);
        let s2 = f.mul(&f.mul(&q.y, &p.z), &z1z1);
        let h = f.sub(&u2, &u1);
        let r = f.sub(&s2, &s1);
        if bool::from(f.is_zero(&h)) {
            return if bool::from(f.is_zero(&r)) {
                self.jacobian_double(p)
            } else {
                self.jacobian_identity()
            };
        }
        let i = f.sqr(&f.double(&h));
        let j = f.mul(&h, &i);
        let r = f.double(&r);
        let v = f.mul(&u1, &i);
        let x3 = f.sub(&f.sub(&f.sqr(&r), &j), &f.double(&v));
        let y3 = f.sub(
            &f.mul(&r, &f.sub(&v, &x3)),
            &f.double(&f.mul(&s1, &j)),
        );
        let z3 = f.mul(
            &f.sub(&f.sub(&f.sqr(&f.add(&p.z, &q.z)), &z1z1), &z2z2),
            &h,
        );
        Jacobian {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Mixed addition of a Jacobian and an affine point. Variable-time.
    pub fn jacobian_add_affine_vartime(
        &self,
        p: &Jacobian,
        q: &Affine,
    ) -> Jacobian {
        if self.jacobian_is_identity_vartime(p) {
            return self.jacobian_from_affine(q);
        }
        let f = &self.field;
        let z1z1 = f.sqr(&p.z);
        let u2 = f.mul(&q.x, &z1z1);
        let s2 = f.mul(&f.mul(&q.y, &p.z), &z1z1);
        let h = f.sub(&u2, &p.x);
        let r = f.sub(&s2, &p.y);
        if bool::from(f.is_zero(&h)) {
            return if bool::from(f.is_zero(&r)) {
                self.jacobian_double(p)
            } else {
                self.jacobian_identity()
            };
        }
        let hh = f.sqr(&h);
        let i = f.double(&f.double(&hh));
        let j = f.mul(&h, &i);
        let r = f.double(&r);
        let v = f.mul(&p.x, &i);
        let x3 = f.sub(&f.sub(&f.sqr(&r), &j), &f.double(&v));
        let y3 = f.sub(
            &f.mul(&r, &f.sub(&v, &x3)),
            &f.double(&f.mul(&p.y, &j)),
        );
        let z3 = f.sub(&f.sub(&f.sqr(&f.add(&p.z, &h)), &z1z1), &hh);
        Jacobian {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Subtraction. Variable-time.
    pub fn jacobian_sub_vartime(&self, p: &Jacobian, q: &Jacobian) -> Jacobian {
        self.jacobian_add_vartime(p, &self.jacobian_neg(q))
    }

    /// Mixed subtraction. Variable-time.
    pub fn jacobian_sub_affine_vartime(
        &self,
        p: &Jacobian,
        q: &Affine,
    ) -> Jacobian {
        self.jacobian_add_affine_vartime(p, &self.affine_neg(q))
    }

    /// Normalizes to affine; `None` for the identity. Variable-time.
    pub fn jacobian_to_affine_vartime(&self, p: &Jacobian) -> Option<Affine> {
        if self.jacobian_is_identity_vartime(p) {
            return None;
        }
        let f = &self.field;
        let zinv = f.inv_vartime(&p.z);
        let zi2 = f.sqr(&zinv);
        Some(Affine {
            x: f.mul(&p.x, &zi2),
            y: f.mul(&f.mul(&p.y, &zi2), &zinv),
        })
    }
}
