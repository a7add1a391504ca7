//! Complete point formulas in homogeneous coordinates.
//!
//! Renes–Costello–Batina exception-free addition, mixed addition and
//! doubling for arbitrary equation coefficients. Valid for every input
//! pair including the identity and doublings, which is what every
//! secret-dependent path in this crate runs on.

use crate::{Affine, EcGroup, Projective};
use subtle::Choice;

impl EcGroup {
    /// The group identity `(0 : 1 : 0)`.
    pub fn proj_identity(&self) -> Projective {
        Projective {
            x: self.field.zero(),
            y: self.field.one(),
            z: self.field.zero(),
        }
    }

    /// Lifts an affine point to homogeneous coordinates.
    pub fn proj_from_affine(&self, p: &Affine) -> Projective {
        Projective {
            x: p.x,
            y: p.y,
            z: self.field.one(),
        }
    }

    /// Whether the point is the identity.
    pub fn proj_is_identity(&self, p: &Projective) -> Choice {
        self.field.is_zero(&p.z)
    }

    /// Point negation.
    pub fn proj_neg(&self, p: &Projective) -> Projective {
        Projective {
            x: p.x,
            y: self.field.neg(&p.y),
            z: p.z,
        }
    }

    /// Constant-time select of a homogeneous point.
    pub fn proj_select(
        &self,
        a: &Projective,
        b: &Projective,
        choice: Choice,
    ) -> Projective {
        Projective {
            x: qring::select(&a.x, &b.x, choice),
            y: qring::select(&a.y, &b.y, choice),
            z: qring::select(&a.z, &b.z, choice),
        }
    }

    /// Complete addition (Renes–Costello–Batina, algorithm 1).
    pub fn proj_add(&self, lhs: &Projective, rhs: &Projective) -> Projective {
        let f = &self.field;
        let b3 = &self.b3;

        let t0 = f.mul(&lhs.x, &rhs.x); // 1
        let t1 = f.mul(&lhs.y, &rhs.y); // 2
        let t2 = f.mul(&lhs.z, &rhs.z); // 3
        let t3 = f.add(&lhs.x, &lhs.y); // 4
        let t4 = f.add(&rhs.x, &rhs.y); // 5
        let t3 = f.mul(&t3, &t4); // 6
        let t4 = f.add(&t0, &t1); // 7
        let t3 = f.sub(&t3, &t4); // 8
        let t4 = f.add(&lhs.x, &lhs.z); // 9
        let t5 = f.add(&rhs.x, &rhs.z); // 10
        let t4 = f.mul(&t4, &t5); // 11
        let t5 = f.add(&t0, &t2); // 12
        let t4 = f.sub(&t4, &t5); // 13
        let t5 = f.add(&lhs.y, &lhs.z); // 14
        let x3 = f.add(&rhs.y, &rhs.z); // 15
        let t5 = f.mul(&t5, &x3); // 16
        let x3 = f.add(&t1, &t2); // 17
        let t5 = f.sub(&t5, &x3); // 18
        let z3 = f.mul(&self.a, &t4); // 19
        let x3 = f.mul(b3, &t2); // 20
        let z3 = f.add(&x3, &z3); // 21
        let x3 = f.sub(&t1, &z3); // 22
        let z3 = f.add(&t1, &z3); // 23
        let y3 = f.mul(&x3, &z3); // 24
        let t1 = f.add(&t0, &t0); // 25
        let t1 = f.add(&t1, &t0); // 26
        let t2 = f.mul(&self.a, &t2); // 27
        let t4 = f.mul(b3, &t4); // 28
        let t1 = f.add(&t1, &t2); // 29
        let t2 = f.sub(&t0, &t2); // 30
        let t2 = f.mul(&self.a, &t2); // 31
        let t4 = f.add(&t4, &t2); // 32
        let t0 = f.mul(&t1, &t4); // 33
        let y3 = f.add(&y3, &t0); // 34
        let t0 = f.mul(&t5, &t4); // 35
        let x3 = f.mul(&t3, &x3); // 36
        let x3 = f.sub(&x3, &t0); // 37
        let t0 = f.mul(&t3, &t1); // 38
        let z3 = f.mul(&t5, &z3); // 39
        let z3 = f.add(&z3, &t0); // 40

        Projective {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Complete mixed addition (Renes–Costello–Batina, algorithm 2).
    /// The affine operand is finite by type.
    pub fn proj_add_affine(&self, lhs: &Projective, rhs: &Affine) -> Projective {
        let f = &self.field;
        let b3 = &self.b3;

        let t0 = f.mul(&lhs.x, &rhs.x); // 1
        let t1 = f.mul(&lhs.y, &rhs.y); // 2
        let t3 = f.add(&rhs.x, &rhs.y); // 3
        let t4 = f.add(&lhs.x, &lhs.y); // 4
        let t3 = f.mul(&t3, &t4); // 5
        let t4 = f.add(&t0, &t1); // 6
        let t3 = f.sub(&t3, &t4); // 7
        let t4 = f.mul(&rhs.x, &lhs.z); // 8
        let t4 = f.add(&t4, &lhs.x); // 9
        let t5 = f.mul(&rhs.y, &lhs.z); // 10
        let t5 = f.add(&t5, &lhs.y); // 11
        let z3 = f.mul(&self.a, &t4); // 12
        let x3 = f.mul(b3, &lhs.z); // 13
        let z3 = f.add(&x3, &z3); // 14
        let x3 = f.sub(&t1, &z3); // 15
        let z3 = f.add(&t1, &z3); // 16
        let y3 = f.mul(&x3, &z3); // 17
        let t1 = f.add(&t0, &t0); // 18
        let t1 = f.add(&t1, &t0); // 19
        let t2 = f.mul(&self.a, &lhs.z); // 20
        let t4 = f.mul(b3, &t4); // 21
        let t1 = f.add(&t1, &t2); // 22
        let t2 = f.sub(&t0, &t2); // 23
        let t2 = f.mul(&self.a, &t2); // 24
        let t4 = f.add(&t4, &t2); // 25
        let t0 = f.mul(&t1, &t4); // 26
        let y3 = f.add(&y3, &t0); // 27
        let t0 = f.mul(&t5, &t4); // 28
        let x3 = f.mul(&t3, &x3); // 29
        let x3 = f.sub(&x3, &t0); // 30
        let t0 = f.mul(&t3, &t1); // 31
        let z3 = f.mul(&t5, &z3); // 32
        let z3 = f.add(&z3, &t0); // 33

        Projective {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Exception-free doubling (Renes–Costello–Batina, algorithm 3).
    pub fn proj_double(&self, p: &Projective) -> Projective {
        let f = &self.field;
        let b3 = &self.b3;

        let t0 = f.sqr(&p.x); // 1
        let t1 = f.sqr(&p.y); // 2
        let t2 = f.sqr(&p.z); // 3
        let t3 = f.mul(&p.x, &p.y); // 4
        let t3 = f.add(&t3, &t3); // 5
        let z3 = f.mul(&p.x, &p.z); // 6
        let z3 = f.add(&z3, &z3); // 7
        let x3 = f.mul(&self.a, &z3); // 8
        let y3 = f.mul(b3, &t2); // 9
        let y3 = f.add(&x3, &y3); // 10
        let x3 = f.sub(&t1, &y3); // 11
        let y3 = f.add(&t1, &y3); // 12
        let y3 = f.mul(&x3, &y3); // 13
        let x3 = f.mul(&t3, &x3); // 14
        let z3 = f.mul(b3, &z3); // 15
        let t2 = f.mul(&self.a, &t2); // 16
        let t3 = f.sub(&t0, &t2); // 17
        let t3 = f.mul(&self.a, &t3); // 18
        let t3 = f.add(&t3, &z3); // 19
        let z3 = f.add(&t0, &t0); // 20
        let t0 = f.add(&z3, &t0); // 21
        let t0 = f.add(&t0, &t2); // 22
        let t0 = f.mul(&t0, &t3); // 23
        let y3 = f.add(&y3, &t0); // 24
        let t2 = f.mul(&p.y, &p.z); // 25
        let t2 = f.add(&t2, &t2); // 26
        let t0 = f.mul(&t2, &t3); // 27
        let x3 = f.sub(&x3, &t0); // 28
        let z3 = f.mul(&t2, &t1); // 29
        let z3 = f.add(&z3, &z3); // 30
        let z3 = f.add(&z3, &z3); // 31

        Projective {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Normalizes to affine coordinates; the flag is clear when the
    /// point is the identity (and the coordinates are then zero).
    /// Constant-time: the inversion is a fixed Fermat power.
    pub fn proj_to_affine(&self, p: &Projective) -> (Affine, Choice) {
        let zinv = self.field.inv(&p.z);
        let finite = !self.field.is_zero(&p.z);
        (
            Affine {
                x: self.field.mul(&p.x, &zinv),
                y: self.field.mul(&p.y, &zinv),
            },
            finite,
        )
    }

    /// Homogeneous to Jacobian coordinates.
    pub fn proj_to_jacobian(&self, p: &Projective) -> crate::Jacobian {
        let f = &self.field;
        crate::Jacobian {
            x: f.mul(&p.x, &p.z),
            y: f.mul(&p.y, &f.sqr(&p.z)),
            z: p.z,
        }
    }

    /// Jacobian to homogeneous coordinates.
    pub fn jacobian_to_proj(&self, p: &crate::Jacobian) -> Projective {
        let f = &self.field;
        let z2 = f.sqr(&p.z);
        Projective {
            x: f.mul(&p.x, &p.z),
            y: p.y,
            z: f.mul(&z2, &p.z),
        }
    }
}

/// Constant-time select of an affine point.
pub(crate) fn affine_select(a: &Affine, b: &Affine, choice: Choice) -> Affine {
    Affine {
        x: qring::select(&a.x, &b.x, choice),
        y: qring::select(&a.y, &b.y, choice),
    }
}
