//! Group arithmetic tests over the bign-curve256v1 parameters.

use bignum::Word;
use eccore::{Affine, CurveParams, EcGroup};
use hex_literal::hex;
use proptest::prelude::*;
use rand_core::OsRng;

// little-endian parameter encodings
const P: [u8; 32] = hex!("43ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff");
const A: [u8; 32] = hex!("40ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff");
const B: [u8; 32] = hex!("f1039cd66b7d2eb253928b976950f54cbefbd8e4ab3ac1d2eda8f315156cce77");
const GX: [u8; 32] = hex!("0000000000000000000000000000000000000000000000000000000000000000");
const GY: [u8; 32] = hex!("936a510418cf291e52f608c4663991785d83d651a3c9e45c9fd616fb3cfcf76b");
const Q: [u8; 32] = hex!("07663d2699bf5a7efc4dfb0dd68e5cd9ffffffffffffffffffffffffffffffff");

const Q_WORDS: [Word; 4] = [
    0x7e5abf99263d6607,
    0xd95c8ed60dfb4dfc,
    0xffffffffffffffff,
    0xffffffffffffffff,
];

const KSMALL_2: ([Word; 4], [Word; 4]) = (
    [0x07f53bb3828f0995, 0x5583090c2cadd0c8, 0x3611261dadc95bb3, 0x2d8419e3d905d21e],
    [0x6c02387649cf258a, 0x49621e8a933a7ecd, 0xfaf5b27700545648, 0xe62690d81bdc754e],
);
const KSMALL_3: ([Word; 4], [Word; 4]) = (
    [0xcc9d10854989824e, 0xe012060c2b1c234b, 0x78272cf0662e92f5, 0x37c58ed5cdf4effb],
    [0xf0ef177b32283e84, 0x02c169757a1e7ae3, 0x4160e112d35f3127, 0xfd9bc9b3dacb85b9],
);
const K_DEADBEEF: ([Word; 4], [Word; 4]) = (
    [0x49c19be7a5844ace, 0x0e730749feb92911, 0x9f345abf3ffeb918, 0xabfd49259f1ddedb],
    [0x84fa6edd0a56dd11, 0xc8507bd1913be57a, 0xcb8b33c9f334b631, 0x6f9033a1fa638b29],
);
const K_WIDE: ([Word; 4], [Word; 4]) = (
    [0x74e7326ca3842c02, 0x14badde17e021119, 0x9f06f3af44131b53, 0xf53514592eab44a4],
    [0x2df23ffa37104ce4, 0x8c1b654640cb6422, 0x5f3a5a34723f91f6, 0xdd37f4c6b49ca5f0],
);
const K_RAND: [Word; 4] = [
    0x0ec946af74b2757c,
    0x54eb98c93afb0691,
    0x685f0575c305992a,
    0x648178415d7ceadc,
];
const K_RAND_PT: ([Word; 4], [Word; 4]) = (
    [0x0f5a2631b40f2e65, 0x036ee6c72bfa9e29, 0xebbae44baf2e50a3, 0x48ccdc00377afa91],
    [0x4e5db3e1d39e3b77, 0x406f86c64cb2276d, 0x7b57497ae8361739, 0x02b04095b785d8af],
);
const LC_U: [Word; 4] = [
    0x8e0df613bea30494,
    0x4a1cbc12a2833e5a,
    0x476124856c0f23b6,
    0x65ad5a8c708c7fb8,
];
const LC_V: [Word; 4] = [
    0x8bb513cf278e514b,
    0xec3b999453601bac,
    0x11f7728d4ec66463,
    0x5df3e0288278069b,
];
const LC_PT: ([Word; 4], [Word; 4]) = (
    [0x8a39bc520508d122, 0x274871601d203390, 0xf07a0f056209f2cc, 0xf7feb89f1d9e487b],
    [0xaeb6ec3f836a623c, 0x79da7b22bf8a1a74, 0x8c21ed8fcd72086e, 0xf34b4fd946abeba6],
);

fn group() -> EcGroup {
    EcGroup::new(&CurveParams {
        p: &P,
        a: &A,
        b: &B,
        base_x: &GX,
        base_y: &GY,
        order: &Q,
        cofactor: 1,
    })
    .expect("curve")
}

fn expect_point(g: &EcGroup, pt: &([Word; 4], [Word; 4])) -> Affine {
    let mut bytes = [0u8; 64];
    bignum::ww::to_le_bytes(&mut bytes[..32], &pt.0);
    bignum::ww::to_le_bytes(&mut bytes[32..], &pt.1);
    g.decode_point(&bytes).unwrap()
}

#[test]
fn construction_and_validity() {
    let g = group();
    assert!(bool::from(g.is_on_curve(g.base())));
    assert!(g.seems_valid_group());
    assert!(g.is_safe_group(50, &mut OsRng));

    // a broken order violates the Hasse bound
    let mut bad_q = Q;
    bad_q[31] = 0x7f;
    let bad = EcGroup::new(&CurveParams {
        p: &P,
        a: &A,
        b: &B,
        base_x: &GX,
        base_y: &GY,
        order: &bad_q,
        cofactor: 1,
    })
    .expect("construction only checks the equation");
    assert!(!bad.seems_valid_group());

    // q = p must be rejected as unsafe
    let self_order = EcGroup::new(&CurveParams {
        p: &P,
        a: &A,
        b: &B,
        base_x: &GX,
        base_y: &GY,
        order: &P,
        cofactor: 1,
    })
    .expect("constructed");
    assert!(!self_order.is_safe_group(50, &mut OsRng));

    // base point off the curve
    let mut bad_y = GY;
    bad_y[0] ^= 1;
    assert!(EcGroup::new(&CurveParams {
        p: &P,
        a: &A,
        b: &B,
        base_x: &GX,
        base_y: &bad_y,
        order: &Q,
        cofactor: 1,
    })
    .is_none());
}

#[test]
fn known_multiples_safe_and_fast() {
    let g = group();
    for (k, pt) in [
        (&[2 as Word, 0, 0, 0][..], KSMALL_2),
        (&[3, 0, 0, 0][..], KSMALL_3),
        (&[0xdeadbeef, 0, 0, 0][..], K_DEADBEEF),
        (
            &[0xfedcba9876543210, 0x123456789abcdef0, 0, 0][..],
            K_WIDE,
        ),
        (&K_RAND[..], K_RAND_PT),
    ] {
        let expect = expect_point(&g, &pt);
        let (safe, ok) = g.mul_gen(k);
        assert!(bool::from(ok));
        assert!(bool::from(g.affine_eq(&safe, &expect)));
        let fast = g.mul_vartime(k, g.base()).expect("finite");
        assert!(bool::from(g.affine_eq(&fast, &expect)));
    }

    // d = 1 and d = q - 1 = -1
    let (one, ok) = g.mul_gen(&[1, 0, 0, 0]);
    assert!(bool::from(ok));
    assert!(bool::from(g.affine_eq(&one, g.base())));
    let mut qm1 = Q_WORDS;
    qm1[0] -= 1;
    let (minus, ok) = g.mul_gen(&qm1);
    assert!(bool::from(ok));
    assert!(bool::from(g.affine_eq(&minus, &g.affine_neg(g.base()))));
}

#[test]
fn order_times_base_is_identity() {
    let g = group();
    let (_, ok) = g.mul_gen(&Q_WORDS);
    assert!(!bool::from(ok));
    assert!(g.mul_vartime(&Q_WORDS, g.base()).is_none());
    assert!(g.mul_vartime(&[0, 0, 0, 0], g.base()).is_none());
}

#[test]
fn small_multiple_tables_match_additions() {
    let g = group();
    for w in [2usize, 3, 4, 5] {
        let table = g.small_mult_affine(g.base(), w);
        let mut acc = g.jacobian_from_affine(g.base());
        let double = g.jacobian_double(&acc);
        for (i, entry) in table.iter().take(1 << (w - 1)).enumerate() {
            let expect = g
                .jacobian_to_affine_vartime(&acc)
                .expect("odd multiple is finite");
            assert!(
                bool::from(g.affine_eq(entry, &expect)),
                "w = {w}, entry {i}"
            );
            acc = g.jacobian_add_vartime(&acc, &double);
        }
    }
}

#[test]
fn complete_formulas_handle_edges() {
    let g = group();
    let id = g.proj_identity();
    let gp = g.proj_from_affine(g.base());

    // O + O = O, O + G = G, G + (-G) = O, G + G = 2G
    assert!(bool::from(g.proj_is_identity(&g.proj_add(&id, &id))));
    let (sum, ok) = g.proj_to_affine(&g.proj_add(&id, &gp));
    assert!(bool::from(ok));
    assert!(bool::from(g.affine_eq(&sum, g.base())));
    let cancel = g.proj_add(&gp, &g.proj_neg(&gp));
    assert!(bool::from(g.proj_is_identity(&cancel)));

    let dbl = g.proj_double(&gp);
    let add = g.proj_add(&gp, &gp);
    let (d1, _) = g.proj_to_affine(&dbl);
    let (d2, _) = g.proj_to_affine(&add);
    let expect = expect_point(&g, &KSMALL_2);
    assert!(bool::from(g.affine_eq(&d1, &expect)));
    assert!(bool::from(g.affine_eq(&d2, &expect)));

    // mixed addition agrees and tolerates the doubling case
    let (m1, _) = g.proj_to_affine(&g.proj_add_affine(&gp, g.base()));
    assert!(bool::from(g.affine_eq(&m1, &expect)));
    let (m2, ok) = g.proj_to_affine(&g.proj_add_affine(&id, g.base()));
    assert!(bool::from(ok));
    assert!(bool::from(g.affine_eq(&m2, g.base())));

    // doubling the identity stays the identity
    assert!(bool::from(g.proj_is_identity(&g.proj_double(&id))));
}

#[test]
fn jacobian_and_projective_agree() {
    let g = group();
    let two = expect_point(&g, &KSMALL_2);
    let three = expect_point(&g, &KSMALL_3);

    let j = g.jacobian_add_affine_vartime(&g.jacobian_from_affine(&two), g.base());
    let a1 = g.jacobian_to_affine_vartime(&j).expect("finite");
    assert!(bool::from(g.affine_eq(&a1, &three)));

    // the affine-input doubling shortcut agrees with the general one
    let d1 = g
        .jacobian_to_affine_vartime(&g.jacobian_double_affine(g.base()))
        .expect("finite");
    assert!(bool::from(g.affine_eq(&d1, &two)));

    // coordinate conversions round-trip
    let p = g.jacobian_to_proj(&j);
    let (a2, _) = g.proj_to_affine(&p);
    assert!(bool::from(g.affine_eq(&a2, &three)));
    let back = g.proj_to_jacobian(&p);
    let a3 = g.jacobian_to_affine_vartime(&back).expect("finite");
    assert!(bool::from(g.affine_eq(&a3, &three)));
}

#[test]
fn swu_maps_onto_curve() {
    let g = group();
    // a = 0 lands on (0, sqrt(B)) = the standard base point
    let zero = qring::ZERO;
    let p0 = g.swu(&zero);
    assert!(bool::from(g.is_on_curve(&p0)));
    assert!(bool::from(g.affine_eq(&p0, g.base())));

    // field elements from varied bytes all map onto the curve
    for seed in 0u8..32 {
        let mut bytes = [0u8; 32];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = seed.wrapping_mul(37).wrapping_add(i as u8).wrapping_mul(101);
        }
        let a = g
            .field()
            .decode_lazy(&bytes)
            .expect("length");
        let pt = g.swu(&a);
        assert!(bool::from(g.is_on_curve(&pt)), "seed {seed}");
    }
}

#[test]
fn multi_scalar_vector() {
    let g = group();
    let q_pt = expect_point(&g, &K_RAND_PT);
    let expect = expect_point(&g, &LC_PT);
    let r = g
        .lincomb_vartime(&[(&LC_U, g.base()), (&LC_V, &q_pt)])
        .expect("finite");
    assert!(bool::from(g.affine_eq(&r, &expect)));

    // d*G + (q - d)*G = O
    let mut qm = Q_WORDS;
    qm[0] -= 0xdeadbeef;
    assert!(g
        .lincomb_vartime(&[(&[0xdeadbeef, 0, 0, 0], g.base()), (&qm, g.base())])
        .is_none());
}

#[test]
fn point_codec() {
    let g = group();
    let pt = expect_point(&g, &K_DEADBEEF);
    let mut bytes = [0u8; 64];
    g.encode_point(&pt, &mut bytes);
    let back = g.decode_point(&bytes).unwrap();
    assert!(bool::from(g.affine_eq(&back, &pt)));

    // off-curve and truncated encodings are rejected
    let mut bad = bytes;
    bad[0] ^= 1;
    assert!(bool::from(g.decode_point(&bad).is_none()));
    assert!(bool::from(g.decode_point(&bytes[..63]).is_none()));
}

prop_compose! {
    fn scalar()(bytes in any::<[u8; 32]>()) -> [Word; 4] {
        let mut w = [0 as Word; 4];
        bignum::ww::from_le_bytes(&mut w, &bytes);
        // keep below 2q, the ladder's contract
        w[3] &= 0x7fffffffffffffff;
        w
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn safe_and_fast_multiplication_agree(d in scalar()) {
        let g = group();
        let (safe, ok) = g.mul_gen(&d);
        match g.mul_vartime(&d, g.base()) {
            Some(fast) => {
                prop_assert!(bool::from(ok));
                prop_assert!(bool::from(g.affine_eq(&safe, &fast)));
            }
            None => prop_assert!(!bool::from(ok)),
        }
    }

    #[test]
    fn multiplication_is_homomorphic(d in scalar()) {
        // (d+1)G = dG + G
        let g = group();
        let mut d1 = d;
        if bignum::zz::add_word_assign(&mut d1, 1) != 0 {
            return Ok(());
        }
        let lhs = g.mul_vartime(&d1, g.base());
        let dg = g.mul_vartime(&d, g.base());
        let rhs = match dg {
            Some(p) => g.jacobian_to_affine_vartime(
                &g.jacobian_add_affine_vartime(&g.jacobian_from_affine(&p), g.base()),
            ),
            None => Some(*g.base()),
        };
        match (lhs, rhs) {
            (Some(a), Some(b)) => prop_assert!(bool::from(g.affine_eq(&a, &b))),
            (None, None) => {}
            _ => prop_assert!(false),
        }
    }
}
