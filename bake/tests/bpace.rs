//! Full BPACE exchanges between two in-process parties.

use bake::{BpaceInitiator, BpaceResponder, Error, Settings};
use bign::Params;
use rand_core::OsRng;

const OID_L128: &str = "1.2.112.0.2.0.34.101.45.3.1";
const OID_L192: &str = "1.2.112.0.2.0.34.101.45.3.2";
const OID_L256: &str = "1.2.112.0.2.0.34.101.45.3.3";
const PWD: &[u8] = b"8112345";

/// Drives a complete exchange, returning both session keys.
fn run_exchange(
    params: &Params,
    settings: Settings,
    pwd_a: &[u8],
    pwd_b: &[u8],
) -> bake::Result<([u8; 32], [u8; 32])> {
    let mut a = BpaceInitiator::new(params, settings, pwd_a)?;
    let mut b = BpaceResponder::new(params, settings, pwd_b)?;

    let mut yb = [0u8; 32];
    let n2 = b.step2(&mut yb[..b.msg2_len()], &mut OsRng)?;

    let mut m3 = [0u8; 160];
    let n3 = a.step3(&yb[..n2], &mut m3[..a.msg3_len()], &mut OsRng)?;

    let mut m4 = [0u8; 160];
    let n4 = b.step4(&m3[..n3], &mut m4[..b.msg4_len()], &mut OsRng)?;

    let mut m5 = [0u8; 8];
    let n5 = a.step5(&m4[..n4], &mut m5[..a.msg5_len()])?;

    if settings.confirm_a {
        b.step6(&m5[..n5])?;
    }
    Ok((*a.key()?, *b.key()?))
}

#[test]
fn both_parties_agree_on_the_key() {
    for oid in [OID_L128, OID_L192, OID_L256] {
        let params = Params::std(oid).expect("params");
        let (ka, kb) =
            run_exchange(&params, Settings::default(), PWD, PWD).expect("exchange");
        assert_eq!(ka, kb);
        assert_ne!(ka, [0u8; 32]);
    }
}

#[test]
fn confirmation_flags_are_optional() {
    let params = Params::std(OID_L128).expect("params");
    for settings in [
        Settings {
            confirm_b: false,
            confirm_a: true,
        },
        Settings {
            confirm_b: true,
            confirm_a: false,
        },
        Settings {
            confirm_b: false,
            confirm_a: false,
        },
    ] {
        let (ka, kb) = run_exchange(&params, settings, PWD, PWD).expect("exchange");
        assert_eq!(ka, kb);
    }
}

#[test]
fn wrong_password_fails_confirmation() {
    let params = Params::std(OID_L128).expect("params");
    let err = run_exchange(&params, Settings::default(), PWD, b"8112346")
        .expect_err("must fail");
    assert_eq!(err, Error::Auth);
}

#[test]
fn wrong_password_without_tags_diverges() {
    let params = Params::std(OID_L128).expect("params");
    let settings = Settings {
        confirm_b: false,
        confirm_a: false,
    };
    let (ka, kb) =
        run_exchange(&params, settings, PWD, b"8112346").expect("runs through");
    assert_ne!(ka, kb);
}

#[test]
fn tampered_vb_is_rejected() {
    let params = Params::std(OID_L128).expect("params");
    let settings = Settings::default();
    let mut a = BpaceInitiator::new(&params, settings, PWD).expect("a");
    let mut b = BpaceResponder::new(&params, settings, PWD).expect("b");

    let mut yb = [0u8; 16];
    b.step2(&mut yb, &mut OsRng).expect("step2");
    let mut m3 = [0u8; 80];
    a.step3(&yb, &mut m3, &mut OsRng).expect("step3");
    let mut m4 = [0u8; 72];
    b.step4(&m3, &mut m4, &mut OsRng).expect("step4");

    // a single flipped bit in Vb either knocks the point off the curve
    // or scrambles the confirmation tag
    m4[5] ^= 1;
    let mut m5 = [0u8; 8];
    let err = a.step5(&m4, &mut m5).expect_err("must fail");
    assert!(matches!(err, Error::BadPoint | Error::Auth));

    // the session is poisoned afterwards
    assert_eq!(a.key().map(|_| ()), Err(Error::BadLogic));
}

#[test]
fn tampered_ta_is_rejected() {
    let params = Params::std(OID_L128).expect("params");
    let settings = Settings::default();
    let mut a = BpaceInitiator::new(&params, settings, PWD).expect("a");
    let mut b = BpaceResponder::new(&params, settings, PWD).expect("b");

    let mut yb = [0u8; 16];
    b.step2(&mut yb, &mut OsRng).expect("step2");
    let mut m3 = [0u8; 80];
    a.step3(&yb, &mut m3, &mut OsRng).expect("step3");
    let mut m4 = [0u8; 72];
    b.step4(&m3, &mut m4, &mut OsRng).expect("step4");
    let mut m5 = [0u8; 8];
    a.step5(&m4, &mut m5).expect("step5");

    m5[0] ^= 0x80;
    assert_eq!(b.step6(&m5), Err(Error::Auth));
    assert_eq!(b.key().map(|_| ()), Err(Error::BadLogic));
}

#[test]
fn out_of_order_calls_are_rejected() {
    let params = Params::std(OID_L128).expect("params");
    let mut b = BpaceResponder::new(&params, Settings::default(), PWD).expect("b");
    let m3 = [0u8; 80];
    let mut m4 = [0u8; 72];
    assert_eq!(
        b.step4(&m3, &mut m4, &mut OsRng).map(|_| ()),
        Err(Error::BadLogic)
    );
    // keys are never readable before completion
    assert_eq!(b.key().map(|_| ()), Err(Error::BadLogic));
}

#[test]
fn level96_is_refused() {
    let params = Params::std("1.2.112.0.2.0.34.101.45.3.0").expect("params");
    assert!(matches!(
        BpaceResponder::new(&params, Settings::default(), PWD),
        Err(Error::BadParams)
    ));
}
