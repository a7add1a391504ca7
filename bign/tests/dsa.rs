//! Signing and verification tests.

use bign::dsa::{SigningKey, VerifyingKey, BELT_HASH_OID};
use bign::{
    bign96, hash_message, sign, sign_deterministic, verify, Error, Params,
    PublicKey, SecretKey, Signature,
};
use hex_literal::hex;
use proptest::prelude::*;
use rand_core::OsRng;
use signature::hazmat::PrehashSigner;
use signature::{Signer, Verifier};

const OID_L96: &str = "1.2.112.0.2.0.34.101.45.3.0";
const OID_L128: &str = "1.2.112.0.2.0.34.101.45.3.1";
const OID_L192: &str = "1.2.112.0.2.0.34.101.45.3.2";
const OID_L256: &str = "1.2.112.0.2.0.34.101.45.3.3";

// level-96 test secret (reduced into the group) and its public key
const D96: [u8; 24] = hex!("9b389cda450d1ecb6ff23485b1ebfba832f033456739734b");
const Q96: [u8; 48] = hex!(
    "e070add01553ccf0c1b35be6eb1dbcec4d65d18c2d7cb1ef"
    "786edb445bc5749a322094df0c4f28a7ee3ac08eac040025"
);

#[test]
fn round_trip_all_standard_levels() {
    for oid in [OID_L128, OID_L192, OID_L256] {
        let params = Params::std(oid).expect("params");
        let sk = SecretKey::random(&params, &mut OsRng).expect("keygen");
        let pk = sk.public_key(&params).expect("public key");

        let mut hash = vec![0u8; params.no()];
        let h = hash_message(b"bignbignbignbignbignbignbignbign");
        for (i, b) in hash.iter_mut().enumerate() {
            *b = h[i % 32] ^ (i as u8);
        }

        let sig = sign(&params, &BELT_HASH_OID, &hash, &sk, &mut OsRng).expect("sign");
        assert_eq!(sig.as_bytes().len(), params.no() + (params.l / 8) as usize);
        verify(&params, &BELT_HASH_OID, &hash, &sig, &pk).expect("verify");

        // tampering with any octet breaks the signature
        let mut bad = sig.as_bytes().to_vec();
        let last = bad.len() - 1;
        bad[last] ^= 1;
        let bad_sig = Signature::from_slice(&params, &bad).expect("length ok");
        assert_eq!(
            verify(&params, &BELT_HASH_OID, &hash, &bad_sig, &pk),
            Err(Error::BadSig)
        );
    }
}

#[test]
fn deterministic_signatures_are_pure() {
    let params = Params::std(OID_L128).expect("params");
    let sk = SecretKey::random(&params, &mut OsRng).expect("keygen");
    let pk = sk.public_key(&params).expect("public key");
    let hash = hash_message(b"determinism");

    let s1 = sign_deterministic(&params, &BELT_HASH_OID, &hash, &sk, b"1234567890")
        .expect("sign");
    let s2 = sign_deterministic(&params, &BELT_HASH_OID, &hash, &sk, b"1234567890")
        .expect("sign");
    assert_eq!(s1.as_bytes(), s2.as_bytes());
    verify(&params, &BELT_HASH_OID, &hash, &s1, &pk).expect("verify");

    // a different seasoning string moves the nonce
    let s3 = sign_deterministic(&params, &BELT_HASH_OID, &hash, &sk, b"0987654321")
        .expect("sign");
    assert_ne!(s1.as_bytes(), s3.as_bytes());
    verify(&params, &BELT_HASH_OID, &hash, &s3, &pk).expect("verify");
}

#[test]
fn level96_round_trip_with_fixed_key() {
    let params = bign96::params_std(OID_L96).expect("params");
    let sk = SecretKey::from_bytes(&params, &D96).expect("secret");
    let pk = sk.public_key(&params).expect("public");
    assert_eq!(pk.as_bytes(), &Q96[..]);

    let hash = hash_message(b"bignbignbignbignbignbignbignbign");
    let sig = bign96::sign_deterministic(&params, &BELT_HASH_OID, &hash, &sk, b"1234567890")
        .expect("sign");
    assert_eq!(sig.as_bytes().len(), bign96::SIGNATURE_LEN);
    bign96::verify(&params, &BELT_HASH_OID, &hash, &sig, &pk).expect("verify");

    // reproducible across runs
    let again = bign96::sign_deterministic(&params, &BELT_HASH_OID, &hash, &sk, b"1234567890")
        .expect("sign");
    assert_eq!(sig.as_bytes(), again.as_bytes());

    // flipping the final octet must be caught
    let mut bad = sig.as_bytes().to_vec();
    bad[33] ^= 1;
    let bad_sig = Signature::from_slice(&params, &bad).expect("length ok");
    assert_eq!(
        bign96::verify(&params, &BELT_HASH_OID, &hash, &bad_sig, &pk),
        Err(Error::BadSig)
    );

    // randomized mode verifies too
    let rsig = bign96::sign(&params, &BELT_HASH_OID, &hash, &sk, &mut OsRng).expect("sign");
    bign96::verify(&params, &BELT_HASH_OID, &hash, &rsig, &pk).expect("verify");
}

#[test]
fn malformed_inputs() {
    let params = Params::std(OID_L128).expect("params");
    let sk = SecretKey::random(&params, &mut OsRng).expect("keygen");
    let pk = sk.public_key(&params).expect("public");
    let hash = hash_message(b"msg");

    // garbage OID
    assert_eq!(
        sign(&params, &[0x02, 0x01, 0x05], &hash, &sk, &mut OsRng).map(|_| ()),
        Err(Error::BadOid)
    );
    // wrong digest length
    assert_eq!(
        sign(&params, &BELT_HASH_OID, &hash[..31], &sk, &mut OsRng).map(|_| ()),
        Err(Error::BadInput)
    );
    // wrong signature length
    assert_eq!(
        Signature::from_slice(&params, &[0u8; 47]).map(|_| ()),
        Err(Error::BadSig)
    );
    // s1 >= q
    let sig = sign(&params, &BELT_HASH_OID, &hash, &sk, &mut OsRng).expect("sign");
    let mut bytes = sig.as_bytes().to_vec();
    bytes[16..48].copy_from_slice(&params.q[..32]);
    let forged = Signature::from_slice(&params, &bytes).expect("length ok");
    assert_eq!(
        verify(&params, &BELT_HASH_OID, &hash, &forged, &pk),
        Err(Error::BadSig)
    );

    // the level-128 entry points refuse level-96 parameters
    let p96 = Params::std(OID_L96).expect("params");
    assert_eq!(
        SecretKey::random(&p96, &mut OsRng)
            .and_then(|k| sign(&p96, &BELT_HASH_OID, &hash, &k, &mut OsRng))
            .map(|_| ()),
        Err(Error::BadParams)
    );
}

#[test]
fn key_codecs() {
    let params = Params::std(OID_L128).expect("params");

    // zero and order-sized scalars are invalid
    assert_eq!(
        SecretKey::from_bytes(&params, &[0u8; 32]).map(|_| ()),
        Err(Error::BadPrivKey)
    );
    assert_eq!(
        SecretKey::from_bytes(&params, &params.q[..32]).map(|_| ()),
        Err(Error::BadPrivKey)
    );
    assert_eq!(
        SecretKey::from_bytes(&params, &[1u8; 31]).map(|_| ()),
        Err(Error::BadInput)
    );

    // a public key must sit on the curve
    let sk = SecretKey::random(&params, &mut OsRng).expect("keygen");
    let pk = sk.public_key(&params).expect("public");
    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(pk.as_bytes());
    assert!(PublicKey::from_bytes(&params, &bytes).is_ok());
    bytes[0] ^= 1;
    assert_eq!(
        PublicKey::from_bytes(&params, &bytes).map(|_| ()),
        Err(Error::BadPubKey)
    );
}

#[test]
fn signer_verifier_traits() {
    let params = Params::std(OID_L128).expect("params");
    let secret = SecretKey::random(&params, &mut OsRng).expect("keygen");
    let signing_key = SigningKey::new(&params, secret).expect("signing key");
    let msg = b"testing";

    let sig: Signature = signing_key.sign(msg);
    signing_key
        .verifying_key()
        .verify(msg, &sig)
        .expect("verify");

    let vk = VerifyingKey::from_bytes(
        &params,
        signing_key.verifying_key().public_key().as_bytes(),
    )
    .expect("rebuild");
    vk.verify(msg, &sig).expect("verify rebuilt");

    let prehash = hash_message(msg);
    let sig2 = signing_key.sign_prehash(&prehash).expect("prehash");
    assert_eq!(sig.as_bytes(), sig2.as_bytes());
}

prop_compose! {
    fn keypair()(bytes in any::<[u8; 32]>()) -> (Params, SecretKey, PublicKey) {
        let params = Params::std(OID_L128).expect("params");
        let mut seed = bytes;
        loop {
            if let Ok(sk) = SecretKey::from_bytes(&params, &seed) {
                let pk = sk.public_key(&params).expect("public");
                return (params, sk, pk);
            }
            seed[31] = seed[31].wrapping_add(1);
            if seed.iter().all(|&b| b == 0) {
                seed[0] = 1;
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10))]

    #[test]
    fn sign_and_verify((params, sk, pk) in keypair(), msg in any::<[u8; 16]>()) {
        let hash = hash_message(&msg);
        let sig = sign_deterministic(&params, &BELT_HASH_OID, &hash, &sk, b"")
            .expect("sign");
        prop_assert!(verify(&params, &BELT_HASH_OID, &hash, &sig, &pk).is_ok());
    }

    #[test]
    fn reject_tampered_signature(
        (params, sk, pk) in keypair(),
        byte in 0usize..48,
        bit in 0usize..8,
    ) {
        let hash = hash_message(b"fixed message");
        let sig = sign_deterministic(&params, &BELT_HASH_OID, &hash, &sk, b"")
            .expect("sign");
        let mut bytes = sig.as_bytes().to_vec();
        bytes[byte] ^= 1 << bit;
        match Signature::from_slice(&params, &bytes) {
            Ok(tampered) => prop_assert!(
                verify(&params, &BELT_HASH_OID, &hash, &tampered, &pk).is_err()
            ),
            Err(_) => {}
        }
    }
}
