//! `signature`-trait adapters over the level-128 parameters.
//!
//! Messages are digested with belt-hash; signing is deterministic, so
//! [`SigningKey`] needs no generator after key creation.

use crate::{
    hash_message, sign_deterministic, verify, Error, Params, PublicKey,
    SecretKey, Signature,
};
use signature::hazmat::{PrehashSigner, PrehashVerifier};
use signature::{Signer, Verifier};

/// DER encoding of the belt-hash OID `1.2.112.0.2.0.34.101.31.81`.
pub const BELT_HASH_OID: [u8; 11] = [
    0x06, 0x09, 0x2A, 0x70, 0x00, 0x02, 0x00, 0x22, 0x65, 0x1F, 0x51,
];

/// Signing key bound to a parameter set.
#[derive(Clone)]
pub struct SigningKey {
    params: Params,
    secret: SecretKey,
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Binds a secret key to its parameters; the level must carry
    /// belt-hash-sized digests (128).
    pub fn new(params: &Params, secret: SecretKey) -> crate::Result<Self> {
        if params.l != 128 {
            return Err(Error::BadParams);
        }
        let public = secret.public_key(params)?;
        Ok(SigningKey {
            params: *params,
            secret,
            verifying_key: VerifyingKey {
                params: *params,
                public,
            },
        })
    }

    /// The matching verification key.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl PrehashSigner<Signature> for SigningKey {
    fn sign_prehash(&self, prehash: &[u8]) -> signature::Result<Signature> {
        sign_deterministic(&self.params, &BELT_HASH_OID, prehash, &self.secret, &[])
            .map_err(|_| signature::Error::new())
    }
}

impl Signer<Signature> for SigningKey {
    fn try_sign(&self, msg: &[u8]) -> signature::Result<Signature> {
        self.sign_prehash(&hash_message(msg))
    }
}

impl AsRef<VerifyingKey> for SigningKey {
    fn as_ref(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

/// Verification key bound to a parameter set.
#[derive(Clone, Debug)]
pub struct VerifyingKey {
    params: Params,
    public: PublicKey,
}

impl VerifyingKey {
    /// Binds a public key to its parameters.
    pub fn new(params: &Params, public: PublicKey) -> crate::Result<Self> {
        if params.l != 128 {
            return Err(Error::BadParams);
        }
        Ok(VerifyingKey {
            params: *params,
            public,
        })
    }

    /// Parses the `x || y` encoding.
    pub fn from_bytes(params: &Params, bytes: &[u8]) -> crate::Result<Self> {
        let public = PublicKey::from_bytes(params, bytes)?;
        Self::new(params, public)
    }

    /// The inner public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }
}

impl PrehashVerifier<Signature> for VerifyingKey {
    fn verify_prehash(
        &self,
        prehash: &[u8],
        signature: &Signature,
    ) -> signature::Result<()> {
        verify(&self.params, &BELT_HASH_OID, prehash, signature, &self.public)
            .map_err(|_| signature::Error::new())
    }
}

impl Verifier<Signature> for VerifyingKey {
    fn verify(&self, msg: &[u8], signature: &Signature) -> signature::Result<()> {
        self.verify_prehash(&hash_message(msg), signature)
    }
}
