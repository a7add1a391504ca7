//! The BPACE state machines.
//!
//! Side A (the initiator) runs steps 3 and 5; side B (the responder)
//! runs steps 2, 4 and 6:
//!
//! ```text
//! B: step2            -> Yb = ECB(Rb, K2)
//! A: step3(Yb)        -> Ya = ECB(Ra, K2), Va = [ua] W,  W = swu(Ra || Rb)
//! B: step4(Ya || Va)  -> Vb = [ub] W, K = [ub] Va, (Tb)
//! A: step5(Vb || Tb)  -> K = [ua] Vb, (Ta)
//! B: step6(Ta)
//! ```
//!
//! Both sides then hold K0 (the session key) and K1 (the confirmation
//! key). Any invalid point, tag mismatch or generator failure poisons
//! the session and wipes the derived material.

use crate::belt::{ecb_decrypt, ecb_encrypt, krp, mac};
use belt_hash::{BeltHash, Digest};
use bign::{Error, Params, Result};
use bignum::{rand::rand_nz_mod, ww, Word};
use eccore::{Affine, EcGroup};
use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Session key length in octets.
pub const KEY_LEN: usize = 32;

/// Key-confirmation tag length in octets.
pub const TAG_LEN: usize = 8;

const LEVEL_ONES: [u8; 16] = [0xFF; 16];
const KIND_K0: [u8; 16] = [0; 16];
const KIND_K1: [u8; 16] = {
    let mut k = [0u8; 16];
    k[0] = 1;
    k
};

/// Key-confirmation switches; both default on.
#[derive(Clone, Copy, Debug)]
pub struct Settings {
    /// B sends the tag Tb in step 4.
    pub confirm_b: bool,
    /// A sends the tag Ta in step 5.
    pub confirm_a: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            confirm_b: true,
            confirm_a: true,
        }
    }
}

/// Everything a session must not leak, wiped on drop or failure.
#[derive(Zeroize, ZeroizeOnDrop)]
struct Secrets {
    k2: [u8; 32],
    my_nonce: [u8; 32],
    peer_nonce: [u8; 32],
    scalar: [u8; 64],
    k0: [u8; 32],
    k1: [u8; 32],
}

impl Secrets {
    fn new(pwd: &[u8]) -> Self {
        let mut hasher = BeltHash::new();
        hasher.update(pwd);
        Secrets {
            k2: hasher.finalize().into(),
            my_nonce: [0; 32],
            peer_nonce: [0; 32],
            scalar: [0; 64],
            k0: [0; 32],
            k1: [0; 32],
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Start,
    AwaitPeer,
    AwaitConfirm,
    Done,
    Failed,
}

struct Session {
    params: Params,
    curve: EcGroup,
    settings: Settings,
    state: State,
    secrets: Secrets,
}

impl Session {
    fn new(params: &Params, settings: Settings, pwd: &[u8]) -> Result<Self> {
        // the nonce must fill at least one belt block
        if params.l < 128 {
            return Err(Error::BadParams);
        }
        let curve = params.curve()?;
        Ok(Session {
            params: *params,
            curve,
            settings,
            state: State::Start,
            secrets: Secrets::new(pwd),
        })
    }

    fn nonce_len(&self) -> usize {
        (self.params.l / 8) as usize
    }

    fn point_len(&self) -> usize {
        2 * self.params.no()
    }

    fn fail(&mut self, e: Error) -> Error {
        self.secrets.zeroize();
        self.state = State::Failed;
        e
    }

    /// The password-derived generator `swu(Ra || Rb)`.
    fn generator(&self, ra: &[u8], rb: &[u8]) -> Result<Affine> {
        let no = self.params.no();
        let mut seed = [0u8; 64];
        let nl = self.nonce_len();
        seed[..nl].copy_from_slice(ra);
        seed[nl..2 * nl].copy_from_slice(rb);
        debug_assert_eq!(2 * nl, no);
        let a = self
            .curve
            .field()
            .decode_lazy(&seed[..no])
            .ok_or(Error::BadLogic)?;
        seed.zeroize();
        Ok(self.curve.swu(&a))
    }

    /// Picks a fresh scalar and returns `[scalar] base`.
    fn keygen(
        &mut self,
        base: &Affine,
        rng: &mut (impl CryptoRngCore + ?Sized),
    ) -> Result<Affine> {
        let mut q = [0 as Word; qring::LIMBS + 1];
        ww::from_le_bytes(&mut q[..qring::LIMBS], &self.params.q[..self.params.no()]);
        let qn = ww::limbs_vartime(&q);
        let mut u = [0 as Word; qring::LIMBS];
        if !rand_nz_mod(&mut u[..qn], &q[..qn], rng) {
            return Err(Error::BadRng);
        }
        ww::to_le_bytes(
            &mut self.secrets.scalar[..self.params.no()],
            &u[..qn],
        );
        let (v, finite) = self.curve.mul(&u[..qn], base);
        u.zeroize();
        if !bool::from(finite) {
            return Err(Error::BadRng);
        }
        Ok(v)
    }

    /// Multiplies a received point by the stored scalar and derives
    /// K0/K1 from the shared x-coordinate.
    fn derive_keys(&mut self, peer: &Affine) -> Result<()> {
        let no = self.params.no();
        let mut u = [0 as Word; qring::LIMBS];
        ww::from_le_bytes(&mut u, &self.secrets.scalar[..no]);
        let (shared, finite) = self.curve.mul(&u[..], peer);
        u.zeroize();
        if !bool::from(finite) {
            return Err(Error::BadPoint);
        }
        let mut kx = [0u8; 64];
        self.curve.encode_x(&shared, &mut kx[..no]);

        let mut master = [0u8; 32];
        if no == 32 {
            master.copy_from_slice(&kx[..32]);
        } else {
            let mut hasher = BeltHash::new();
            hasher.update(&kx[..no]);
            master.copy_from_slice(&hasher.finalize());
        }
        kx.zeroize();

        self.secrets.k0 = krp(&master, &LEVEL_ONES, &KIND_K0);
        self.secrets.k1 = krp(&master, &LEVEL_ONES, &KIND_K1);
        master.zeroize();
        Ok(())
    }

    fn key(&self) -> Result<&[u8; KEY_LEN]> {
        if self.state != State::Done {
            return Err(Error::BadLogic);
        }
        Ok(&self.secrets.k0)
    }
}

/// Side B of the exchange: steps 2, 4 and 6.
pub struct BpaceResponder(Session);

impl BpaceResponder {
    /// Opens a responder session over a shared password.
    pub fn new(params: &Params, settings: Settings, pwd: &[u8]) -> Result<Self> {
        Ok(BpaceResponder(Session::new(params, settings, pwd)?))
    }

    /// Octet length of the step-2 message.
    pub fn msg2_len(&self) -> usize {
        self.0.nonce_len()
    }

    /// Octet length of the expected step-3 message.
    pub fn msg3_len(&self) -> usize {
        self.0.nonce_len() + self.0.point_len()
    }

    /// Octet length of the step-4 message.
    pub fn msg4_len(&self) -> usize {
        self.0.point_len() + if self.0.settings.confirm_b { TAG_LEN } else { 0 }
    }

    /// Step 2: emit the encrypted nonce `Yb`.
    pub fn step2(
        &mut self,
        out: &mut [u8],
        rng: &mut (impl CryptoRngCore + ?Sized),
    ) -> Result<usize> {
        let s = &mut self.0;
        if s.state != State::Start {
            return Err(s.fail(Error::BadLogic));
        }
        let nl = s.nonce_len();
        if out.len() != nl {
            return Err(Error::BadInput);
        }
        rng.fill_bytes(&mut s.secrets.my_nonce[..nl]);
        out[..nl].copy_from_slice(&s.secrets.my_nonce[..nl]);
        if let Err(e) = ecb_encrypt(&s.secrets.k2, &mut out[..nl]) {
            return Err(s.fail(e));
        }
        s.state = State::AwaitPeer;
        Ok(nl)
    }

    /// Step 4: consume `Ya || Va`, emit `Vb` (and `Tb` when enabled).
    pub fn step4(
        &mut self,
        msg: &[u8],
        out: &mut [u8],
        rng: &mut (impl CryptoRngCore + ?Sized),
    ) -> Result<usize> {
        let expected_in = self.msg3_len();
        let expected_out = self.msg4_len();
        let s = &mut self.0;
        if s.state != State::AwaitPeer {
            return Err(s.fail(Error::BadLogic));
        }
        if msg.len() != expected_in || out.len() != expected_out {
            return Err(s.fail(Error::BadInput));
        }
        let nl = s.nonce_len();
        let pl = s.point_len();

        // recover Ra
        let mut ra = [0u8; 32];
        ra[..nl].copy_from_slice(&msg[..nl]);
        if let Err(e) = ecb_decrypt(&s.secrets.k2, &mut ra[..nl]) {
            return Err(s.fail(e));
        }
        s.secrets.peer_nonce[..nl].copy_from_slice(&ra[..nl]);

        let mut rb = s.secrets.my_nonce;
        let w = match s.generator(&ra[..nl], &rb[..nl]) {
            Ok(w) => w,
            Err(e) => return Err(s.fail(e)),
        };
        ra.zeroize();
        rb.zeroize();

        let va = match Option::<Affine>::from(s.curve.decode_point(&msg[nl..nl + pl])) {
            Some(p) => p,
            None => return Err(s.fail(Error::BadPoint)),
        };

        let vb = match s.keygen(&w, rng) {
            Ok(p) => p,
            Err(e) => return Err(s.fail(e)),
        };
        if let Err(e) = s.derive_keys(&va) {
            return Err(s.fail(e));
        }

        s.curve.encode_point(&vb, &mut out[..pl]);
        if s.settings.confirm_b {
            match mac(&s.secrets.k1, &[0xFF; 16]) {
                Ok(tag) => out[pl..pl + TAG_LEN].copy_from_slice(&tag),
                Err(e) => return Err(s.fail(e)),
            }
        }
        s.state = if s.settings.confirm_a {
            State::AwaitConfirm
        } else {
            State::Done
        };
        Ok(expected_out)
    }

    /// Step 6: check the initiator's confirmation tag.
    pub fn step6(&mut self, ta: &[u8]) -> Result<()> {
        let s = &mut self.0;
        if s.state != State::AwaitConfirm || !s.settings.confirm_a {
            return Err(s.fail(Error::BadLogic));
        }
        if ta.len() != TAG_LEN {
            return Err(s.fail(Error::BadInput));
        }
        let expect = match mac(&s.secrets.k1, &[0x00; 16]) {
            Ok(t) => t,
            Err(e) => return Err(s.fail(e)),
        };
        if !bool::from(expect[..].ct_eq(ta)) {
            return Err(s.fail(Error::Auth));
        }
        s.state = State::Done;
        Ok(())
    }

    /// The established session key; only after the exchange completed.
    pub fn key(&self) -> Result<&[u8; KEY_LEN]> {
        self.0.key()
    }
}

/// Side A of the exchange: steps 3 and 5.
pub struct BpaceInitiator(Session);

impl BpaceInitiator {
    /// Opens an initiator session over a shared password.
    pub fn new(params: &Params, settings: Settings, pwd: &[u8]) -> Result<Self> {
        Ok(BpaceInitiator(Session::new(params, settings, pwd)?))
    }

    /// Octet length of the step-3 message.
    pub fn msg3_len(&self) -> usize {
        self.0.nonce_len() + self.0.point_len()
    }

    /// Octet length of the expected step-4 message.
    pub fn msg4_len(&self) -> usize {
        self.0.point_len() + if self.0.settings.confirm_b { TAG_LEN } else { 0 }
    }

    /// Octet length of the step-5 message.
    pub fn msg5_len(&self) -> usize {
        if self.0.settings.confirm_a {
            TAG_LEN
        } else {
            0
        }
    }

    /// Step 3: consume `Yb`, emit `Ya || Va`.
    pub fn step3(
        &mut self,
        yb: &[u8],
        out: &mut [u8],
        rng: &mut (impl CryptoRngCore + ?Sized),
    ) -> Result<usize> {
        let expected_out = self.msg3_len();
        let s = &mut self.0;
        if s.state != State::Start {
            return Err(s.fail(Error::BadLogic));
        }
        let nl = s.nonce_len();
        let pl = s.point_len();
        if yb.len() != nl || out.len() != expected_out {
            return Err(s.fail(Error::BadInput));
        }

        // recover Rb
        let mut rb = [0u8; 32];
        rb[..nl].copy_from_slice(yb);
        if let Err(e) = ecb_decrypt(&s.secrets.k2, &mut rb[..nl]) {
            return Err(s.fail(e));
        }
        s.secrets.peer_nonce[..nl].copy_from_slice(&rb[..nl]);

        // fresh Ra, sent encrypted
        rng.fill_bytes(&mut s.secrets.my_nonce[..nl]);
        out[..nl].copy_from_slice(&s.secrets.my_nonce[..nl]);
        if let Err(e) = ecb_encrypt(&s.secrets.k2, &mut out[..nl]) {
            return Err(s.fail(e));
        }

        let mut ra = s.secrets.my_nonce;
        let w = match s.generator(&ra[..nl], &rb[..nl]) {
            Ok(w) => w,
            Err(e) => return Err(s.fail(e)),
        };
        ra.zeroize();
        rb.zeroize();

        let va = match s.keygen(&w, rng) {
            Ok(p) => p,
            Err(e) => return Err(s.fail(e)),
        };
        s.curve.encode_point(&va, &mut out[nl..nl + pl]);
        s.state = State::AwaitPeer;
        Ok(expected_out)
    }

    /// Step 5: consume `Vb` (and `Tb`), emit `Ta` when enabled.
    pub fn step5(&mut self, msg: &[u8], out: &mut [u8]) -> Result<usize> {
        let expected_in = self.msg4_len();
        let expected_out = self.msg5_len();
        let s = &mut self.0;
        if s.state != State::AwaitPeer {
            return Err(s.fail(Error::BadLogic));
        }
        if msg.len() != expected_in || out.len() != expected_out {
            return Err(s.fail(Error::BadInput));
        }
        let pl = s.point_len();

        let vb = match Option::<Affine>::from(s.curve.decode_point(&msg[..pl])) {
            Some(p) => p,
            None => return Err(s.fail(Error::BadPoint)),
        };
        if let Err(e) = s.derive_keys(&vb) {
            return Err(s.fail(e));
        }

        if s.settings.confirm_b {
            let expect = match mac(&s.secrets.k1, &[0xFF; 16]) {
                Ok(t) => t,
                Err(e) => return Err(s.fail(e)),
            };
            if !bool::from(expect[..].ct_eq(&msg[pl..pl + TAG_LEN])) {
                return Err(s.fail(Error::Auth));
            }
        }
        if s.settings.confirm_a {
            match mac(&s.secrets.k1, &[0x00; 16]) {
                Ok(tag) => out[..TAG_LEN].copy_from_slice(&tag),
                Err(e) => return Err(s.fail(e)),
            }
        }
        s.state = State::Done;
        Ok(expected_out)
    }

    /// The established session key; only after the exchange completed.
    pub fn key(&self) -> Result<&[u8; KEY_LEN]> {
        self.0.key()
    }
}
