//! Uniform sampling of naturals below a modulus.

use crate::word::Word;
use crate::ww;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

/// Retry budget for rejection sampling; matching the modulus bit length
/// makes a failure astronomically unlikely with an honest generator.
const MAX_ATTEMPTS: usize = 128;

/// Samples `out` uniformly from `[0, m)`.
///
/// Returns `false` when the retry budget is exhausted (a broken
/// generator). Both slices have equal length.
pub fn rand_mod(
    out: &mut [Word],
    m: &[Word],
    rng: &mut (impl CryptoRngCore + ?Sized),
) -> bool {
    debug_assert_eq!(out.len(), m.len());
    let bits = ww::bit_len_vartime(m);
    debug_assert!(bits > 0);
    let nbytes = bits.div_ceil(8);
    let mut buf = [0u8; 128];
    debug_assert!(nbytes <= buf.len());

    for _ in 0..MAX_ATTEMPTS {
        rng.fill_bytes(&mut buf[..nbytes]);
        // trim to the modulus bit length to keep the acceptance rate >= 1/2
        if bits % 8 != 0 {
            buf[nbytes - 1] &= (1u8 << (bits % 8)) - 1;
        }
        ww::from_le_bytes(out, &buf[..nbytes]);
        if bool::from(ww::lt(out, m)) {
            buf.zeroize();
            return true;
        }
    }
    buf.zeroize();
    ww::set_zero(out);
    false
}

/// Samples `out` uniformly from `[1, m)`.
pub fn rand_nz_mod(
    out: &mut [Word],
    m: &[Word],
    rng: &mut (impl CryptoRngCore + ?Sized),
) -> bool {
    for _ in 0..MAX_ATTEMPTS {
        if !rand_mod(out, m, rng) {
            return false;
        }
        if !bool::from(ww::is_zero(out)) {
            return true;
        }
    }
    false
}
