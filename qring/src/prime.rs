//! Probabilistic primality testing over the ring's own exponentiation.

use crate::{Elem, QrRing, ZERO};
use bignum::{rand::rand_nz_mod, ww, zz, Word};
use rand_core::CryptoRngCore;

const SMALL_PRIMES: [Word; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67,
    71, 73, 79, 83, 89, 97,
];

/// One strong-probable-prime round for the ring's odd modulus `n`:
/// returns `true` when `base` does not witness compositeness.
///
/// `base` is an internal-form element in `[1, n)`. Variable-time; the
/// candidate modulus is public.
pub fn mr_witness(ring: &QrRing, base: &Elem) -> bool {
    let n = ring.n();
    // n - 1 = 2^s * t
    let mut t = ZERO;
    t[..n].copy_from_slice(ring.modulus_words());
    zz::sub_word_assign(&mut t[..n], 1);
    let s = trailing_zeros(&t[..n]);
    ww::shr_assign(&mut t[..n], s);

    let one = ring.one();
    let minus_one = ring.neg(&one);

    let mut x = ring.pow_vartime(base, &t[..n]);
    if bool::from(ring.eq(&x, &one)) || bool::from(ring.eq(&x, &minus_one)) {
        return true;
    }
    for _ in 1..s {
        x = ring.sqr(&x);
        if bool::from(ring.eq(&x, &minus_one)) {
            return true;
        }
        if bool::from(ring.eq(&x, &one)) {
            return false;
        }
    }
    false
}

/// Miller–Rabin primality test with `rounds` random bases, preceded by
/// trial division. Variable-time; candidates are public.
pub fn is_probable_prime(
    n_words: &[Word],
    rounds: usize,
    rng: &mut (impl CryptoRngCore + ?Sized),
) -> bool {
    let nn = ww::limbs_vartime(n_words);
    if nn == 0 {
        return false;
    }
    if nn == 1 {
        if n_words[0] < 2 {
            return false;
        }
        if SMALL_PRIMES.contains(&n_words[0]) {
            return true;
        }
    }
    if n_words[0] & 1 == 0 {
        return false;
    }
    for &p in &SMALL_PRIMES[1..] {
        if zz::mod_word(n_words, p) == 0 {
            // divisible by a small prime; prime only if equal to it
            return nn == 1 && n_words[0] == p;
        }
    }

    let ring = match QrRing::montgomery_from_words(&n_words[..nn]) {
        Some(r) => r,
        None => return false,
    };

    let mut done = 0;
    let mut budget = 4 * rounds + 16;
    while done < rounds {
        if budget == 0 {
            return false;
        }
        budget -= 1;
        let mut base = ZERO;
        if !rand_nz_mod(&mut base[..nn], ring.modulus_words(), rng) {
            return false;
        }
        // skip the two trivial bases
        let one_c = {
            let mut o = ZERO;
            o[0] = 1;
            o
        };
        let mut nm1 = ZERO;
        nm1[..nn].copy_from_slice(ring.modulus_words());
        zz::sub_word_assign(&mut nm1[..nn], 1);
        if ww::eq_vartime(&base, &one_c) || ww::eq_vartime(&base, &nm1) {
            continue;
        }
        let b = ring.to_internal(&base);
        if !mr_witness(&ring, &b) {
            return false;
        }
        done += 1;
    }
    true
}

fn trailing_zeros(a: &[Word]) -> usize {
    let mut t = 0;
    for &w in a {
        if w == 0 {
            t += Word::BITS as usize;
        } else {
            return t + w.trailing_zeros() as usize;
        }
    }
    t
}
