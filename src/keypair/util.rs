// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::{BigUint, ModInverse, RandBigInt, RandPrime};
use rand::rngs::OsRng;

use crate::{Error, Result};

/// Candidate public exponents, tried in order before falling back to a
/// random one.
const PREFERRED_EXPONENTS: [u32; 4] = [65537, 257, 17, 3];

const MAX_PRIME_ATTEMPTS: usize = 64;

/// Generates two distinct random primes of the requested sizes.
pub fn generate_distinct_primes(p_bits: usize, q_bits: usize) -> Result<(BigUint, BigUint)> {
    let mut rng = OsRng;
    let p = rng.gen_prime(p_bits);

    for _ in 0..MAX_PRIME_ATTEMPTS {
        let q = rng.gen_prime(q_bits);
        if q != p {
            return Ok((p, q));
        }
    }

    Err(Error::KeyGenerationFailed("Primes must be distinct".into()))
}

/// Picks an exponent `e` with `1 < e < φ` and `gcd(e, φ) = 1`.
pub fn choose_public_exponent(phi: &BigUint) -> Result<BigUint> {
    let two = BigUint::from(2u32);
    if phi <= &two {
        return Err(Error::KeyGenerationFailed("Totient too small".into()));
    }

    for candidate in PREFERRED_EXPONENTS {
        let e = BigUint::from(candidate);
        if &e < phi && is_coprime(&e, phi) {
            return Ok(e);
        }
    }

    let mut rng = OsRng;
    for _ in 0..MAX_PRIME_ATTEMPTS {
        let e = rng.gen_biguint_range(&BigUint::from(3u32), phi);
        if is_coprime(&e, phi) {
            return Ok(e);
        }
    }

    Err(Error::KeyGenerationFailed("No exponent coprime with totient".into()))
}

/// An inverse modulo `phi` exists exactly when `gcd(e, phi) = 1`.
fn is_coprime(e: &BigUint, phi: &BigUint) -> bool {
    e.mod_inverse(phi).is_some()
}
