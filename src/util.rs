// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::{BigUint, ModInverse};
use num_traits::{One, ToPrimitive, Zero};

use crate::{Error, Result};

/// Legacy modular exponentiation, `base^exponent mod modulus`.
///
/// Published pages were produced against a decoder that runs `exponent / 2`
/// rounds, each multiplying an accumulator by `base² mod modulus`. The
/// accumulator starts at `1` for even exponents and at `base` for odd ones.
/// The rounds are folded into a single `modpow` here, which yields the same
/// value as running them one at a time.
///
/// With zero rounds (`exponent` of 0 or 1) the seed is returned as is, so
/// `mod_pow(b, 1, n)` is `b` even when `b >= n`.
///
/// A zero `modulus` is rejected with [`Error::InvalidKey`].
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> Result<BigUint> {
    if modulus.is_zero() {
        return Err(Error::InvalidKey);
    }

    let rounds: BigUint = exponent >> 1usize;
    let odd = &(&rounds << 1usize) != exponent;
    let seed = if odd { base.clone() } else { BigUint::one() };

    if rounds.is_zero() {
        return Ok(seed);
    }

    let square = (base * base) % modulus;
    Ok((seed * square.modpow(&rounds, modulus)) % modulus)
}

/// Computes modular inverse a⁻¹ mod b.
pub fn mod_inverse(a: &BigUint, b: &BigUint) -> Result<BigUint> {
    a.mod_inverse(b)
        .ok_or_else(|| Error::KeyGenerationFailed("Modular inverse failed".into()))?
        .to_biguint()
        .ok_or_else(|| Error::KeyGenerationFailed("Inverse resulted in negative value".into()))
}

/// Maps a decoded value onto a Unicode scalar value.
pub fn to_char(value: &BigUint) -> Result<char> {
    value
        .to_u32()
        .and_then(char::from_u32)
        .ok_or_else(|| Error::InvalidCodePoint(value.to_string()))
}
