// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod util;

use std::fmt;

use num_bigint_dig::BigUint;
use num_traits::{One, Zero};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::{Decode, DecodeMode, Encode};

/// Parameters used to produce obfuscated character codes.
///
/// Encoding raises each character code to `e` modulo `n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionKey {
    pub(crate) n: BigUint,
    pub(crate) e: BigUint,
}

impl EncryptionKey {
    /// Construct an encryption key. Both parts must be non-zero.
    pub fn new(n: BigUint, e: BigUint) -> Result<Self> {
        if n.is_zero() || e.is_zero() {
            return Err(Error::InvalidKey);
        }
        Ok(Self { n, e })
    }

    /// Return the modulus `n`.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Return the public exponent `e`.
    pub fn exponent(&self) -> &BigUint {
        &self.e
    }
}

/// Parameters that turn a ciphertext back into text.
///
/// This is the `(n, exponent)` pair embedded in pages next to each obfuscated
/// link. The exponent is wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DecryptionKey {
    #[zeroize(skip)]
    pub(crate) n: BigUint,
    pub(crate) d: BigUint,
}

impl DecryptionKey {
    /// Construct a decryption key. Both parts must be non-zero.
    pub fn new(n: BigUint, d: BigUint) -> Result<Self> {
        if n.is_zero() || d.is_zero() {
            return Err(Error::InvalidKey);
        }
        Ok(Self { n, d })
    }

    /// Build a key from the integers a page passes to its decoder.
    ///
    /// A zero in either position means the parameters are packed into the
    /// ciphertext itself, so `None` is returned.
    pub fn from_parts(n: u64, d: u64) -> Option<Self> {
        Self::new(BigUint::from(n), BigUint::from(d)).ok()
    }

    /// Like [`DecryptionKey::from_parts`], for decimal text of any size.
    ///
    /// Malformed numbers are an error; a zero yields `None`.
    pub fn from_decimal(n: &str, d: &str) -> Result<Option<Self>> {
        let parse = |position: usize, token: &str| {
            let token = token.trim();
            if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::InvalidToken {
                    position,
                    token: token.to_string(),
                });
            }
            BigUint::parse_bytes(token.as_bytes(), 10).ok_or_else(|| Error::InvalidToken {
                position,
                token: token.to_string(),
            })
        };

        let n = parse(0, n)?;
        let d = parse(1, d)?;
        Ok(Self::new(n, d).ok())
    }

    /// Return the modulus `n`.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Return the decryption exponent.
    pub fn exponent(&self) -> &BigUint {
        &self.d
    }
}

impl fmt::Debug for DecryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptionKey")
            .field("n", &self.n)
            .field("d", &"<redacted>")
            .finish()
    }
}

/// Matching encryption and decryption keys over a shared modulus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    encryption: EncryptionKey,
    decryption: DecryptionKey,
}

impl KeyPair {
    /// Generate a key pair with the default modulus size.
    pub fn generate() -> Result<Self> {
        KeyPairBuilder::new().build()
    }

    /// Generate a key pair with a custom modulus size.
    pub fn generate_with_bits(modulus_bits: usize) -> Result<Self> {
        KeyPairBuilder::new().modulus_bits(modulus_bits).build()
    }

    /// Assemble a key pair from known parameters.
    ///
    /// The exponents must be inverse to each other modulo a factorisation of
    /// `n`; this is not checked here.
    pub fn from_parts(n: BigUint, e: BigUint, d: BigUint) -> Result<Self> {
        Ok(Self {
            encryption: EncryptionKey::new(n.clone(), e)?,
            decryption: DecryptionKey::new(n, d)?,
        })
    }

    pub fn encryption_key(&self) -> &EncryptionKey {
        &self.encryption
    }

    pub fn decryption_key(&self) -> &DecryptionKey {
        &self.decryption
    }

    /// Encode `text` and prefix it with the decryption parameters.
    pub fn encode_packed(&self, text: &str) -> Result<String> {
        let ciphertext = self.encryption.encode(text)?;
        Ok(ciphertext.to_packed(&self.decryption))
    }
}

impl Encode for KeyPair {
    fn encode(&self, text: &str) -> Result<Ciphertext> {
        self.encryption.encode(text)
    }
}

impl Decode for KeyPair {
    fn decode(&self, ciphertext: &Ciphertext, mode: DecodeMode) -> Result<String> {
        self.decryption.decode(ciphertext, mode)
    }
}

/// Builder for generating key pairs with configurable parameters.
#[derive(Debug)]
pub struct KeyPairBuilder {
    modulus_bits: usize,
}

impl KeyPairBuilder {
    /// Default modulus size.
    pub const DEFAULT_BITS: usize = 20;

    /// Largest modulus whose squares stay exact in a JavaScript number,
    /// `(2^26)^2 < 2^53`. Pages decoded in the browser need `n` below this.
    pub const MAX_BROWSER_SAFE_BITS: usize = 26;

    #[cfg(not(feature = "allow-weak-keys"))]
    const ABSOLUTE_MIN_BITS: usize = 16;

    #[cfg(feature = "allow-weak-keys")]
    const ABSOLUTE_MIN_BITS: usize = 10;

    /// Create a builder with default parameters.
    pub fn new() -> Self {
        Self {
            modulus_bits: Self::DEFAULT_BITS,
        }
    }

    /// Set the desired modulus bit length.
    pub fn modulus_bits(mut self, bits: usize) -> Self {
        self.modulus_bits = bits;
        self
    }

    /// Generate the key pair.
    pub fn build(self) -> Result<KeyPair> {
        if self.modulus_bits < Self::ABSOLUTE_MIN_BITS {
            return Err(Error::InvalidKeySize {
                min: Self::ABSOLUTE_MIN_BITS,
                actual: self.modulus_bits,
            });
        }

        if self.modulus_bits > Self::MAX_BROWSER_SAFE_BITS {
            tracing::warn!(
                bits = self.modulus_bits,
                max = Self::MAX_BROWSER_SAFE_BITS,
                "modulus too large for exact decoding in a browser"
            );
        }

        let p_bits = self.modulus_bits / 2;
        let q_bits = self.modulus_bits - p_bits;
        let (p, q) = util::generate_distinct_primes(p_bits, q_bits)?;

        let n = &p * &q;
        let phi = (&p - BigUint::one()) * (&q - BigUint::one());

        let e = util::choose_public_exponent(&phi)?;
        let d = crate::util::mod_inverse(&e, &phi)?;

        tracing::debug!(n = %n, e = %e, "generated key pair");

        KeyPair::from_parts(n, e, d)
    }
}

impl Default for KeyPairBuilder {
    fn default() -> Self {
        Self::new()
    }
}
