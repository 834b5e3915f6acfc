// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use num_bigint_dig::BigUint;

use crate::error::{Error, Result};
use crate::keypair::DecryptionKey;

/// Sequence of obfuscated character codes.
///
/// The text form is decimal integers separated by single spaces, one per
/// character of the plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ciphertext {
    values: Vec<BigUint>,
}

impl Ciphertext {
    pub fn new(values: Vec<BigUint>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[BigUint] {
        &self.values
    }

    /// Prefix the ciphertext with its decryption parameters, producing the
    /// packed form `n d c1 c2 ...`.
    pub fn to_packed(&self, key: &DecryptionKey) -> String {
        let mut packed = format!("{} {}", key.n(), key.exponent());
        for value in &self.values {
            packed.push(' ');
            packed.push_str(&value.to_string());
        }
        packed
    }
}

impl Deref for Ciphertext {
    type Target = [BigUint];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

impl FromStr for Ciphertext {
    type Err = Error;

    /// Parses whitespace-separated decimal tokens. The first malformed token
    /// aborts the parse.
    fn from_str(s: &str) -> Result<Self> {
        let values = s
            .split_whitespace()
            .enumerate()
            .map(|(position, token)| parse_token(position, token))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { values })
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

fn parse_token(position: usize, token: &str) -> Result<BigUint> {
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidToken {
            position,
            token: token.to_string(),
        });
    }
    BigUint::parse_bytes(token.as_bytes(), 10).ok_or_else(|| Error::InvalidToken {
        position,
        token: token.to_string(),
    })
}

/// Splits a packed ciphertext into its decryption key and payload.
///
/// Tokens 0 and 1 are the modulus and exponent. Both are blanked, the tokens
/// are joined back with single spaces and the first two characters of the
/// joined string are dropped, which removes the separators the blanked
/// tokens leave behind. Pages in the wild were generated against exactly this
/// layout.
pub fn split_packed(packed: &str) -> Result<(DecryptionKey, String)> {
    let mut tokens: Vec<&str> = packed.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(Error::MissingParameters);
    }

    let n = parse_token(0, tokens[0])?;
    let exponent = parse_token(1, tokens[1])?;
    let key = DecryptionKey::new(n, exponent)?;

    tokens[0] = "";
    tokens[1] = "";
    let joined = tokens.join(" ");
    let payload = joined.get(2..).unwrap_or_default().to_string();

    Ok((key, payload))
}
