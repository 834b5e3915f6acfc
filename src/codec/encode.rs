// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;

use super::Encode;
use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keypair::EncryptionKey;

impl Encode for EncryptionKey {
    fn encode(&self, text: &str) -> Result<Ciphertext> {
        let values = text
            .chars()
            .map(|ch| {
                let m = BigUint::from(ch as u32);
                if m >= self.n {
                    return Err(Error::PlaintextTooLarge {
                        code_point: ch as u32,
                    });
                }

                // c = m^e mod n
                Ok(m.modpow(&self.e, &self.n))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Ciphertext::new(values))
    }
}

/// Builds a `mailto:` URI, optionally carrying a subject.
///
/// The subject is percent-encoded; the address is taken as is.
pub fn mailto_uri(address: &str, subject: Option<&str>) -> String {
    let mut uri = format!("mailto:{}", address);
    if let Some(subject) = subject {
        uri.push_str("?subject=");
        for byte in subject.bytes() {
            match byte {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                    uri.push(byte as char)
                }
                _ => uri.push_str(&format!("%{:02X}", byte)),
            }
        }
    }
    uri
}
