// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;

use super::{Decode, DecodeMode, MAILTO_PREFIX_LEN, QUERY_SEPARATOR};
use crate::ciphertext::Ciphertext;
use crate::error::Result;
use crate::keypair::DecryptionKey;
use crate::util::{mod_pow, to_char};

impl Decode for DecryptionKey {
    fn decode(&self, ciphertext: &Ciphertext, mode: DecodeMode) -> Result<String> {
        let stop = BigUint::from(QUERY_SEPARATOR);
        let mut decoded = String::with_capacity(ciphertext.len());

        for (position, c) in ciphertext.iter().enumerate() {
            let m = mod_pow(c, &self.d, &self.n)?;

            if mode.is_email_only() {
                if position < MAILTO_PREFIX_LEN {
                    continue;
                }
                if m == stop {
                    break;
                }
            }

            decoded.push(to_char(&m)?);
        }

        Ok(decoded)
    }
}
