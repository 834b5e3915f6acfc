// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod decode;
mod encode;

pub use encode::mailto_uri;

use crate::ciphertext::Ciphertext;
use crate::error::Result;

/// Number of leading tokens holding the `mailto:` scheme.
pub const MAILTO_PREFIX_LEN: usize = 7;

/// Character code that ends the address part of a `mailto:` URI (`?`).
pub const QUERY_SEPARATOR: u32 = 63;

/// How much of the decoded text to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DecodeMode {
    /// Every character of the ciphertext.
    #[default]
    Full,
    /// Only the address of a `mailto:` URI.
    ///
    /// The first seven tokens are skipped and decoding stops at the first `?`
    /// after them.
    EmailOnly,
}

impl DecodeMode {
    pub fn from_email_only(email_only: bool) -> Self {
        if email_only {
            DecodeMode::EmailOnly
        } else {
            DecodeMode::Full
        }
    }

    pub fn is_email_only(self) -> bool {
        self == DecodeMode::EmailOnly
    }
}

/// Obfuscates text into a ciphertext.
pub trait Encode {
    /// Encode every character of `text` into its own ciphertext token.
    fn encode(&self, text: &str) -> Result<Ciphertext>;
}

/// Recovers text from a ciphertext.
pub trait Decode {
    /// Decode `ciphertext`, honouring the truncation rules of `mode`.
    fn decode(&self, ciphertext: &Ciphertext, mode: DecodeMode) -> Result<String>;
}
