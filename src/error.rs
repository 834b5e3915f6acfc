// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Errors that can occur while encoding or decoding obfuscated strings.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Ciphertext is empty or does not resolve to a known address")]
    InvalidInput,

    #[error("Packed ciphertext must start with a modulus and an exponent")]
    MissingParameters,

    #[error("Invalid key: modulus and exponent must be non-zero")]
    InvalidKey,

    #[error("Invalid token {token:?} at position {position}")]
    InvalidToken { position: usize, token: String },

    #[error("Decoded value {0} is not a valid character")]
    InvalidCodePoint(String),

    #[error("Invalid modulus size: must be at least {min} bits, got {actual}")]
    InvalidKeySize { min: usize, actual: usize },

    #[error("Character U+{code_point:04X} does not fit below the modulus")]
    PlaintextTooLarge { code_point: u32 },

    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` for errors caused by a missing or unresolvable input,
    /// as opposed to a ciphertext that was present but failed to decode.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput)
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
