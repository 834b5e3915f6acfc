// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use crate::address::AddressBook;
use crate::cache::{CacheKey, DecodeCache};
use crate::ciphertext::{Ciphertext, split_packed};
use crate::codec::{Decode, DecodeMode};
use crate::error::{Error, Result};
use crate::keypair::DecryptionKey;

/// Placeholder returned for an empty or unknown reference.
pub const INVALID_INPUT_PLACEHOLDER: &str = "Error, not a valid index.";

/// Placeholder returned when a ciphertext is present but cannot be decoded.
pub const DECODE_FAILED_PLACEHOLDER: &str = "Error, could not decode.";

/// Decodes obfuscated strings referenced by a page.
///
/// Holds the page's address book and a cache of decoded results. The cache
/// is injected so several decoders, or several threads, can share one.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    addresses: AddressBook,
    cache: Arc<DecodeCache>,
}

impl Decoder {
    pub fn new(addresses: AddressBook, cache: Arc<DecodeCache>) -> Self {
        Self { addresses, cache }
    }

    /// Decoder with the given address book and a fresh cache.
    pub fn with_addresses(addresses: AddressBook) -> Self {
        Self::new(addresses, Arc::default())
    }

    pub fn addresses(&self) -> &AddressBook {
        &self.addresses
    }

    pub fn cache(&self) -> &Arc<DecodeCache> {
        &self.cache
    }

    /// Decode the ciphertext named by `cipher_ref`.
    ///
    /// `cipher_ref` is either a key of the address book or a literal
    /// ciphertext. Without a `key` the modulus and exponent are read from the
    /// first two tokens of the ciphertext. Results are cached under the
    /// resolved ciphertext and `mode` only: the key is not part of the cache
    /// key, so the first successful decode of a string answers every later
    /// one, packed or keyed.
    pub fn decode(
        &self,
        cipher_ref: &str,
        key: Option<&DecryptionKey>,
        mode: DecodeMode,
    ) -> Result<String> {
        let resolved = self.addresses.resolve(cipher_ref);
        if resolved.trim().is_empty() {
            return Err(Error::InvalidInput);
        }

        self.cache
            .get_or_try_insert_with(CacheKey::new(resolved, mode), || {
                decode_resolved(resolved, key, mode)
            })
    }

    /// Like [`Decoder::decode`], with failures rendered as placeholder text.
    ///
    /// Meant for callers that write the result straight into a page, where a
    /// visible error beats a broken render.
    pub fn decode_or_placeholder(
        &self,
        cipher_ref: &str,
        key: Option<&DecryptionKey>,
        mode: DecodeMode,
    ) -> String {
        match self.decode(cipher_ref, key, mode) {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::warn!(error = %err, "failed to decode obfuscated string");
                if err.is_invalid_input() {
                    INVALID_INPUT_PLACEHOLDER.to_string()
                } else {
                    DECODE_FAILED_PLACEHOLDER.to_string()
                }
            }
        }
    }
}

fn decode_resolved(resolved: &str, key: Option<&DecryptionKey>, mode: DecodeMode) -> Result<String> {
    match key {
        Some(key) => key.decode(&resolved.parse::<Ciphertext>()?, mode),
        None => {
            let (key, payload) = split_packed(resolved)?;
            tracing::debug!(n = %key.n(), "read parameters from packed ciphertext");
            if payload.trim().is_empty() {
                return Err(Error::InvalidInput);
            }
            key.decode(&payload.parse::<Ciphertext>()?, mode)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HI: &str = "2170 3179";

    fn key() -> DecryptionKey {
        DecryptionKey::from_parts(3233, 2753).unwrap()
    }

    #[test]
    fn decodes_literal_ciphertext() {
        let decoder = Decoder::default();
        assert_eq!(decoder.decode(HI, Some(&key()), DecodeMode::Full).unwrap(), "hi");
    }

    #[test]
    fn decodes_address_book_reference() {
        let decoder = Decoder::with_addresses(AddressBook::from_indexed([HI]));
        assert_eq!(decoder.decode("0", Some(&key()), DecodeMode::Full).unwrap(), "hi");
    }

    #[test]
    fn packed_matches_explicit_key() {
        let decoder = Decoder::default();
        let packed = format!("3233 2753 {}", HI);

        let from_packed = decoder.decode(&packed, None, DecodeMode::Full).unwrap();
        let explicit = decoder.decode(HI, Some(&key()), DecodeMode::Full).unwrap();
        assert_eq!(from_packed, explicit);
    }

    #[test]
    fn empty_input_is_invalid() {
        let decoder = Decoder::default();
        assert_eq!(
            decoder.decode("", Some(&key()), DecodeMode::Full),
            Err(Error::InvalidInput)
        );
        assert_eq!(decoder.decode("  ", None, DecodeMode::Full), Err(Error::InvalidInput));
    }

    #[test]
    fn reference_to_empty_entry_is_invalid() {
        let decoder = Decoder::with_addresses(AddressBook::from_indexed([""]));
        assert_eq!(
            decoder.decode("0", Some(&key()), DecodeMode::Full),
            Err(Error::InvalidInput)
        );
    }

    #[test]
    fn packed_without_payload_is_invalid() {
        let decoder = Decoder::default();
        assert_eq!(
            decoder.decode("3233 2753", None, DecodeMode::Full),
            Err(Error::InvalidInput)
        );
        assert_eq!(
            decoder.decode("3233", None, DecodeMode::Full),
            Err(Error::MissingParameters)
        );
    }

    #[test]
    fn malformed_token_fails_fast() {
        let decoder = Decoder::default();
        let result = decoder.decode("2170 abc 3179", Some(&key()), DecodeMode::Full);
        assert!(matches!(result, Err(Error::InvalidToken { position: 1, .. })));
        assert!(decoder.cache().is_empty());
    }

    #[test]
    fn placeholders() {
        let decoder = Decoder::default();
        assert_eq!(
            decoder.decode_or_placeholder("", Some(&key()), DecodeMode::Full),
            INVALID_INPUT_PLACEHOLDER
        );
        assert_eq!(
            decoder.decode_or_placeholder("1 x", Some(&key()), DecodeMode::Full),
            DECODE_FAILED_PLACEHOLDER
        );
        assert_eq!(
            decoder.decode_or_placeholder(HI, Some(&key()), DecodeMode::Full),
            "hi"
        );
    }

    #[test]
    fn second_decode_is_served_from_cache() {
        let decoder = Decoder::default();
        decoder.decode(HI, Some(&key()), DecodeMode::Full).unwrap();
        decoder.decode(HI, Some(&key()), DecodeMode::Full).unwrap();

        let stats = decoder.cache().stats();
        assert_eq!((stats.hits, stats.misses, stats.entries), (1, 1, 1));
    }

    #[test]
    fn packed_and_keyed_decodes_share_an_entry() {
        let decoder = Decoder::default();
        let packed = format!("3233 2753 {}", HI);

        assert_eq!(decoder.decode(&packed, None, DecodeMode::Full).unwrap(), "hi");
        // the same string under an explicit key is answered from the packed entry
        assert_eq!(
            decoder.decode(&packed, Some(&key()), DecodeMode::Full).unwrap(),
            "hi"
        );

        let stats = decoder.cache().stats();
        assert_eq!((stats.hits, stats.misses, stats.entries), (1, 1, 1));
    }

    #[test]
    fn prepopulated_cache_short_circuits() {
        let cache = Arc::new(DecodeCache::new());
        cache.insert(CacheKey::new(HI, DecodeMode::Full), "cached".into());

        let decoder = Decoder::new(AddressBook::new(), cache);
        assert_eq!(
            decoder.decode(HI, Some(&key()), DecodeMode::Full).unwrap(),
            "cached"
        );
    }
}
