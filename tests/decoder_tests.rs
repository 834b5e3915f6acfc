use std::sync::Arc;
use std::thread;

use mailveil::{
    AddressBook, CacheKey, DecodeCache, DecodeMode, Decoder, DecryptionKey, Error,
    INVALID_INPUT_PLACEHOLDER, KeyPair, mailto_uri, split_packed,
};

// "mailto:user@example.com?subject=hi" under n = 3233, e = 17, d = 2753
const MAILTO_FIXTURE: &str = "2271 1632 3179 745 884 2185 436 2160 1230 1313 2412 1577 1313 \
1542 1632 2271 612 745 1313 2825 281 2185 2271 3216 1230 2160 2570 1696 1313 281 884 610 2170 3179";

fn fixture_key() -> DecryptionKey {
    DecryptionKey::from_parts(3233, 2753).unwrap()
}

#[test]
fn email_only_fixture() {
    let decoder = Decoder::default();
    let address = decoder
        .decode(MAILTO_FIXTURE, Some(&fixture_key()), DecodeMode::EmailOnly)
        .unwrap();
    assert_eq!(address, "user@example.com");
}

#[test]
fn full_fixture() {
    let decoder = Decoder::default();
    let uri = decoder
        .decode(MAILTO_FIXTURE, Some(&fixture_key()), DecodeMode::Full)
        .unwrap();
    assert_eq!(uri, "mailto:user@example.com?subject=hi");
}

#[test]
fn both_modes_cached_separately() {
    let decoder = Decoder::default();
    let key = fixture_key();

    decoder.decode(MAILTO_FIXTURE, Some(&key), DecodeMode::Full).unwrap();
    decoder.decode(MAILTO_FIXTURE, Some(&key), DecodeMode::EmailOnly).unwrap();
    decoder.decode(MAILTO_FIXTURE, Some(&key), DecodeMode::EmailOnly).unwrap();

    let stats = decoder.cache().stats();
    assert_eq!(stats.entries, 2);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 1);
}

#[test]
fn packed_fixture_drops_two_leading_characters() {
    // Blanking the parameter tokens and re-joining yields "  2170 3179";
    // the two separators are what gets dropped.
    let (key, payload) = split_packed("3233 2753 2170 3179").unwrap();
    assert_eq!(payload, "2170 3179");
    assert_eq!(key, fixture_key());

    let decoder = Decoder::default();
    assert_eq!(
        decoder.decode("3233 2753 2170 3179", None, DecodeMode::Full).unwrap(),
        decoder.decode("2170 3179", Some(&fixture_key()), DecodeMode::Full).unwrap()
    );
}

#[test]
fn indexed_address_table() {
    let packed = format!("3233 2753 {}", MAILTO_FIXTURE);
    let decoder = Decoder::with_addresses(AddressBook::from_indexed(["", packed.as_str()]));

    assert_eq!(
        decoder.decode("1", None, DecodeMode::EmailOnly).unwrap(),
        "user@example.com"
    );
    assert_eq!(decoder.decode("0", None, DecodeMode::Full), Err(Error::InvalidInput));
    assert_eq!(
        decoder.decode_or_placeholder("0", None, DecodeMode::Full),
        INVALID_INPUT_PLACEHOLDER
    );
}

#[test]
fn generated_key_round_trip_through_packed_form() {
    let keypair = KeyPair::generate().unwrap();
    let uri = mailto_uri("first.last@example.co.uk", Some("Quote request"));
    let packed = keypair.encode_packed(&uri).unwrap();

    let decoder = Decoder::default();
    assert_eq!(
        decoder.decode(&packed, None, DecodeMode::EmailOnly).unwrap(),
        "first.last@example.co.uk"
    );
    assert_eq!(decoder.decode(&packed, None, DecodeMode::Full).unwrap(), uri);
}

#[test]
fn shared_cache_across_decoders() {
    let cache = Arc::new(DecodeCache::new());
    let first = Decoder::new(AddressBook::new(), Arc::clone(&cache));
    let second = Decoder::new(AddressBook::from_indexed([MAILTO_FIXTURE]), Arc::clone(&cache));

    first
        .decode(MAILTO_FIXTURE, Some(&fixture_key()), DecodeMode::EmailOnly)
        .unwrap();
    // a different reference resolving to the same ciphertext hits the cache
    second
        .decode("0", Some(&fixture_key()), DecodeMode::EmailOnly)
        .unwrap();

    assert_eq!(cache.stats().hits, 1);
    assert!(
        cache
            .get(&CacheKey::new(MAILTO_FIXTURE, DecodeMode::EmailOnly))
            .is_some()
    );
}

#[test]
fn concurrent_decodes_agree() {
    let decoder = Arc::new(Decoder::default());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let decoder = Arc::clone(&decoder);
            thread::spawn(move || {
                decoder
                    .decode(MAILTO_FIXTURE, Some(&fixture_key()), DecodeMode::EmailOnly)
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "user@example.com");
    }

    let stats = decoder.cache().stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 7);
}
