#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

use mailveil::{Ciphertext, Decode, DecodeMode, Encode, KeyPair};

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    // 24-bit modulus covers every Unicode scalar value
    let keypair = KEYPAIR.get_or_init(|| KeyPair::generate_with_bits(24).unwrap());

    let text = String::from_utf8_lossy(data);

    let ciphertext = match keypair.encode(&text) {
        Ok(ct) => ct,
        Err(err) => panic!("encoding failed for {:?}: {}", text, err),
    };

    let decoded = keypair
        .decode(&ciphertext, DecodeMode::Full)
        .expect("decoding a fresh ciphertext failed");
    assert_eq!(decoded, text, "round trip mismatch");

    // the text form parses back to the same ciphertext
    let reparsed: Ciphertext = ciphertext.to_string().parse().expect("ciphertext text form did not parse");
    assert_eq!(ciphertext, reparsed);
});
