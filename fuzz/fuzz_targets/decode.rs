#![no_main]

use libfuzzer_sys::fuzz_target;

use mailveil::{DecodeMode, Decoder, DecryptionKey};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let decoder = Decoder::default();
    let key = DecryptionKey::from_parts(3233, 2753);

    // Any input must come back as a value or an error, never a panic.
    for mode in [DecodeMode::Full, DecodeMode::EmailOnly] {
        let _ = decoder.decode(input, None, mode);
        let _ = decoder.decode(input, key.as_ref(), mode);
        let _ = decoder.decode_or_placeholder(input, None, mode);
    }
});
