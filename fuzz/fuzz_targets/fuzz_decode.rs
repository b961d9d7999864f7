#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Read;
use fic::Decoder;

// Arbitrary input must never panic the decoder
fuzz_target!(|data: &[u8]| {
    if let Ok(mut decoder) = Decoder::new(data) {
        let mut out = Vec::new();
        let _ = decoder.read_to_end(&mut out);
    }
});
