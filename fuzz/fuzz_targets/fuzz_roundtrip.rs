#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::{Read, Write};
use fic::{Decoder, EncodeOptions};

fuzz_target!(|input: (i8, &[u8])| {
    let (quality, data) = input;
    let mut compressed: Vec<u8> = Vec::new();
    {
        let mut encoder = EncodeOptions::new()
            .quality(quality as i32)
            .into_encoder(&mut compressed)
            .unwrap();
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap();
    }

    let mut decoder = Decoder::new(&compressed[..]).unwrap();
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed).unwrap();

    assert_eq!(data, &decompressed);
});
