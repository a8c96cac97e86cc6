#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes, including split UTF-8 sequences at field offsets,
    // must never panic
    let _ = nappi::catalog::parse_record(data);
    let _ = nappi::catalog::Catalog::from_bytes(data);
});
