//! Fuzz target for inbound message decoding
//!
//! Arbitrary text must decode or fail cleanly, never panic.

#![no_main]

use fernwire_proto::Update;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = Update::decode(text);
    }
});
