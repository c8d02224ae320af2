#![no_main]

use libfuzzer_sys::fuzz_target;

// The blob decoder must reject or accept arbitrary input without panicking.
fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = attrform::parse(input);
    }
});
