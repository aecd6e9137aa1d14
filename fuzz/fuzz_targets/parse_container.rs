#![no_main]
use libfuzzer_sys::fuzz_target;

use fcf3::format::container::Container;

// Arbitrary bytes must never panic the parser, regardless of how the
// header's declared counts relate to the blob's actual length.
fuzz_target!(|data: &[u8]| {
    let _ = Container::parse(data);
});
