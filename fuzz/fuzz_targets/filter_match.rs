#![no_main]
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

use fcf3::builder::Builder;
use fcf3::filter::{Filter, FilterOptions};
use fcf3::format::container::write_container;

fn dictionary() -> &'static Filter {
    static FILTER: OnceLock<Filter> = OnceLock::new();
    FILTER.get_or_init(|| {
        let mut builder = Builder::new();
        for w in ["bad", "worse", "terrible", "ass", "spam"] {
            builder.insert(w);
        }
        let tables = builder.build();
        let mut bytes = Vec::new();
        write_container(
            &mut bytes,
            &tables.nodes,
            &tables.edges,
            &tables.hashes,
            tables.min_len,
            tables.max_len,
        )
        .unwrap();
        Filter::load_bytes(bytes, FilterOptions::default()).unwrap()
    })
}

// Arbitrary (possibly invalid-UTF-8-derived) query text must never panic
// contains/find_matches/mask, and mask must never change a masked text's
// code-unit length.
fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let filter = dictionary();

    let _ = filter.contains(&text);
    let matches = filter.find_matches(&text);
    for window in matches.windows(2) {
        assert!(window[0].start + window[0].length <= window[1].start);
    }

    let masked = filter.mask(&text);
    assert_eq!(masked.encode_utf16().count(), text.encode_utf16().count());
});
