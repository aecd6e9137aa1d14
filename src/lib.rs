//! `fcf3`: allocation-free substring matching against a forbidden-word
//! dictionary, backed by a trie + CRC32 fingerprint binary container.
//!
//! A container is built once, offline, by [`builder::Builder`] (or the
//! `fcf3-build` binary) and loaded at runtime by [`filter::Filter`]. Loading
//! is zero-copy: [`format::container::Container::parse`] validates the blob
//! once and the matcher then walks it directly, without deserializing into
//! an owned structure.
//!
//! # What this does *not* do
//!
//! This is a substring matcher, not a tokenizer or word-boundary filter: a
//! dictionary entry `"ass"` matches inside `"class"`. That is a deliberate
//! scope decision, not an oversight — word-boundary-aware matching is a
//! different (and heavier) problem, and callers who need it should
//! pre/post-filter on boundaries themselves. Matching is case-insensitive
//! over the Basic Multilingual Plane only; no full Unicode case folding or
//! normalization is attempted (see [`normalize`]).
//!
//! # CRC32 polynomial choice
//!
//! Every fingerprint in this crate uses the reflected IEEE polynomial
//! (0xEDB88320) — the CRC-32 of gzip, zlib, and PNG — computed via
//! [`crc32fast`]'s carry-less-multiplication folding. This is *not* the
//! polynomial computed by the x86 `CRC32` instruction (that one is
//! Castagnoli, 0x1EDC6F41); that instruction must never be used as an
//! accelerated backend here, or builder-produced and matcher-verified
//! fingerprints would silently disagree. See [`crc32`] for the implementation
//! and its from-scratch reference oracle.
//!
//! # Resource model
//!
//! Text at or below [`pool::STACK_THRESHOLD`] code units is normalized on
//! the stack. Longer text rents a scratch buffer from an internal pool and
//! returns it via `Drop` when the call finishes — exactly one rent and one
//! return per call, including on early return through `?`, with no explicit
//! release method to forget to call.

#![forbid(unsafe_code)]

pub mod builder;
pub mod crc32;
pub mod error;
pub mod filter;
pub mod format;
pub mod hashset;
pub mod matcher;
pub mod normalize;
pub mod pool;
pub mod trie;

pub use error::Error;
pub use filter::{Filter, FilterOptions};
pub use matcher::MatchResult;

#[cfg(test)]
mod tests {
    use crate::builder::Builder;
    use crate::filter::{Filter, FilterOptions};
    use crate::format::container::write_container;

    fn dictionary_bytes(words: &[&str]) -> Vec<u8> {
        let mut builder = Builder::new();
        for w in words {
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
        bytes
    }

    #[test]
    fn end_to_end_build_load_match() {
        let bytes = dictionary_bytes(&["bad", "worse", "terrible"]);
        let filter = Filter::load_bytes(bytes, FilterOptions::default()).unwrap();

        assert!(filter.contains("this movie was BAD"));
        assert!(filter.contains("absolutely terrible experience"));
        assert!(!filter.contains("this movie was great"));
    }

    #[test]
    fn end_to_end_mask_round_trip() {
        let bytes = dictionary_bytes(&["spam"]);
        let filter = Filter::load_bytes(bytes, FilterOptions::default()).unwrap();

        let masked = filter.mask("buy spam now");
        assert_eq!(masked, "buy **** now");
        assert_eq!(masked.chars().count(), "buy spam now".chars().count());
    }

    #[test]
    fn substring_matches_inside_longer_words() {
        // documents the substring-not-token scope decision above
        let bytes = dictionary_bytes(&["ass"]);
        let filter = Filter::load_bytes(bytes, FilterOptions::default()).unwrap();
        assert!(filter.contains("a class act"));
    }

    #[test]
    fn empty_dictionary_matches_nothing() {
        let bytes = dictionary_bytes(&[]);
        let filter = Filter::load_bytes(bytes, FilterOptions::default()).unwrap();
        assert!(!filter.contains("anything at all"));
    }
}
