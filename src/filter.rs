//! The public matching facade: load a container, then query it.
//!
//! `Filter` owns the loaded container bytes and a [`ContainerLayout`]
//! computed once at load time. Each call re-derives the zero-copy
//! [`Container`] view via [`ContainerLayout::view`] rather than storing it as
//! a field (the view borrows from the bytes, which can't live alongside them
//! in the same struct without self-reference) — but that re-derivation is
//! genuinely just re-slicing already-validated data: header parsing,
//! table-size arithmetic, and the edge bounds check all happened once, in
//! `load_bytes`.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use fehler::throws;

use crate::error::Error;
use crate::format::container::{Container, ContainerLayout};
use crate::matcher::{MatchResult, Matcher};
use crate::normalize::{lower_code_unit, normalize, normalize_str};
use crate::pool::{BufferPool, STACK_THRESHOLD};

/// Runtime configuration for a loaded [`Filter`], gathered into one value
/// (rather than positional load arguments) so new options can be added
/// without breaking call sites.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterOptions {
    /// Lowercase both the dictionary's stored words and incoming text
    /// before matching. Must match whatever the container was built with;
    /// a mismatch (e.g. a lowercased dictionary matched against raw text
    /// with this set to `false`) is the caller's responsibility, not
    /// something this crate can detect.
    pub enable_normalization: bool,
    /// The code unit [`Filter::mask`] writes over each matched code unit
    /// when `fixed_mask` is `None`. Must be a BMP character.
    pub mask_char: char,
    /// When set, [`Filter::mask`] replaces a whole matched span with this
    /// string instead of masking it code unit by code unit.
    pub fixed_mask: Option<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        FilterOptions {
            enable_normalization: true,
            mask_char: '*',
            fixed_mask: None,
        }
    }
}

pub struct Filter {
    bytes: Vec<u8>,
    layout: ContainerLayout,
    options: FilterOptions,
    pool: BufferPool,
}

impl Filter {
    /// Validates and loads a container from an in-memory blob. Validation
    /// (header, table sizes, edge bounds) happens here, once; later calls
    /// reuse the resulting [`ContainerLayout`].
    #[throws(Error)]
    pub fn load_bytes(bytes: Vec<u8>, options: FilterOptions) -> Self {
        let layout = ContainerLayout::compute(&bytes)?;
        Filter {
            bytes,
            layout,
            options,
            pool: BufferPool::new(),
        }
    }

    /// Reads and loads a container from a file on disk.
    #[throws(Error)]
    pub fn load_path(path: impl AsRef<Path>, options: FilterOptions) -> Self {
        let bytes = fs::read(path)?;
        Filter::load_bytes(bytes, options)?
    }

    fn container(&self) -> Container<'_> {
        self.layout.view(&self.bytes)
    }

    fn matcher(&self) -> Matcher<'_> {
        let container = self.container();
        let trie = container.trie();
        let hashes = container.hash_set();
        Matcher::new(trie, hashes)
    }

    fn with_normalized<R>(&self, text: &str, f: impl FnOnce(&[u16]) -> R) -> R {
        if text.len() <= STACK_THRESHOLD {
            let mut stack = [0u16; STACK_THRESHOLD];
            let mut len = 0;
            if self.options.enable_normalization {
                for u in text.encode_utf16().map(lower_code_unit) {
                    stack[len] = u;
                    len += 1;
                }
            } else {
                for u in text.encode_utf16() {
                    stack[len] = u;
                    len += 1;
                }
            }
            f(&stack[..len])
        } else if self.options.enable_normalization {
            let mut buf = self.pool.rent();
            normalize_str(text, &mut buf);
            f(&buf)
        } else {
            let mut buf = self.pool.rent();
            buf.extend(text.encode_utf16());
            f(&buf)
        }
    }

    fn with_normalized_units<R>(&self, units: &[u16], f: impl FnOnce(&[u16]) -> R) -> R {
        if !self.options.enable_normalization {
            return f(units);
        }
        if units.len() <= STACK_THRESHOLD {
            let mut stack = [0u16; STACK_THRESHOLD];
            for (i, &u) in units.iter().enumerate() {
                stack[i] = lower_code_unit(u);
            }
            f(&stack[..units.len()])
        } else {
            let mut buf = self.pool.rent();
            normalize(units, &mut buf);
            f(&buf)
        }
    }

    /// True if any dictionary word occurs anywhere in `text`.
    pub fn contains(&self, text: &str) -> bool {
        self.with_normalized(text, |units| self.matcher().contains(units))
    }

    /// Same as [`Filter::contains`], operating on raw UTF-16 code units.
    pub fn contains_units(&self, units: &[u16]) -> bool {
        self.with_normalized_units(units, |units| self.matcher().contains(units))
    }

    /// All non-overlapping matches in `text`, in UTF-16 code-unit offsets
    /// (normalization is length-preserving, so these offsets also index the
    /// original text's `encode_utf16()` sequence — see [`Filter::mask`]).
    pub fn find_matches(&self, text: &str) -> Vec<MatchResult> {
        self.with_normalized(text, |units| self.matcher().find_all(units))
    }

    /// Same as [`Filter::find_matches`], operating on raw UTF-16 code units.
    pub fn find_matches_units(&self, units: &[u16]) -> Vec<MatchResult> {
        self.with_normalized_units(units, |units| self.matcher().find_all(units))
    }

    /// Rewrites every matched span in `text`, per the `mask_char` /
    /// `fixed_mask` configured at load time. Returns the input unchanged
    /// (borrowed, no copy) when nothing matches.
    pub fn mask<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let matches = self.find_matches(text);
        if matches.is_empty() {
            return Cow::Borrowed(text);
        }

        let units: Vec<u16> = text.encode_utf16().collect();
        let out = match &self.options.fixed_mask {
            Some(replacement) => {
                let replacement_units: Vec<u16> = replacement.encode_utf16().collect();
                let mut out = Vec::with_capacity(units.len());
                let mut cursor = 0;
                for m in &matches {
                    out.extend_from_slice(&units[cursor..m.start]);
                    out.extend_from_slice(&replacement_units);
                    cursor = m.start + m.length;
                }
                out.extend_from_slice(&units[cursor..]);
                out
            }
            None => {
                let mut out = units.clone();
                let mut buf = [0u16; 2];
                if let Some(&fill) = self.options.mask_char.encode_utf16(&mut buf).first() {
                    for m in &matches {
                        for i in m.start..m.start + m.length {
                            out[i] = fill;
                        }
                    }
                }
                out
            }
        };
        Cow::Owned(String::from_utf16_lossy(&out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::container::write_container;
    use crate::trie::{Edge, Node};

    // root -(b)-> 1 -(a)-> 2* -(d)-> 3*   spells "ba", "bad"
    fn sample_container_bytes() -> Vec<u8> {
        let edges = vec![
            Edge::new(b'b' as u16, 1),
            Edge::new(b'a' as u16, 2),
            Edge::new(b'd' as u16, 3),
        ];
        let nodes = vec![
            Node::new(0, 1, false),
            Node::new(1, 1, false),
            Node::new(2, 1, true),
            Node::new(0, 0, true),
        ];
        let ba: Vec<u16> = "ba".encode_utf16().collect();
        let bad: Vec<u16> = "bad".encode_utf16().collect();
        let mut hashes = vec![
            crate::crc32::crc32_code_units(&ba),
            crate::crc32::crc32_code_units(&bad),
        ];
        hashes.sort_unstable();

        let mut bytes = Vec::new();
        write_container(&mut bytes, &nodes, &edges, &hashes, 2, 3).unwrap();
        bytes
    }

    fn load(options: FilterOptions) -> Filter {
        Filter::load_bytes(sample_container_bytes(), options).unwrap()
    }

    #[test]
    fn contains_is_case_insensitive_by_default() {
        let filter = load(FilterOptions::default());
        assert!(filter.contains("this is BAD news"));
        assert!(!filter.contains("this is good news"));
    }

    #[test]
    fn disabling_normalization_makes_matching_case_sensitive() {
        let options = FilterOptions {
            enable_normalization: false,
            ..FilterOptions::default()
        };
        let filter = load(options);
        // dictionary was built lowercased, so an unnormalized upper-case
        // query no longer matches it
        assert!(!filter.contains("BAD"));
        assert!(filter.contains("bad"));
    }

    #[test]
    fn mask_replaces_matched_span_and_preserves_length() {
        let filter = load(FilterOptions::default());
        let masked = filter.mask("so bad today");
        assert_eq!(masked, "so *** today");
    }

    #[test]
    fn mask_borrows_when_nothing_matches() {
        let filter = load(FilterOptions::default());
        let text = "all good here";
        let masked = filter.mask(text);
        assert!(matches!(masked, Cow::Borrowed(_)));
    }

    #[test]
    fn rejects_invalid_container_bytes() {
        assert!(Filter::load_bytes(vec![0u8; 4], FilterOptions::default()).is_err());
    }

    #[test]
    fn mask_fixed_mode_replaces_span_with_custom_text() {
        let options = FilterOptions {
            fixed_mask: Some("[removed]".to_string()),
            ..FilterOptions::default()
        };
        let filter = load(options);
        let masked = filter.mask("so bad today");
        assert_eq!(masked, "so [removed] today");
    }
}
