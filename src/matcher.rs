//! Trie-walk substring matching, verified against the fingerprint set.
//!
//! The trie only proposes candidates: walking it from position `i` spells
//! out every dictionary word starting at `i`. A terminal node marks where a
//! stored word *ends*, but trie construction artifacts (and any future
//! corruption of a loaded container) make the fingerprint check a
//! correctness requirement, not a defensive nicety — it is where CRC32 and
//! the length bounds actually decide membership (see crate root docs on the
//! hybrid trie+hash design).

use crate::crc32::crc32_code_units;
use crate::hashset::FingerprintSet;
use crate::trie::TrieStore;

/// A matched span, in code-unit offsets into the text that was searched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchResult {
    pub start: usize,
    pub length: usize,
}

/// Pairs a trie with the fingerprint set that verifies its candidates.
#[derive(Clone, Copy)]
pub struct Matcher<'a> {
    trie: TrieStore<'a>,
    hashes: FingerprintSet<'a>,
}

impl<'a> Matcher<'a> {
    pub fn new(trie: TrieStore<'a>, hashes: FingerprintSet<'a>) -> Self {
        Matcher { trie, hashes }
    }

    /// True as soon as any verified match exists anywhere in `units`.
    /// Stops at the first one found; does not need the longest match at a
    /// position the way [`Matcher::find_all`] does.
    pub fn contains(&self, units: &[u16]) -> bool {
        (0..units.len()).any(|start| self.first_match_at(units, start).is_some())
    }

    /// All verified matches in `units`, left to right, non-overlapping: once
    /// a match is taken at a position, scanning resumes after its end.
    pub fn find_all(&self, units: &[u16]) -> Vec<MatchResult> {
        let mut results = Vec::new();
        let mut start = 0;
        while start < units.len() {
            match self.longest_match_at(units, start) {
                Some(length) => {
                    results.push(MatchResult { start, length });
                    start += length;
                }
                None => start += 1,
            }
        }
        results
    }

    /// Walks the trie from `start`, returning the length of the first
    /// verified terminal reached (not necessarily the longest).
    fn first_match_at(&self, units: &[u16], start: usize) -> Option<usize> {
        let mut node = self.trie.root();
        for (offset, &unit) in units[start..].iter().enumerate() {
            let next = self.trie.child(node, unit)?;
            node = next;
            let candidate = &units[start..=start + offset];
            if self.trie.node(node).is_terminal() && self.verify(candidate) {
                return Some(candidate.len());
            }
        }
        None
    }

    /// Walks the trie from `start` as far as it goes, remembering the
    /// length of the longest verified terminal seen along the way.
    fn longest_match_at(&self, units: &[u16], start: usize) -> Option<usize> {
        let mut node = self.trie.root();
        let mut best = None;
        for (offset, &unit) in units[start..].iter().enumerate() {
            let next = self.trie.child(node, unit)?;
            node = next;
            let candidate = &units[start..=start + offset];
            if self.trie.node(node).is_terminal() && self.verify(candidate) {
                best = Some(candidate.len());
            }
        }
        best
    }

    fn verify(&self, candidate: &[u16]) -> bool {
        self.hashes.valid_length(candidate.len()) && self.hashes.contains(crc32_code_units(candidate))
    }
}
