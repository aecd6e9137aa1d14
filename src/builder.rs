//! Offline construction: turns a word list into trie + edge + hash tables.
//!
//! Construction works over a plain adjacency-list trie (`BTreeMap<u16,
//! usize>` per node) that's easy to grow incrementally, then flattens it
//! into the sorted, contiguous `Node`/`Edge` records the matcher expects.
//! This mirrors the two-phase shape of the teacher's block encoder: build a
//! convenient intermediate structure first, serialize to the wire format
//! second.

use std::collections::BTreeMap;

use crate::crc32::crc32_code_units;
use crate::normalize::normalize_str;
use crate::trie::{Edge, Node};

struct BuildNode {
    children: BTreeMap<u16, usize>,
    terminal: bool,
}

impl BuildNode {
    fn new() -> Self {
        BuildNode {
            children: BTreeMap::new(),
            terminal: false,
        }
    }
}

/// The flattened tables produced by [`Builder::build`], ready to hand to
/// [`crate::format::container::write_container`].
pub struct BuiltTables {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub hashes: Vec<u32>,
    pub min_len: u32,
    pub max_len: u32,
}

/// Accumulates a word list, then flattens it into container tables.
pub struct Builder {
    build_nodes: Vec<BuildNode>,
    hashes: Vec<u32>,
    min_len: u32,
    max_len: u32,
    normalize: bool,
}

impl Builder {
    /// A builder that lowercases every inserted word, matching
    /// [`crate::filter::FilterOptions::default`]'s `enable_normalization`.
    pub fn new() -> Self {
        Self::with_normalization(true)
    }

    /// A builder that stores words verbatim, for a dictionary meant to be
    /// matched case-sensitively (`enable_normalization: false`).
    pub fn with_normalization(normalize: bool) -> Self {
        Builder {
            build_nodes: vec![BuildNode::new()],
            hashes: Vec::new(),
            min_len: u32::MAX,
            max_len: 0,
            normalize,
        }
    }

    /// Inserts `word` into the trie and fingerprint set, lowercasing it
    /// first unless this builder was constructed with normalization
    /// disabled. Empty words (after lowering) are skipped: they would
    /// match everywhere and are never a meaningful dictionary entry.
    pub fn insert(&mut self, word: &str) {
        let mut units = Vec::new();
        if self.normalize {
            normalize_str(word, &mut units);
        } else {
            units.extend(word.encode_utf16());
        }
        if units.is_empty() {
            return;
        }

        let mut cur = 0usize;
        for &u in &units {
            let existing = self.build_nodes[cur].children.get(&u).copied();
            let next = match existing {
                Some(idx) => idx,
                None => {
                    self.build_nodes.push(BuildNode::new());
                    let idx = self.build_nodes.len() - 1;
                    self.build_nodes[cur].children.insert(u, idx);
                    idx
                }
            };
            cur = next;
        }
        self.build_nodes[cur].terminal = true;

        let len = units.len() as u32;
        self.min_len = self.min_len.min(len);
        self.max_len = self.max_len.max(len);
        self.hashes.push(crc32_code_units(&units));
    }

    /// Flattens the accumulated trie into sorted, contiguous node and edge
    /// tables, and sorts and dedups the fingerprint list.
    pub fn build(mut self) -> BuiltTables {
        let mut nodes = Vec::with_capacity(self.build_nodes.len());
        let mut edges = Vec::new();

        for build_node in &self.build_nodes {
            let first_edge_index = edges.len() as u32;
            let edge_count = build_node.children.len() as u16;
            nodes.push(Node::new(first_edge_index, edge_count, build_node.terminal));
            for (&label, &child_index) in &build_node.children {
                edges.push(Edge::new(label, child_index as u32));
            }
        }

        self.hashes.sort_unstable();
        self.hashes.dedup();

        let (min_len, max_len) = if self.hashes.is_empty() {
            (0, 0)
        } else {
            (self.min_len, self.max_len)
        };

        BuiltTables {
            nodes,
            edges,
            hashes: self.hashes,
            min_len,
            max_len,
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

/// Strips one layer of matching leading/trailing quotes (`"` or `'`), if
/// present.
fn strip_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' || first == b'\'') && first == last {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Parses a word-list text file: one or more comma-separated entries per
/// line, blank lines and lines whose first non-whitespace character is `#`
/// are ignored, entries are trimmed and quote-stripped, and empty entries
/// are dropped.
pub fn parse_word_list(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        for entry in line.split(',') {
            let entry = strip_quotes(entry.trim());
            if !entry.is_empty() {
                words.push(entry.to_string());
            }
        }
    }
    words
}
