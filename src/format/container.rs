//! The binary container: a 32-byte header followed by the node table, edge
//! table, and hash table, each a flat run of fixed-size little-endian
//! records. [`Container::parse`] validates a loaded blob once and hands back
//! zero-copy views over it; [`write_container`] is the builder's write path.

use byteorder::{WriteBytesExt, LE as ByteOrderLE};
use std::io::{self, Write};
use zerocopy::{AsBytes, LE, U32};

use crate::error::Error;
use crate::format::header::{Header, HEADER_LEN, VERSION};
use crate::hashset::FingerprintSet;
use crate::trie::{Edge, Node, TrieStore, EDGE_RECORD_LEN, NODE_RECORD_LEN};

const HASH_RECORD_LEN: usize = 4;

/// A validated view over an in-memory dictionary blob. Borrows the blob for
/// its lifetime; parsing performs no deep copy, only bounds checking and
/// slice projection.
pub struct Container<'a> {
    header: Header,
    nodes: &'a [Node],
    edges: &'a [Edge],
    hashes: &'a [U32<LE>],
}

/// The result of validating a blob once: the header plus the byte offsets of
/// each table within it. A caller that holds onto a `ContainerLayout` (a
/// long-lived [`crate::filter::Filter`], say) can re-derive a [`Container`]
/// view as many times as it likes via [`ContainerLayout::view`] without
/// repeating header parsing, size arithmetic, or the edge bounds check —
/// those only ever run in [`ContainerLayout::compute`].
pub struct ContainerLayout {
    header: Header,
    node_start: usize,
    edge_start: usize,
    hash_start: usize,
    hash_end: usize,
}

impl ContainerLayout {
    /// Validates `bytes` as a well-formed container: header fields,
    /// overflow-checked table-size arithmetic, and that every edge's child
    /// index is in bounds. This is the only place that work happens.
    pub fn compute(bytes: &[u8]) -> Result<Self, Error> {
        let header = Header::parse(bytes)?;

        if header.node_count == 0 {
            return Err(Error::InvalidFormat {
                offset: HEADER_LEN,
                reason: "node table must contain at least the root",
            });
        }

        let node_region_len = header.node_count as usize * NODE_RECORD_LEN;
        let edge_region_len = header.edge_count as usize * EDGE_RECORD_LEN;
        let hash_region_len = header.hash_count as usize * HASH_RECORD_LEN;

        let needed = HEADER_LEN
            .checked_add(node_region_len)
            .and_then(|v| v.checked_add(edge_region_len))
            .and_then(|v| v.checked_add(hash_region_len))
            .ok_or(Error::InvalidFormat {
                offset: HEADER_LEN,
                reason: "declared table sizes overflow",
            })?;

        if bytes.len() < needed {
            return Err(Error::InvalidFormat {
                offset: bytes.len(),
                reason: "blob shorter than header-declared table sizes",
            });
        }

        let node_start = HEADER_LEN;
        let edge_start = node_start + node_region_len;
        let hash_start = edge_start + edge_region_len;
        let hash_end = hash_start + hash_region_len;

        let edges: &[Edge] = zerocopy::Ref::new_slice_unaligned(&bytes[edge_start..hash_start])
            .ok_or(Error::InvalidFormat {
                offset: edge_start,
                reason: "edge table misaligned or mis-sized",
            })?
            .into_slice();

        for edge in edges {
            if edge.child_index() as usize >= header.node_count as usize {
                return Err(Error::OutOfRange("edge child_index exceeds node_count"));
            }
        }

        Ok(ContainerLayout {
            header,
            node_start,
            edge_start,
            hash_start,
            hash_end,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Re-slices `bytes` into the regions already validated by
    /// [`ContainerLayout::compute`]. `bytes` must be the same blob (or an
    /// identical copy of it) that was passed to `compute` — this performs no
    /// re-validation, only pointer arithmetic and the fixed-size check
    /// `zerocopy`'s `Unaligned` slice projection always does.
    pub fn view<'a>(&self, bytes: &'a [u8]) -> Container<'a> {
        let nodes: &[Node] =
            zerocopy::Ref::new_slice_unaligned(&bytes[self.node_start..self.edge_start])
                .expect("region length already validated by ContainerLayout::compute")
                .into_slice();
        let edges: &[Edge] =
            zerocopy::Ref::new_slice_unaligned(&bytes[self.edge_start..self.hash_start])
                .expect("region length already validated by ContainerLayout::compute")
                .into_slice();
        let hashes: &[U32<LE>] =
            zerocopy::Ref::new_slice_unaligned(&bytes[self.hash_start..self.hash_end])
                .expect("region length already validated by ContainerLayout::compute")
                .into_slice();

        Container {
            header: self.header,
            nodes,
            edges,
            hashes,
        }
    }
}

impl<'a> Container<'a> {
    /// Validates `bytes` and projects it into node/edge/hash views in one
    /// step. Callers that will query the same blob repeatedly (like
    /// [`crate::filter::Filter`]) should instead keep a [`ContainerLayout`]
    /// around and call [`ContainerLayout::view`] per query, so validation
    /// only happens once.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, Error> {
        let layout = ContainerLayout::compute(bytes)?;
        Ok(layout.view(bytes))
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn trie(&self) -> TrieStore<'a> {
        TrieStore::new(self.nodes, self.edges)
    }

    pub fn hash_set(&self) -> FingerprintSet<'a> {
        FingerprintSet::new(self.hashes, self.header.min_len, self.header.max_len)
    }
}

/// Serializes `(nodes, edges, hashes, min_len, max_len)` as a version-3 FCF3
/// container: header, then node records, then edge records, then ascending
/// hash entries, all little-endian (see module docs).
pub fn write_container<W: Write>(
    writer: &mut W,
    nodes: &[Node],
    edges: &[Edge],
    hashes: &[u32],
    min_len: u32,
    max_len: u32,
) -> io::Result<()> {
    let header = Header {
        version: VERSION,
        flags: 0,
        node_count: nodes.len() as u32,
        edge_count: edges.len() as u32,
        hash_count: hashes.len() as u32,
        min_len,
        max_len,
    };
    let mut head_bytes = Vec::with_capacity(HEADER_LEN);
    header.write(&mut head_bytes);
    writer.write_all(&head_bytes)?;

    for n in nodes {
        writer.write_all(n.as_bytes())?;
    }
    for e in edges {
        writer.write_all(e.as_bytes())?;
    }
    for &h in hashes {
        writer.write_u32::<ByteOrderLE>(h)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_small_trie() {
        // root -(b)-> 1*, spelling "b"
        let nodes = vec![Node::new(0, 1, false), Node::new(0, 0, true)];
        let edges = vec![Edge::new(b'b' as u16, 1)];

        let mut bytes = Vec::new();
        write_container(&mut bytes, &nodes, &edges, &[42], 1, 1).unwrap();

        let container = Container::parse(&bytes).unwrap();
        assert_eq!(container.header().node_count, 2);
        assert_eq!(container.header().edge_count, 1);
        assert_eq!(container.header().hash_count, 1);

        let trie = container.trie();
        let child = trie.child(trie.root(), b'b' as u16).unwrap();
        assert!(trie.node(child).is_terminal());

        let hashes = container.hash_set();
        assert!(hashes.contains(42));
        assert!(!hashes.contains(43));
    }

    #[test]
    fn rejects_truncated_tables() {
        let nodes = vec![Node::new(0, 0, true)];
        let mut bytes = Vec::new();
        write_container(&mut bytes, &nodes, &[], &[], 0, 0).unwrap();
        bytes.truncate(bytes.len() - 1);
        assert!(Container::parse(&bytes).is_err());
    }

    #[test]
    fn empty_dictionary_has_only_root() {
        let nodes = vec![Node::new(0, 0, false)];
        let mut bytes = Vec::new();
        write_container(&mut bytes, &nodes, &[], &[], 0, 0).unwrap();
        let container = Container::parse(&bytes).unwrap();
        assert_eq!(container.trie().node_count(), 1);
        assert!(container.hash_set().is_empty());
    }

    #[test]
    fn layout_view_can_be_called_repeatedly_without_revalidating() {
        let nodes = vec![Node::new(0, 1, false), Node::new(0, 0, true)];
        let edges = vec![Edge::new(b'b' as u16, 1)];
        let mut bytes = Vec::new();
        write_container(&mut bytes, &nodes, &edges, &[42], 1, 1).unwrap();

        let layout = ContainerLayout::compute(&bytes).unwrap();
        for _ in 0..3 {
            let container = layout.view(&bytes);
            let trie = container.trie();
            let child = trie.child(trie.root(), b'b' as u16).unwrap();
            assert!(trie.node(child).is_terminal());
            assert!(container.hash_set().contains(42));
        }
    }
}
