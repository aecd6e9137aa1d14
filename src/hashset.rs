//! The read-only fingerprint set used to verify trie-proposed candidates.

use zerocopy::{LE, U32};

/// A sorted array of CRC32 fingerprints plus the dictionary's word-length
/// bounds, viewed zero-copy over a loaded container.
#[derive(Clone, Copy)]
pub struct FingerprintSet<'a> {
    hashes: &'a [U32<LE>],
    min_len: u32,
    max_len: u32,
}

impl<'a> FingerprintSet<'a> {
    pub fn new(hashes: &'a [U32<LE>], min_len: u32, max_len: u32) -> Self {
        FingerprintSet {
            hashes,
            min_len,
            max_len,
        }
    }

    /// Branchless-friendly binary search over the sorted fingerprint array.
    pub fn contains(&self, h: u32) -> bool {
        self.hashes
            .binary_search_by(|probe| probe.get().cmp(&h))
            .is_ok()
    }

    /// O(1) guard: could a candidate of this length possibly be present?
    pub fn valid_length(&self, n: usize) -> bool {
        if self.hashes.is_empty() {
            return false;
        }
        match u32::try_from(n) {
            Ok(n) => self.min_len <= n && n <= self.max_len,
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn min_len(&self) -> u32 {
        self.min_len
    }

    pub fn max_len(&self) -> u32 {
        self.max_len
    }
}
