//! CRC32 fingerprinting.
//!
//! The dictionary format commits to one polynomial: the reflected IEEE
//! polynomial (0xEDB88320), initial register 0xFFFFFFFF, final XOR
//! 0xFFFFFFFF — the same CRC-32 used by gzip and zlib. A hardware path is
//! permitted only insofar as it computes *this* polynomial; the x86 `CRC32`
//! instruction family computes a different (Castagnoli) polynomial and must
//! never be substituted in, or the builder and matcher silently disagree
//! (see crate root docs, "CRC32 polynomial choice").
//!
//! [`crc32`] dispatches to [`crc32fast`], which folds wide chunks with
//! carry-less multiplication when the host supports it and falls back to a
//! slice-by-8 table otherwise — both compute the IEEE polynomial, never the
//! CRC32 instruction. [`crc32_reference`] is a from-scratch, deliberately
//! simple table implementation kept around as an oracle: the two must always
//! agree bit-for-bit (see `tests::agrees_with_reference`).

use byteorder::{ByteOrder, LE};

const POLY: u32 = 0xEDB8_8320;

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut j = 0;
        while j < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ POLY
            } else {
                crc >> 1
            };
            j += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

static TABLE: [u32; 256] = build_table();

/// Portable, table-based reference CRC32 (reflected IEEE, as specified
/// above). Independent of whatever accelerated backend [`crc32`] uses.
pub fn crc32_reference(bytes: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &b in bytes {
        let idx = ((crc ^ b as u32) & 0xFF) as usize;
        crc = (crc >> 8) ^ TABLE[idx];
    }
    !crc
}

/// Computes the CRC32 fingerprint used throughout the dictionary format.
///
/// Builder and matcher must both call this function (never mix it with
/// [`crc32_reference`] for production data) so that a blob built on one
/// machine verifies identically when matched on another.
pub fn crc32(bytes: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(bytes);
    hasher.finalize()
}

/// Computes the fingerprint of a code-unit slice.
///
/// Code units are reinterpreted as their little-endian byte pairs regardless
/// of host endianness, per the format's byte-reinterpretation contract.
pub fn crc32_code_units(units: &[u16]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    let mut buf = [0u8; 2];
    for &u in units {
        LE::write_u16(&mut buf, u);
        hasher.update(&buf);
    }
    hasher.finalize()
}

/// Reference (non-accelerated) fingerprint of a code-unit slice. Used only
/// to cross-check [`crc32_code_units`] in tests.
pub fn crc32_code_units_reference(units: &[u16]) -> u32 {
    let mut bytes = Vec::with_capacity(units.len() * 2);
    for &u in units {
        bytes.extend_from_slice(&u.to_le_bytes());
    }
    crc32_reference(&bytes)
}
