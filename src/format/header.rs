//! The 32-byte FCF3 container header.

use byteorder::{ByteOrder, LE};
use fehler::{throw, throws};
use thiserror::Error;

use crate::error::Error;

/// `"FCF3"`, little-endian.
pub const MAGIC: u32 = 0x3346_4346;
/// Highest container version this crate reads or writes.
pub const VERSION: u16 = 3;
pub const HEADER_LEN: usize = 32;

#[derive(Error, Debug, Clone, Copy)]
pub enum HeaderError {
    #[error("container truncated: header needs {HEADER_LEN} bytes, found {0}")]
    Truncated(usize),
    #[error("bad magic: expected {MAGIC:#010x}, found {0:#010x}")]
    BadMagic(u32),
    #[error("unsupported container version {0} (highest known is {VERSION})")]
    UnsupportedVersion(u16),
}

impl From<HeaderError> for Error {
    fn from(e: HeaderError) -> Self {
        match e {
            HeaderError::Truncated(len) => Error::InvalidFormat {
                offset: len,
                reason: "container shorter than the 32-byte header",
            },
            HeaderError::BadMagic(_) => Error::InvalidFormat {
                offset: 0,
                reason: "bad magic",
            },
            HeaderError::UnsupportedVersion(_) => Error::InvalidFormat {
                offset: 4,
                reason: "unsupported container version",
            },
        }
    }
}

/// The fixed-size header fields; `reserved` is validated as present but not
/// otherwise interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub version: u16,
    pub flags: u16,
    pub node_count: u32,
    pub edge_count: u32,
    pub hash_count: u32,
    pub min_len: u32,
    pub max_len: u32,
}

impl Header {
    #[throws(HeaderError)]
    pub fn parse(bytes: &[u8]) -> Self {
        if bytes.len() < HEADER_LEN {
            throw!(HeaderError::Truncated(bytes.len()));
        }

        let magic = LE::read_u32(&bytes[0..4]);
        if magic != MAGIC {
            throw!(HeaderError::BadMagic(magic));
        }

        let version = LE::read_u16(&bytes[4..6]);
        if version > VERSION {
            throw!(HeaderError::UnsupportedVersion(version));
        }

        Header {
            version,
            flags: LE::read_u16(&bytes[6..8]),
            node_count: LE::read_u32(&bytes[8..12]),
            edge_count: LE::read_u32(&bytes[12..16]),
            hash_count: LE::read_u32(&bytes[16..20]),
            min_len: LE::read_u32(&bytes[20..24]),
            max_len: LE::read_u32(&bytes[24..28]),
            // bytes[28..32] is `reserved`, currently unused.
        }
    }

    /// Appends the 32-byte little-endian header encoding to `out`.
    pub fn write(&self, out: &mut Vec<u8>) {
        let mut buf = [0u8; HEADER_LEN];
        LE::write_u32(&mut buf[0..4], MAGIC);
        LE::write_u16(&mut buf[4..6], self.version);
        LE::write_u16(&mut buf[6..8], self.flags);
        LE::write_u32(&mut buf[8..12], self.node_count);
        LE::write_u32(&mut buf[12..16], self.edge_count);
        LE::write_u32(&mut buf[16..20], self.hash_count);
        LE::write_u32(&mut buf[20..24], self.min_len);
        LE::write_u32(&mut buf[24..28], self.max_len);
        LE::write_u32(&mut buf[28..32], 0); // reserved
        out.extend_from_slice(&buf);
    }
}
