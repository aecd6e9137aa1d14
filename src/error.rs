//! The structured error taxonomy shared by every fallible operation in this crate.
//!
//! Matching itself never fails — an absent dictionary or empty input simply
//! yields `false` / `0` (see [`crate::filter::Filter`]). Errors only arise
//! from loading and validating a container, or from misuse of an API
//! contract (an undersized normalization buffer, a missing builder path).

use thiserror::Error;

/// Everything that can go wrong outside the hot matching path.
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying storage or stream error while loading a dictionary.
    #[error("I/O error loading dictionary: {0}")]
    Io(#[from] std::io::Error),

    /// Bad magic, unsupported version, truncated blob, or a size mismatch
    /// between the header's declared counts and the actual blob length.
    #[error("invalid dictionary container at offset {offset}: {reason}")]
    InvalidFormat { offset: usize, reason: &'static str },

    /// A caller-supplied argument violates an API contract (missing path,
    /// undersized normalization destination, and similar).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// An internal node or edge index fell outside the bounds a validated
    /// container guarantees. Indicates a bug, not a malformed input.
    #[error("internal index out of range: {0}")]
    OutOfRange(&'static str),
}
