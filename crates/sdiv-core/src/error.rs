//! # Error Types
//!
//! Shared error hierarchy. All errors use `thiserror` for derive-based
//! `Display` and `Error` implementations.

use thiserror::Error;

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in checksummed records.
    #[error("float values are not permitted in canonical representations; use an integer: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error parsing a `"<algorithm>:<hex>"` digest string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DigestParseError {
    /// No `algorithm:` prefix.
    #[error("digest {0:?} has no algorithm tag")]
    MissingTag(String),

    /// Tag names an algorithm this crate does not compute.
    #[error("unknown digest algorithm {0:?}")]
    UnknownAlgorithm(String),

    /// Hex part is not 64 characters long.
    #[error("digest must have 64 hex characters, got {0}")]
    InvalidLength(usize),

    /// Hex part contains characters outside `[0-9a-f]`.
    #[error("digest contains invalid hex: {0}")]
    InvalidHex(String),
}
