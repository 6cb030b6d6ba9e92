//! # sdiv-core: Foundational Types for Smart Divination
//!
//! Leaf crate of the workspace. Every other `sdiv-*` crate may depend on it;
//! it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** Every checksum in the system is computed
//!    over bytes produced by `CanonicalBytes::new()`: recursively key-sorted,
//!    compact JSON. No raw `serde_json::to_vec()` feeds a digest.
//!
//! 2. **`sha256_digest()` accepts only `&CanonicalBytes`.** The signature
//!    forces all digest paths through canonicalization.
//!
//! 3. **Self-describing digests.** `ContentDigest` renders and parses as
//!    `"<algorithm>:<hex>"`, the format pack manifests carry on the wire.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sdiv-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;

pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, sha256_hex, ContentDigest, DigestAlgorithm};
pub use error::{CanonicalizationError, DigestParseError};
