//! # sdiv-pack: Content-Pack Manifest Registry
//!
//! Downloadable content packs (tarot decks, I Ching texts, rune sets) are
//! described by manifests bundled with the backend. This crate owns:
//!
//! - **Manifest types** (`manifest.rs`): strict record types and the
//!   content checksum that clients use to detect tampered or stale packs.
//!
//! - **Validation** (`validation.rs`): per-definition rules applied at load
//!   time, each yielding an error or warning issue.
//!
//! - **Registry** (`registry.rs`): the immutable id-indexed table, built once
//!   under a strict or lenient [`ValidationMode`].
//!
//! ## Crate Policy
//!
//! - Depends only on `sdiv-core` internally.
//! - Pure and synchronous apart from reading an override manifest file.
//! - No logging: callers decide how to report issues.

pub mod error;
pub mod manifest;
pub mod registry;
pub mod validation;

pub use error::PackError;
pub use manifest::{compute_checksum, PackManifest, PackManifestDefinition, Technique};
pub use registry::{ManifestRegistry, ValidationMode};
pub use validation::{validate_definition, ManifestValidationIssue, Severity};
