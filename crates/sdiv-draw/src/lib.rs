//! # sdiv-draw: Seeded Divination Draws
//!
//! Every draw is a pure function of its seed and parameters, so a result
//! can be re-derived later from the seed it reports.
//!
//! - **I Ching** (`iching.rs`): FNV-1a + mulberry32 coin lines, primary and
//!   resulting hexagrams.
//! - **Tarot** (`tarot.rs`) and **runes** (`runes.rs`): unique symbol draws
//!   over a seeded LCG stream, with optional reversals.
//! - **Codec** (`codec.rs`): the integer form symbols travel in.
//!
//! ## Crate Policy
//!
//! - No internal dependencies, no I/O, no shared state.
//! - Generators use explicit wrapping integer arithmetic, never a library
//!   RNG, so results match other clients bit for bit. `rand` is used only
//!   as an entropy source for unseeded draws.

pub mod codec;
pub mod error;
pub mod iching;
pub mod rng;
pub mod runes;
pub mod seed;
pub mod tarot;

pub use error::DrawError;
pub use iching::{DrawRequest, DrawResult};
pub use seed::generate_seed;
