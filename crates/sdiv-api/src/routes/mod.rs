//! # API Route Modules
//!
//! - `draw`: seeded coin, card, and rune draws.
//! - `packs`: content-pack manifests and the load-time issue log.

pub mod draw;
pub mod packs;
