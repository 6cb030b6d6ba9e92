//! # sdiv-cli: Command-Line Tool for Smart Divination
//!
//! ## Subcommands
//!
//! - `sdiv manifests list|validate|verify`: inspect the bundled or a given
//!   manifest file, and check published manifests against their checksums.
//! - `sdiv draw coins|cards|runes`: seeded draws, printed as JSON.
//!
//! ```bash
//! sdiv manifests validate --file packs/manifests.json
//! sdiv manifests verify downloaded-manifest.json
//! sdiv draw coins --seed test-seed-001
//! sdiv draw cards --count 3 --no-reversed
//! ```
//!
//! Handlers return `Result<u8>`: the exit code on a completed run, an error
//! when the run could not complete.

pub mod draw;
pub mod manifests;
