//! Seed generation for draws the caller did not seed.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

use crate::error::DrawError;

/// Shortest caller-supplied seed accepted by card and rune draws, in
/// UTF-16 code units.
pub const MIN_SEED_LENGTH: usize = 4;

/// Bytes of entropy in a generated seed. Rendered as lowercase hex.
pub const SEED_BYTES: usize = 16;

/// A fresh seed: 16 bytes from the OS entropy source as 32 lowercase hex
/// characters. Falls back to a time-seeded PRNG only if the OS source
/// reports an error.
pub fn generate_seed() -> String {
    let mut bytes = [0u8; SEED_BYTES];
    if OsRng.try_fill_bytes(&mut bytes).is_err() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        StdRng::seed_from_u64(nanos).fill_bytes(&mut bytes);
    }
    to_hex(&bytes)
}

/// Caller-supplied seed if non-empty, otherwise a generated one.
pub fn resolve_seed(seed: Option<String>) -> String {
    match seed {
        Some(s) if !s.is_empty() => s,
        _ => generate_seed(),
    }
}

/// Like [`resolve_seed`], but rejects a supplied seed shorter than
/// [`MIN_SEED_LENGTH`].
pub fn resolve_checked_seed(seed: Option<String>) -> Result<String, DrawError> {
    if let Some(s) = &seed {
        if !s.is_empty() && s.encode_utf16().count() < MIN_SEED_LENGTH {
            return Err(DrawError::SeedTooShort {
                min: MIN_SEED_LENGTH,
            });
        }
    }
    Ok(resolve_seed(seed))
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
