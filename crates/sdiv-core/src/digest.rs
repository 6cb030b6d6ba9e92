//! # Content Digest
//!
//! `ContentDigest` is the algorithm-tagged hash carried by every pack
//! manifest as its `checksum` field, rendered as `"sha256:<64 hex chars>"`.
//!
//! ## Security Invariant
//!
//! Digests can only be computed from `CanonicalBytes`, so two logically
//! equal records always hash identically regardless of key order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::DigestParseError;

/// The hash algorithm used to produce a content digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// SHA-256, the only algorithm pack checksums use.
    Sha256,
}

impl DigestAlgorithm {
    /// Returns the algorithm tag used in the string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = DigestParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(Self::Sha256),
            other => Err(DigestParseError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// A content-addressed digest with its algorithm tag.
///
/// Serializes as the string `"<algorithm>:<hex>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentDigest {
    algorithm: DigestAlgorithm,
    bytes: [u8; 32],
}

impl ContentDigest {
    /// Create a content digest from raw bytes and algorithm.
    ///
    /// Prefer [`sha256_digest()`] when hashing a record.
    pub fn new(algorithm: DigestAlgorithm, bytes: [u8; 32]) -> Self {
        Self { algorithm, bytes }
    }

    /// The algorithm that produced this digest.
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Render the digest as a lowercase hex string, without the tag.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

impl FromStr for ContentDigest {
    type Err = DigestParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, hex) = s
            .split_once(':')
            .ok_or_else(|| DigestParseError::MissingTag(s.to_string()))?;
        let algorithm = tag.parse::<DigestAlgorithm>()?;
        if hex.len() != 64 {
            return Err(DigestParseError::InvalidLength(hex.len()));
        }
        // Lowercase only: uppercase would not render back to the stored string.
        if !hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(DigestParseError::InvalidHex(hex.to_string()));
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            bytes[i] = (nibble(chunk[0]) << 4) | nibble(chunk[1]);
        }
        Ok(Self::new(algorithm, bytes))
    }
}

fn nibble(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        _ => b - b'a' + 10,
    }
}

impl TryFrom<String> for ContentDigest {
    type Error = DigestParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ContentDigest> for String {
    fn from(value: ContentDigest) -> Self {
        value.to_string()
    }
}

/// Compute a SHA-256 content digest from canonical bytes.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    let hash = Sha256::digest(data.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest::new(DigestAlgorithm::Sha256, bytes)
}

/// Compute a SHA-256 hex string from canonical bytes.
pub fn sha256_hex(data: &CanonicalBytes) -> String {
    sha256_digest(data).to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        let cb = CanonicalBytes::new(&serde_json::json!({"id": "tarot", "version": "1.0.0"}))
            .unwrap();
        assert_eq!(sha256_digest(&cb), sha256_digest(&cb));
        assert_eq!(sha256_digest(&cb).algorithm(), DigestAlgorithm::Sha256);
    }

    #[test]
    fn display_has_tag_and_64_hex_chars() {
        let cb = CanonicalBytes::new(&serde_json::json!({"a": 1})).unwrap();
        let s = sha256_digest(&cb).to_string();
        assert!(s.starts_with("sha256:"));
        assert_eq!(s.len(), 7 + 64);
        assert!(s[7..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn known_vector_for_empty_object() {
        let cb = CanonicalBytes::new(&serde_json::json!({})).unwrap();
        assert_eq!(
            sha256_hex(&cb),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn parse_roundtrips_display() {
        let cb = CanonicalBytes::new(&serde_json::json!({"id": "runes"})).unwrap();
        let digest = sha256_digest(&cb);
        let parsed: ContentDigest = digest.to_string().parse().unwrap();
        assert_eq!(parsed, digest);
    }

    #[test]
    fn serializes_as_tagged_string() {
        let cb = CanonicalBytes::new(&serde_json::json!({})).unwrap();
        let json = serde_json::to_string(&sha256_digest(&cb)).unwrap();
        assert_eq!(
            json,
            "\"sha256:44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a\""
        );
        let back: ContentDigest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sha256_digest(&cb));
    }

    #[test]
    fn parse_rejects_malformed_strings() {
        assert!(matches!(
            "abc".parse::<ContentDigest>(),
            Err(DigestParseError::MissingTag(_))
        ));
        assert!(matches!(
            "md5:abcd".parse::<ContentDigest>(),
            Err(DigestParseError::UnknownAlgorithm(_))
        ));
        assert!(matches!(
            "sha256:a1b2c3d4e5f6".parse::<ContentDigest>(),
            Err(DigestParseError::InvalidLength(12))
        ));
        let bad_hex = format!("sha256:{}", "zz".repeat(32));
        assert!(matches!(
            bad_hex.parse::<ContentDigest>(),
            Err(DigestParseError::InvalidHex(_))
        ));
        let upper = format!("sha256:{}", "AB".repeat(32));
        assert!(upper.parse::<ContentDigest>().is_err());
    }

    #[test]
    fn different_inputs_different_digests() {
        let a = CanonicalBytes::new(&serde_json::json!({"premium_required": true})).unwrap();
        let b = CanonicalBytes::new(&serde_json::json!({"premium_required": false})).unwrap();
        assert_ne!(sha256_digest(&a), sha256_digest(&b));
    }
}
