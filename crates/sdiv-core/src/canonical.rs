//! # Canonical Serialization
//!
//! Defines `CanonicalBytes`, the only construction path for bytes that feed
//! a content digest.
//!
//! ## Rules
//!
//! 1. Object keys are sorted lexicographically at every depth.
//! 2. Arrays keep their order; elements are canonicalized recursively.
//! 3. Strings, booleans, integers and `null` pass through unchanged.
//! 4. Non-integer numbers are rejected. Pack data carries counts and sizes
//!    as integers, and a float in a checksummed record is a data bug.
//!
//! Serialization uses `serde_jcs` (RFC 8785): sorted keys, compact
//! separators, minimal string escaping. For the key sets used by pack
//! manifests this is byte-identical to `JSON.stringify` over an object whose
//! keys were inserted in sorted order, which is how the mobile clients
//! recompute checksums.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by key-sorted, compact JSON serialization.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - All object keys are sorted; arrays preserve order.
/// - No floating-point numbers appear in the output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(String);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::FloatRejected` if the value contains a
    /// non-integer number, `CanonicalizationError::SerializationFailed` if
    /// the value cannot be represented as JSON.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        let checked = reject_floats(value)?;
        let s = serde_jcs::to_string(&checked)?;
        Ok(Self(s))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// The canonical JSON text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

fn reject_floats(value: Value) -> Result<Value, CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(value),
        Value::Number(ref n) => {
            if n.is_f64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(value)
        }
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (k, v) in map {
                out.insert(k, reject_floats(v)?);
            }
            Ok(Value::Object(out))
        }
        Value::Array(arr) => {
            let checked: Result<Vec<_>, _> = arr.into_iter().map(reject_floats).collect();
            Ok(Value::Array(checked?))
        }
    }
}
