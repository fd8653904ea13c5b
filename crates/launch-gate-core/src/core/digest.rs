// crates/launch-gate-core/src/core/digest.rs
// ============================================================================
// Module: Launch Gate Content Digests
// Description: RFC 8785 JSON canonicalization and content hashing.
// Purpose: Provide deterministic catalog digests for evaluation provenance.
// Dependencies: serde, serde_jcs, sha2, thiserror
// ============================================================================

//! ## Overview
//! Evaluation results record a digest of the rule catalog they were produced
//! against, so a stored verdict can be tied back to the exact catalog
//! revision. Canonical JSON (RFC 8785 / JCS) guarantees the digest is stable
//! across serializer field ordering.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when computing content digests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigestError {
    /// JSON canonicalization failed.
    #[error("failed to canonicalize json: {0}")]
    Canonicalization(String),
}

// ============================================================================
// SECTION: Content Digest
// ============================================================================

/// SHA-256 digest of a canonically serialized value.
///
/// # Invariants
/// - Wire form is `sha256:` followed by the lowercase hex digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Computes the digest of a value over its RFC 8785 canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Canonicalization`] when serialization fails.
    pub fn of<T: Serialize + ?Sized>(value: &T) -> Result<Self, DigestError> {
        let bytes =
            serde_jcs::to_vec(value).map_err(|err| DigestError::Canonicalization(err.to_string()))?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(Self(format!("sha256:{}", hex_encode(&hasher.finalize()))))
    }

    /// Returns the digest in its `sha256:<hex>` wire form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Hex Encoding
// ============================================================================

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[usize::from(byte >> 4)] as char);
        out.push(HEX[usize::from(byte & 0x0f)] as char);
    }
    out
}
