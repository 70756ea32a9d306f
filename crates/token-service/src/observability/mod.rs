//! Observability for the token issuance service.
//!
//! Instrumentation never logs raw participant identities or room names;
//! fields that need correlation across log entries are hashed first.

pub mod metrics;

use sha2::{Digest, Sha256};

/// Hash a field value for correlation in logs (SHA-256, first 8 hex chars)
///
/// Used for fields like `identity` and `roomName` that need correlation
/// across log entries but should not be stored in plaintext.
///
/// This is a one-way hash for correlation purposes only, not a secrecy
/// mechanism; the truncation to 8 chars gives enough uniqueness for
/// debugging while limiting reversibility.
pub fn hash_for_correlation(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    // First 8 hex chars (32 bits) - enough for correlation
    hex::encode(&result[..4])
}
