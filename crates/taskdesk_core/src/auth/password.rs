//! Credential digests.
//!
//! Unsalted SHA-256 hex digests, kept deliberately compatible with the
//! existing `users.password_hash` column contents. Known weakness: no salt,
//! no stretching, no lockout.

use sha2::{Digest, Sha256};

/// Computes the deterministic digest stored for one password.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Recomputes the digest of `password` and compares it to the stored value.
pub fn verify_digest(password: &str, stored_digest: &str) -> bool {
    hash_password(password) == stored_digest
}
