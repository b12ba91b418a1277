//! Shared-password gate.
//!
//! The desk has one password for everyone. Only its SHA-256 digest lives in
//! source; submitted passwords are hashed and compared against it.

use sha2::{Digest, Sha256};

/// Hex SHA-256 digest of the shared desk password.
pub const PASSWORD_DIGEST: &str =
    "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9";

#[derive(Debug, Clone)]
pub struct AuthGate {
    digest: String,
}

impl Default for AuthGate {
    fn default() -> Self {
        Self::with_digest(PASSWORD_DIGEST)
    }
}

impl AuthGate {
    pub fn with_digest(hex_digest: &str) -> Self {
        Self {
            digest: hex_digest.to_ascii_lowercase(),
        }
    }

    pub fn verify(&self, password: &str) -> bool {
        hash_password(password) == self.digest
    }
}

/// Lowercase hex SHA-256 of `password`.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}
