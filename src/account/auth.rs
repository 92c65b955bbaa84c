//! Password hashing

use sha2::{Digest, Sha256};

/// Hash a password with SHA-256 and return lowercase hex.
///
/// Unsalted so that existing account files stay readable.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare a password against a stored hash
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    hash_password(password) == password_hash
}
