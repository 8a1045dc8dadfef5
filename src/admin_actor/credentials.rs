use sha2::{Digest, Sha256};
use uuid::Uuid;

pub const MIN_PASSWORD_LEN: usize = 8;

pub fn new_salt() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn new_session_token() -> String {
    Uuid::new_v4().to_string()
}

/// Hex SHA-256 of `salt:password`. A single round, so this is not a
/// password-hardening KDF; a stolen account table is cheap to brute force.
pub fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn verify(salt: &str, password: &str, expected_digest: &str) -> bool {
    constant_time_eq(digest(salt, password).as_bytes(), expected_digest.as_bytes())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
