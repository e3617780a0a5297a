use sha2::{Digest, Sha256};
use uuid::Uuid;

/// One-way digest used for stored passwords.
///
/// The digest is unsalted: the same plaintext always produces the same hex
/// string, so two users with the same password store identical hashes.
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    format!("{:x}", digest)
}

/// Fresh opaque bearer token issued on login
pub fn generate_token() -> String {
    Uuid::new_v4().to_string()
}
