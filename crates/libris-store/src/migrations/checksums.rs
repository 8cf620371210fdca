//! Checksums recorded alongside each applied migration

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of the migration SQL
pub fn compute_checksum(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
