//! SHA-256 content hashing for membership key derivation.
//!
//! Implements the `ContentHasher` trait from `relay-core` using the
//! `sha2` crate (RustCrypto ecosystem).

use sha2::{Digest, Sha256};

use relay_core::hash::ContentHasher;

/// SHA-256 implementation of `ContentHasher`.
///
/// Computes lowercase hex-encoded SHA-256 digests. The membership registry
/// keeps the first 64 bits.
#[derive(Debug, Clone, Copy)]
pub struct Sha256ContentHasher;

impl Sha256ContentHasher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Sha256ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentHasher for Sha256ContentHasher {
    fn compute_hash(&self, content: &str) -> String {
        let digest = Sha256::digest(content.as_bytes());
        format!("{:x}", digest)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use relay_core::membership::key::membership_key;

    use super::*;

    #[test]
    fn test_sha256_hash_known_value() {
        let hasher = Sha256ContentHasher::new();
        // SHA-256 of empty string
        let hash = hasher.compute_hash("");
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_membership_key_is_deterministic() {
        let hasher = Sha256ContentHasher::new();
        let first = membership_key(&hasher, "L0SM9cOFvHcCIhw=");
        let second = membership_key(&hasher, "L0SM9cOFvHcCIhw=");
        assert_eq!(first, second);
        assert_eq!(first, format!("CONN{}", &hasher.compute_hash("L0SM9cOFvHcCIhw=")[..16]));
    }

    #[test]
    fn test_membership_keys_do_not_collide_in_realistic_corpus() {
        let hasher = Sha256ContentHasher::new();
        let keys: HashSet<String> = (0..10_000)
            .map(|i| membership_key(&hasher, &format!("conn-{i:08}-{}=", i * 7919)))
            .collect();
        assert_eq!(keys.len(), 10_000);
    }

    #[test]
    fn test_membership_key_is_legal_attribute_name() {
        let hasher = Sha256ContentHasher::new();
        let key = membership_key(&hasher, "weird id with spaces/and#symbols");
        assert_eq!(key.len(), 20);
        assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
