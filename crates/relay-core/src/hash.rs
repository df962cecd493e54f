//! ContentHasher trait for deriving fixed-width digests.
//!
//! Defined in relay-core so the membership registry can derive storage keys
//! without coupling to a specific hashing algorithm. The
//! `Sha256ContentHasher` adapter lives in relay-infra.

/// Abstraction over content hashing.
pub trait ContentHasher: Send + Sync {
    /// Compute a lowercase hex-encoded hash of the given content.
    fn compute_hash(&self, content: &str) -> String;
}
