//! Derived membership keys.
//!
//! A connection id is not a legal, bounded attribute name, so each membership
//! attribute is named after a 64-bit truncation of the id's digest. Two ids
//! that collide within one channel overwrite each other's entry; at this
//! width the birthday bound keeps that negligible for any realistic channel.

use crate::hash::ContentHasher;

/// Prefix marking membership attributes within a channel record.
pub const MEMBERSHIP_PREFIX: &str = "CONN";

/// Hex chars kept from the digest (16 hex chars = 64 bits).
pub const DIGEST_HEX_LEN: usize = 16;

/// Derive the membership attribute name for a connection id.
pub fn membership_key<H: ContentHasher + ?Sized>(hasher: &H, connection_id: &str) -> String {
    let digest = hasher.compute_hash(connection_id);
    let truncated = digest.get(..DIGEST_HEX_LEN).unwrap_or(&digest);
    format!("{MEMBERSHIP_PREFIX}{truncated}")
}

/// Whether an attribute name is a membership key.
pub fn is_membership_key(attribute: &str) -> bool {
    attribute.starts_with(MEMBERSHIP_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FnvHasher;

    #[test]
    fn key_is_prefixed_and_fixed_width() {
        let key = membership_key(&FnvHasher, "L0SM9cOFvHcCIhw=");
        assert!(key.starts_with("CONN"));
        assert_eq!(key.len(), MEMBERSHIP_PREFIX.len() + DIGEST_HEX_LEN);
    }

    #[test]
    fn key_is_deterministic() {
        assert_eq!(
            membership_key(&FnvHasher, "abc"),
            membership_key(&FnvHasher, "abc")
        );
    }

    #[test]
    fn short_digest_is_kept_whole() {
        struct Short;
        impl ContentHasher for Short {
            fn compute_hash(&self, _content: &str) -> String {
                "ab".to_string()
            }
        }
        assert_eq!(membership_key(&Short, "x"), "CONNab");
    }

    #[test]
    fn non_membership_attributes_are_ignored() {
        assert!(is_membership_key("CONN0123456789abcdef"));
        assert!(!is_membership_key("pk"));
    }
}
