//! Content addressing for specification text.
//!
//! SHA-1 is used for speed and a short stable key. It is a deduplication
//! key, not a security boundary.

use sha1::{Digest, Sha1};
use std::fmt;

/// Lowercase hexadecimal SHA-1 digest of a specification text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Length of the hex representation (160 bits).
    pub const HEX_LEN: usize = 40;

    /// Compute the digest of the raw text bytes.
    pub fn of(text: &str) -> Self {
        Self(hex::encode(Sha1::digest(text.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            ContentDigest::of("").as_str(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
        assert_eq!(
            ContentDigest::of("abc").as_str(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn test_deterministic() {
        let text = "endpoint GetTodos GET /todos -> { 200 -> Todo[] }";
        let first = ContentDigest::of(text);
        for _ in 0..10 {
            assert_eq!(ContentDigest::of(text), first);
        }
    }

    #[test]
    fn test_single_byte_difference() {
        let a = ContentDigest::of("type Todo { done: Boolean }");
        let b = ContentDigest::of("type Todo { done: Boolean } ");
        assert_ne!(a, b);
    }

    #[test]
    fn test_lowercase_hex_shape() {
        let digest = ContentDigest::of("type Name /^[a-z]+$/g");
        assert_eq!(digest.as_str().len(), ContentDigest::HEX_LEN);
        assert!(digest
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_eq!(digest.to_string(), digest.as_str());
    }
}
