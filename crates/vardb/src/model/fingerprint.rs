//! Content fingerprints for encoded stores.
//!
//! A fingerprint is the SHA-256 digest of a store's canonical encoding, used
//! to tell whether an edited tree would serialize differently than when it
//! was loaded.

use std::fmt;

use sha2::{Digest, Sha256};

/// SHA-256 digest of an encoded variable store.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Computes the fingerprint of encoded bytes.
    pub fn of(bytes: &[u8]) -> Self {
        let hash = Sha256::digest(bytes);
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&hash);
        Self(digest)
    }

    /// Returns the raw digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        // SHA-256 of the empty string
        assert_eq!(
            Fingerprint::of(b"").to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_distinct_inputs() {
        assert_ne!(Fingerprint::of(b"T"), Fingerprint::of(b"S"));
        assert_eq!(Fingerprint::of(b"abc"), Fingerprint::of(b"abc"));
    }
}
