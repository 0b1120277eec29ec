//! Passphrase-to-key derivation.
//!
//! The store key is the SHA-256 digest of the passphrase bytes.  The
//! store file carries no salt, so the same passphrase must always map
//! to the same key.

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// A 32-byte store key that zeroes its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to pass to `encrypt`/`decrypt`).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}

/// Derive the store key from a passphrase.
///
/// Deterministic and infallible.  Any byte string is accepted,
/// including the empty one.
pub fn derive_key(passphrase: &[u8]) -> DerivedKey {
    let mut digest: [u8; KEY_LEN] = Sha256::digest(passphrase).into();
    let key = DerivedKey::new(digest);
    digest.zeroize();
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_sha256_test_vector() {
        // SHA-256("abc") from FIPS 180-2.
        let key = derive_key(b"abc");
        assert_eq!(
            &key.as_bytes()[..4],
            &[0xba, 0x78, 0x16, 0xbf][..],
            "derived key must be the plain SHA-256 digest"
        );
        assert_eq!(key.as_bytes()[KEY_LEN - 1], 0xad);
    }

    #[test]
    fn debug_does_not_leak_key_bytes() {
        let key = derive_key(b"hunter2");
        assert_eq!(format!("{key:?}"), "DerivedKey(..)");
    }
}
