//! AES-256-GCM authenticated encryption of the store blob.
//!
//! Each call to `encrypt` draws a fresh random 12-byte nonce.  The
//! authentication tag is kept detached so the blob has a fixed-size
//! header in front of the payload.
//!
//! Layout of the returned byte buffer:
//!   [ 12-byte nonce | 16-byte auth tag | ciphertext ]

use aes_gcm::aead::{AeadInPlace, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Key, Nonce, Tag};
use zeroize::{Zeroize, Zeroizing};

use super::kdf::KEY_LEN;
use crate::errors::{Result, SecretError};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the AES-256-GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Fixed framing in front of every ciphertext (nonce + tag).
pub const HEADER_LEN: usize = NONCE_LEN + TAG_LEN;

/// Encrypt `plaintext` under a 32-byte `key`.
///
/// Returns `nonce || tag || ciphertext`.  Two calls with the same key
/// and plaintext produce different output.
pub fn encrypt(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    // Never reuse a nonce under the same key.
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    // Reserve room for the tag up front and encrypt the payload in place.
    let mut output = Vec::with_capacity(HEADER_LEN + plaintext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&[0u8; TAG_LEN]);
    output.extend_from_slice(plaintext);

    let tag = match cipher.encrypt_in_place_detached(&nonce, b"", &mut output[HEADER_LEN..]) {
        Ok(tag) => tag,
        Err(e) => {
            // The buffer still holds the plaintext.
            output.zeroize();
            return Err(SecretError::EncryptionFailed(format!(
                "encryption error: {e}"
            )));
        }
    };

    output[NONCE_LEN..HEADER_LEN].copy_from_slice(&tag);
    Ok(output)
}

/// Decrypt a blob produced by `encrypt`.
///
/// Fails with `MalformedInput` when the blob cannot even hold the
/// nonce and tag, and with `IntegrityError` when the tag does not
/// verify (wrong key or modified bytes).
pub fn decrypt(key: &[u8; KEY_LEN], blob: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    if blob.len() < HEADER_LEN {
        return Err(SecretError::MalformedInput {
            len: blob.len(),
            min: HEADER_LEN,
        });
    }

    let (nonce_bytes, rest) = blob.split_at(NONCE_LEN);
    let (tag_bytes, ciphertext) = rest.split_at(TAG_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);
    let tag = Tag::from_slice(tag_bytes);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    // The tag is checked before any plaintext is released.
    let mut buffer = Zeroizing::new(ciphertext.to_vec());
    cipher
        .decrypt_in_place_detached(nonce, b"", buffer.as_mut_slice(), tag)
        .map_err(|_| SecretError::IntegrityError)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framing_is_nonce_then_tag_then_payload() {
        let key = [0x01u8; KEY_LEN];
        let blob = encrypt(&key, b"abc").unwrap();
        assert_eq!(blob.len(), HEADER_LEN + 3);
    }

    #[test]
    fn empty_plaintext_roundtrips() {
        let key = [0x02u8; KEY_LEN];
        let blob = encrypt(&key, b"").unwrap();
        assert_eq!(blob.len(), HEADER_LEN);
        assert!(decrypt(&key, &blob).unwrap().is_empty());
    }

    #[test]
    fn flipped_tag_byte_is_an_integrity_error() {
        let key = [0x03u8; KEY_LEN];
        let mut blob = encrypt(&key, b"payload").unwrap();
        blob[NONCE_LEN] ^= 0x01;
        assert!(matches!(
            decrypt(&key, &blob),
            Err(SecretError::IntegrityError)
        ));
    }

    #[test]
    fn header_only_blob_with_bad_tag_is_an_integrity_error() {
        let key = [0x04u8; KEY_LEN];
        assert!(matches!(
            decrypt(&key, &[0u8; HEADER_LEN]),
            Err(SecretError::IntegrityError)
        ));
    }
}
